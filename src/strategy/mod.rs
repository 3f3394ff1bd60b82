//! Remote vs. local pagination.
//!
//! A server-paginated list has two ways to change page: ask the server for
//! another page, or page through the rows already on the client. Which one
//! applies depends on whether a search is active, because a search filters
//! the rows the client holds:
//!
//! - no non-blank query: [`RemotePaginationStrategy`] delegates to
//!   [`DataSource::update_pagination`] and counts come from the server;
//! - any non-blank query: [`LocalPaginationStrategy`] pages the
//!   controller's filtered rows. Only the last fetched server page is
//!   filtered, never the whole remote dataset.
//!
//! [`HybridPaginator`] makes that choice on every request so views do not
//! repeat the branch.

use crate::model::{InputError, PageNumber, Row, RowsPerPage};
use crate::state::{ListController, PaginationState};

pub mod hybrid;
pub mod local;
pub mod remote;

pub use hybrid::HybridPaginator;
pub use local::LocalPaginationStrategy;
pub use remote::RemotePaginationStrategy;

// ===== DataSource =====

/// Supplier of rows, optionally paginated by a server.
pub trait DataSource {
    /// Row type served.
    type Row: Row;

    /// Rows currently held on the client.
    fn rows(&self) -> &[Self::Row];

    /// Server pagination descriptor, or `None` for fully local data.
    fn remote(&self) -> Option<RemotePagination>;

    /// Request page `api_page` (0-based) of `api_size` rows.
    ///
    /// # Errors
    ///
    /// Implementation-defined; in-memory sources reject a size of 0.
    fn update_pagination(&mut self, api_page: usize, api_size: usize) -> Result<(), InputError>;
}

/// A plain vector is a fully local source.
impl<T: Row> DataSource for Vec<T> {
    type Row = T;

    fn rows(&self) -> &[T] {
        self
    }

    fn remote(&self) -> Option<RemotePagination> {
        None
    }

    fn update_pagination(&mut self, _api_page: usize, _api_size: usize) -> Result<(), InputError> {
        Ok(())
    }
}

// ===== RemotePagination =====

/// Pagination reported by a server. Supplied and advanced by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemotePagination {
    /// 0-based page index.
    pub api_page: usize,
    /// Page size requested.
    pub api_size: usize,
    /// Row count across all pages.
    pub api_total_elements: usize,
    /// Page count reported by the server.
    pub api_total_pages: usize,
}

impl RemotePagination {
    /// Counts to display while pagination is delegated to the server.
    pub fn to_pagination_state(&self) -> PaginationState {
        let rows_per_page = RowsPerPage::new(self.api_size).unwrap_or_default();
        let size = rows_per_page.get();
        let total_rows = self.api_total_elements;
        let start_item = if total_rows > 0 {
            self.api_page.saturating_mul(size).saturating_add(1)
        } else {
            0
        };
        let end_item = self
            .api_page
            .saturating_add(1)
            .saturating_mul(size)
            .min(total_rows);

        PaginationState {
            page: PageNumber::from_zero_based(self.api_page),
            rows_per_page,
            total_rows,
            total_pages: self.api_total_pages,
            start_item,
            end_item,
        }
    }
}

// ===== PaginationStrategy =====

/// Which side performs pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// The server pages; the client shows one server page.
    Remote,
    /// The client pages its filtered rows.
    Local,
}

/// One way of handling page and page-size requests.
pub trait PaginationStrategy<S: DataSource> {
    /// Which mode this strategy implements.
    fn mode(&self) -> PaginationMode;

    /// Move to `page`.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    fn change_page(
        &self,
        controller: &mut ListController<S::Row>,
        source: &mut S,
        page: PageNumber,
    ) -> Result<(), InputError>;

    /// Change the page size; implies a return to the first page.
    ///
    /// # Errors
    ///
    /// Propagates source failures.
    fn change_rows_per_page(
        &self,
        controller: &mut ListController<S::Row>,
        source: &mut S,
        rows_per_page: RowsPerPage,
    ) -> Result<(), InputError>;

    /// Counts the view must display.
    fn pagination(&self, controller: &ListController<S::Row>, source: &S) -> PaginationState;
}
