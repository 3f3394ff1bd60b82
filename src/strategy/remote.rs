//! Server-side pagination.

use tracing::debug;

use super::{DataSource, LocalPaginationStrategy, PaginationMode, PaginationStrategy};
use crate::model::{InputError, PageNumber, RowsPerPage};
use crate::state::{ListController, PaginationState};

/// Delegates page requests to the data source.
///
/// After each fetch the controller receives the new server page and its
/// page size is kept equal to the server's, so the controller shows the
/// whole server page on its first local page.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemotePaginationStrategy;

impl RemotePaginationStrategy {
    fn fetch<S>(
        controller: &mut ListController<S::Row>,
        source: &mut S,
        api_page: usize,
        rows_per_page: RowsPerPage,
    ) -> Result<(), InputError>
    where
        S: DataSource,
        S::Row: Clone,
    {
        debug!(api_page, api_size = rows_per_page.get(), "Requesting server page");
        source.update_pagination(api_page, rows_per_page.get())?;
        if controller.rows_per_page() != rows_per_page {
            controller.set_rows_per_page(rows_per_page);
        } else if controller.page() != PageNumber::FIRST {
            controller.set_page(PageNumber::FIRST);
        }
        controller.replace_page(source.rows().to_vec(), page_offset(source));
        Ok(())
    }
}

impl<S> PaginationStrategy<S> for RemotePaginationStrategy
where
    S: DataSource,
    S::Row: Clone,
{
    fn mode(&self) -> PaginationMode {
        PaginationMode::Remote
    }

    fn change_page(
        &self,
        controller: &mut ListController<S::Row>,
        source: &mut S,
        page: PageNumber,
    ) -> Result<(), InputError> {
        let rows_per_page = source
            .remote()
            .and_then(|r| RowsPerPage::new(r.api_size).ok())
            .unwrap_or_else(|| controller.rows_per_page());
        Self::fetch(controller, source, page.zero_based(), rows_per_page)
    }

    fn change_rows_per_page(
        &self,
        controller: &mut ListController<S::Row>,
        source: &mut S,
        rows_per_page: RowsPerPage,
    ) -> Result<(), InputError> {
        Self::fetch(controller, source, 0, rows_per_page)
    }

    fn pagination(&self, controller: &ListController<S::Row>, source: &S) -> PaginationState {
        match source.remote() {
            Some(remote) => remote.to_pagination_state(),
            None => <LocalPaginationStrategy as PaginationStrategy<S>>::pagination(
                &LocalPaginationStrategy,
                controller,
                source,
            ),
        }
    }
}

/// Absolute position of the first row of the source's current page.
pub(super) fn page_offset<S: DataSource>(source: &S) -> usize {
    source
        .remote()
        .map(|r| r.api_page.saturating_mul(r.api_size))
        .unwrap_or(0)
}
