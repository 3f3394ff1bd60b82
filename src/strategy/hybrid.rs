//! Strategy selection per request.

use tracing::debug;

use super::remote::page_offset;
use super::{
    DataSource, LocalPaginationStrategy, PaginationMode, PaginationStrategy,
    RemotePaginationStrategy,
};
use crate::model::{ControllerError, InputError, PageNumber, RowsPerPage};
use crate::state::{ListController, ListView, PaginationState};

/// A controller bound to a possibly server-paginated source.
///
/// Pagination is delegated to the server while every search field is
/// blank, and handled locally over the last fetched page otherwise.
/// Search changes never refetch; they only filter the rows on hand.
/// Returning to remote mode restores the server page size, so local
/// page-size changes made during a search do not outlive it.
#[derive(Debug)]
pub struct HybridPaginator<S: DataSource> {
    source: S,
    controller: ListController<S::Row>,
}

impl<S> HybridPaginator<S>
where
    S: DataSource,
    S::Row: Clone,
{
    /// Bind `controller` to `source`, loading the source's current rows.
    ///
    /// For server-paginated sources the controller's page size follows
    /// the server page size.
    pub fn new(source: S, mut controller: ListController<S::Row>) -> Self {
        if let Some(rows_per_page) = source
            .remote()
            .and_then(|r| RowsPerPage::new(r.api_size).ok())
        {
            controller.set_rows_per_page(rows_per_page);
        }
        controller.replace_page(source.rows().to_vec(), page_offset(&source));
        Self { source, controller }
    }

    /// Which side handles the next page request.
    pub fn mode(&self) -> PaginationMode {
        if self.source.remote().is_some() && !self.controller.has_active_search() {
            PaginationMode::Remote
        } else {
            PaginationMode::Local
        }
    }

    fn select<'a>(mode: PaginationMode) -> &'a dyn PaginationStrategy<S>
    where
        S: 'a,
    {
        match mode {
            PaginationMode::Remote => &RemotePaginationStrategy,
            PaginationMode::Local => &LocalPaginationStrategy,
        }
    }

    /// Move to `page` through the active strategy.
    ///
    /// # Errors
    ///
    /// Propagates source failures in remote mode.
    pub fn change_page(&mut self, page: PageNumber) -> Result<(), InputError> {
        let strategy = Self::select(self.mode());
        debug!(mode = ?strategy.mode(), page = page.get(), "Page change");
        strategy.change_page(&mut self.controller, &mut self.source, page)
    }

    /// Change the page size through the active strategy.
    ///
    /// # Errors
    ///
    /// Propagates source failures in remote mode.
    pub fn change_rows_per_page(&mut self, rows_per_page: RowsPerPage) -> Result<(), InputError> {
        let strategy = Self::select(self.mode());
        debug!(mode = ?strategy.mode(), rows_per_page = rows_per_page.get(), "Page size change");
        strategy.change_rows_per_page(&mut self.controller, &mut self.source, rows_per_page)
    }

    /// Replace one field's query. May switch the active mode.
    ///
    /// # Errors
    ///
    /// See [`ListController::set_search`].
    pub fn set_search(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let before = self.mode();
        self.controller.set_search(field, value)?;
        self.mode_changed(before);
        Ok(())
    }

    /// Blank every query, returning to remote mode for server sources.
    pub fn clear_search(&mut self) {
        let before = self.mode();
        self.controller.clear_search();
        self.mode_changed(before);
    }

    fn mode_changed(&mut self, before: PaginationMode) {
        let after = self.mode();
        if before == after {
            return;
        }
        debug!(from = ?before, to = ?after, "Pagination mode switched");

        if after == PaginationMode::Remote {
            self.restore_server_page_size();
        }
    }

    /// The controller shows exactly one server page while remote.
    fn restore_server_page_size(&mut self) {
        let Some(rows_per_page) = self
            .source
            .remote()
            .and_then(|r| RowsPerPage::new(r.api_size).ok())
        else {
            return;
        };
        if self.controller.rows_per_page() != rows_per_page {
            debug!(
                from = self.controller.rows_per_page().get(),
                to = rows_per_page.get(),
                "Restoring server page size"
            );
            self.controller.set_rows_per_page(rows_per_page);
        }
    }

    /// Counts the view must display for the active mode.
    pub fn pagination(&self) -> PaginationState {
        Self::select(self.mode()).pagination(&self.controller, &self.source)
    }

    /// Filtered and paginated rows on hand.
    pub fn view(&self) -> ListView<'_, S::Row> {
        self.controller.derive()
    }

    /// The bound controller.
    pub fn controller(&self) -> &ListController<S::Row> {
        &self.controller
    }

    /// Mutable access for selection, expansion and other local changes.
    pub fn controller_mut(&mut self) -> &mut ListController<S::Row> {
        &mut self.controller
    }

    /// The bound source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Unbind, returning the source and controller.
    pub fn into_parts(self) -> (S, ListController<S::Row>) {
        (self.source, self.controller)
    }
}
