//! Client-side pagination over the controller's filtered rows.

use super::{DataSource, PaginationMode, PaginationStrategy};
use crate::model::{InputError, PageNumber, RowsPerPage};
use crate::state::{ListController, PaginationState};

/// Pages through the rows already held by the controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPaginationStrategy;

impl<S: DataSource> PaginationStrategy<S> for LocalPaginationStrategy {
    fn mode(&self) -> PaginationMode {
        PaginationMode::Local
    }

    fn change_page(
        &self,
        controller: &mut ListController<S::Row>,
        _source: &mut S,
        page: PageNumber,
    ) -> Result<(), InputError> {
        controller.set_page(page);
        Ok(())
    }

    fn change_rows_per_page(
        &self,
        controller: &mut ListController<S::Row>,
        _source: &mut S,
        rows_per_page: RowsPerPage,
    ) -> Result<(), InputError> {
        controller.set_rows_per_page(rows_per_page);
        Ok(())
    }

    fn pagination(&self, controller: &ListController<S::Row>, _source: &S) -> PaginationState {
        controller.derive().pagination
    }
}
