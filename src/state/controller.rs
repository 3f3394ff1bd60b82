//! The list-state controller.
//!
//! `ListController` owns the rows of one list view together with its
//! search, page, page size, selection and expansion. Views read a derived
//! [`ListView`] and replay user interaction through the mutators.
//!
//! Every mutator goes through [`reduce`] and then settles exactly once, so
//! an out-of-range page is corrected before the mutator returns and never
//! oscillates. [`ListController::derive`] is a pure projection: calling it
//! twice without an intervening mutation yields identical views.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::model::{ControllerError, FieldName, PageNumber, Row, RowKey, RowsPerPage};
use crate::state::pagination::{self, PaginationState};
use crate::state::reducer::{reduce, ListAction, ListState, OutOfRangePolicy};
use crate::state::search::{SearchPredicate, SearchState};
use crate::state::selection::KeySet;

/// Produces the stable key of a row.
pub type KeyFn<T> = Box<dyn Fn(&T) -> RowKey>;

// ===== Builder =====

/// Validated construction of a [`ListController`].
pub struct ListControllerBuilder<T> {
    data: Vec<T>,
    search_fields: Vec<String>,
    rows_per_page: usize,
    key_fn: Option<KeyFn<T>>,
    out_of_range: OutOfRangePolicy,
    strict_fields: bool,
}

impl<T> ListControllerBuilder<T> {
    /// Fields eligible for per-field free-text filtering.
    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Starting page size (default 20).
    pub fn rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows;
        self
    }

    /// Stable key for each row. Without one, rows are keyed by position.
    pub fn key_fn(mut self, key_fn: impl Fn(&T) -> RowKey + 'static) -> Self {
        self.key_fn = Some(Box::new(key_fn));
        self
    }

    /// Correction applied when the page falls beyond the last page.
    pub fn out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    /// Reject `set_search` on fields that are not searchable.
    pub fn strict_fields(mut self, strict: bool) -> Self {
        self.strict_fields = strict;
        self
    }

    /// Validate the configuration and create the controller.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::InvalidRowsPerPage` for a page size of 0
    /// and `ControllerError::InvalidField` for a blank field name.
    pub fn build(self) -> Result<ListController<T>, ControllerError> {
        let rows_per_page = RowsPerPage::new(self.rows_per_page)?;
        let fields = self
            .search_fields
            .into_iter()
            .map(FieldName::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListController {
            data: self.data,
            offset: 0,
            key_fn: self.key_fn,
            state: ListState::new(SearchState::new(fields), rows_per_page, self.out_of_range),
            strict_fields: self.strict_fields,
        })
    }
}

// ===== ListController =====

/// Search, pagination, selection and expansion over a row set.
pub struct ListController<T> {
    data: Vec<T>,
    /// Absolute position of `data[0]` in the full row set.
    offset: usize,
    key_fn: Option<KeyFn<T>>,
    state: ListState,
    strict_fields: bool,
}

impl<T> fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("rows", &self.data.len())
            .field("offset", &self.offset)
            .field("keyed", &self.key_fn.is_some())
            .field("state", &self.state)
            .field("strict_fields", &self.strict_fields)
            .finish()
    }
}

impl<T> ListController<T> {
    /// Start building a controller over `data`.
    pub fn builder(data: Vec<T>) -> ListControllerBuilder<T> {
        ListControllerBuilder {
            data,
            search_fields: Vec::new(),
            rows_per_page: RowsPerPage::DEFAULT.get(),
            key_fn: None,
            out_of_range: OutOfRangePolicy::default(),
            strict_fields: false,
        }
    }

    /// All rows, unfiltered.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Current state snapshot.
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Current search queries.
    pub fn search(&self) -> &SearchState {
        &self.state.search
    }

    /// Current 1-based page.
    pub fn page(&self) -> PageNumber {
        self.state.page
    }

    /// Current page size.
    pub fn rows_per_page(&self) -> RowsPerPage {
        self.state.rows_per_page
    }

    /// Selected row keys.
    pub fn selected(&self) -> &KeySet {
        &self.state.selected
    }

    /// Expanded row keys.
    pub fn expanded(&self) -> &KeySet {
        &self.state.expanded
    }

    /// Whether any field has a non-blank query.
    pub fn has_active_search(&self) -> bool {
        self.state.search.has_active_query()
    }

    /// Absolute position of the first row of [`ListController::data`].
    ///
    /// Non-zero only when `data` is one server page of a larger set.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Key of the row at `index` in `data`.
    ///
    /// Without a key function this is the row's absolute position, so
    /// positional keys stay distinct across server pages.
    pub fn key_at(&self, index: usize, row: &T) -> RowKey {
        match &self.key_fn {
            Some(key_fn) => key_fn(row),
            None => RowKey::Position(self.offset.saturating_add(index)),
        }
    }

    /// Set the selection wholesale.
    pub fn set_selection(&mut self, keys: KeySet) {
        self.state.selected = keys;
    }

    /// Set the expansion wholesale.
    pub fn set_expansion(&mut self, keys: KeySet) {
        self.state.expanded = keys;
    }

    /// Flip one row's selection. Returns true if it is selected afterwards.
    pub fn toggle_selected(&mut self, key: RowKey) -> bool {
        let next = self.state.selected.toggled(key.clone());
        let selected = next.contains(&key);
        self.set_selection(next);
        selected
    }

    /// Flip one row's expansion. Returns true if it is expanded afterwards.
    pub fn toggle_expanded(&mut self, key: RowKey) -> bool {
        let next = self.state.expanded.toggled(key.clone());
        let expanded = next.contains(&key);
        self.set_expansion(next);
        expanded
    }

    /// Deselect every row.
    pub fn clear_selection(&mut self) {
        self.set_selection(KeySet::new());
    }
}

impl<T: Row> ListController<T> {
    /// Apply an action, then settle the page once.
    ///
    /// # Errors
    ///
    /// In strict-fields mode, `SetSearch` on an unknown field returns
    /// `ControllerError::UnknownSearchField` and leaves state untouched.
    pub fn apply(&mut self, action: ListAction) -> Result<(), ControllerError> {
        if let ListAction::SetSearch { field, .. } = &action {
            if !self.state.search.contains_field(field) {
                if self.strict_fields {
                    return Err(ControllerError::UnknownSearchField {
                        field: field.clone(),
                    });
                }
                warn!(field = %field, "Ignoring search on unknown field");
                return Ok(());
            }
        }

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.settle();
        Ok(())
    }

    /// Replace one field's query and return to page 1.
    ///
    /// # Errors
    ///
    /// See [`ListController::apply`].
    pub fn set_search(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        self.apply(ListAction::SetSearch {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Blank every query and return to page 1.
    pub fn clear_search(&mut self) {
        self.dispatch(ListAction::ClearSearch);
    }

    /// Jump to `page`. Out-of-range pages are corrected by settling.
    pub fn set_page(&mut self, page: PageNumber) {
        self.dispatch(ListAction::SetPage(page));
    }

    /// Change the page size and return to page 1.
    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.dispatch(ListAction::SetRowsPerPage(rows_per_page));
    }

    /// Replace the row set after a refetch.
    ///
    /// Search, page size and key sets are kept; the page is settled
    /// against the new data.
    pub fn replace_data(&mut self, data: Vec<T>) {
        self.replace_page(data, 0);
    }

    /// Replace the rows with one server page starting at absolute
    /// position `offset`.
    pub fn replace_page(&mut self, data: Vec<T>, offset: usize) {
        debug!(rows = data.len(), offset, "Replacing list data");
        self.data = data;
        self.offset = offset;
        self.settle();
    }

    /// Drop selected and expanded keys whose rows are no longer in `data`.
    pub fn prune_missing_keys(&mut self) {
        let present: HashSet<RowKey> = self
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| self.key_at(i, row))
            .collect();
        self.state.selected.retain(|k| present.contains(k));
        self.state.expanded.retain(|k| present.contains(k));
    }

    /// Add every row on the current page to the selection.
    pub fn select_all_visible(&mut self) {
        let keys = self.derive().paginated_keys;
        let mut next = self.state.selected.clone();
        next.extend(keys);
        self.set_selection(next);
    }

    /// Number of pages for the current filter and page size.
    pub fn total_pages(&self) -> usize {
        let predicate = self.state.search.predicate();
        let total_rows = if predicate.is_empty() {
            self.data.len()
        } else {
            self.data.iter().filter(|row| predicate.matches(*row)).count()
        };
        pagination::total_pages(total_rows, self.state.rows_per_page)
    }

    /// Project the filtered and paginated view of the current state.
    pub fn derive(&self) -> ListView<'_, T> {
        let predicate = self.state.search.predicate();
        let filtered_indices = filter_indices(&self.data, &predicate);
        let pagination = PaginationState::compute(
            filtered_indices.len(),
            self.state.page,
            self.state.rows_per_page,
        );

        let visible = &filtered_indices[pagination.slice_range()];
        let paginated = visible.iter().map(|&i| &self.data[i]).collect();
        let paginated_keys = visible
            .iter()
            .map(|&i| self.key_at(i, &self.data[i]))
            .collect();
        let filtered = filtered_indices.iter().map(|&i| &self.data[i]).collect();

        ListView {
            search: &self.state.search,
            filtered,
            paginated,
            paginated_keys,
            pagination,
            selected: &self.state.selected,
            expanded: &self.state.expanded,
        }
    }

    /// Apply an action that cannot fail.
    fn dispatch(&mut self, action: ListAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.settle();
    }

    /// Correct an out-of-range page once and return to `Idle`.
    fn settle(&mut self) {
        let total_pages = self.total_pages();
        let before = self.state.page;
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, ListAction::Settle { total_pages });

        if self.state.page != before {
            debug!(
                from = before.get(),
                to = self.state.page.get(),
                total_pages,
                "Page out of range, settled"
            );
        }
    }
}

/// Indices of rows matching `predicate`, in original order.
fn filter_indices<T: Row>(data: &[T], predicate: &SearchPredicate) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..data.len()).collect();
    }
    data.iter()
        .enumerate()
        .filter(|(_, row)| predicate.matches(*row))
        .map(|(i, _)| i)
        .collect()
}

// ===== ListView =====

/// Derived output handed to the view layer.
#[derive(Debug, PartialEq)]
pub struct ListView<'a, T> {
    /// Current queries.
    pub search: &'a SearchState,
    /// Rows matching the search, in original order.
    pub filtered: Vec<&'a T>,
    /// Rows on the current page.
    pub paginated: Vec<&'a T>,
    /// Keys of `paginated`, position for position.
    pub paginated_keys: Vec<RowKey>,
    /// Counts for the current page.
    pub pagination: PaginationState,
    /// Selected keys.
    pub selected: &'a KeySet,
    /// Expanded keys.
    pub expanded: &'a KeySet,
}

impl<T> ListView<'_, T> {
    /// Current 1-based page.
    pub fn page(&self) -> PageNumber {
        self.pagination.page
    }

    /// Page size.
    pub fn rows_per_page(&self) -> RowsPerPage {
        self.pagination.rows_per_page
    }

    /// Rows after filtering.
    pub fn total_rows(&self) -> usize {
        self.pagination.total_rows
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    /// 1-based first visible row, 0 when empty.
    pub fn start_item(&self) -> usize {
        self.pagination.start_item
    }

    /// 1-based last visible row, 0 when empty.
    pub fn end_item(&self) -> usize {
        self.pagination.end_item
    }

    /// Positions in `paginated` that are selected.
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.positions(&self.paginated_keys)
    }

    /// Positions in `paginated` that are expanded.
    pub fn expanded_positions(&self) -> Vec<usize> {
        self.expanded.positions(&self.paginated_keys)
    }

    /// Whether the visible row at `position` is selected.
    pub fn is_selected(&self, position: usize) -> bool {
        self.paginated_keys
            .get(position)
            .is_some_and(|k| self.selected.contains(k))
    }

    /// Whether the visible row at `position` is expanded.
    pub fn is_expanded(&self, position: usize) -> bool {
        self.paginated_keys
            .get(position)
            .is_some_and(|k| self.expanded.contains(k))
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
