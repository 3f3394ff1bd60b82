//! List state transitions.
//!
//! Every mutation of list state is a [`ListAction`] applied by the pure
//! function [`reduce`]. The page-reset rule lives in exactly one place,
//! [`ListAction::resets_page`], instead of being repeated in each mutator.
//!
//! # Transition table
//!
//! | action | page | phase |
//! |---|---|---|
//! | `SetSearch` (known field) | 1 | `Filtering` |
//! | `SetSearch` (unknown field) | unchanged | unchanged |
//! | `ClearSearch` | 1 | `Filtering` |
//! | `SetRowsPerPage` | 1 | `Paginating` |
//! | `SetPage(p)` | `p` | `Paginating` |
//! | `SetSelection` / `SetExpansion` | unchanged | unchanged |
//! | `Settle { total_pages }` | corrected once if out of range | `Idle` |

use serde::Deserialize;

use crate::model::{PageNumber, RowsPerPage};
use crate::state::search::{SearchState, SetOutcome};
use crate::state::selection::KeySet;

// ===== Phase =====

/// Where the list is in its settle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Derived view is consistent with state.
    #[default]
    Idle,
    /// Search changed; the filtered set must be recomputed.
    Filtering,
    /// Page or page size changed; the slice must be recomputed.
    Paginating,
}

// ===== OutOfRangePolicy =====

/// What settling does when the current page lies beyond the last page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Jump back to page 1.
    #[default]
    ResetToFirst,
    /// Move to the last page that has rows.
    ClampToLast,
}

impl OutOfRangePolicy {
    /// Page to settle on when `page` is out of range for `total_pages`.
    pub fn corrected(self, total_pages: usize) -> PageNumber {
        match self {
            OutOfRangePolicy::ResetToFirst => PageNumber::FIRST,
            OutOfRangePolicy::ClampToLast => {
                PageNumber::new(total_pages).unwrap_or(PageNumber::FIRST)
            }
        }
    }
}

// ===== ListState =====

/// Mutable list state owned by one list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    /// Query per searchable field.
    pub search: SearchState,
    /// Current 1-based page.
    pub page: PageNumber,
    /// Page size.
    pub rows_per_page: RowsPerPage,
    /// Selected rows by key.
    pub selected: KeySet,
    /// Expanded rows by key.
    pub expanded: KeySet,
    /// Settle cycle position.
    pub phase: Phase,
    /// Correction applied by `Settle`.
    pub out_of_range: OutOfRangePolicy,
}

impl ListState {
    /// Fresh state at page 1 with empty queries and empty key sets.
    pub fn new(search: SearchState, rows_per_page: RowsPerPage, out_of_range: OutOfRangePolicy) -> Self {
        Self {
            search,
            page: PageNumber::FIRST,
            rows_per_page,
            selected: KeySet::new(),
            expanded: KeySet::new(),
            phase: Phase::Idle,
            out_of_range,
        }
    }

    /// Whether `page` lies beyond the last page for `total_pages`.
    pub fn is_page_out_of_range(&self, total_pages: usize) -> bool {
        self.page.get() > total_pages.max(1)
    }
}

// ===== ListAction =====

/// A requested change to list state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    /// Replace the query of one field.
    SetSearch {
        /// Target field.
        field: String,
        /// New query text.
        value: String,
    },
    /// Blank every query.
    ClearSearch,
    /// Jump to a page, verbatim.
    SetPage(PageNumber),
    /// Change the page size.
    SetRowsPerPage(RowsPerPage),
    /// Replace the selection wholesale.
    SetSelection(KeySet),
    /// Replace the expansion wholesale.
    SetExpansion(KeySet),
    /// Bring an out-of-range page back into range.
    Settle {
        /// Page count of the current filtered set.
        total_pages: usize,
    },
}

impl ListAction {
    /// Actions that invalidate the current page and send the view to page 1.
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            ListAction::SetSearch { .. } | ListAction::ClearSearch | ListAction::SetRowsPerPage(_)
        )
    }
}

// ===== reduce =====

/// Apply `action` to `state`, returning the next state.
pub fn reduce(mut state: ListState, action: ListAction) -> ListState {
    let resets_page = action.resets_page();

    match action {
        ListAction::SetSearch { field, value } => {
            if state.search.set(&field, value) == SetOutcome::UnknownField {
                return state;
            }
            state.phase = Phase::Filtering;
        }
        ListAction::ClearSearch => {
            state.search.clear();
            state.phase = Phase::Filtering;
        }
        ListAction::SetPage(page) => {
            state.page = page;
            state.phase = Phase::Paginating;
        }
        ListAction::SetRowsPerPage(rows_per_page) => {
            state.rows_per_page = rows_per_page;
            state.phase = Phase::Paginating;
        }
        ListAction::SetSelection(keys) => {
            state.selected = keys;
        }
        ListAction::SetExpansion(keys) => {
            state.expanded = keys;
        }
        ListAction::Settle { total_pages } => {
            if state.is_page_out_of_range(total_pages) {
                state.page = state.out_of_range.corrected(total_pages);
            }
            state.phase = Phase::Idle;
        }
    }

    if resets_page {
        state.page = PageNumber::FIRST;
    }

    state
}

// ===== Tests =====

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
