//! List state machine (pure).
//!
//! All state transitions are pure functions testable without a view.

pub mod controller;
pub mod pagination;
pub mod reducer;
pub mod search;
pub mod selection;

// Re-export for convenience
pub use controller::{KeyFn, ListController, ListControllerBuilder, ListView};
pub use pagination::PaginationState;
pub use reducer::{reduce, ListAction, ListState, OutOfRangePolicy, Phase};
pub use search::{SearchPredicate, SearchState, SetOutcome};
pub use selection::KeySet;
