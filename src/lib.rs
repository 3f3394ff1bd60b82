//! tabstate
//!
//! List-state controller for tabular views: per-field free-text search,
//! local or server-delegated pagination, and selection/expansion tracked
//! by stable row keys.
//!
//! The pure core lives in [`state`]; [`strategy`] composes it with a
//! server-paginated [`strategy::DataSource`]. [`config`], [`logging`],
//! [`source`] and [`view`] form the shell used by the `tabstate` binary.
//!
//! [`wizard`] is independent of list state: step navigation for multi-step
//! forms whose sub-tables are often list views. Nothing else in the crate
//! depends on it.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod strategy;
pub mod view;
pub mod wizard;

pub use model::{ControllerError, FieldName, PageNumber, Row, RowKey, RowsPerPage};
pub use state::{KeySet, ListAction, ListController, ListView, OutOfRangePolicy, PaginationState};
pub use strategy::{DataSource, HybridPaginator, PaginationMode, RemotePagination};
