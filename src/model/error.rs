//! Error types for tabstate.
//!
//! The controller itself is total over its inputs once constructed. Errors
//! exist at the edges: building a controller with an invalid configuration,
//! strict-mode searches on unknown fields, and the CLI shell reading rows,
//! config and logging setup.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level CLI error
//!   - [`ControllerError`] - invalid controller construction or strict-mode misuse
//!   - [`InputError`] - row file/stdin reading and JSON decoding failures
//!   - [`crate::config::ConfigError`] - config file failures
//!   - [`crate::logging::LoggingError`] - tracing subscriber setup failures

use std::path::PathBuf;
use thiserror::Error;

use super::identifiers::{InvalidFieldName, InvalidPageNumber, InvalidRowsPerPage};

/// Top-level application error for the `tabstate` binary.
///
/// Library callers normally see only [`ControllerError`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Controller rejected its configuration.
    #[error("List state error: {0}")]
    Controller(#[from] ControllerError),

    /// Rows could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Config file could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Writing the rendered table failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors raised by the list-state controller.
///
/// Every runtime mutation is total; these only arise from construction or
/// from `set_search` in strict-fields mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Page size of zero would make every pagination projection undefined.
    #[error("Invalid rows per page: {0}")]
    InvalidRowsPerPage(#[from] InvalidRowsPerPage),

    /// Pages are 1-based.
    #[error("Invalid page: {0}")]
    InvalidPage(#[from] InvalidPageNumber),

    /// A configured search field was blank.
    #[error("Invalid search field: {0}")]
    InvalidField(#[from] InvalidFieldName),

    /// `set_search` targeted a field that is not searchable.
    #[error("Unknown search field '{field}'")]
    UnknownSearchField {
        /// The rejected field name.
        field: String,
    },
}

/// Errors encountered when loading rows from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// No file argument and stdin is an interactive terminal.
    #[error("No input: provide a file path or pipe rows on stdin")]
    NoInput,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input was neither a JSON array nor JSON Lines.
    #[error("Malformed JSON at line {line}: {reason}")]
    Json {
        /// 1-based line of the failure (1 for whole-document arrays).
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// A server-paginated source was asked for a page size of zero.
    #[error("Invalid page size requested from source: {0}")]
    InvalidPageSize(usize),
}
