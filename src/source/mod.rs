//! Row input sources.
//!
//! This module provides the data sources the binary and tests feed into a
//! list controller:
//! - File loading (JSON array or JSON Lines)
//! - Stdin for piped input
//! - `PagedSource`, an in-memory server-paginated source

use std::path::PathBuf;

use serde_json::Value;

use crate::model::error::InputError;

pub mod file;
pub mod paged;
pub mod stdin;

pub use file::{load_rows, parse_rows};
pub use paged::PagedSource;
pub use stdin::read_rows;

/// Where rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read-once file.
    File(PathBuf),
    /// Piped stdin.
    Stdin,
}

impl InputSource {
    /// Read every row from the source.
    ///
    /// # Errors
    ///
    /// Returns `InputError` for missing files, I/O failures, an interactive
    /// stdin, or malformed JSON.
    pub fn load(&self) -> Result<Vec<Value>, InputError> {
        match self {
            InputSource::File(path) => load_rows(path),
            InputSource::Stdin => stdin::read_stdin_rows(),
        }
    }
}

/// Pick a file source when a path is given, stdin otherwise.
pub fn detect_input_source(file: Option<PathBuf>) -> InputSource {
    match file {
        Some(path) => InputSource::File(path),
        None => InputSource::Stdin,
    }
}
