//! Row decoding from JSON documents and files.
//!
//! Two layouts are accepted: a single JSON array of rows, or JSON Lines
//! (one row per line, blank lines ignored).

use std::path::Path;

use serde_json::Value;

use crate::model::error::InputError;

/// Decode rows from `text`.
///
/// # Errors
///
/// Returns `InputError::Json` with the 1-based line of the first failure.
pub fn parse_rows(text: &str) -> Result<Vec<Value>, InputError> {
    if text.trim_start().starts_with('[') {
        return serde_json::from_str::<Vec<Value>>(text).map_err(|e| InputError::Json {
            line: e.line(),
            reason: e.to_string(),
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Value>(line).map_err(|e| InputError::Json {
                line: idx + 1,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Read and decode rows from the file at `path`.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist,
/// `InputError::Io` for read failures and `InputError::Json` for bad rows.
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Value>, InputError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path)?;
    parse_rows(&contents)
}
