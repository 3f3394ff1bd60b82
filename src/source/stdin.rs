//! Rows piped on stdin.

use std::io::{IsTerminal, Read};

use serde_json::Value;

use super::file::parse_rows;
use crate::model::error::InputError;

/// Read all of `reader` and decode it as rows.
///
/// # Errors
///
/// Returns `InputError::Io` for read failures and `InputError::Json` for bad rows.
pub fn read_rows<R: Read>(mut reader: R) -> Result<Vec<Value>, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_rows(&text)
}

/// Read rows from the process's stdin.
///
/// # Errors
///
/// Returns `InputError::NoInput` if stdin is an interactive terminal, so
/// the binary never blocks waiting for a user who forgot to pipe data.
pub fn read_stdin_rows() -> Result<Vec<Value>, InputError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(InputError::NoInput);
    }
    read_rows(stdin.lock())
}
