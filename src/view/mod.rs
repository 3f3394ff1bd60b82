//! Text output for the `tabstate` binary.
//!
//! The library's view layer is whatever the caller renders with; this
//! module is the minimal one the CLI needs.

pub mod table;

pub use table::{footer, render_table, truncate};

use serde_json::Value;

/// Column names of the first object row, in document order.
///
/// `serde_json` keeps keys sorted unless `preserve_order` is enabled, so in
/// practice this is alphabetical.
pub fn columns_from_rows(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .find_map(Value::as_object)
        .map(|obj| obj.keys().cloned().collect())
        .unwrap_or_default()
}
