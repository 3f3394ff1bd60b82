//! Row abstraction.
//!
//! The controller never interprets field semantics. It only asks a row for
//! the text of a named field, which is then compared case-insensitively.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

/// An application-defined record displayed in a list.
///
/// Implementors stringify the named field. `None` means the field is
/// missing or null and is compared as the empty string.
pub trait Row {
    /// Text of `field`, or `None` when absent.
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>>;
}

impl<R: Row + ?Sized> Row for &R {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        (**self).field_text(field)
    }
}

/// JSON objects: strings verbatim, other scalars by their JSON text, null
/// as missing. Non-object values have no fields.
impl Row for Value {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.as_object()?.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl Row for HashMap<String, String> {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|s| Cow::Borrowed(s.as_str()))
    }
}

impl Row for BTreeMap<String, String> {
    fn field_text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.get(field).map(|s| Cow::Borrowed(s.as_str()))
    }
}
