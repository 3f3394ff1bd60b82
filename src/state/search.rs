//! Per-field search state.
//!
//! Every configured field carries a free-text query that defaults to the
//! empty string. Filtering is the logical AND over all fields whose query
//! is non-blank: a row matches only if, for each such field, the row's text
//! contains the query case-insensitively. Missing fields compare as `""`.

use std::collections::BTreeMap;

use crate::model::{FieldName, Row};

// ===== SearchState =====

/// Search text per searchable field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    queries: BTreeMap<FieldName, String>,
}

/// Result of [`SearchState::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The field exists and its query was replaced.
    Updated,
    /// The field exists and already held this query.
    Unchanged,
    /// The field is not searchable; nothing changed.
    UnknownField,
}

impl SearchState {
    /// Create a state with every field set to the empty query.
    pub fn new(fields: impl IntoIterator<Item = FieldName>) -> Self {
        Self {
            queries: fields.into_iter().map(|f| (f, String::new())).collect(),
        }
    }

    /// Replace the query for `field`, leaving all other fields unchanged.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> SetOutcome {
        let Some(slot) = self.queries.get_mut(field) else {
            return SetOutcome::UnknownField;
        };

        let value = value.into();
        if *slot == value {
            SetOutcome::Unchanged
        } else {
            *slot = value;
            SetOutcome::Updated
        }
    }

    /// Reset every query to the empty string.
    pub fn clear(&mut self) {
        self.queries.values_mut().for_each(String::clear);
    }

    /// Current query for `field`, if the field is searchable.
    pub fn query(&self, field: &str) -> Option<&str> {
        self.queries.get(field).map(String::as_str)
    }

    /// Whether `field` is one of the searchable fields.
    pub fn contains_field(&self, field: &str) -> bool {
        self.queries.contains_key(field)
    }

    /// Searchable fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldName> {
        self.queries.keys()
    }

    /// Iterate `(field, query)` pairs, including blank ones.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.queries.iter().map(|(f, q)| (f, q.as_str()))
    }

    /// True when no field has a non-blank query.
    pub fn is_blank(&self) -> bool {
        self.queries.values().all(|q| is_blank(q))
    }

    /// True when at least one field has a non-blank query.
    pub fn has_active_query(&self) -> bool {
        !self.is_blank()
    }

    /// Compile the active queries into a reusable predicate.
    pub fn predicate(&self) -> SearchPredicate {
        SearchPredicate {
            terms: self
                .queries
                .iter()
                .filter(|(_, q)| !is_blank(q))
                .map(|(f, q)| (f.clone(), q.to_lowercase()))
                .collect(),
        }
    }

    /// Convenience: does `row` satisfy the current search?
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.predicate().matches(row)
    }
}

/// A query is blank when it is empty or whitespace-only.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

// ===== SearchPredicate =====

/// Lower-cased active queries, compiled once per derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    terms: Vec<(FieldName, String)>,
}

impl SearchPredicate {
    /// True when no field constrains the result (fast path).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// AND of case-insensitive substring tests over all active fields.
    pub fn matches<R: Row + ?Sized>(&self, row: &R) -> bool {
        self.terms.iter().all(|(field, needle)| {
            let text = row.field_text(field.as_str()).unwrap_or_default();
            text.to_lowercase().contains(needle.as_str())
        })
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
