//! Core identifier newtypes with smart constructors.
//!
//! Field names and row keys validate non-empty strings at construction time.
//! Page numbers and page sizes are non-zero by construction, so no pagination
//! arithmetic downstream ever divides by zero.

use std::borrow::Borrow;
use std::fmt;
use std::num::NonZeroUsize;

/// Name of a searchable row field (e.g. `"name"`, `"accountNumber"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName(String);

impl FieldName {
    /// Smart constructor: validates non-empty, non-whitespace field name.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidFieldName> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidFieldName::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Ord and Hash are derived from the inner String, so they agree with str's.
impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// 1-based page number. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroUsize);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroUsize::MIN);

    /// Smart constructor: rejects page `0`.
    pub fn new(page: usize) -> Result<Self, InvalidPageNumber> {
        NonZeroUsize::new(page)
            .map(Self)
            .ok_or(InvalidPageNumber::Zero)
    }

    /// Page number from a 0-based API page index.
    pub fn from_zero_based(api_page: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(api_page))
    }

    /// The raw 1-based value.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// The 0-based index expected by server-paginated APIs.
    pub fn zero_based(self) -> usize {
        self.0.get() - 1
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of rows shown per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowsPerPage(NonZeroUsize);

impl RowsPerPage {
    /// Default page size used by list views.
    pub const DEFAULT: RowsPerPage = match NonZeroUsize::new(20) {
        Some(n) => RowsPerPage(n),
        None => unreachable!(),
    };

    /// Smart constructor: rejects a page size of `0`.
    pub fn new(rows: usize) -> Result<Self, InvalidRowsPerPage> {
        NonZeroUsize::new(rows)
            .map(Self)
            .ok_or(InvalidRowsPerPage::Zero)
    }

    /// The raw page size.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for RowsPerPage {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a row, independent of its position in any view.
///
/// Produced by a caller-supplied key function. Selection and expansion
/// are stored as sets of `RowKey`, so they survive filtering and refetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    /// Key taken from an identity field (id, uuid, account number).
    Id(String),
    /// Position in the data array. Only stable while the data is unchanged.
    Position(usize),
}

impl RowKey {
    /// Key from an identity value.
    pub fn id(raw: impl Into<String>) -> Self {
        Self::Id(raw.into())
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => f.write_str(id),
            RowKey::Position(pos) => write!(f, "#{pos}"),
        }
    }
}

impl From<&str> for RowKey {
    fn from(raw: &str) -> Self {
        Self::Id(raw.to_string())
    }
}

impl From<String> for RowKey {
    fn from(raw: String) -> Self {
        Self::Id(raw)
    }
}

// ===== Error Types =====

/// Rejected field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidFieldName {
    /// Field names cannot be blank.
    #[error("Field name cannot be empty")]
    Empty,
}

/// Rejected page number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPageNumber {
    /// Pages are 1-based.
    #[error("Page number must be at least 1")]
    Zero,
}

/// Rejected page size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRowsPerPage {
    /// A page must hold at least one row.
    #[error("Rows per page must be at least 1")]
    Zero,
}

// ===== Tests =====
