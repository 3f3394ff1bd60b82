//! In-memory server-paginated source.
//!
//! Serves fixed-size pages out of a complete row vector the way a REST
//! backend would, so the hybrid paginator can be driven without a network.

use tracing::debug;

use crate::model::error::InputError;
use crate::model::Row;
use crate::strategy::{DataSource, RemotePagination};

/// A source that only exposes one page of rows at a time.
#[derive(Debug, Clone)]
pub struct PagedSource<T> {
    all: Vec<T>,
    page: Vec<T>,
    api_page: usize,
    api_size: usize,
    fetches: usize,
}

impl<T: Clone> PagedSource<T> {
    /// Serve `all` in pages of `api_size`, starting at page 0.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidPageSize` when `api_size` is 0.
    pub fn new(all: Vec<T>, api_size: usize) -> Result<Self, InputError> {
        let mut source = Self {
            all,
            page: Vec::new(),
            api_page: 0,
            api_size,
            fetches: 0,
        };
        source.load(0, api_size)?;
        Ok(source)
    }

    /// Number of page requests served, including the initial one.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    fn load(&mut self, api_page: usize, api_size: usize) -> Result<(), InputError> {
        if api_size == 0 {
            return Err(InputError::InvalidPageSize(api_size));
        }
        let start = api_page.saturating_mul(api_size).min(self.all.len());
        let end = start.saturating_add(api_size).min(self.all.len());

        self.page = self.all[start..end].to_vec();
        self.api_page = api_page;
        self.api_size = api_size;
        self.fetches += 1;
        debug!(api_page, api_size, rows = self.page.len(), "Served page");
        Ok(())
    }
}

impl<T: Row + Clone> DataSource for PagedSource<T> {
    type Row = T;

    fn rows(&self) -> &[T] {
        &self.page
    }

    fn remote(&self) -> Option<RemotePagination> {
        Some(RemotePagination {
            api_page: self.api_page,
            api_size: self.api_size,
            api_total_elements: self.all.len(),
            api_total_pages: self.all.len().div_ceil(self.api_size),
        })
    }

    fn update_pagination(&mut self, api_page: usize, api_size: usize) -> Result<(), InputError> {
        self.load(api_page, api_size)
    }
}
