//! Pagination projection.
//!
//! A pure function of `(total_rows, page, rows_per_page)`. Nothing here is
//! stored state; the controller recomputes it on every derivation.

use std::ops::Range;

use crate::model::{PageNumber, RowsPerPage};

/// Counts for "showing X–Y of Z" displays.
///
/// # Invariants
/// - `total_pages == ceil(total_rows / rows_per_page)`
/// - `start_item == end_item == 0` when `total_rows == 0`
/// - for an in-range page, `end_item - start_item + 1` is the slice length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Current 1-based page.
    pub page: PageNumber,
    /// Page size.
    pub rows_per_page: RowsPerPage,
    /// Rows after filtering.
    pub total_rows: usize,
    /// Number of pages (0 when there are no rows).
    pub total_pages: usize,
    /// 1-based index of the first visible row, 0 when empty.
    pub start_item: usize,
    /// 1-based index of the last visible row, 0 when empty.
    pub end_item: usize,
}

impl PaginationState {
    /// Project counts for `total_rows` rows at `page`.
    pub fn compute(total_rows: usize, page: PageNumber, rows_per_page: RowsPerPage) -> Self {
        let rpp = rows_per_page.get();
        let offset = page.zero_based().saturating_mul(rpp);
        let start_item = if total_rows > 0 {
            offset.saturating_add(1)
        } else {
            0
        };
        let end_item = page.get().saturating_mul(rpp).min(total_rows);

        Self {
            page,
            rows_per_page,
            total_rows,
            total_pages: total_pages(total_rows, rows_per_page),
            start_item,
            end_item,
        }
    }

    /// Offsets into the filtered rows that belong to the current page.
    ///
    /// Clipped to `total_rows`; empty when the page lies beyond the data.
    pub fn slice_range(&self) -> Range<usize> {
        slice_range(self.total_rows, self.page, self.rows_per_page)
    }

    /// Whether `page` lies beyond the last page.
    ///
    /// With no rows, only page 1 is in range.
    pub fn is_out_of_range(&self) -> bool {
        self.page.get() > self.total_pages.max(1)
    }

    /// Whether a later page exists.
    pub fn has_next(&self) -> bool {
        self.page.get() < self.total_pages
    }

    /// Whether an earlier page exists.
    pub fn has_previous(&self) -> bool {
        self.page.get() > 1
    }

    /// Number of rows on the current page.
    pub fn visible_rows(&self) -> usize {
        self.slice_range().len()
    }
}

/// `ceil(total_rows / rows_per_page)`, 0 when there are no rows.
pub fn total_pages(total_rows: usize, rows_per_page: RowsPerPage) -> usize {
    total_rows.div_ceil(rows_per_page.get())
}

/// Offsets `[(page-1)*rpp, page*rpp)` clipped to `total_rows`.
pub fn slice_range(total_rows: usize, page: PageNumber, rows_per_page: RowsPerPage) -> Range<usize> {
    let rpp = rows_per_page.get();
    let start = page.zero_based().saturating_mul(rpp).min(total_rows);
    let end = page.get().saturating_mul(rpp).min(total_rows);
    start..end
}
