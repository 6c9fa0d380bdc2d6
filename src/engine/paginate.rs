//! Paginator.
//!
//! Computes page counts and slices a record set into the active page. Pages are
//! 1-based. The current page is always kept in `[1, max(total_pages, 1)]`.

use crate::domain::error::{RecordViewError, Result};
use serde::{Deserialize, Serialize};

/// Number of pages needed for `total_count` items, `0` when there are none.
///
/// # Example
///
/// ```rust
/// use recordview::engine::total_pages;
///
/// assert_eq!(total_pages(0, 10), 0);
/// assert_eq!(total_pages(10, 10), 1);
/// assert_eq!(total_pages(25, 10), 3);
/// ```
#[must_use]
pub const fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Returns the slice of `records` shown on `current_page`.
///
/// When `records` already fits in one page it is returned unchanged, which lets an
/// upstream source hand over pre-paged data. Pages past the end yield an empty
/// slice.
#[must_use]
pub fn slice<T>(records: &[T], current_page: usize, page_size: usize) -> &[T] {
    if records.len() <= page_size {
        return records;
    }
    let offset = current_page.saturating_sub(1).saturating_mul(page_size);
    let start = offset.min(records.len());
    let end = offset.saturating_add(page_size).min(records.len());
    &records[start..end]
}

/// Page size, current page, and derived page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
    total_pages: usize,
}

impl PageState {
    /// Creates a page state positioned on page 1 with no items.
    ///
    /// # Errors
    ///
    /// Returns [`RecordViewError::InvalidPageSize`] when `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(RecordViewError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_size,
            current_page: 1,
            total_pages: 0,
        })
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Active 1-based page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Derived page count.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    const fn last_page(&self) -> usize {
        if self.total_pages == 0 {
            1
        } else {
            self.total_pages
        }
    }

    /// Recomputes the page count for `total_count` items and clamps the current
    /// page down if the result set shrank.
    pub fn set_total(&mut self, total_count: usize) {
        self.total_pages = total_pages(total_count, self.page_size);
        self.current_page = self.current_page.clamp(1, self.last_page());
    }

    /// Records the page count for `total_count` items without clamping the current
    /// page. Used while an external owner has not reported its result count.
    pub fn set_total_unclamped(&mut self, total_count: usize) {
        self.total_pages = total_pages(total_count, self.page_size);
    }

    /// Moves to `page` without checking it against the page count. Page 0 becomes 1.
    pub fn place(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Moves to `requested`, clamped into the valid range. Returns the page reached.
    pub fn change_page(&mut self, requested: usize) -> usize {
        self.current_page = requested.clamp(1, self.last_page());
        self.current_page
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists.
    #[must_use]
    pub const fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based index range of the items on the current page out of `total_count`,
    /// or `None` when there are no items.
    #[must_use]
    pub fn item_range(&self, total_count: usize) -> Option<(usize, usize)> {
        if total_count == 0 {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        let last = (self.current_page * self.page_size).min(total_count);
        (first <= last).then_some((first, last))
    }
}
