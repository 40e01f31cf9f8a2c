//! Pagination over a filtered record set.
//!
//! The pager only ever sees a count and a slice; it does not own the
//! records. Whenever the filtered set or the page size changes, the
//! page index is re-clamped so `page_index < max(1, ceil(count/size))`
//! always holds. Navigating past either bound is a no-op, never an
//! error.

pub use crate::defaults::PAGE_SIZE_OPTIONS;
use crate::defaults::PAGE_SIZE;

/// Page window state for a record-list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_index: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for a filtered count. An empty set still has one
    /// (empty) page so the index invariant stays meaningful.
    pub fn page_count(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.page_size).max(1)
    }

    /// Start/end offsets of the visible window within the filtered set.
    pub fn slice_bounds(&self, filtered_count: usize) -> (usize, usize) {
        let start = (self.page_index * self.page_size).min(filtered_count);
        let end = (start + self.page_size).min(filtered_count);
        (start, end)
    }

    /// The visible window of a filtered view.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let (start, end) = self.slice_bounds(items.len());
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self, filtered_count: usize) -> bool {
        self.page_index + 1 < self.page_count(filtered_count)
    }

    /// Advance one page, clamped at the last page.
    pub fn next_page(&mut self, filtered_count: usize) {
        if self.has_next(filtered_count) {
            self.page_index += 1;
        }
    }

    /// Go back one page, clamped at page 0.
    pub fn previous_page(&mut self) {
        if self.page_index > 0 {
            self.page_index -= 1;
        }
    }

    /// Jump to a page, clamped into the valid range.
    pub fn set_page_index(&mut self, page_index: usize, filtered_count: usize) {
        self.page_index = page_index.min(self.page_count(filtered_count) - 1);
    }

    /// Change the rows-per-page setting. Only the offered options are
    /// accepted; a valid change resets to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        if PAGE_SIZE_OPTIONS.contains(&page_size) {
            self.page_size = page_size;
            self.page_index = 0;
        }
    }

    /// Re-clamp the page index after the filtered set changed size.
    pub fn clamp(&mut self, filtered_count: usize) {
        let last = self.page_count(filtered_count) - 1;
        if self.page_index > last {
            self.page_index = last;
        }
    }
}
