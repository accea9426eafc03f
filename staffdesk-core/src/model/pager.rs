//! src/model/pager.rs
//! ============================================================================
//! # Pager: page cursor over the authoritative list
//!
//! Pages are 1-based. The cursor is never clamped when the list shrinks, so
//! it may point past the last page until the user walks back.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page; empty when the page holds nothing.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = (self.current - 1).saturating_mul(self.page_size);
        if start >= total {
            return total..total;
        }
        start..(start + self.page_size).min(total)
    }

    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_range(items.len())]
    }

    #[inline]
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    #[inline]
    pub fn has_next(&self, total: usize) -> bool {
        self.current < self.page_count(total)
    }

    /// Returns `false` when already on page 1.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Returns `false` when already on (or past) the last page.
    pub fn next(&mut self, total: usize) -> bool {
        if !self.has_next(total) {
            return false;
        }
        self.current += 1;
        true
    }

    /// Jumps to `page` if it lies in `[1, page_count]`.
    pub fn go_to(&mut self, page: usize, total: usize) -> bool {
        if page == 0 || page > self.page_count(total) || page == self.current {
            return false;
        }
        self.current = page;
        true
    }
}
