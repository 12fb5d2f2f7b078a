use serde::Serialize;

/// Fixed number of leads shown per page
pub const PAGE_SIZE: usize = 50;

/// Derived view state: a 1-indexed current page over a fixed page size.
///
/// Nothing here is persisted; every method takes the current total so the
/// page is always clamped to `[1, page_count]` against the live list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Start at `page`, clamped against `total`
    pub fn at(page: usize, total: usize) -> Self {
        let mut pagination = Self::default();
        pagination.set_page(page, total);
        pagination
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// ceil(total / page_size); zero for an empty list
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        let last = self.page_count(total).max(1);
        self.page = page.clamp(1, last);
    }

    /// Re-clamp after the underlying list changed
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    /// Advance one page; no-op on the last page
    pub fn next(&mut self, total: usize) {
        if self.page < self.page_count(total) {
            self.page += 1;
        }
    }

    /// Go back one page; no-op on page 1
    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.page < self.page_count(total)
    }

    /// The items on the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = ((self.page - 1) * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    /// Display number for a slice-local index; continuous across pages
    pub fn row_number(&self, local_index: usize) -> usize {
        local_index + 1 + (self.page - 1) * self.page_size
    }
}
