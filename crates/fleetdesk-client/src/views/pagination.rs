/// Client-side paging over a fully fetched collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based.
    pub page: usize,
    pub page_size: usize,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Always at least one page, so an empty table still shows "page 1 of 1".
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.page_count(total) - 1);
    }

    /// Pulls the current page back in range after the collection shrank.
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.page_size.max(1);
        let start = (self.page * size).min(items.len());
        let end = (start + size).min(items.len());
        &items[start..end]
    }
}
