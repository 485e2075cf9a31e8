//! Page slicing and filter state shared by every listing view.

use serde::Serialize;

/// One page of a filtered collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether pagination controls are needed at all
    pub fn needs_pagination(&self) -> bool {
        self.total_items > self.page_size
    }
}

/// `ceil(len / page_size)`; zero when the page size is zero
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        len.div_ceil(page_size)
    }
}

/// Slice `items` to the 1-based `page`
///
/// Pages past the end are empty; page 0 is treated as page 1.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
    }
}

/// Filters plus the current page
///
/// Any change to the filters sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState<F> {
    filters: F,
    page: usize,
}

impl<F: Clone + PartialEq> FilterState<F> {
    pub fn new(filters: F) -> Self {
        Self { filters, page: 1 }
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Modify the filters; the page resets when anything actually changed
    pub fn update(&mut self, change: impl FnOnce(&mut F)) {
        let before = self.filters.clone();
        change(&mut self.filters);
        if self.filters != before {
            self.page = 1;
        }
    }

    pub fn set_filters(&mut self, filters: F) {
        self.update(|current| *current = filters);
    }
}
