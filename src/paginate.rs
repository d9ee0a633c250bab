//! Page math for listing output.

use schemars::JsonSchema;
use serde::Serialize;

/// One page of items plus positioning metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Slice `items` into the requested page.
///
/// A `page_size` of zero is treated as one. The requested page is clamped
/// into range, so page 0 yields the first page and a page past the end
/// yields the last. An empty input reports zero total pages with the
/// current page pinned at 1.
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = (current_page - 1) * page_size;
    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        total_count,
        total_pages,
        current_page,
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    }
}
