//! Pagination of filtered results
//!
//! Slices results into fixed-size pages and builds the compact page-link
//! list shown under the grid, e.g. `1 … 4 5 6 … 20`.

use std::fmt;
use serde::Serialize;
use crate::utils::helpers::calculate_offset;

/// Cards per page on the listing grid
pub const PAGE_SIZE: usize = 12;

/// Pages shown on each side of the current page in the page-link list
const WINDOW: usize = 1;

/// Entry of the page-link list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages for `count` results, never less than 1
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    count.div_ceil(page_size).max(1)
}

/// Clamp a requested page into `[1, total]`
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, total.max(1))
}

/// Items on `page` (1-based); empty when the page lies past the end
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = calculate_offset(page, page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page controls only appear when the results overflow a single page
pub fn should_render_controls(count: usize, page_size: usize) -> bool {
    count > page_size
}

/// Build the page-link list for `current` out of `total` pages.
///
/// Page 1 and the last page are always present. Between them sits a window
/// of `current - 1 ..= current + 1` clamped to `[2, total - 1]`, with an
/// ellipsis on each side whose gap to the anchor exceeds one page.
pub fn build_page_list(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = clamp_page(current, total);

    let mut pages = vec![PageItem::Page(1)];

    if current > WINDOW + 2 {
        pages.push(PageItem::Ellipsis);
    }

    let first = current.saturating_sub(WINDOW).max(2);
    let last = (current + WINDOW).min(total.saturating_sub(1));
    pages.extend((first..=last).map(PageItem::Page));

    if current + WINDOW + 1 < total {
        pages.push(PageItem::Ellipsis);
    }

    if total > 1 {
        pages.push(PageItem::Page(total));
    }

    pages
}

/// One page of results plus everything needed to draw the controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// `None` when the controls are hidden
    pub links: Option<Vec<PageItem>>,
}

impl<'a, T> Page<'a, T> {
    /// Paginate `items`, clamping the requested page
    pub fn new(items: &'a [T], requested: usize, page_size: usize) -> Self {
        let total_pages = total_pages(items.len(), page_size);
        let page = clamp_page(requested, total_pages);
        let links = should_render_controls(items.len(), page_size)
            .then(|| build_page_list(page, total_pages));

        Self {
            items: page_slice(items, page, page_size),
            page,
            total_pages,
            total_items: items.len(),
            links,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
