//! Pagination of filtered result sequences and pager-control markers.
//!
//! [`paginate`] does not clamp the requested page: a page outside
//! `1..=total_pages` yields an empty slice. Callers that want to keep the
//! user on a valid page use [`clamp_page`] first.

use serde::Serialize;

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pager controls list every page up to this many pages
pub const MAX_UNCOLLAPSED_PAGES: usize = 7;

/// One page of a sequence
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],

    /// 1-based page number that was requested
    pub current_page: usize,

    /// `ceil(total_items / page_size)`
    pub total_pages: usize,

    /// Length of the whole sequence
    pub total_items: usize,

    pub page_size: usize,
}

impl<'a, T> Page<'a, T> {
    /// 1-based inclusive range of the items shown, for "Showing X - Y of N"
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let start = (self.current_page - 1) * self.page_size + 1;
        Some((start, start + self.items.len() - 1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1 && self.current_page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.total_pages
    }

    /// Pager markers for this page
    pub fn markers(&self) -> Vec<PageMarker> {
        page_markers(self.current_page, self.total_pages)
    }
}

/// Number of pages needed for `len` items; 0 when empty or `page_size` is 0
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Slice out page `current_page` (1-based) of `items`
pub fn paginate<T>(items: &[T], page_size: usize, current_page: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);

    let slice = if current_page == 0 || page_size == 0 {
        &items[..0]
    } else {
        let start = (current_page - 1).saturating_mul(page_size).min(items.len());
        let end = start.saturating_add(page_size).min(items.len());
        &items[start..end]
    };

    Page {
        items: slice,
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
    }
}

/// Clamp a requested page into `1..=total_pages` (1 when there are no pages)
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// An entry in a pager control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

impl std::fmt::Display for PageMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{}", n),
            PageMarker::Ellipsis => write!(f, "…"),
        }
    }
}

/// Compact page-number sequence for a pager control.
///
/// Up to seven pages are listed in full. Beyond that a fixed window is used:
/// near the start `1 2 3 4 … N`, near the end `1 … N-3 N-2 N-1 N`, and
/// otherwise `1 … c-1 c c+1 … N`.
pub fn page_markers(current_page: usize, total_pages: usize) -> Vec<PageMarker> {
    use PageMarker::{Ellipsis, Page};

    if total_pages <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total_pages).map(Page).collect();
    }

    if current_page <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total_pages)]
    } else if current_page >= total_pages - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total_pages - 3),
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current_page - 1),
            Page(current_page),
            Page(current_page + 1),
            Ellipsis,
            Page(total_pages),
        ]
    }
}
