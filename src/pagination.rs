//! Page windows over search results.

use serde::Serialize;

/// Page size used when the caller asks for less than one item per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on the number of items returned in a single page.
pub const MAX_PAGE_SIZE: usize = 100;

/// A clamped, 1-based pagination window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page_number: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Repairs out-of-range input instead of rejecting it: page numbers below
    /// one become one, page sizes below one become [`DEFAULT_PAGE_SIZE`] and
    /// page sizes above [`MAX_PAGE_SIZE`] are capped.
    pub fn new(page_number: i64, page_size: i64) -> Self {
        let page_number = if page_number < 1 {
            1
        } else {
            usize::try_from(page_number).unwrap_or(usize::MAX)
        };

        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else if page_size > MAX_PAGE_SIZE as i64 {
            MAX_PAGE_SIZE
        } else {
            page_size as usize
        };

        Self {
            page_number,
            page_size,
        }
    }

    /// Number of matching records skipped before this page starts.
    pub fn offset(&self) -> usize {
        (self.page_number - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of results together with the total number of matches.
///
/// `total_count` counts every match of the filter and does not depend on the
/// page window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: usize) -> Self {
        Self {
            items,
            page_number: request.page_number,
            page_size: request.page_size,
            total_count,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_count.div_ceil(self.page_size.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Page links for catalog navigation; `None` marks a gap.
    pub fn pages(&self) -> Vec<Option<usize>> {
        get_pages(self.total_pages(), self.page_number, 2, 2, 4, 2)
    }

    /// Converts every item while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
        }
    }
}
