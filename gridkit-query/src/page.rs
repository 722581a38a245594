//! Pagination.

use gridkit_model::{ConfigError, ConfigResult, Translate};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// Current page index (zero-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page: usize,
    pub page_size: NonZeroUsize,
}

impl PageState {
    /// Fails when `page_size` is zero.
    pub fn new(page: usize, page_size: usize) -> ConfigResult<Self> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ConfigError::InvalidPageSize(page_size))?;
        Ok(Self { page, page_size })
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_pages(total_rows, self.page_size)
    }

    /// Pulls `page` back into range for `total_rows`. Returns true if it moved.
    pub fn clamp(&mut self, total_rows: usize) -> bool {
        let clamped = clamp_page(self.page, total_rows, self.page_size);
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Number of pages; an empty collection still has one (empty) page.
pub fn total_pages(total_rows: usize, page_size: NonZeroUsize) -> usize {
    total_rows.div_ceil(page_size.get()).max(1)
}

/// Largest valid page index not greater than `page`.
pub fn clamp_page(page: usize, total_rows: usize, page_size: NonZeroUsize) -> usize {
    page.min(total_pages(total_rows, page_size) - 1)
}

/// Position of a page within the whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page actually shown, after clamping.
    pub page: usize,
    pub page_size: NonZeroUsize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based first row on the page; 0 when there are no rows.
    pub range_start: usize,
    /// 1-based last row on the page, inclusive; 0 when there are no rows.
    pub range_end: usize,
}

impl PageInfo {
    pub fn compute(page: usize, page_size: NonZeroUsize, total_rows: usize) -> Self {
        let page = clamp_page(page, total_rows, page_size);
        let offset = page * page_size.get();
        let (range_start, range_end) = if total_rows == 0 {
            (0, 0)
        } else {
            (offset + 1, (offset + page_size.get()).min(total_rows))
        };
        Self {
            page,
            page_size,
            total_pages: total_pages(total_rows, page_size),
            total_rows,
            range_start,
            range_end,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// The "X–Y of N" label, through the `pagination.range` message.
    pub fn range_label(&self, t: &dyn Translate) -> String {
        let from = self.range_start.to_string();
        let to = self.range_end.to_string();
        let count = self.total_rows.to_string();
        t.translate("pagination.range", &[("from", &from), ("to", &to), ("count", &count)])
    }
}

/// The rows of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub rows: &'a [T],
    pub info: PageInfo,
}

/// Extracts the window for `page`. Out-of-range pages are clamped.
pub fn paginate<T>(rows: &[T], page: usize, page_size: NonZeroUsize) -> PageWindow<'_, T> {
    let info = PageInfo::compute(page, page_size, rows.len());
    let start = info.page * page_size.get();
    let end = (start + page_size.get()).min(rows.len());
    PageWindow {
        rows: &rows[start.min(end)..end],
        info,
    }
}
