//! The pagination envelope returned by every search operation.

use serde::Serialize;

/// One page of search results.
///
/// `total_elements` reflects the unpaginated match count and is independent of
/// `items.len()`; `items.len() <= page_size` always holds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Zero-based index of the page actually returned.
    pub page_number: u32,
    /// Number of items requested per page.
    pub page_size: u32,
    /// Total matching rows across all pages.
    pub total_elements: u64,
    /// Page contents, in the requested sort order.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// An empty page with the given geometry.
    pub fn empty(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
            total_elements: 0,
            items: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map the item type, keeping the envelope geometry.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
