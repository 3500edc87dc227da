//! Paginated response types.
//!
//! A page serializes as `{ "content": [...], "page": { "size", "number",
//! "totalElements", "totalPages" } }`.

use serde::{Deserialize, Serialize};

use super::offset::{PageMetadata, PageRequest};

// ═══════════════════════════════════════════════════════════════════════════════
// Page Info
// ═══════════════════════════════════════════════════════════════════════════════

/// Page information attached to every paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Number of items per page.
    pub size: u64,
    /// Current page number (0-indexed).
    pub number: u64,
    /// Total number of items.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PageInfo {
    /// Create page info from page metadata.
    pub fn from_metadata(meta: &PageMetadata) -> Self {
        Self {
            size: meta.size,
            number: meta.number,
            total_elements: meta.total_elements,
            total_pages: meta.total_pages,
        }
    }
}

impl From<PageMetadata> for PageInfo {
    fn from(meta: PageMetadata) -> Self {
        Self::from_metadata(&meta)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Page
// ═══════════════════════════════════════════════════════════════════════════════

/// One page of items together with its position in the full result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: PageInfo,
}

impl<T> Page<T> {
    /// Create a page from the items of `request` and the total item count.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.metadata(total_elements).into(),
        }
    }

    /// An empty page for `request`.
    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Whether this page carries no items.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Transform the items, keeping page information.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
        }
    }
}
