//! Offset-based pagination with zero-based page numbers.
//!
//! This module provides:
//! - Page/size parameter handling
//! - Total count tracking
//! - Page metadata computation
//! - OFFSET/LIMIT values for SQL and slice paging

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// Page Metadata
// ═══════════════════════════════════════════════════════════════════════════════

/// Metadata about a paginated result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Current page number (0-indexed).
    pub number: u64,
    /// Requested number of items per page.
    pub size: u64,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl PageMetadata {
    /// Create page metadata from pagination parameters and total count.
    pub fn new(number: u64, size: u64, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            total_elements.div_ceil(size)
        };

        Self {
            number,
            size,
            total_elements,
            total_pages,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Page Request
// ═══════════════════════════════════════════════════════════════════════════════

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (0-indexed).
    pub number: u64,
    /// Number of items per page.
    pub size: u64,
}

impl PageRequest {
    /// Create a page request, clamping size to `1..=MAX_PAGE_SIZE`.
    pub fn new(number: u64, size: u64) -> Self {
        Self {
            number,
            size: size.clamp(1, super::MAX_PAGE_SIZE),
        }
    }

    /// The first page with the default size.
    pub fn first() -> Self {
        Self {
            number: 0,
            size: super::DEFAULT_PAGE_SIZE,
        }
    }

    /// Lower the size to `max` if it exceeds it.
    pub fn with_max_size(mut self, max: u64) -> Self {
        self.size = self.size.min(max.max(1));
        self
    }

    /// Get the SQL OFFSET value.
    pub fn offset(&self) -> u64 {
        self.number.saturating_mul(self.size)
    }

    /// Get the SQL LIMIT value.
    pub fn limit(&self) -> u64 {
        self.size
    }

    /// Create page metadata from a total count.
    pub fn metadata(&self, total_elements: u64) -> PageMetadata {
        PageMetadata::new(self.number, self.size, total_elements)
    }

    /// Apply pagination to an iterator.
    pub fn paginate_iter<T, I: Iterator<Item = T>>(&self, iter: I) -> Vec<T> {
        iter.skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.size).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
