//! Pagination utilities for JobConnect.
//!
//! - Offset-based page requests with zero-based page numbers
//! - Page metadata computed from the total item count
//! - A generic `Page<T>` response envelope
//!
//! # Usage
//!
//! ```rust,ignore
//! use jobconnect_core::pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(0, 5);
//! let page = Page::new(items, &request, total_count);
//! ```

mod offset;
mod response;

pub use offset::{PageMetadata, PageRequest};
pub use response::{Page, PageInfo};

/// Default page size if not specified.
pub const DEFAULT_PAGE_SIZE: u64 = 5;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u64 = 100;
