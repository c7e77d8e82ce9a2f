//! Pagination metadata and one page of results
//!
//! `PageInfo` mirrors the pagination block of the backend's list envelope.
//! `total` is the server-reported count across every page, independent of
//! how many records the client has materialized.

use serde::{Deserialize, Serialize};

/// Server-reported pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 1-based page number this response covers
    pub page: u32,
    /// Total records across all pages
    pub total: u64,
    /// Total number of pages
    pub total_pages: u32,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
}

impl PageInfo {
    /// Metadata for an empty result set
    pub const fn empty() -> Self {
        PageInfo {
            page: 1,
            total: 0,
            total_pages: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        PageInfo::empty()
    }
}

/// One page of records plus its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// An empty page
    pub fn empty() -> Self {
        Page { records: Vec::new(), info: PageInfo::empty() }
    }
}
