//! List query state: filters, search, sort, pagination parameters
//!
//! A `ListQuery` describes one listing request against a backend resource.
//! Stores keep the active query as part of their state; view code mutates
//! it through store actions, never directly. Changing anything other than
//! the page number resets pagination to page 1 (the result set changed, so
//! the old page index is meaningless) and invalidates any cached page.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of records per page
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort specification: field name plus direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        SortSpec { field: field.into(), direction: SortDirection::Ascending }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        SortSpec { field: field.into(), direction: SortDirection::Descending }
    }
}

/// Query state for one listing request
///
/// Filters are an ordered key/value map so that two queries with the same
/// filters compare equal regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Field-level filters (e.g. `status = "active"`)
    pub filters: BTreeMap<String, String>,
    /// Free-text search term
    pub search: Option<String>,
    /// Sort order, if any
    pub sort: Option<SortSpec>,
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub per_page: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            filters: BTreeMap::new(),
            search: None,
            sort: None,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ListQuery {
    /// Builder-style filter addition
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Builder-style search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Builder-style sort
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Builder-style page selection
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// True when this query differs from `other` in anything besides the
    /// page number — the signal that pagination must reset and the cached
    /// collection no longer describes the same result set.
    pub fn changes_result_set(&self, other: &ListQuery) -> bool {
        self.filters != other.filters
            || self.search != other.search
            || self.sort != other.sort
            || self.per_page != other.per_page
    }

    /// Copy of this query pointing at a different page
    pub fn at_page(&self, page: u32) -> ListQuery {
        let mut q = self.clone();
        q.page = page.max(1);
        q
    }
}
