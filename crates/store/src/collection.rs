//! Normalized entity collection
//!
//! The canonical in-memory representation of a server-backed resource:
//! `by_id` maps id → record, `order` mirrors the server's returned order
//! for the current page, and `total` is the server-reported count across
//! all pages.
//!
//! ## Invariants
//!
//! - Every id in `order` has an entry in `by_id`
//! - `order` contains no duplicates
//! - `by_id` may hold records absent from `order` (detail fetches that are
//!   not part of the current listing)
//! - `total` is independent of how many records are materialized locally

use std::collections::HashMap;
use vitrine_core::{EntityId, Keyed};

/// Normalized map-plus-ordered-index collection of records
#[derive(Debug, Clone)]
pub struct Collection<T> {
    by_id: HashMap<EntityId, T>,
    order: Vec<EntityId>,
    total: u64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Collection {
            by_id: HashMap::new(),
            order: Vec::new(),
            total: 0,
        }
    }
}

impl<T: Keyed> Collection<T> {
    /// Empty collection
    pub fn new() -> Self {
        Collection::default()
    }

    /// Replace the collection wholesale with one server page
    ///
    /// Detail-fetched records outside the listing are dropped too: the
    /// replacement is the new canonical state.
    pub fn replace(&mut self, records: Vec<T>, total: u64) {
        self.by_id.clear();
        self.order.clear();
        for record in records {
            let id = record.id().clone();
            if self.by_id.insert(id.clone(), record).is_none() {
                self.order.push(id);
            }
        }
        self.total = total;
    }

    /// Insert or refresh a record without touching `total`
    ///
    /// Records already in the listing are replaced in place; records the
    /// listing does not contain go into `by_id` only.
    pub fn upsert(&mut self, record: T) {
        let id = record.id().clone();
        self.by_id.insert(id, record);
    }

    /// Insert or refresh a record, appending it to the listing if absent
    ///
    /// Detail fetches use this: the record joins the end of the listing
    /// while `total` stays whatever the server last reported.
    pub fn admit(&mut self, record: T) {
        let id = record.id().clone();
        if self.by_id.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }

    /// Insert a freshly created record at the front of the listing
    ///
    /// Ids are server-minted, so a collision with an existing record means
    /// the record is already materialized; in that case it is refreshed in
    /// place and the total is left alone.
    pub fn prepend(&mut self, record: T) {
        let id = record.id().clone();
        if self.by_id.insert(id.clone(), record).is_none() {
            self.order.insert(0, id);
            self.total = self.total.saturating_add(1);
        }
    }

    /// Remove a record everywhere; returns `true` if it was present
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let existed = self.by_id.remove(id).is_some();
        if existed {
            self.order.retain(|o| o != id);
            self.total = self.total.saturating_sub(1);
        }
        existed
    }

    /// Drop all records and reset the total
    pub fn clear(&mut self) {
        self.by_id.clear();
        self.order.clear();
        self.total = 0;
    }

    /// Look up a record by id (listing or detail-fetched)
    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.by_id.get(id)
    }

    /// Whether the id is materialized locally
    pub fn contains(&self, id: &EntityId) -> bool {
        self.by_id.contains_key(id)
    }

    /// Ids of the current listing, in server order
    pub fn order(&self) -> &[EntityId] {
        &self.order
    }

    /// Records of the current listing, in server order
    pub fn in_order(&self) -> Vec<&T> {
        self.order.iter().filter_map(|id| self.by_id.get(id)).collect()
    }

    /// Server-reported count across all pages
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of records in the current listing
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the current listing is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of records materialized locally, including detail fetches
    pub fn materialized(&self) -> usize {
        self.by_id.len()
    }
}
