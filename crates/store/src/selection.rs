//! Selection set for bulk actions
//!
//! Tracks the subset of the current listing the user has checked. The store
//! clears it on every wholesale collection replacement, so a selected id
//! always resolves in the collection at the moment a bulk action runs.
//! All operations are local, synchronous, and idempotent.

use std::collections::HashSet;
use vitrine_core::EntityId;

/// The checked subset of the current listing
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    ids: HashSet<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        SelectionSet::default()
    }

    /// Add ids to the selection
    pub fn select(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        self.ids.extend(ids);
    }

    /// Flip one id's membership
    pub fn toggle(&mut self, id: EntityId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Remove one id if present
    pub fn deselect(&mut self, id: &EntityId) {
        self.ids.remove(id);
    }

    /// Empty the selection (idempotent)
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in a deterministic (sorted) order
    pub fn ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}
