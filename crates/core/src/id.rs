//! Opaque server-issued entity identifiers
//!
//! Every domain object (product, order, user) is addressed by an `EntityId`
//! minted by the backend. The client never generates ids: an `EntityId` only
//! comes into existence by decoding a backend response.
//!
//! The inner representation is an opaque string. No structure is assumed
//! beyond non-emptiness, which is validated at construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server-issued identifier for a domain object
///
/// ## Invariants
///
/// - Never empty
/// - Unique within its entity type (enforced by the backend)
/// - The sole join key between client state and backend records
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wrap a backend-issued identifier, rejecting empty strings
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(Error::Validation("entity id must not be empty".into()));
        }
        Ok(EntityId(raw))
    }

    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.0
    }
}
