//! The resource backend trait
//!
//! One trait instance per REST resource (`/products`, `/orders`, ...).
//! Bodies are `serde_json::Value` because that is what crosses the wire:
//! the backend owns validation and the authoritative record shape, and the
//! response is decoded into the typed record on the way back.
//!
//! All operations are async and return the shared error taxonomy. There is
//! no retry or backoff here: one failed call is terminal for that action,
//! and the caller decides whether to retry.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use vitrine_core::{EntityId, ListQuery, Page, Result, ViewScope};

/// The operation classes a resource endpoint offers
///
/// Used for call recording and fault scripting in test backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    List,
    Get,
    Create,
    Update,
    Patch,
    Delete,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CallKind::List => "list",
            CallKind::Get => "get",
            CallKind::Create => "create",
            CallKind::Update => "update",
            CallKind::Patch => "patch",
            CallKind::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Client-side contract of one REST resource endpoint
///
/// `T` is the typed record the resource serves. Implementations must be
/// shareable across tasks; stores hold them behind `Arc<dyn EntityBackend<T>>`.
#[async_trait]
pub trait EntityBackend<T>: Send + Sync {
    /// Fetch one page of records for the given scope and query
    ///
    /// The scope contributes the implicit filter of a role-partitioned
    /// resource (a vendor sees its own orders); unscoped resources pass
    /// [`ViewScope::Unscoped`].
    async fn list(&self, scope: &ViewScope, query: &ListQuery) -> Result<Page<T>>;

    /// Fetch a single record by id
    async fn get(&self, id: &EntityId) -> Result<T>;

    /// Create a record from a draft body; the backend mints the id
    async fn create(&self, draft: Value) -> Result<T>;

    /// Replace a record wholesale
    async fn update(&self, id: &EntityId, body: Value) -> Result<T>;

    /// Apply a partial update, merging `body` into the stored record
    async fn patch(&self, id: &EntityId, body: Value) -> Result<T>;

    /// Delete a record
    async fn delete(&self, id: &EntityId) -> Result<()>;
}
