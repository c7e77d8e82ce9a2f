//! Generic cached entity store
//!
//! This crate consolidates the entity-cache pattern that view state needs
//! for every server-backed resource: a normalized collection (id → record
//! map plus the server's page order), an advisory TTL cache, a selection
//! set for bulk actions, and a fetch coordinator that fences overlapping
//! requests so the last request *issued* wins.
//!
//! One [`EntityStore`] is instantiated per resource with an injected
//! backend and clock — there are no module-level singletons, and tests
//! construct as many independent stores as they like.
//!
//! ## Mutation discipline
//!
//! All writes are confirm-then-apply: local state changes only after the
//! backend acknowledges. There are no optimistic updates and therefore no
//! reconciliation machinery.

pub mod collection;
pub mod freshness;
pub mod selection;
pub mod store;

pub use collection::Collection;
pub use freshness::Freshness;
pub use selection::SelectionSet;
pub use store::{EntityStore, StoreConfig, StoreSnapshot};
