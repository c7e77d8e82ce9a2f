//! Marketplace facade
//!
//! Wires the per-resource stores together: a product store (the plain
//! generic [`EntityStore`](vitrine_store::EntityStore)), a context-scoped
//! order store, and the auth session. Everything is dependency-injected —
//! backends, vault, clock — so hosts construct one `Marketplace` per
//! application root and tests construct as many as they want.

pub mod marketplace;
pub mod orders;

pub use marketplace::{Marketplace, MarketplaceConfig};
pub use orders::OrderStore;
