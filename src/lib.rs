//! Vitrine — client-side state layer for a multi-role marketplace
//!
//! Vitrine is the state layer a marketplace frontend renders from: cached
//! entity collections with an advisory TTL, a fetch coordinator that fences
//! overlapping requests, selection and bulk-action bookkeeping, pagination,
//! an auth session with durable persistence, and a single fail-closed
//! role-policy implementation.
//!
//! # Quick start
//!
//! ```ignore
//! use std::sync::Arc;
//! use vitrine::{Marketplace, MarketplaceConfig, SystemClock};
//!
//! let market = Marketplace::new(
//!     products_backend,
//!     orders_backend,
//!     auth_backend,
//!     vault,
//!     Arc::new(SystemClock),
//!     MarketplaceConfig::default(),
//! );
//!
//! market.products().fetch().await?;
//! let listing = market.products().snapshot();
//! ```
//!
//! # Architecture
//!
//! Leaf types live in `vitrine-core`; the backend seam and wire contract in
//! `vitrine-transport`; the generic store in `vitrine-store`; auth in
//! `vitrine-session`; and the [`Marketplace`] facade in `vitrine-api`.
//! Backends are trait objects, so the REST client is swapped in at
//! construction and tests run against the in-memory implementations.

pub use vitrine_api::{Marketplace, MarketplaceConfig, OrderStore};
pub use vitrine_core::{
    Clock, EntityId, Error, Keyed, ListQuery, ManualClock, Order, OrderLine, Page, PageInfo,
    Product, Result, Role, SortDirection, SortSpec, SystemClock, Timestamp, UserProfile, ViewScope,
};
pub use vitrine_session::{
    AccessDecision, AccessPolicy, AuthBackend, AuthGrant, Credentials, DenialReason, FileVault,
    MemoryAuthBackend, MemoryVault, SessionConfig, SessionSnapshot, SessionStore, SessionVault,
    StoredSession,
};
pub use vitrine_store::{Collection, EntityStore, Freshness, SelectionSet, StoreConfig, StoreSnapshot};
pub use vitrine_transport::{
    decode_entity, decode_page, CallKind, CallRecord, EntityBackend, Envelope, ListEnvelope,
    MemoryBackend,
};
