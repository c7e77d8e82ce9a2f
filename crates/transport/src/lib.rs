//! Backend seam for the vitrine state layer
//!
//! The REST backend is an external collaborator: this crate owns only the
//! client side of the contract. [`EntityBackend`] models the operations a
//! resource endpoint offers; [`wire`] pins the JSON envelope shapes; and
//! [`MemoryBackend`] is a scriptable in-memory implementation used by the
//! test suites and demos (fault injection, call recording, server-side id
//! minting).
//!
//! Stores depend on `dyn EntityBackend<T>`, so swapping the in-memory
//! backend for a real HTTP client is a construction-time decision, not a
//! store change.

pub mod backend;
pub mod memory;
pub mod wire;

pub use backend::{CallKind, EntityBackend};
pub use memory::{CallRecord, MemoryBackend};
pub use wire::{decode_entity, decode_page, Envelope, ListEnvelope};
