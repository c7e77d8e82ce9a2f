//! Pinned JSON envelope shapes
//!
//! The backend wraps every response body in an envelope. List responses are
//! `{"data": [...], "pagination": {...}}`; single-entity responses are
//! `{"data": {...}}`. The bare-entity form that some legacy call sites
//! tolerated is NOT accepted here: one contract, decoded one way, and a
//! payload that does not match is a serialization error.
//!
//! [`decode_entity`] and [`decode_page`] are for [`EntityBackend`]
//! implementations that talk to the real server; the in-memory backend
//! has no wire layer and does not go through them.
//!
//! [`EntityBackend`]: crate::backend::EntityBackend

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrine_core::{Page, PageInfo, Result};

/// Single-entity response envelope: `{"data": T}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope<T> {
    pub data: T,
}

/// List response envelope: `{"data": [T], "pagination": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Page<T> {
        Page { records: envelope.data, info: envelope.pagination }
    }
}

/// Decode a single-entity payload, enforcing the enveloped form
pub fn decode_entity<T: DeserializeOwned>(payload: Value) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_value(payload)?;
    Ok(envelope.data)
}

/// Decode a list payload into a typed page
pub fn decode_page<T: DeserializeOwned>(payload: Value) -> Result<Page<T>> {
    let envelope: ListEnvelope<T> = serde_json::from_value(payload)?;
    Ok(envelope.into())
}
