//! Domain records: products, orders, user profiles
//!
//! These mirror the backend's JSON records. Monetary amounts are integer
//! minor units (cents). Status fields are opaque strings owned by the
//! backend: the client renders them and passes them through on status
//! updates, it never interprets or transitions them locally.

use crate::id::EntityId;
use crate::role::Role;
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Anything the store layer can cache: a record with a server-issued id
pub trait Keyed {
    /// The record's identity, as issued by the backend
    fn id(&self) -> &EntityId;
}

/// A vendor's product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    pub vendor_id: EntityId,
    pub name: String,
    /// Price in minor units (cents)
    pub price: i64,
    /// Units in stock
    pub stock: u32,
    /// Backend-owned listing status (e.g. "active", "draft")
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Keyed for Product {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// One line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: EntityId,
    pub quantity: u32,
    /// Unit price at purchase time, minor units
    pub unit_price: i64,
}

/// A buyer's order against one vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub buyer_id: EntityId,
    pub vendor_id: EntityId,
    /// Backend-owned fulfillment status (e.g. "pending", "confirmed",
    /// "shipped") — rendered and echoed back, never interpreted
    pub status: String,
    pub lines: Vec<OrderLine>,
    /// Order total in minor units
    pub total: i64,
    pub placed_at: Timestamp,
}

impl Keyed for Order {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// The authenticated user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    /// Canonical role; decoding fails closed on unknown role strings
    #[serde(rename = "user_type")]
    pub role: Role,
}

impl Keyed for UserProfile {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
