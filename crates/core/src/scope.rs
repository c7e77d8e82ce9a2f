//! Viewer scope for context-switched resources
//!
//! The order listing is the same store whether a buyer, a vendor, or an
//! admin is looking at it — what changes is which backend endpoint and
//! implicit filter the fetch targets. `ViewScope` makes that target
//! explicit. The hosting layer sets it deliberately; it is never inferred
//! from the authenticated user behind the caller's back.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which viewer's slice of a resource a fetch targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewScope {
    /// No implicit scoping (resources that are not role-partitioned)
    Unscoped,
    /// A buyer's own records
    Buyer(EntityId),
    /// A vendor's own records
    Vendor(EntityId),
    /// The full, marketplace-wide view
    Admin,
}

impl ViewScope {
    /// The implicit filter this scope contributes to a listing request,
    /// as a (field, value) pair, if any
    pub fn implicit_filter(&self) -> Option<(&'static str, &str)> {
        match self {
            ViewScope::Unscoped | ViewScope::Admin => None,
            ViewScope::Buyer(id) => Some(("buyer_id", id.as_str())),
            ViewScope::Vendor(id) => Some(("vendor_id", id.as_str())),
        }
    }
}

impl fmt::Display for ViewScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewScope::Unscoped => write!(f, "unscoped"),
            ViewScope::Buyer(id) => write!(f, "buyer:{id}"),
            ViewScope::Vendor(id) => write!(f, "vendor:{id}"),
            ViewScope::Admin => write!(f, "admin"),
        }
    }
}
