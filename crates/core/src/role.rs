//! Canonical viewer roles
//!
//! Exactly one role enum exists in the workspace, with exactly one string
//! form per role. Parsing is strict: anything that is not a canonical form
//! is an error, and access-control code treats that error as a denial.
//! Legacy localized aliases (`COMPRADOR`, `VENDEDOR`) are deliberately not
//! accepted; a backend still emitting them must be fixed at the boundary,
//! not guessed at here.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Viewer role in the marketplace
///
/// Serializes to the same canonical uppercase form the backend uses, so the
/// serde representation and [`FromStr`] agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Customer placing orders
    Buyer,
    /// Merchant listing products and fulfilling orders
    Vendor,
    /// Marketplace operator
    Admin,
}

impl Role {
    /// The canonical wire form of this role
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "BUYER",
            Role::Vendor => "VENDOR",
            Role::Admin => "ADMIN",
        }
    }

    /// All roles, for policy construction
    pub const ALL: [Role; 3] = [Role::Buyer, Role::Vendor, Role::Admin];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    /// Parse a canonical role string, failing closed on anything else
    fn from_str(s: &str) -> Result<Role> {
        match s {
            "BUYER" => Ok(Role::Buyer),
            "VENDOR" => Ok(Role::Vendor),
            "ADMIN" => Ok(Role::Admin),
            other => Err(Error::Validation(format!("unknown role: {other:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_round_trip() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_legacy_aliases_fail_closed() {
        // Localized and case-variant forms a backend might still emit.
        for alias in ["COMPRADOR", "VENDEDOR", "buyer", "Vendor", "ADMINISTRATOR", ""] {
            assert!(alias.parse::<Role>().is_err(), "{alias:?} should not parse");
        }
    }

    #[test]
    fn test_serde_matches_canonical_form() {
        let json = serde_json::to_string(&Role::Vendor).unwrap();
        assert_eq!(json, "\"VENDOR\"");
        let back: Role = serde_json::from_str("\"BUYER\"").unwrap();
        assert_eq!(back, Role::Buyer);
        // serde parsing fails closed on aliases just like FromStr
        assert!(serde_json::from_str::<Role>("\"VENDEDOR\"").is_err());
    }
}
