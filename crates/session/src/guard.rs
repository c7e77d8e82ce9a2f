//! Role-based access policy
//!
//! The single guard implementation for protected views. A policy names the
//! roles it accepts (or none, meaning "any authenticated user") and decides
//! against the live session. Every path that cannot positively classify
//! the viewer — no session, expired session, role not in the list — is a
//! denial. Unknown role strings never reach this point: profile decoding
//! fails closed at the boundary, leaving the session unauthenticated.

use crate::session::SessionStore;
use std::fmt;
use vitrine_core::Role;

/// Why access was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No session, an expired session, or a session whose profile failed
    /// to decode
    NotAuthenticated,
    /// Authenticated, but the role is not in the policy's list
    RoleNotPermitted(Role),
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotAuthenticated => write!(f, "not authenticated"),
            DenialReason::RoleNotPermitted(role) => write!(f, "role {role} not permitted"),
        }
    }
}

/// The outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied(DenialReason),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Role requirements for a protected view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    required: Vec<Role>,
}

impl AccessPolicy {
    /// Any authenticated user passes
    pub fn any_authenticated() -> Self {
        AccessPolicy { required: Vec::new() }
    }

    /// Only the listed roles pass
    pub fn require(roles: impl IntoIterator<Item = Role>) -> Self {
        AccessPolicy { required: roles.into_iter().collect() }
    }

    /// Whether a given role satisfies this policy
    pub fn allows(&self, role: Role) -> bool {
        self.required.is_empty() || self.required.contains(&role)
    }

    /// Decide against the live session
    pub fn evaluate(&self, session: &SessionStore) -> AccessDecision {
        let Some(role) = session.role() else {
            tracing::debug!("access denied: not authenticated");
            return AccessDecision::Denied(DenialReason::NotAuthenticated);
        };
        if self.allows(role) {
            AccessDecision::Granted
        } else {
            tracing::debug!(role = %role, "access denied: role not permitted");
            AccessDecision::Denied(DenialReason::RoleNotPermitted(role))
        }
    }
}
