//! Auth session state for the vitrine marketplace client
//!
//! Holds the current token pair and user profile, persists the triad to a
//! pluggable [`SessionVault`], and answers the synchronous role questions
//! view code asks (`is_admin`, `is_vendor`, `is_buyer`). Token issuance is
//! owned by the backend; this crate only stores what it is given and
//! computes expiry locally from `expires_in`.
//!
//! [`AccessPolicy`] is the single route-guard implementation: required
//! roles in, grant-or-deny out, failing closed on anything it cannot
//! positively classify.

pub mod backend;
pub mod guard;
pub mod session;
pub mod vault;

pub use backend::{AuthBackend, AuthGrant, Credentials, MemoryAuthBackend};
pub use guard::{AccessDecision, AccessPolicy, DenialReason};
pub use session::{SessionConfig, SessionSnapshot, SessionStore};
pub use vault::{FileVault, MemoryVault, SessionVault, StoredSession};
