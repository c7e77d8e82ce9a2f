//! The session store
//!
//! Owns the current session triad and mediates every auth transition:
//! login, admin login, registration, refresh, logout, and restore from the
//! vault. All state changes are confirm-then-apply — local state changes
//! only on a successful grant — with one deliberate exception: `logout`
//! clears local state even when the server-side revoke fails, because the
//! user asked to be logged out and local state is authoritative for that.
//!
//! There is no retry or backoff. A failed call is terminal for that action
//! until the caller retries.

use crate::backend::{AuthBackend, AuthGrant, Credentials};
use crate::vault::{SessionVault, StoredSession};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use vitrine_core::{Clock, Error, Result, Role, Timestamp, UserProfile};

/// Session store configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Treat tokens as expired this long before their actual expiry, so a
    /// request started just under the wire does not race the deadline
    pub expiry_skew: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig { expiry_skew: Duration::from_secs(30) }
    }
}

/// Point-in-time view of the session for rendering and guards
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user: Option<UserProfile>,
    pub expires_at: Option<Timestamp>,
    pub authenticated: bool,
    /// Display string of the last failed auth action
    pub error: Option<String>,
}

struct State {
    session: Option<StoredSession>,
    error: Option<String>,
}

/// Auth state store over an injected backend, vault, and clock
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    vault: Arc<dyn SessionVault>,
    clock: Arc<dyn Clock>,
    config: SessionConfig,
    state: Mutex<State>,
}

impl SessionStore {
    pub fn new(
        backend: Arc<dyn AuthBackend>,
        vault: Arc<dyn SessionVault>,
        clock: Arc<dyn Clock>,
        config: SessionConfig,
    ) -> Self {
        SessionStore {
            backend,
            vault,
            clock,
            config,
            state: Mutex::new(State { session: None, error: None }),
        }
    }

    /// Hydrate from the vault (page-load restore)
    ///
    /// Returns whether a session was found. An expired session is restored
    /// too — `is_authenticated` reports it as logged out, and `refresh`
    /// can still use its refresh token.
    pub fn restore(&self) -> Result<bool> {
        let restored = self.vault.load()?;
        let found = restored.is_some();
        if found {
            tracing::debug!("session restored from vault");
        }
        self.state.lock().session = restored;
        Ok(found)
    }

    // ========== Transitions ==========

    /// Buyer/vendor login
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let outcome = self.backend.login(credentials).await;
        self.adopt("login", outcome)
    }

    /// Admin login against the separate admin endpoint
    pub async fn admin_login(&self, credentials: &Credentials) -> Result<UserProfile> {
        let outcome = self.backend.admin_login(credentials).await;
        self.adopt("admin_login", outcome)
    }

    /// Register an account and adopt the resulting session
    pub async fn register(
        &self,
        name: &str,
        credentials: &Credentials,
        role: Role,
    ) -> Result<UserProfile> {
        let outcome = self.backend.register(name, credentials, role).await;
        self.adopt("register", outcome)
    }

    /// Re-issue tokens from the stored refresh token
    ///
    /// A backend rejection clears all auth state, locally and in the
    /// vault: the stored tokens are dead and keeping them would only
    /// produce a loop of failing retries.
    pub async fn refresh(&self) -> Result<()> {
        let refresh_token = self
            .state
            .lock()
            .session
            .as_ref()
            .map(|s| s.refresh_token.clone())
            .ok_or(Error::NotAuthenticated)?;

        match self.backend.refresh(&refresh_token).await {
            Ok(grant) => {
                self.adopt("refresh", Ok(grant))?;
                Ok(())
            }
            Err(err @ Error::RefreshRejected(_)) | Err(err @ Error::Api { .. }) => {
                tracing::warn!(error = %err, "refresh rejected, clearing auth state");
                self.wipe(Some(err.to_string()));
                Err(err)
            }
            Err(err) => {
                // Transport failures keep the session: the tokens may be
                // fine, the network was not.
                self.state.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Log out: revoke best-effort, clear local state unconditionally
    pub async fn logout(&self) {
        let access_token = self
            .state
            .lock()
            .session
            .as_ref()
            .map(|s| s.access_token.clone());
        if let Some(token) = access_token {
            if let Err(err) = self.backend.revoke(&token).await {
                tracing::warn!(error = %err, "server-side revoke failed, clearing locally anyway");
            }
        }
        self.wipe(None);
    }

    /// Commit a successful grant, or record the failure
    fn adopt(&self, action: &str, outcome: Result<AuthGrant>) -> Result<UserProfile> {
        match outcome {
            Ok(grant) => {
                let expires_at = self
                    .clock
                    .now()
                    .saturating_add(Duration::from_secs(grant.expires_in_secs));
                let session = StoredSession {
                    access_token: grant.access_token,
                    refresh_token: grant.refresh_token,
                    user: grant.user.clone(),
                    expires_at,
                };
                self.vault.store(&session)?;
                tracing::info!(action, user = %grant.user.id, role = %grant.user.role, "session established");
                let mut state = self.state.lock();
                state.session = Some(session);
                state.error = None;
                Ok(grant.user)
            }
            Err(err) => {
                tracing::warn!(action, error = %err, "auth action failed");
                self.state.lock().error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Clear local state and the vault; vault failures are logged, not raised
    fn wipe(&self, error: Option<String>) {
        if let Err(err) = self.vault.clear() {
            tracing::warn!(error = %err, "vault clear failed");
        }
        let mut state = self.state.lock();
        state.session = None;
        state.error = error;
    }

    // ========== Predicates and reads ==========

    /// Whether a live (non-expired) session exists
    pub fn is_authenticated(&self) -> bool {
        let state = self.state.lock();
        match &state.session {
            Some(session) => !self.expired(session),
            None => false,
        }
    }

    fn expired(&self, session: &StoredSession) -> bool {
        let deadline = self.clock.now().saturating_add(self.config.expiry_skew);
        deadline >= session.expires_at
    }

    /// Whether a session exists but its tokens have passed expiry (with skew)
    pub fn is_expired(&self) -> bool {
        let state = self.state.lock();
        state
            .session
            .as_ref()
            .map(|s| self.expired(s))
            .unwrap_or(false)
    }

    /// The authenticated user's role, if any
    pub fn role(&self) -> Option<Role> {
        let state = self.state.lock();
        state
            .session
            .as_ref()
            .filter(|s| !self.expired(s))
            .map(|s| s.user.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Admin)
    }

    pub fn is_vendor(&self) -> bool {
        self.role() == Some(Role::Vendor)
    }

    pub fn is_buyer(&self) -> bool {
        self.role() == Some(Role::Buyer)
    }

    /// The current user profile, expired or not
    pub fn user(&self) -> Option<UserProfile> {
        self.state.lock().session.as_ref().map(|s| s.user.clone())
    }

    /// Bearer token for request authorization, only while live
    pub fn access_token(&self) -> Option<String> {
        let state = self.state.lock();
        state
            .session
            .as_ref()
            .filter(|s| !self.expired(s))
            .map(|s| s.access_token.clone())
    }

    /// Point-in-time view for rendering and guards
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            user: state.session.as_ref().map(|s| s.user.clone()),
            expires_at: state.session.as_ref().map(|s| s.expires_at),
            authenticated: state
                .session
                .as_ref()
                .map(|s| !self.expired(s))
                .unwrap_or(false),
            error: state.error.clone(),
        }
    }
}
