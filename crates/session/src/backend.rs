//! Auth backend seam
//!
//! Token issuance is owned by the server; this trait models the auth
//! endpoints the client calls (`/auth/login`, `/auth/admin/login`,
//! `/auth/register`, `/auth/refresh`, `/auth/logout`). `MemoryAuthBackend`
//! is the in-memory stand-in used by tests: it mints tokens, rotates
//! refresh tokens, and can be scripted offline.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;
use vitrine_core::{EntityId, Error, Result, Role, UserProfile};

/// Login credentials
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials { email: email.into(), password: password.into() }
    }
}

/// What the backend hands out on a successful login/refresh
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub access_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds; the client computes the absolute expiry
    pub expires_in_secs: u64,
    pub user: UserProfile,
}

/// Client-side contract of the auth endpoints
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Buyer/vendor login
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// Admin login (separate endpoint; non-admin accounts are rejected)
    async fn admin_login(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// Create an account and log straight in
    async fn register(&self, name: &str, credentials: &Credentials, role: Role)
        -> Result<AuthGrant>;

    /// Exchange a refresh token for a fresh grant; rotates the token
    async fn refresh(&self, refresh_token: &str) -> Result<AuthGrant>;

    /// Revoke an access token server-side
    async fn revoke(&self, access_token: &str) -> Result<()>;
}

struct Account {
    password: String,
    user: UserProfile,
}

struct AuthState {
    accounts: HashMap<String, Account>,
    /// live refresh token → account email
    live_refresh_tokens: HashMap<String, String>,
    offline: bool,
    revoke_fails: bool,
}

/// In-memory [`AuthBackend`] for tests and demos
pub struct MemoryAuthBackend {
    state: Mutex<AuthState>,
    expires_in_secs: u64,
}

impl MemoryAuthBackend {
    pub fn new(expires_in_secs: u64) -> Self {
        MemoryAuthBackend {
            state: Mutex::new(AuthState {
                accounts: HashMap::new(),
                live_refresh_tokens: HashMap::new(),
                offline: false,
                revoke_fails: false,
            }),
            expires_in_secs,
        }
    }

    /// Pre-provision an account
    pub fn add_account(&self, email: &str, password: &str, name: &str, role: Role) -> UserProfile {
        let user = UserProfile {
            id: EntityId::new(format!("usr_{}", Uuid::new_v4()))
                .expect("uuid is never empty"),
            email: email.to_string(),
            name: name.to_string(),
            role,
        };
        self.state.lock().accounts.insert(
            email.to_string(),
            Account { password: password.to_string(), user: user.clone() },
        );
        user
    }

    /// Make every call fail with a transport error until turned off
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Make `revoke` fail while leaving the other endpoints up
    pub fn set_revoke_fails(&self, fails: bool) {
        self.state.lock().revoke_fails = fails;
    }

    /// Invalidate a refresh token server-side (e.g. session revoked elsewhere)
    pub fn invalidate_refresh_token(&self, token: &str) {
        self.state.lock().live_refresh_tokens.remove(token);
    }

    fn check_online(state: &AuthState) -> Result<()> {
        if state.offline {
            return Err(Error::Transport("auth backend unreachable".into()));
        }
        Ok(())
    }

    fn grant_for(state: &mut AuthState, user: UserProfile, expires_in_secs: u64) -> AuthGrant {
        let refresh_token = format!("ref_{}", Uuid::new_v4());
        state
            .live_refresh_tokens
            .insert(refresh_token.clone(), user.email.clone());
        AuthGrant {
            access_token: format!("tok_{}", Uuid::new_v4()),
            refresh_token,
            expires_in_secs,
            user,
        }
    }

    fn authenticate(state: &AuthState, credentials: &Credentials) -> Result<UserProfile> {
        let account = state.accounts.get(&credentials.email).ok_or(Error::Api {
            status: 401,
            message: "invalid credentials".into(),
        })?;
        if account.password != credentials.password {
            return Err(Error::Api { status: 401, message: "invalid credentials".into() });
        }
        Ok(account.user.clone())
    }
}

#[async_trait]
impl AuthBackend for MemoryAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        let user = Self::authenticate(&state, credentials)?;
        Ok(Self::grant_for(&mut state, user, self.expires_in_secs))
    }

    async fn admin_login(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        let user = Self::authenticate(&state, credentials)?;
        if user.role != Role::Admin {
            return Err(Error::Api { status: 403, message: "admin account required".into() });
        }
        Ok(Self::grant_for(&mut state, user, self.expires_in_secs))
    }

    async fn register(
        &self,
        name: &str,
        credentials: &Credentials,
        role: Role,
    ) -> Result<AuthGrant> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        if state.accounts.contains_key(&credentials.email) {
            return Err(Error::Api { status: 409, message: "email already registered".into() });
        }
        let user = UserProfile {
            id: EntityId::new(format!("usr_{}", Uuid::new_v4()))
                .expect("uuid is never empty"),
            email: credentials.email.clone(),
            name: name.to_string(),
            role,
        };
        state.accounts.insert(
            credentials.email.clone(),
            Account { password: credentials.password.clone(), user: user.clone() },
        );
        Ok(Self::grant_for(&mut state, user, self.expires_in_secs))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthGrant> {
        let mut state = self.state.lock();
        Self::check_online(&state)?;
        let email = state
            .live_refresh_tokens
            .remove(refresh_token)
            .ok_or_else(|| Error::RefreshRejected("unknown or rotated refresh token".into()))?;
        let user = state
            .accounts
            .get(&email)
            .map(|a| a.user.clone())
            .ok_or_else(|| Error::RefreshRejected("account no longer exists".into()))?;
        Ok(Self::grant_for(&mut state, user, self.expires_in_secs))
    }

    async fn revoke(&self, _access_token: &str) -> Result<()> {
        let state = self.state.lock();
        Self::check_online(&state)?;
        if state.revoke_fails {
            return Err(Error::Api { status: 500, message: "revoke failed".into() });
        }
        Ok(())
    }
}
