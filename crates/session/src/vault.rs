//! Durable session storage
//!
//! The token triad (access token, refresh token, user profile) plus the
//! locally computed expiry survives restarts through a `SessionVault`.
//! The vault is deliberately tiny: store, load, clear — the session store
//! owns all policy. `MemoryVault` backs tests; `FileVault` persists the
//! session as JSON at a fixed path.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use vitrine_core::{Result, Timestamp, UserProfile};

/// The persisted session triad plus expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
    /// Absolute expiry computed at grant time (`now + expires_in`)
    pub expires_at: Timestamp,
}

/// Durable storage seam for the session triad
pub trait SessionVault: Send + Sync {
    /// Persist the session, replacing any previous one
    fn store(&self, session: &StoredSession) -> Result<()>;

    /// Load the persisted session, if any
    fn load(&self) -> Result<Option<StoredSession>>;

    /// Remove any persisted session (idempotent)
    fn clear(&self) -> Result<()>;
}

/// Vault that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryVault {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        MemoryVault::default()
    }
}

impl SessionVault for MemoryVault {
    fn store(&self, session: &StoredSession) -> Result<()> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.lock().clone())
    }

    fn clear(&self) -> Result<()> {
        *self.session.lock() = None;
        Ok(())
    }
}

/// Vault persisting the session as JSON at a fixed path
#[derive(Debug, Clone)]
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileVault { path: path.into() }
    }
}

impl SessionVault for FileVault {
    fn store(&self, session: &StoredSession) -> Result<()> {
        let json = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let session = serde_json::from_slice(&bytes)?;
        Ok(Some(session))
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
