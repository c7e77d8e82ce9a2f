//! Error types for the marketplace state layer
//!
//! One taxonomy covers the whole workspace. The variants mirror the failure
//! classes a client actually observes: transport failures (no response at
//! all), API rejections (an HTTP status plus the server's message),
//! client-side validation, serialization, local storage I/O, and session
//! conditions.
//!
//! We use `thiserror` for `Display`/`Error` derivation. Store actions return
//! these typed errors; the store additionally mirrors the display string
//! into its view state for rendering, but callers branch on the variant,
//! never on the string.

use crate::id::EntityId;
use std::io;
use thiserror::Error;

/// Result type alias for state-layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the marketplace state layer
#[derive(Debug, Error)]
pub enum Error {
    /// No response from the backend (connectivity, timeout)
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with an error status and message
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP-style status code reported by the backend
        status: u16,
        /// Server-provided error message
        message: String,
    },

    /// Entity not found by the backend
    #[error("not found: {0}")]
    NotFound(EntityId),

    /// Client-side validation rejected the input before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoding or decoding a wire/vault payload failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Local persistence (session vault) I/O failure
    #[error("storage error: {0}")]
    Storage(#[from] io::Error),

    /// No authenticated session where one is required
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session's tokens have passed their expiry
    #[error("session expired")]
    SessionExpired,

    /// The backend rejected the stored refresh token
    #[error("refresh rejected: {0}")]
    RefreshRejected(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl Error {
    /// True for errors that indicate the backend rejected the request,
    /// as opposed to the request never arriving
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::Api { .. } | Error::NotFound(_) | Error::Validation(_)
        )
    }
}
