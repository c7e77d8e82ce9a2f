//! Millisecond-precision timestamps
//!
//! The canonical time representation across the state layer. Cache
//! freshness checks and session expiry are both expressed as comparisons
//! between `Timestamp` values, so everything that needs "now" takes it from
//! the [`Clock`](crate::clock::Clock) seam rather than reading the system
//! clock directly.
//!
//! Milliseconds match the granularity of the backend's `expires_in` fields
//! and are more than enough for an advisory TTL check.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Millisecond-precision timestamp
///
/// Represents a point in time as milliseconds since Unix epoch.
///
/// ## Invariants
///
/// - Always non-negative (u64)
/// - Comparable and orderable
/// - The zero timestamp represents Unix epoch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp(0);

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1_000))
    }

    /// Get milliseconds since Unix epoch
    #[inline]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Get seconds since Unix epoch (truncates)
    #[inline]
    pub const fn as_secs(&self) -> u64 {
        self.0 / 1_000
    }

    /// Compute the duration since an earlier timestamp
    ///
    /// Returns `Duration::ZERO` if `earlier` is actually later than `self`,
    /// so a clock that steps backwards never produces a panic or a huge
    /// wrapped value.
    pub fn saturating_since(&self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Add a duration, saturating at the maximum representable timestamp
    pub fn saturating_add(&self, d: Duration) -> Timestamp {
        Timestamp(self.0.saturating_add(d.as_millis() as u64))
    }
}
