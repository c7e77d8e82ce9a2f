//! Advisory TTL cache check
//!
//! A fetch may be skipped when the collection was refreshed recently enough
//! and the caller did not override the query. This is advisory only: nothing
//! invalidates the cache when another client writes, so the TTL bounds
//! staleness, it does not prevent it.

use std::time::Duration;
use vitrine_core::Timestamp;

/// Last-fetch bookkeeping plus the TTL threshold
#[derive(Debug, Clone)]
pub struct Freshness {
    ttl: Duration,
    last_fetch: Option<Timestamp>,
}

impl Freshness {
    /// Never-fetched state with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Freshness { ttl, last_fetch: None }
    }

    /// Record a successful fetch at `now`
    pub fn mark(&mut self, now: Timestamp) {
        self.last_fetch = Some(now);
    }

    /// Forget the last fetch; the next freshness check fails
    pub fn invalidate(&mut self) {
        self.last_fetch = None;
    }

    /// Whether a cached collection is still within its TTL at `now`
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        match self.last_fetch {
            Some(at) => now.saturating_since(at) < self.ttl,
            None => false,
        }
    }

    /// When the collection was last fetched, if ever
    pub fn last_fetch(&self) -> Option<Timestamp> {
        self.last_fetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_fetched_is_stale() {
        let f = Freshness::new(Duration::from_secs(60));
        assert!(!f.is_fresh(Timestamp::from_secs(100)));
    }

    #[test]
    fn test_within_ttl_is_fresh() {
        let mut f = Freshness::new(Duration::from_secs(60));
        f.mark(Timestamp::from_secs(100));
        assert!(f.is_fresh(Timestamp::from_secs(100)));
        assert!(f.is_fresh(Timestamp::from_secs(159)));
    }

    #[test]
    fn test_at_and_past_ttl_is_stale() {
        let mut f = Freshness::new(Duration::from_secs(60));
        f.mark(Timestamp::from_secs(100));
        assert!(!f.is_fresh(Timestamp::from_secs(160)));
        assert!(!f.is_fresh(Timestamp::from_secs(1000)));
    }

    #[test]
    fn test_invalidate() {
        let mut f = Freshness::new(Duration::from_secs(60));
        f.mark(Timestamp::from_secs(100));
        f.invalidate();
        assert!(!f.is_fresh(Timestamp::from_secs(100)));
        assert_eq!(f.last_fetch(), None);
    }

    #[test]
    fn test_clock_stepping_backwards_stays_fresh() {
        // saturating_since clamps to zero, which is within any TTL
        let mut f = Freshness::new(Duration::from_secs(60));
        f.mark(Timestamp::from_secs(100));
        assert!(f.is_fresh(Timestamp::from_secs(50)));
    }
}
