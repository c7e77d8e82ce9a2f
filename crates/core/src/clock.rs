//! Injectable time source
//!
//! Cache freshness and session expiry are both "now"-relative decisions.
//! Reading the system clock inline would make those decisions untestable,
//! so every store takes an `Arc<dyn Clock>` at construction. Production
//! code uses [`SystemClock`]; tests use [`ManualClock`] and advance it
//! explicitly.

use crate::timestamp::Timestamp;
use parking_lot::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    /// The current moment
    fn now(&self) -> Timestamp;
}

/// Clock backed by the operating system
///
/// Returns epoch if the system clock reads before Unix epoch (e.g. after an
/// NTP step), matching `Timestamp`'s non-negative invariant.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::from_millis(since_epoch.as_millis() as u64)
    }
}

/// Manually advanced clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at the given moment
    pub fn at(now: Timestamp) -> Self {
        ManualClock { now: Mutex::new(now) }
    }

    /// Move the clock forward
    pub fn advance(&self, d: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(d);
    }

    /// Jump the clock to an absolute moment
    pub fn set(&self, t: Timestamp) {
        *self.now.lock() = t;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a > Timestamp::EPOCH);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at(Timestamp::from_secs(10));
        assert_eq!(clock.now(), Timestamp::from_secs(10));
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), Timestamp::from_secs(15));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::default();
        clock.set(Timestamp::from_millis(42));
        assert_eq!(clock.now(), Timestamp::from_millis(42));
    }
}
