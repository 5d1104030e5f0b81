//! Clock abstraction for the monitor loop.
//!
//! The loop's interval bookkeeping and snapshot timestamps go through a
//! trait so tests can drive time deterministically.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of Unix timestamps.
pub trait Clock: Send + Sync {
    /// Current time as Unix seconds.
    fn now_unix_sec(&self) -> u64;
}

/// Wall-clock implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix_sec(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Test clock pinned to one timestamp.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix_sec(&self) -> u64 {
        self.0
    }
}

/// Test clock that advances by a fixed step on every read, so loops that
/// poll the time make progress without sleeping.
#[derive(Debug)]
pub struct SteppingClock {
    now: AtomicU64,
    step: u64,
}

impl SteppingClock {
    /// Start at `start`, advancing by `step` seconds per read.
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now_unix_sec(&self) -> u64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_never_moves() {
        let clock = FixedClock(1700000000);
        assert_eq!(clock.now_unix_sec(), 1700000000);
        assert_eq!(clock.now_unix_sec(), 1700000000);
    }

    #[test]
    fn test_stepping_clock_advances_per_read() {
        let clock = SteppingClock::new(100, 3);
        assert_eq!(clock.now_unix_sec(), 100);
        assert_eq!(clock.now_unix_sec(), 103);
        assert_eq!(clock.now_unix_sec(), 106);
    }

    #[test]
    fn test_system_clock_is_sane() {
        let now = SystemClock.now_unix_sec();
        // After 2020-01-01, before 2100-01-01.
        assert!(now > 1577836800 && now < 4102444800);
    }

    #[test]
    fn test_clock_as_trait_object() {
        let clock: Box<dyn Clock> = Box::new(FixedClock(42));
        assert_eq!(clock.now_unix_sec(), 42);
    }
}
