//! Sleep abstraction so the watch loop can be tested without delays.

use std::time::Duration;

/// Trait for pacing the watch loop between cycles.
pub trait Sleeper: Send + Sync {
    /// Sleep for the given number of seconds.
    fn sleep_sec(&self, seconds: u64);
}

/// Real sleeper backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealSleeper;

impl Sleeper for RealSleeper {
    fn sleep_sec(&self, seconds: u64) {
        std::thread::sleep(Duration::from_secs(seconds));
    }
}

/// Test sleeper that returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSleeper;

impl Sleeper for NoopSleeper {
    fn sleep_sec(&self, _seconds: u64) {}
}
