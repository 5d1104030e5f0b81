//! Graceful shutdown on SIGINT.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Trait for checking whether the loop should stop.
pub trait ShutdownCheck: Send + Sync {
    /// Returns true once shutdown has been requested.
    fn should_stop(&self) -> bool;
}

/// Shutdown flag set by the Ctrl+C handler.
///
/// The watch loop polls `should_stop` once per cycle, so a bounded amount
/// of work happens after the signal before the loop exits cleanly.
#[derive(Debug, Clone)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// Create the flag and register the SIGINT handler. Registration
    /// failure (another handler already installed) leaves a flag that can
    /// still be triggered manually.
    pub fn new() -> Self {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = flag.clone();
        let _ = ctrlc::set_handler(move || {
            handler_flag.store(true, Ordering::SeqCst);
        });
        Self { flag }
    }

    /// Create a flag with no signal handler, for tests and embedding.
    pub fn manual() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request shutdown.
    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl Default for ShutdownFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownCheck for ShutdownFlag {
    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Test double that never requests shutdown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverShutdown;

impl ShutdownCheck for NeverShutdown {
    fn should_stop(&self) -> bool {
        false
    }
}

/// Test double that allows a fixed number of cycles before stopping.
#[derive(Debug)]
pub struct StopAfter {
    remaining: AtomicUsize,
}

impl StopAfter {
    /// Allow `checks` negative answers before reporting shutdown.
    pub fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl ShutdownCheck for StopAfter {
    fn should_stop(&self) -> bool {
        // fetch_update returns Err once the count is exhausted.
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}
