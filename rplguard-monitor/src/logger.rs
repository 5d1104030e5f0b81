//! Trait-based logging for deterministic command tests.
//!
//! The monitor writes human-readable lines to stderr; tests swap in a
//! buffering implementation and assert on what was logged.

use std::sync::Mutex;

/// Verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Always shown.
    Normal,
    /// Shown with -v.
    Verbose,
    /// Shown with -vv.
    Debug,
}

impl Verbosity {
    /// Map the CLI's -v count to a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Logging sink used by the commands.
pub trait Logger: Send + Sync {
    /// Log `message` at `level`.
    fn log(&self, level: Verbosity, message: &str);

    /// Always-visible output.
    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    /// Output gated behind -v.
    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    /// Output gated behind -vv.
    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Logger writing to stderr, filtered by a maximum level.
#[derive(Debug)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    /// Create a logger that shows messages up to `level`.
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            eprintln!("{}", message);
        }
    }
}

/// Logger that records every message, for tests.
#[derive(Debug, Default)]
pub struct BufferLogger {
    lines: Mutex<Vec<(Verbosity, String)>>,
}

impl BufferLogger {
    /// Create an empty buffer logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines in order.
    pub fn lines(&self) -> Vec<(Verbosity, String)> {
        self.lines.lock().expect("logger lock").clone()
    }

    /// True if any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(_, message)| message.contains(needle))
    }
}

impl Logger for BufferLogger {
    fn log(&self, level: Verbosity, message: &str) {
        self.lines
            .lock()
            .expect("logger lock")
            .push((level, message.to_string()));
    }
}
