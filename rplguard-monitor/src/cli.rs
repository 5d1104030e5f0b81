//! CLI argument parsing for the rplguard monitor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

/// Default neighbor table capacity.
pub const DEFAULT_CAPACITY: usize = 64;

/// Default UDP listen address for the event feed.
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8765";

/// Default interval between table printouts, in seconds.
pub const DEFAULT_PRINT_INTERVAL_SEC: u64 = 10;

/// Default interval between detection passes, in seconds.
pub const DEFAULT_DETECT_INTERVAL_SEC: u64 = 30;

/// Errors from CLI argument validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("print-interval must be at least 1 second, got {0}")]
    InvalidPrintInterval(u64),

    #[error("detect-interval must be at least 1 second, got {0}")]
    InvalidDetectInterval(u64),

    #[error("duration must be at least 1 second, got {0}")]
    InvalidDuration(u64),
}

/// RPL control-plane flood monitor.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rplguard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v, -vv).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Watch a live event feed and periodically flag flooders.
    Watch(WatchArgs),
    /// Replay a recorded event file and report the verdict.
    Replay(ReplayArgs),
}

/// Arguments for the watch command.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct WatchArgs {
    /// UDP address to receive event lines on.
    #[arg(long, default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Maximum number of neighbors to track.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Seconds between table printouts.
    #[arg(long = "print-interval", default_value_t = DEFAULT_PRINT_INTERVAL_SEC)]
    pub print_interval_sec: u64,

    /// Seconds between detection passes.
    #[arg(long = "detect-interval", default_value_t = DEFAULT_DETECT_INTERVAL_SEC)]
    pub detect_interval_sec: u64,

    /// Stop after this many seconds (runs until Ctrl+C if unset).
    #[arg(long = "duration")]
    pub duration_sec: Option<u64>,
}

impl WatchArgs {
    /// Validate argument ranges.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.capacity < 1 {
            return Err(CliError::InvalidCapacity(self.capacity));
        }
        if self.print_interval_sec < 1 {
            return Err(CliError::InvalidPrintInterval(self.print_interval_sec));
        }
        if self.detect_interval_sec < 1 {
            return Err(CliError::InvalidDetectInterval(self.detect_interval_sec));
        }
        if let Some(duration) = self.duration_sec {
            if duration < 1 {
                return Err(CliError::InvalidDuration(duration));
            }
        }
        Ok(())
    }
}

/// Arguments for the replay command.
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct ReplayArgs {
    /// Event file, one `<KIND> <addr>` line per message.
    pub events: PathBuf,

    /// Maximum number of neighbors to track.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Write a JSON snapshot of the final table here.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl ReplayArgs {
    /// Validate argument ranges.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.capacity < 1 {
            return Err(CliError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}
