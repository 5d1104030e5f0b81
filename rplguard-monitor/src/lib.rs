//! rplguard monitor.
//!
//! The CLI around the statistics core: a live `watch` loop fed by a UDP
//! event feed, and a `replay` command that runs a recorded event file
//! through the table and reports the verdict.

pub mod cli;
pub mod clock;
pub mod commands;
pub mod exit;
pub mod logger;
pub mod signal;
pub mod sleeper;
pub mod source;

pub use cli::{Cli, CliError, Command, ReplayArgs, WatchArgs};
pub use commands::{execute_replay, execute_watch, CommandError, ReplayResult, WatchResult};
