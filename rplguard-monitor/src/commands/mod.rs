//! Command orchestration for the CLI subcommands.

pub mod replay;
pub mod watch;

pub use replay::{execute_replay, ReplayResult};
pub use watch::{execute_watch, WatchResult};

use crate::cli::CliError;
use crate::source::SourceError;
use thiserror::Error;

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CliError),

    #[error("event source error: {0}")]
    Source(#[from] SourceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;
