//! Control-message events.
//!
//! A `ControlEvent` is one observed RPL control message: the kind of
//! message and the neighbor it came from. The routing stack (or, in the
//! monitor, a UDP/file feed standing in for it) produces these; the
//! statistics core consumes them.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three RPL control-message kinds tracked per neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// DODAG Information Object — topology advertisement.
    Dio,
    /// Destination Advertisement Object — route registration.
    Dao,
    /// DODAG Information Solicitation — topology solicitation.
    Dis,
}

impl MessageKind {
    /// Wire spelling used in event lines and table headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Dio => "DIO",
            MessageKind::Dao => "DAO",
            MessageKind::Dis => "DIS",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = EventParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DIO" | "dio" => Ok(MessageKind::Dio),
            "DAO" | "dao" => Ok(MessageKind::Dao),
            "DIS" | "dis" => Ok(MessageKind::Dis),
            other => Err(EventParseError::UnknownKind(other.to_string())),
        }
    }
}

/// Errors from parsing an event line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("empty event line")]
    Empty,

    #[error("event line missing sender address")]
    MissingAddress,

    #[error("unknown message kind: {0}")]
    UnknownKind(String),

    #[error("invalid sender address: {0}")]
    BadAddress(String),

    #[error("trailing garbage after address: {0}")]
    TrailingGarbage(String),
}

/// One observed control message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlEvent {
    pub kind: MessageKind,
    pub from: Ipv6Addr,
}

impl ControlEvent {
    /// Create an event.
    pub fn new(kind: MessageKind, from: Ipv6Addr) -> Self {
        Self { kind, from }
    }

    /// Parse the text line format: `"<KIND> <addr>"`,
    /// e.g. `DIS fe80::212:4b00:613:2`.
    ///
    /// Leading/trailing whitespace is ignored. This is the monitor's feed
    /// format only; the core never parses protocol messages.
    pub fn parse_line(line: &str) -> Result<Self, EventParseError> {
        let mut parts = line.split_whitespace();
        let kind = parts.next().ok_or(EventParseError::Empty)?.parse()?;
        let addr_text = parts.next().ok_or(EventParseError::MissingAddress)?;
        let from: Ipv6Addr = addr_text
            .parse()
            .map_err(|_| EventParseError::BadAddress(addr_text.to_string()))?;
        if let Some(extra) = parts.next() {
            return Err(EventParseError::TrailingGarbage(extra.to_string()));
        }
        Ok(Self { kind, from })
    }

    /// Render back to the text line format (no trailing newline).
    pub fn to_line(&self) -> String {
        format!("{} {}", self.kind, self.from)
    }
}
