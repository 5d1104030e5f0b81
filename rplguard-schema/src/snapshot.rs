//! Versioned table snapshots.
//!
//! A `TableSnapshot` is the structured form of the neighbor statistics
//! table at a point in time, serialized as a single JSON document.

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// One neighbor row: per-kind counters and the sticky attacker flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborEntry {
    pub addr: Ipv6Addr,
    pub dio_count: u32,
    pub dao_count: u32,
    pub dis_count: u32,
    pub dio_attacker: bool,
    pub dis_attacker: bool,
}

impl NeighborEntry {
    /// A zero-count, unflagged entry for the given neighbor.
    pub fn new(addr: Ipv6Addr) -> Self {
        Self {
            addr,
            dio_count: 0,
            dao_count: 0,
            dis_count: 0,
            dio_attacker: false,
            dis_attacker: false,
        }
    }
}

/// A snapshot of the neighbor table at a point in time.
///
/// Neighbors appear in first-seen order, matching the table's index-based
/// query API; the order is meaningful and is not sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub version: u32,
    pub ts_unix_sec: u64,
    pub neighbors: Vec<NeighborEntry>,
}

impl TableSnapshot {
    /// Create a snapshot with the current schema version.
    pub fn new(ts_unix_sec: u64, neighbors: Vec<NeighborEntry>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            ts_unix_sec,
            neighbors,
        }
    }

    /// Serialize to a JSON string (single line).
    /// This cannot fail: the snapshot holds only primitives and addresses.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("TableSnapshot serialization cannot fail")
    }

    /// Deserialize from JSON, rejecting other schema versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: TableSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SCHEMA_VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: SCHEMA_VERSION,
                found: snapshot.version,
            });
        }
        Ok(snapshot)
    }
}

/// Errors that can occur when working with snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("schema version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}
