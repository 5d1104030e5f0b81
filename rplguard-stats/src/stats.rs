//! Shared, guarded handle over the neighbor table.
//!
//! `RplStats` is what the rest of the system holds: a cheap `Clone`
//! handle whose public operations each take the guard exactly once. The
//! guard is not reentrant — a caller must never re-enter the handle from
//! inside one of its own calls (there is no such path in this crate).
//!
//! Sequences of calls are not atomic as a whole: ingestion may interleave
//! between two queries. Detector and render passes, in contrast, each run
//! under a single acquisition and therefore see one consistent view.

use std::net::Ipv6Addr;
use std::sync::{Arc, Mutex, PoisonError};

use rplguard_schema::{MessageKind, NeighborEntry, TableSnapshot};

use crate::table::{NeighborTable, RecordOutcome, DEFAULT_CAPACITY};

/// Shared handle to a guarded [`NeighborTable`].
#[derive(Debug, Clone)]
pub struct RplStats {
    inner: Arc<Mutex<NeighborTable>>,
}

impl RplStats {
    /// Create a handle over a fresh table with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(NeighborTable::new(capacity))),
        }
    }

    /// Lock the table. A poisoned lock is recovered: the table holds only
    /// plain counters and is valid in every intermediate state.
    fn lock(&self) -> std::sync::MutexGuard<'_, NeighborTable> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one control message of `kind` from `addr`.
    pub fn record(&self, addr: Ipv6Addr, kind: MessageKind) -> RecordOutcome {
        self.lock().record(addr, kind)
    }

    /// Counter for `kind` from `addr`, or `None` if untracked.
    pub fn count_by_addr(&self, addr: Ipv6Addr, kind: MessageKind) -> Option<u32> {
        self.lock().count_by_addr(addr, kind)
    }

    /// Counter for `kind` at first-seen position `idx`.
    pub fn count_by_index(&self, idx: usize, kind: MessageKind) -> Option<u32> {
        self.lock().count_by_index(idx, kind)
    }

    /// Full record at first-seen position `idx`.
    pub fn entry(&self, idx: usize) -> Option<NeighborEntry> {
        self.lock().entry(idx).cloned()
    }

    /// Number of neighbors currently tracked.
    pub fn neighbor_count(&self) -> usize {
        self.lock().neighbor_count()
    }

    /// Clear every record, counter, and attacker flag.
    pub fn reset(&self) {
        self.lock().reset()
    }

    /// Run the DIO population scan over a consistent view of the table.
    pub fn check_dio_attackers(&self) {
        self.lock().check_dio_attackers()
    }

    /// Run the DIS threshold scan over a consistent view of the table.
    pub fn check_dis_attackers(&self) {
        self.lock().check_dis_attackers()
    }

    /// Render the table listing.
    pub fn render(&self) -> String {
        self.lock().render()
    }

    /// Render into a bounded budget; see [`NeighborTable::render_truncated`].
    pub fn render_truncated(&self, max_len: usize) -> (String, usize) {
        self.lock().render_truncated(max_len)
    }

    /// Structured snapshot of the table at `ts_unix_sec`.
    pub fn snapshot(&self, ts_unix_sec: u64) -> TableSnapshot {
        self.lock().snapshot(ts_unix_sec)
    }
}

impl Default for RplStats {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
