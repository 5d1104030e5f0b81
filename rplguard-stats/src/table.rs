//! The fixed-capacity neighbor statistics table.
//!
//! A dense, bounded collection of per-neighbor counter records keyed by
//! IPv6 address. Insertion is first-seen order and that order is stable:
//! index-based queries rely on it. Records are never removed individually;
//! `reset` is the only way to clear the table.

use std::net::Ipv6Addr;

use rplguard_schema::{MessageKind, NeighborEntry, TableSnapshot};

/// Default table capacity.
pub const DEFAULT_CAPACITY: usize = 64;

/// Outcome of recording one control message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The neighbor was already tracked; its counter was incremented.
    Counted,
    /// A new record was appended for this neighbor with the counter at 1.
    Added,
    /// The table is full and the neighbor is untracked; the message was
    /// dropped without any state change.
    TableFull,
}

/// Fixed-capacity table of per-neighbor control-message counters.
///
/// This type is not synchronized; [`crate::RplStats`] wraps it in a mutex
/// for shared use.
#[derive(Debug)]
pub struct NeighborTable {
    capacity: usize,
    entries: Vec<NeighborEntry>,
}

impl NeighborTable {
    /// Create an empty table holding at most `capacity` neighbors.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Maximum number of neighbors this table can track.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of neighbors currently tracked.
    pub fn neighbor_count(&self) -> usize {
        self.entries.len()
    }

    /// Linear scan for an address. O(neighbor_count); the table is sized
    /// for tens of neighbors.
    fn find(&self, addr: Ipv6Addr) -> Option<usize> {
        self.entries.iter().position(|e| e.addr == addr)
    }

    /// Record one control message of `kind` from `addr`.
    ///
    /// Unknown senders get a new record while capacity remains; once the
    /// table is full, messages from unseen addresses are dropped and
    /// reported as [`RecordOutcome::TableFull`]. Counters for tracked
    /// neighbors only ever grow between resets.
    pub fn record(&mut self, addr: Ipv6Addr, kind: MessageKind) -> RecordOutcome {
        match self.find(addr) {
            Some(idx) => {
                increment(&mut self.entries[idx], kind);
                RecordOutcome::Counted
            }
            None if self.entries.len() < self.capacity => {
                let mut entry = NeighborEntry::new(addr);
                increment(&mut entry, kind);
                self.entries.push(entry);
                RecordOutcome::Added
            }
            None => RecordOutcome::TableFull,
        }
    }

    /// Counter for `kind` from the neighbor at `addr`, or `None` if the
    /// address is not tracked.
    pub fn count_by_addr(&self, addr: Ipv6Addr, kind: MessageKind) -> Option<u32> {
        self.find(addr).map(|idx| counter(&self.entries[idx], kind))
    }

    /// Counter for `kind` at table position `idx` (first-seen order), or
    /// `None` if `idx` is out of `[0, neighbor_count)`.
    pub fn count_by_index(&self, idx: usize, kind: MessageKind) -> Option<u32> {
        self.entries.get(idx).map(|e| counter(e, kind))
    }

    /// Full record at table position `idx`.
    pub fn entry(&self, idx: usize) -> Option<&NeighborEntry> {
        self.entries.get(idx)
    }

    /// All records in first-seen order.
    pub fn entries(&self) -> &[NeighborEntry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [NeighborEntry] {
        &mut self.entries
    }

    /// Clear every record, counter, and attacker flag.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Structured snapshot of the table at `ts_unix_sec`.
    pub fn snapshot(&self, ts_unix_sec: u64) -> TableSnapshot {
        TableSnapshot::new(ts_unix_sec, self.entries.clone())
    }
}

impl Default for NeighborTable {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

fn increment(entry: &mut NeighborEntry, kind: MessageKind) {
    match kind {
        MessageKind::Dio => entry.dio_count += 1,
        MessageKind::Dao => entry.dao_count += 1,
        MessageKind::Dis => entry.dis_count += 1,
    }
}

fn counter(entry: &NeighborEntry, kind: MessageKind) -> u32 {
    match kind {
        MessageKind::Dio => entry.dio_count,
        MessageKind::Dao => entry.dao_count,
        MessageKind::Dis => entry.dis_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MessageKind::{Dao, Dio, Dis};

    fn addr(n: u16) -> Ipv6Addr {
        Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, n)
    }

    // ===========================================
    // Test Category A — Insertion / lookup
    // ===========================================

    #[test]
    fn test_empty_table() {
        let table = NeighborTable::new(4);
        assert_eq!(table.neighbor_count(), 0);
        assert_eq!(table.count_by_addr(addr(1), Dio), None);
        assert_eq!(table.count_by_index(0, Dio), None);
    }

    #[test]
    fn test_record_new_neighbor() {
        let mut table = NeighborTable::new(4);
        assert_eq!(table.record(addr(1), Dio), RecordOutcome::Added);
        assert_eq!(table.neighbor_count(), 1);
        assert_eq!(table.count_by_addr(addr(1), Dio), Some(1));
        assert_eq!(table.count_by_addr(addr(1), Dao), Some(0));
        assert_eq!(table.count_by_addr(addr(1), Dis), Some(0));
    }

    #[test]
    fn test_record_existing_increments_only_matching_counter() {
        let mut table = NeighborTable::new(4);
        table.record(addr(1), Dio);
        assert_eq!(table.record(addr(1), Dis), RecordOutcome::Counted);
        assert_eq!(table.record(addr(1), Dis), RecordOutcome::Counted);

        assert_eq!(table.neighbor_count(), 1);
        assert_eq!(table.count_by_addr(addr(1), Dio), Some(1));
        assert_eq!(table.count_by_addr(addr(1), Dao), Some(0));
        assert_eq!(table.count_by_addr(addr(1), Dis), Some(2));
    }

    #[test]
    fn test_distinct_addresses_counted_up_to_capacity() {
        let mut table = NeighborTable::new(8);
        for n in 1..=5 {
            table.record(addr(n), Dao);
        }
        assert_eq!(table.neighbor_count(), 5);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let mut table = NeighborTable::new(4);
        table.record(addr(3), Dio);
        table.record(addr(1), Dio);
        table.record(addr(2), Dio);
        table.record(addr(1), Dis);

        assert_eq!(table.entry(0).unwrap().addr, addr(3));
        assert_eq!(table.entry(1).unwrap().addr, addr(1));
        assert_eq!(table.entry(2).unwrap().addr, addr(2));
    }

    #[test]
    fn test_count_by_index_out_of_range() {
        let mut table = NeighborTable::new(4);
        table.record(addr(1), Dio);
        assert_eq!(table.count_by_index(0, Dio), Some(1));
        assert_eq!(table.count_by_index(1, Dio), None);
        assert_eq!(table.count_by_index(usize::MAX, Dio), None);
    }

    // ===========================================
    // Test Category B — Capacity policy
    // ===========================================

    #[test]
    fn test_full_table_drops_unseen_addresses() {
        let mut table = NeighborTable::new(4);
        for n in 1..=4 {
            assert_eq!(table.record(addr(n), Dio), RecordOutcome::Added);
        }
        // Fifth distinct address: dropped, no state change.
        assert_eq!(table.record(addr(5), Dio), RecordOutcome::TableFull);
        assert_eq!(table.neighbor_count(), 4);
        assert_eq!(table.count_by_addr(addr(5), Dio), None);
    }

    #[test]
    fn test_full_table_still_counts_tracked_neighbors() {
        let mut table = NeighborTable::new(2);
        table.record(addr(1), Dis);
        table.record(addr(2), Dis);
        table.record(addr(3), Dis);

        assert_eq!(table.record(addr(1), Dis), RecordOutcome::Counted);
        assert_eq!(table.count_by_addr(addr(1), Dis), Some(2));
    }

    #[test]
    fn test_zero_capacity_table_accepts_nothing() {
        let mut table = NeighborTable::new(0);
        assert_eq!(table.record(addr(1), Dio), RecordOutcome::TableFull);
        assert_eq!(table.neighbor_count(), 0);
    }

    // ===========================================
    // Test Category C — Reset
    // ===========================================

    #[test]
    fn test_reset_clears_everything() {
        let mut table = NeighborTable::new(4);
        table.record(addr(1), Dio);
        table.record(addr(2), Dis);
        table.reset();

        assert_eq!(table.neighbor_count(), 0);
        assert_eq!(table.count_by_addr(addr(1), Dio), None);
        assert_eq!(table.count_by_index(0, Dis), None);
    }

    #[test]
    fn test_reset_frees_capacity() {
        let mut table = NeighborTable::new(1);
        table.record(addr(1), Dio);
        assert_eq!(table.record(addr(2), Dio), RecordOutcome::TableFull);

        table.reset();
        assert_eq!(table.record(addr(2), Dio), RecordOutcome::Added);
    }

    // ===========================================
    // Test Category D — Snapshots
    // ===========================================

    #[test]
    fn test_snapshot_reflects_counters_in_order() {
        let mut table = NeighborTable::new(4);
        table.record(addr(2), Dio);
        table.record(addr(1), Dao);
        table.record(addr(2), Dio);

        let snapshot = table.snapshot(1700000000);
        assert_eq!(snapshot.ts_unix_sec, 1700000000);
        assert_eq!(snapshot.neighbors.len(), 2);
        assert_eq!(snapshot.neighbors[0].addr, addr(2));
        assert_eq!(snapshot.neighbors[0].dio_count, 2);
        assert_eq!(snapshot.neighbors[1].dao_count, 1);
    }
}
