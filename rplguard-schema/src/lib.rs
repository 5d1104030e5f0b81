//! rplguard shared schema.
//!
//! Defines the control-message event types fed into the statistics table
//! and the versioned snapshot format produced by it.

mod event;
mod snapshot;

pub use event::{ControlEvent, EventParseError, MessageKind};
pub use snapshot::{NeighborEntry, SnapshotError, TableSnapshot, SCHEMA_VERSION};
