//! rplguard statistics core.
//!
//! Counts RPL control messages (DIO, DAO, DIS) per neighboring node and
//! flags neighbors whose counts deviate abnormally from the population.
//!
//! The crate provides:
//! - [`NeighborTable`] — the fixed-capacity counter table itself, with the
//!   two attacker detectors and the text renderer. Not synchronized.
//! - [`RplStats`] — the shared, mutex-guarded handle the rest of the
//!   system holds; one lock acquisition per public operation.
//! - [`RplHooks`] — the three-callback surface the routing stack invokes
//!   once per received control message.

mod detect;
mod hooks;
mod render;
mod stats;
mod table;

pub use detect::DIS_THRESHOLD;
pub use hooks::RplHooks;
pub use stats::RplStats;
pub use table::{NeighborTable, RecordOutcome, DEFAULT_CAPACITY};
