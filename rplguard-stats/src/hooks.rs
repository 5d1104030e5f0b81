//! Routing-stack callback surface.
//!
//! The routing protocol invokes one hook per received control message,
//! passing only the sender's address; the core never inspects message
//! payloads. [`RplStats`] implements the trait, so registering the hooks
//! is just handing a clone of the handle to the routing component.

use std::net::Ipv6Addr;

use rplguard_schema::{ControlEvent, MessageKind};

use crate::stats::RplStats;
use crate::table::RecordOutcome;

/// Per-message-kind callbacks invoked by the routing stack.
///
/// Each hook returns the record outcome so the caller can observe
/// capacity exhaustion; reacting to it (or ignoring it, as the routing
/// stack does) is the caller's concern.
pub trait RplHooks: Send + Sync {
    /// A DIO (topology advertisement) arrived from `from`.
    fn on_dio(&self, from: Ipv6Addr) -> RecordOutcome;

    /// A DAO (route registration) arrived from `from`.
    fn on_dao(&self, from: Ipv6Addr) -> RecordOutcome;

    /// A DIS (topology solicitation) arrived from `from`.
    fn on_dis(&self, from: Ipv6Addr) -> RecordOutcome;

    /// Dispatch an already-classified event to the matching hook.
    fn on_control_message(&self, event: &ControlEvent) -> RecordOutcome {
        match event.kind {
            MessageKind::Dio => self.on_dio(event.from),
            MessageKind::Dao => self.on_dao(event.from),
            MessageKind::Dis => self.on_dis(event.from),
        }
    }
}

impl RplHooks for RplStats {
    fn on_dio(&self, from: Ipv6Addr) -> RecordOutcome {
        self.record(from, MessageKind::Dio)
    }

    fn on_dao(&self, from: Ipv6Addr) -> RecordOutcome {
        self.record(from, MessageKind::Dao)
    }

    fn on_dis(&self, from: Ipv6Addr) -> RecordOutcome {
        self.record(from, MessageKind::Dis)
    }
}
