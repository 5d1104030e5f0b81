//! Event feed for the watch loop.
//!
//! The routing stack (or anything standing in for it) notifies the
//! monitor of received control messages as text lines, one datagram per
//! message: `"<KIND> <addr>"`. The `MessageSource` trait hides the
//! transport so command tests can script events.

use std::collections::VecDeque;
use std::io;
use std::net::UdpSocket;

use rplguard_schema::{ControlEvent, EventParseError};
use thiserror::Error;

/// Errors from the event feed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to bind event listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to receive event datagram: {0}")]
    Recv(#[source] io::Error),

    /// One bad event line. Recoverable: the loop drops the event and
    /// keeps polling.
    #[error("bad event line {line:?}: {source}")]
    BadEvent {
        line: String,
        #[source]
        source: EventParseError,
    },
}

/// Non-blocking source of control-message events.
pub trait MessageSource {
    /// Poll for the next event. `Ok(None)` means nothing is pending.
    fn poll_event(&mut self) -> Result<Option<ControlEvent>, SourceError>;
}

/// UDP-backed event source.
pub struct UdpSource {
    socket: UdpSocket,
    buf: [u8; 512],
}

impl UdpSource {
    /// Bind a non-blocking listener on `addr`.
    pub fn bind(addr: &str) -> Result<Self, SourceError> {
        let socket = UdpSocket::bind(addr).map_err(|source| SourceError::Bind {
            addr: addr.to_string(),
            source,
        })?;
        socket
            .set_nonblocking(true)
            .map_err(|source| SourceError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        Ok(Self {
            socket,
            buf: [0; 512],
        })
    }
}

impl MessageSource for UdpSource {
    fn poll_event(&mut self) -> Result<Option<ControlEvent>, SourceError> {
        let len = match self.socket.recv(&mut self.buf) {
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(e) => return Err(SourceError::Recv(e)),
        };

        let line = String::from_utf8_lossy(&self.buf[..len]);
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        match ControlEvent::parse_line(line) {
            Ok(event) => Ok(Some(event)),
            Err(source) => Err(SourceError::BadEvent {
                line: line.to_string(),
                source,
            }),
        }
    }
}

/// Scripted source for command tests: yields the queued lines, then
/// reports an idle feed forever.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    lines: VecDeque<String>,
}

impl ScriptedSource {
    /// Queue up raw event lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl MessageSource for ScriptedSource {
    fn poll_event(&mut self) -> Result<Option<ControlEvent>, SourceError> {
        let Some(line) = self.lines.pop_front() else {
            return Ok(None);
        };
        match ControlEvent::parse_line(&line) {
            Ok(event) => Ok(Some(event)),
            Err(source) => Err(SourceError::BadEvent { line, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rplguard_schema::MessageKind;

    // ===========================================
    // Test Category A — Scripted source
    // ===========================================

    #[test]
    fn test_scripted_source_yields_in_order() {
        let mut source = ScriptedSource::from_lines(["DIO fe80::1", "DIS fe80::2"]);

        let first = source.poll_event().expect("ok").expect("event");
        assert_eq!(first.kind, MessageKind::Dio);

        let second = source.poll_event().expect("ok").expect("event");
        assert_eq!(second.kind, MessageKind::Dis);

        assert!(source.poll_event().expect("ok").is_none());
        assert!(source.poll_event().expect("ok").is_none());
    }

    #[test]
    fn test_scripted_source_surfaces_bad_lines() {
        let mut source = ScriptedSource::from_lines(["DIO what", "DAO fe80::1"]);

        let err = source.poll_event().expect_err("bad line");
        assert!(matches!(err, SourceError::BadEvent { .. }));

        // The feed recovers on the next poll.
        let event = source.poll_event().expect("ok").expect("event");
        assert_eq!(event.kind, MessageKind::Dao);
    }

    // ===========================================
    // Test Category B — UDP source
    // ===========================================

    #[test]
    fn test_udp_source_empty_poll() {
        let mut source = UdpSource::bind("127.0.0.1:0").expect("bind");
        assert!(source.poll_event().expect("ok").is_none());
    }

    #[test]
    fn test_udp_source_receives_event_line() {
        let mut source = UdpSource::bind("127.0.0.1:0").expect("bind");
        let dest = source.socket.local_addr().expect("addr");

        let sender = UdpSocket::bind("127.0.0.1:0").expect("bind sender");
        sender.send_to(b"DIS fe80::99\n", dest).expect("send");

        // Allow the datagram to land.
        let mut event = None;
        for _ in 0..50 {
            if let Some(received) = source.poll_event().expect("ok") {
                event = Some(received);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        let event = event.expect("datagram delivered");
        assert_eq!(event.kind, MessageKind::Dis);
        assert_eq!(event.from, "fe80::99".parse::<std::net::Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_udp_source_bad_datagram_is_recoverable() {
        let mut source = UdpSource::bind("127.0.0.1:0").expect("bind");
        let dest = source.socket.local_addr().expect("addr");

        let sender = UdpSocket::bind("127.0.0.1:0").expect("bind sender");
        sender.send_to(b"HELLO world", dest).expect("send");

        let mut saw_bad_event = false;
        for _ in 0..50 {
            match source.poll_event() {
                Err(SourceError::BadEvent { .. }) => {
                    saw_bad_event = true;
                    break;
                }
                Ok(None) => std::thread::sleep(std::time::Duration::from_millis(10)),
                other => panic!("unexpected poll result: {:?}", other.map(|_| ())),
            }
        }
        assert!(saw_bad_event);
    }
}
