//! WebSocket transport for Skirmish, built on `tokio-tungstenite`.
//!
//! The layer is bytes-in, bytes-out: framing and JSON belong to the
//! protocol crate. A [`WsConnection`] splits its socket into separately
//! locked sink and stream halves, so a reader task blocked in
//! [`recv`](WsConnection::recv) never prevents a writer task from
//! sending — server notifications are pushed while the client is idle.

mod error;
mod websocket;

pub use error::TransportError;
pub use websocket::{WsConnection, WsListener};

use std::fmt;

/// Opaque identifier for a connection, used only in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}
