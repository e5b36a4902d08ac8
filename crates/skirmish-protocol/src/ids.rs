//! Newtype identifiers used across the whole server.
//!
//! Wrapping the raw `u64`s keeps a `RoomId` from ever being passed where a
//! `PlayerId` is expected, and gives each id its own `Display` prefix for
//! log lines. `#[serde(transparent)]` keeps the wire form a plain number.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a connected player.
///
/// Allocated by the session registry when a client connects; there is no
/// authentication layer, so the id is the player's whole identity for the
/// lifetime of the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a battle room (one head-to-head match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// A unique identifier for a card in the catalog.
///
/// Card instances in play carry the id of the template they were built
/// from; within one player's pool ids are unique, so hand lookups go by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}
