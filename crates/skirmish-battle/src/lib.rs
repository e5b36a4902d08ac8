//! Battle engine for Skirmish: per-player card collections, the two-player
//! room turn state machine, and simultaneous combat resolution.
//!
//! # Key types
//!
//! - [`PlayerState`] — one player's deck, hand, field slots, and discard
//! - [`BattleRoom`] — pairs two players and drives the turn loop
//! - [`RoomPhase`] — the room's state machine
//! - [`BattleConfig`] — deck and hand sizing
//!
//! Nothing here is async: every operation is a synchronous mutation behind
//! the caller's lock, so a room can never observe a half-applied turn.

mod combat;
mod config;
mod error;
mod player;
mod room;

pub use combat::resolve_combat;
pub use config::BattleConfig;
pub use error::BattleError;
pub use player::{FIELD_SLOTS, PlayerState};
pub use room::{BattleRoom, RoomPhase};
