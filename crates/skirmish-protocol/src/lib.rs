//! Wire protocol for Skirmish.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Ids** ([`PlayerId`], [`RoomId`], [`CardId`]) — newtype identifiers.
//! - **Card data** ([`Card`], [`CardTemplate`]) — the combat unit and the
//!   read-only catalog entry it is instantiated from.
//! - **Messages** ([`Action`], [`Notification`]) — the closed enums of
//!   everything a client may send and everything the server sends back.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! The protocol layer sits between transport (raw frames) and the battle
//! engine (game rules). It doesn't know about connections or rooms — it
//! only knows how messages and card data are shaped on the wire.

mod card;
mod codec;
mod error;
mod ids;
mod message;

pub use card::{Card, CardTemplate};
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use ids::{CardId, PlayerId, RoomId};
pub use message::{Action, Notification, PrivateState, PublicState};
