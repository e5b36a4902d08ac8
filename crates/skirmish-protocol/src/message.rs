//! Inbound actions and outbound notifications.
//!
//! Each direction is a closed, internally tagged enum, so dispatch is an
//! exhaustive `match` and an unknown tag is a decode error rather than a
//! silently ignored frame.

use serde::{Deserialize, Serialize};

use crate::{Card, CardId, CardTemplate, PlayerId};

/// Everything a client may ask the server to do.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{ "type": "PlayCards", "card_ids": [3, 7] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Client announces it is ready; the server answers with an
    /// [`Notification::OnlineUserCount`] broadcast.
    Connected,
    /// Client is going away. Equivalent to closing the socket.
    Disconnected,
    /// Enter the matchmaking queue.
    JoinQueue,
    /// Leave the matchmaking queue (no-op if not waiting).
    LeaveQueue,
    /// Finish the current turn. Combat resolves once both players end.
    EndTurn,
    /// Move the named cards from hand to the first free field slots.
    PlayCards { card_ids: Vec<CardId> },
    /// Concede the current match, ending the room immediately.
    Surrender,
    /// Request the full card catalog.
    RequestAllCards,
}

/// A player's own view of their battle state.
///
/// Sent only to the owning player — the hand contents are private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateState {
    pub id: PlayerId,
    pub deck_size: usize,
    pub hand: Vec<Card>,
    /// Fixed-capacity field; `None` is an empty slot. Index alignment with
    /// the opponent's field determines combat pairing.
    pub in_play: Vec<Option<Card>>,
    pub discarded: Vec<Card>,
}

/// The opponent-visible view of a player's battle state.
///
/// Hand contents are hidden — only the count is exposed. The field and
/// the discard pile are public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    pub id: PlayerId,
    pub deck_size: usize,
    pub hand_size: usize,
    pub in_play: Vec<Option<Card>>,
    pub discarded: Vec<Card>,
}

/// Everything the server may tell a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A match has been made. Carries the recipient's full private state
    /// and the opponent's public state.
    MatchStart {
        you: PrivateState,
        opponent: PublicState,
    },
    /// A new turn has begun; `drawn` is what the recipient just drew.
    TurnStart { drawn: Vec<Card> },
    /// The recipient's remaining hand was discarded at end of turn.
    DiscardCards { cards: Vec<Card> },
    /// `player` put `cards` onto their field. Broadcast to both players.
    PlayCardsResult { player: PlayerId, cards: Vec<Card> },
    /// Combat resolution destroyed these cards, split by owner from the
    /// recipient's perspective.
    DeadCards {
        yours: Vec<Card>,
        opponents: Vec<Card>,
    },
    /// Current number of connected players.
    OnlineUserCount { count: usize },
    /// The full read-only card catalog.
    AllCards { catalog: Vec<CardTemplate> },
}
