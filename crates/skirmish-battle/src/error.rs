//! Error types for the battle engine.

use skirmish_protocol::PlayerId;

/// Errors that can occur while mutating a battle room.
#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    /// A play or end-turn action was rejected: a referenced card is not in
    /// the acting player's hand, the field is out of capacity, or the
    /// player already acted this turn. Room state is unchanged.
    #[error("invalid move by {player}: {reason}")]
    InvalidMove { player: PlayerId, reason: String },

    /// The acting player is not one of the room's two members.
    #[error("player {0} is not a member of this room")]
    NotAMember(PlayerId),
}

impl BattleError {
    pub(crate) fn invalid_move(player: PlayerId, reason: impl Into<String>) -> Self {
        Self::InvalidMove {
            player,
            reason: reason.into(),
        }
    }
}
