//! Error types for matchmaking and action routing.

use skirmish_battle::BattleError;
use skirmish_protocol::{PlayerId, RoomId};

#[derive(Debug, thiserror::Error)]
pub enum MatchmakerError {
    /// Dequeue was attempted on an empty queue.
    #[error("matchmaking queue is empty")]
    EmptyQueue,

    /// The player tried to queue while already fighting in a room.
    #[error("player {0} is already in room {1}")]
    AlreadyInRoom(PlayerId, RoomId),

    /// A battle action arrived from a player with no active room, e.g.
    /// an end-turn sent after surrender. Callers treat this as a no-op
    /// worth a warning, not a fatal condition.
    #[error("player {0} is not in any active room")]
    PlayerNotInRoom(PlayerId),

    /// The room rejected the action.
    #[error(transparent)]
    Battle(#[from] BattleError),
}
