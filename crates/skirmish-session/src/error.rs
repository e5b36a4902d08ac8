//! Error types for session management.

use skirmish_protocol::PlayerId;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for this player. Common in benign races: a
    /// notification computed for a player who disconnected before
    /// delivery lands here.
    #[error("no session for player {0}")]
    NotFound(PlayerId),
}
