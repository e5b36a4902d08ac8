//! Unified error type for the Skirmish server.

use skirmish_battle::BattleError;
use skirmish_matchmaker::MatchmakerError;
use skirmish_protocol::ProtocolError;
use skirmish_session::SessionError;
use skirmish_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `skirmish` meta crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SkirmishError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (unknown player).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A matchmaking error (double queue, no active room).
    #[error(transparent)]
    Matchmaker(#[from] MatchmakerError),

    /// A battle-rule violation.
    #[error(transparent)]
    Battle(#[from] BattleError),

    /// Reading the card catalog from disk failed.
    #[error("failed to read card catalog: {0}")]
    CatalogIo(#[source] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_protocol::PlayerId;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::AcceptFailed(std::io::Error::other("gone"));
        let skirmish_err: SkirmishError = err.into();
        assert!(matches!(skirmish_err, SkirmishError::Transport(_)));
        assert!(skirmish_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let skirmish_err: SkirmishError = err.into();
        assert!(matches!(skirmish_err, SkirmishError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotFound(PlayerId(3));
        let skirmish_err: SkirmishError = err.into();
        assert!(matches!(skirmish_err, SkirmishError::Session(_)));
    }

    #[test]
    fn test_from_matchmaker_error() {
        let err = MatchmakerError::PlayerNotInRoom(PlayerId(3));
        let skirmish_err: SkirmishError = err.into();
        assert!(matches!(skirmish_err, SkirmishError::Matchmaker(_)));
    }

    #[test]
    fn test_from_battle_error() {
        let err = BattleError::NotAMember(PlayerId(3));
        let skirmish_err: SkirmishError = err.into();
        assert!(matches!(skirmish_err, SkirmishError::Battle(_)));
    }
}
