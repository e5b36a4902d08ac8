//! Per-connection handler: session setup, writer task, action routing.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register a session → allocate the PlayerId
//!   2. Spawn the writer task draining the session's notification channel
//!   3. Loop: receive actions → route to matchmaker / battle room
//!   4. On close, the drop guard runs disconnect cleanup
//!
//! There is no receive timeout: a matched player legitimately idles while
//! the opponent thinks, and this protocol has no heartbeat. The loop ends
//! when the socket closes or errors.

use std::sync::Arc;

use skirmish_matchmaker::MatchmakerError;
use skirmish_protocol::{Action, Codec, Notification, PlayerId};
use skirmish_transport::WsConnection;
use tokio::sync::mpsc;

use crate::SkirmishError;
use crate::server::ServerState;

/// Drop guard that cleans up a player when the handler exits.
///
/// This ensures cleanup happens even if the handler panics. Since `Drop`
/// is synchronous, we spawn a fire-and-forget task for the async locks:
/// the disconnect is treated as a surrender if the player was mid-match,
/// the session is removed, and the new online count is broadcast.
struct ConnectionGuard {
    player_id: PlayerId,
    state: Arc<ServerState>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let player_id = self.player_id;
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            {
                state.matchmaker.lock().await.disconnect(player_id);
            }
            let mut sessions = state.sessions.lock().await;
            sessions.remove(player_id);
            let count = sessions.count();
            sessions.broadcast(Notification::OnlineUserCount { count });
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WsConnection,
    state: Arc<ServerState>,
) -> Result<(), SkirmishError> {
    let conn_id = conn.id();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let player_id = {
        let mut sessions = state.sessions.lock().await;
        sessions.connect(tx)
    };
    tracing::info!(%conn_id, %player_id, "player connected");

    // Writer task: drains this player's notification channel into the
    // socket. Exits when the session is removed (channel closed) or the
    // socket rejects a send.
    let writer_conn = conn.clone();
    let codec = state.codec;
    tokio::spawn(async move {
        while let Some(note) = rx.recv().await {
            let bytes = match codec.encode(&note) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(%player_id, error = %e, "failed to encode notification");
                    continue;
                }
            };
            if writer_conn.send(&bytes).await.is_err() {
                break;
            }
        }
    });

    let _guard = ConnectionGuard {
        player_id,
        state: Arc::clone(&state),
    };

    broadcast_online_count(&state).await;

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%player_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%player_id, error = %e, "recv error");
                break;
            }
        };

        let action: Action = match state.codec.decode(&data) {
            Ok(action) => action,
            Err(e) => {
                // Bad frame: drop it, keep the connection.
                tracing::debug!(%player_id, error = %e, "failed to decode action");
                continue;
            }
        };

        if dispatch_action(&state, player_id, action).await {
            break;
        }
    }

    let _ = conn.close().await;
    // _guard drops here → disconnect cleanup fires.
    Ok(())
}

/// Routes one action. Returns `true` if the connection should close.
async fn dispatch_action(state: &Arc<ServerState>, player_id: PlayerId, action: Action) -> bool {
    match action {
        Action::Connected => {
            broadcast_online_count(state).await;
        }

        Action::Disconnected => {
            tracing::info!(%player_id, "client said goodbye");
            return true;
        }

        Action::JoinQueue => {
            let result = { state.matchmaker.lock().await.enqueue(player_id) };
            if let Err(e) = result {
                tracing::warn!(%player_id, error = %e, "queue join rejected");
            }
        }

        Action::LeaveQueue => {
            state.matchmaker.lock().await.leave_queue(player_id);
        }

        Action::EndTurn => {
            let result = { state.matchmaker.lock().await.end_turn(player_id) };
            deliver(state, player_id, result).await;
        }

        Action::PlayCards { card_ids } => {
            let result = { state.matchmaker.lock().await.play_cards(player_id, &card_ids) };
            deliver(state, player_id, result).await;
        }

        Action::Surrender => {
            let result = { state.matchmaker.lock().await.surrender(player_id) };
            if let Err(e) = result {
                tracing::warn!(%player_id, error = %e, "surrender without an active room");
            }
        }

        Action::RequestAllCards => {
            let catalog = { state.matchmaker.lock().await.catalog().to_vec() };
            let sessions = state.sessions.lock().await;
            if sessions
                .send(player_id, Notification::AllCards { catalog })
                .is_err()
            {
                tracing::debug!(%player_id, "catalog requester already gone");
            }
        }
    }
    false
}

/// Delivers a battle action's notifications, or logs why it was dropped.
///
/// A rejected action is never fatal: `PlayerNotInRoom` is the normal fate
/// of actions that race a surrender, and an invalid move just leaves the
/// room untouched.
async fn deliver(
    state: &Arc<ServerState>,
    player_id: PlayerId,
    result: Result<Vec<(PlayerId, Notification)>, MatchmakerError>,
) {
    match result {
        Ok(notes) => {
            if !notes.is_empty() {
                state.sessions.lock().await.send_all(notes);
            }
        }
        Err(e) => {
            tracing::warn!(%player_id, error = %e, "battle action dropped");
        }
    }
}

/// Tells every connected client how many players are online.
async fn broadcast_online_count(state: &Arc<ServerState>) {
    let sessions = state.sessions.lock().await;
    let count = sessions.count();
    sessions.broadcast(Notification::OnlineUserCount { count });
}
