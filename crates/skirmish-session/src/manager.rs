//! The registry of connected players.

use std::collections::HashMap;

use skirmish_protocol::{Notification, PlayerId};
use tokio::sync::mpsc;

use crate::{Session, SessionError};

/// Allocates player ids and delivers notifications by id.
///
/// Ids are a monotonically increasing counter; there is no authentication
/// layer, so the id issued at connect time is the player's whole identity
/// and is never reused within a server's lifetime.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<PlayerId, Session>,
    next_id: u64,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new connection and allocates its player id.
    pub fn connect(&mut self, sender: mpsc::UnboundedSender<Notification>) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, Session::new(id, sender));
        tracing::info!(player = %id, online = self.sessions.len(), "session opened");
        id
    }

    /// Drops a player's session. Safe to call for an already-removed id.
    pub fn remove(&mut self, player: PlayerId) {
        if self.sessions.remove(&player).is_some() {
            tracing::info!(%player, online = self.sessions.len(), "session closed");
        }
    }

    /// Delivers one notification to one player.
    ///
    /// `NotFound` here is usually a benign race — the player disconnected
    /// after the notification was computed — so callers log it at debug
    /// rather than treating it as a failure.
    pub fn send(
        &self,
        player: PlayerId,
        notification: Notification,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get(&player)
            .ok_or(SessionError::NotFound(player))?;
        session.send(notification);
        Ok(())
    }

    /// Delivers a batch of addressed notifications, skipping any whose
    /// recipient is gone.
    pub fn send_all(&self, notes: Vec<(PlayerId, Notification)>) {
        for (player, note) in notes {
            if self.send(player, note).is_err() {
                tracing::debug!(%player, "recipient disconnected before delivery");
            }
        }
    }

    /// Sends the same notification to every connected player.
    pub fn broadcast(&self, notification: Notification) {
        for session in self.sessions.values() {
            session.send(notification.clone());
        }
    }

    /// Number of connected players.
    pub fn count(&self) -> usize {
        self.sessions.len()
    }
}
