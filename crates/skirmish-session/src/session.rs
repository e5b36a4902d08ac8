//! A single connected player.

use skirmish_protocol::{Notification, PlayerId};
use tokio::sync::mpsc;

/// One connected player: their id and the outbound notification channel.
///
/// The receiving half of the channel is held by the connection's writer
/// task, which encodes each notification and pushes it down the socket.
/// A closed channel means the writer task has exited; queued sends are
/// dropped, which is the correct fate for messages to a dead connection.
#[derive(Debug)]
pub struct Session {
    id: PlayerId,
    sender: mpsc::UnboundedSender<Notification>,
}

impl Session {
    pub fn new(id: PlayerId, sender: mpsc::UnboundedSender<Notification>) -> Self {
        Self { id, sender }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Queues a notification for this player's writer task.
    pub fn send(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            tracing::debug!(player = %self.id, "writer task gone, notification dropped");
        }
    }
}
