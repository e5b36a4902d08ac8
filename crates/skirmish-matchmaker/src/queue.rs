//! The FIFO matchmaking queue.

use std::collections::VecDeque;

use skirmish_protocol::PlayerId;

use crate::MatchmakerError;

/// Players waiting for an opponent, in arrival order.
///
/// Matching is strictly FIFO: the two longest-waiting players are paired
/// first. A player appears at most once.
#[derive(Debug, Default)]
pub struct MatchQueue {
    waiting: VecDeque<PlayerId>,
}

impl MatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player to the back of the queue. Re-joining while already
    /// queued is inert: the player keeps their original position and
    /// `false` is returned.
    pub fn enqueue(&mut self, player: PlayerId) -> bool {
        if self.contains(player) {
            return false;
        }
        self.waiting.push_back(player);
        true
    }

    /// Pops the longest-waiting player.
    pub fn dequeue(&mut self) -> Result<PlayerId, MatchmakerError> {
        self.waiting.pop_front().ok_or(MatchmakerError::EmptyQueue)
    }

    /// Removes a player from wherever they are in the queue. Returns
    /// whether they were waiting.
    pub fn remove(&mut self, player: PlayerId) -> bool {
        match self.waiting.iter().position(|p| *p == player) {
            Some(pos) => {
                self.waiting.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.waiting.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }
}
