//! The matchmaker: owns the wait queue and every active battle room,
//! and routes battle actions to the right room.

use std::collections::HashMap;

use skirmish_battle::{BattleConfig, BattleRoom};
use skirmish_protocol::{Card, CardId, CardTemplate, Notification, PlayerId, RoomId};

use crate::{MatchQueue, MatchmakerError};

/// Single owner of all matchmaking and battle state.
///
/// Every method is a synchronous mutation; the server wraps the whole
/// matchmaker in one mutex, so queue membership and room membership can
/// never disagree and the periodic tick never races an inbound action.
#[derive(Debug)]
pub struct Matchmaker {
    queue: MatchQueue,
    rooms: HashMap<RoomId, BattleRoom>,
    next_room_id: u64,
    catalog: Vec<CardTemplate>,
    config: BattleConfig,
}

impl Matchmaker {
    pub fn new(catalog: Vec<CardTemplate>, config: BattleConfig) -> Self {
        Self {
            queue: MatchQueue::new(),
            rooms: HashMap::new(),
            next_room_id: 0,
            catalog,
            config,
        }
    }

    /// The read-only card catalog, as served to clients.
    pub fn catalog(&self) -> &[CardTemplate] {
        &self.catalog
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// The room the player is currently fighting in, if any.
    pub fn room_of(&self, player: PlayerId) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.contains(player))
            .map(BattleRoom::id)
    }

    /// Puts a player into the wait queue.
    ///
    /// Rejected while the player has an active room; joining while already
    /// queued is inert and keeps the original queue position. Matching
    /// itself happens on the next [`tick`](Self::tick), never here.
    pub fn enqueue(&mut self, player: PlayerId) -> Result<(), MatchmakerError> {
        if let Some(room_id) = self.room_of(player) {
            return Err(MatchmakerError::AlreadyInRoom(player, room_id));
        }
        if self.queue.enqueue(player) {
            tracing::info!(%player, waiting = self.queue.len(), "player queued");
        } else {
            tracing::debug!(%player, "duplicate queue join ignored");
        }
        Ok(())
    }

    /// Removes a player from the wait queue. No-op if they aren't waiting.
    pub fn leave_queue(&mut self, player: PlayerId) {
        if self.queue.remove(player) {
            tracing::info!(%player, "player left the queue");
        }
    }

    /// One matchmaking pass: pairs waiting players FIFO, two at a time,
    /// until fewer than two remain. Returns the match-start notifications
    /// for every room created.
    ///
    /// This is the only place rooms are created. The caller runs it on a
    /// fixed interval under the same lock as every action, so a tick can
    /// neither overlap itself nor observe a half-updated queue.
    pub fn tick(&mut self) -> Vec<(PlayerId, Notification)> {
        let mut notes = Vec::new();
        while self.queue.len() >= 2 {
            let first = self.queue.dequeue().expect("length checked");
            let second = self.queue.dequeue().expect("length checked");

            let room_id = RoomId(self.next_room_id);
            self.next_room_id += 1;

            let (room, start_notes) = BattleRoom::start(
                room_id,
                [
                    (first, self.full_pool()),
                    (second, self.full_pool()),
                ],
                &self.config,
            );
            self.rooms.insert(room_id, room);
            notes.extend(start_notes);
        }
        notes
    }

    /// Routes a play-cards action to the player's room.
    pub fn play_cards(
        &mut self,
        player: PlayerId,
        card_ids: &[CardId],
    ) -> Result<Vec<(PlayerId, Notification)>, MatchmakerError> {
        let room = self.room_mut(player)?;
        Ok(room.play_cards(player, card_ids)?)
    }

    /// Routes an end-turn action to the player's room.
    pub fn end_turn(
        &mut self,
        player: PlayerId,
    ) -> Result<Vec<(PlayerId, Notification)>, MatchmakerError> {
        let room = self.room_mut(player)?;
        Ok(room.end_turn(player)?)
    }

    /// Ends the player's match immediately and removes the room.
    ///
    /// Terminal and non-cancelable: after this returns, battle actions
    /// from either former member yield [`MatchmakerError::PlayerNotInRoom`].
    pub fn surrender(&mut self, player: PlayerId) -> Result<RoomId, MatchmakerError> {
        let room_id = self
            .room_of(player)
            .ok_or(MatchmakerError::PlayerNotInRoom(player))?;
        let mut room = self.rooms.remove(&room_id).expect("room_of found it");
        room.end();
        tracing::info!(%player, %room_id, "match ended by surrender");
        Ok(room_id)
    }

    /// Handles a player going away: drops them from the queue if waiting,
    /// and ends their match as a surrender if they were fighting.
    pub fn disconnect(&mut self, player: PlayerId) {
        self.leave_queue(player);
        if let Ok(room_id) = self.surrender(player) {
            tracing::info!(%player, %room_id, "disconnect treated as surrender");
        }
    }

    /// One freshly instantiated copy of the whole catalog; the room
    /// shuffles and truncates it to deck size.
    fn full_pool(&self) -> Vec<Card> {
        self.catalog.iter().map(CardTemplate::instantiate).collect()
    }

    fn room_mut(&mut self, player: PlayerId) -> Result<&mut BattleRoom, MatchmakerError> {
        self.rooms
            .values_mut()
            .find(|room| room.contains(player))
            .ok_or(MatchmakerError::PlayerNotInRoom(player))
    }
}
