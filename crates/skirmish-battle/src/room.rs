//! The battle room: two players and the turn state machine.
//!
//! A room is a plain owned value — the matchmaker's room map holds it and
//! every mutation arrives through one lock, so there is no interior
//! synchronization here. Room operations return `(PlayerId, Notification)`
//! pairs for the caller to deliver; the room never touches a socket.

use skirmish_protocol::{Card, CardId, Notification, PlayerId, RoomId};

use crate::{BattleConfig, BattleError, PlayerState, combat};

/// The room's turn state machine.
///
/// ```text
/// Starting → TurnActive → ResolvingCombat → TurnActive (loop) → Ended
/// ```
///
/// `Starting` and `ResolvingCombat` are passed through synchronously
/// inside a single operation; between calls an active room always rests
/// in `TurnActive`. `Ended` is terminal and reached only by surrender
/// (or disconnect, which the matchmaker treats as surrender).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomPhase {
    Starting,
    TurnActive,
    ResolvingCombat,
    Ended,
}

impl std::fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Starting => write!(f, "Starting"),
            Self::TurnActive => write!(f, "TurnActive"),
            Self::ResolvingCombat => write!(f, "ResolvingCombat"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}

/// A head-to-head match between exactly two players.
#[derive(Debug)]
pub struct BattleRoom {
    id: RoomId,
    players: [PlayerState; 2],
    phase: RoomPhase,
    hand_size: usize,
}

impl BattleRoom {
    /// Creates a room from two players' card pools and runs the Starting
    /// phase: shuffle, deal decks up to `deck_size`, draw initial hands
    /// (fewer if a deck runs short — never an error), and build each
    /// player's match-start notification with their private state and
    /// the opponent's public state.
    pub fn start(
        id: RoomId,
        pools: [(PlayerId, Vec<Card>); 2],
        config: &BattleConfig,
    ) -> (Self, Vec<(PlayerId, Notification)>) {
        let [(id_a, pool_a), (id_b, pool_b)] = pools;
        let mut room = Self {
            id,
            players: [
                PlayerState::new(id_a, pool_a, config.deck_size),
                PlayerState::new(id_b, pool_b, config.deck_size),
            ],
            phase: RoomPhase::Starting,
            hand_size: config.hand_size,
        };

        for player in &mut room.players {
            player.draw_up_to(room.hand_size);
        }

        let notes = vec![
            (
                room.players[0].id(),
                Notification::MatchStart {
                    you: room.players[0].private_view(),
                    opponent: room.players[1].public_view(),
                },
            ),
            (
                room.players[1].id(),
                Notification::MatchStart {
                    you: room.players[1].private_view(),
                    opponent: room.players[0].public_view(),
                },
            ),
        ];

        room.phase = RoomPhase::TurnActive;
        tracing::info!(
            room_id = %room.id,
            player_a = %room.players[0].id(),
            player_b = %room.players[1].id(),
            "battle started"
        );
        (room, notes)
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    /// Whether `player` is one of the room's two members.
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.iter().any(|p| p.id() == player)
    }

    pub fn player_ids(&self) -> [PlayerId; 2] {
        [self.players[0].id(), self.players[1].id()]
    }

    /// Read access to one member's battle state.
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id() == player)
    }

    /// Moves the named cards from `player`'s hand onto their field.
    ///
    /// At most one play action per player per turn; rejected once the
    /// player has ended their turn. A successful play is announced to
    /// both players — the field is public information.
    pub fn play_cards(
        &mut self,
        player: PlayerId,
        card_ids: &[CardId],
    ) -> Result<Vec<(PlayerId, Notification)>, BattleError> {
        let idx = self.index_of(player)?;
        if self.phase != RoomPhase::TurnActive {
            return Err(BattleError::invalid_move(
                player,
                format!("cannot play cards in phase {}", self.phase),
            ));
        }
        if self.players[idx].turn_ended() {
            return Err(BattleError::invalid_move(player, "turn already ended"));
        }
        if self.players[idx].has_played_this_turn() {
            return Err(BattleError::invalid_move(
                player,
                "already played cards this turn",
            ));
        }

        let placed = self.players[idx].play_cards(card_ids)?;
        self.players[idx].mark_played();
        tracing::debug!(
            room_id = %self.id,
            %player,
            cards = placed.len(),
            "cards played"
        );

        let note = Notification::PlayCardsResult {
            player,
            cards: placed,
        };
        Ok(self
            .player_ids()
            .into_iter()
            .map(|pid| (pid, note.clone()))
            .collect())
    }

    /// Marks `player`'s turn as ended and discards their remaining hand.
    ///
    /// A repeated end-turn is an inert no-op. When the second player ends,
    /// combat resolves synchronously before this returns: paired slots
    /// exchange damage, dead cards move to discard, both players' flags
    /// reset, and both draw toward a fresh hand.
    pub fn end_turn(
        &mut self,
        player: PlayerId,
    ) -> Result<Vec<(PlayerId, Notification)>, BattleError> {
        let idx = self.index_of(player)?;
        if self.phase != RoomPhase::TurnActive {
            tracing::warn!(
                room_id = %self.id,
                %player,
                phase = %self.phase,
                "end turn ignored outside an active turn"
            );
            return Ok(Vec::new());
        }
        if !self.players[idx].end_turn() {
            tracing::debug!(room_id = %self.id, %player, "duplicate end turn ignored");
            return Ok(Vec::new());
        }

        let mut notes = Vec::new();
        let discarded = self.players[idx].discard_hand();
        if !discarded.is_empty() {
            notes.push((player, Notification::DiscardCards { cards: discarded }));
        }

        if self.players.iter().all(PlayerState::turn_ended) {
            self.resolve_turn(&mut notes);
        }
        Ok(notes)
    }

    /// Marks the room as terminally ended. The matchmaker calls this on
    /// surrender or disconnect just before dropping the room.
    pub fn end(&mut self) {
        self.phase = RoomPhase::Ended;
    }

    /// Runs ResolvingCombat and the transition back into TurnActive.
    fn resolve_turn(&mut self, notes: &mut Vec<(PlayerId, Notification)>) {
        self.phase = RoomPhase::ResolvingCombat;

        let [a, b] = &mut self.players;
        let (dead_a, dead_b) = combat::resolve_combat(a, b);
        tracing::info!(
            room_id = %self.id,
            dead_a = dead_a.len(),
            dead_b = dead_b.len(),
            "combat resolved"
        );
        if !dead_a.is_empty() || !dead_b.is_empty() {
            notes.push((
                a.id(),
                Notification::DeadCards {
                    yours: dead_a.clone(),
                    opponents: dead_b.clone(),
                },
            ));
            notes.push((
                b.id(),
                Notification::DeadCards {
                    yours: dead_b,
                    opponents: dead_a,
                },
            ));
        }

        for player in &mut self.players {
            player.begin_turn();
            let drawn = player.draw_up_to(self.hand_size);
            notes.push((player.id(), Notification::TurnStart { drawn }));
        }
        self.phase = RoomPhase::TurnActive;
    }

    fn index_of(&self, player: PlayerId) -> Result<usize, BattleError> {
        self.players
            .iter()
            .position(|p| p.id() == player)
            .ok_or(BattleError::NotAMember(player))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_protocol::CardTemplate;

    const P1: PlayerId = PlayerId(1);
    const P2: PlayerId = PlayerId(2);

    fn card(id: u64, attack: u32, defense: u32) -> Card {
        CardTemplate {
            id: CardId(id),
            name: format!("card-{id}"),
            image: format!("card-{id}.png"),
            attack,
            defense,
            level: 1,
            description: String::new(),
        }
        .instantiate()
    }

    fn uniform_pool(start_id: u64, n: u64) -> Vec<Card> {
        (start_id..start_id + n).map(|i| card(i, 2, 3)).collect()
    }

    /// A room where each player's whole (small) pool is drawn into the
    /// hand at start, so tests know exactly which cards are in hand.
    fn small_room(pool_a: Vec<Card>, pool_b: Vec<Card>) -> (BattleRoom, Vec<(PlayerId, Notification)>) {
        let config = BattleConfig {
            deck_size: 5,
            hand_size: 5,
        };
        BattleRoom::start(RoomId(1), [(P1, pool_a), (P2, pool_b)], &config)
    }

    fn standard_room() -> BattleRoom {
        let config = BattleConfig::default();
        BattleRoom::start(
            RoomId(1),
            [(P1, uniform_pool(0, 30)), (P2, uniform_pool(100, 30))],
            &config,
        )
        .0
    }

    #[test]
    fn test_start_deals_decks_and_hands() {
        let room = standard_room();
        for pid in [P1, P2] {
            let player = room.player(pid).unwrap();
            assert_eq!(player.hand().len(), 5);
            assert_eq!(player.deck_len(), 25);
            assert_eq!(player.card_count(), 30);
        }
        assert_eq!(room.phase(), RoomPhase::TurnActive);
    }

    #[test]
    fn test_start_emits_match_start_with_opponent_hand_hidden() {
        let (_, notes) = small_room(uniform_pool(0, 5), uniform_pool(100, 5));
        assert_eq!(notes.len(), 2);
        for (pid, note) in &notes {
            let Notification::MatchStart { you, opponent } = note else {
                panic!("expected MatchStart, got {note:?}");
            };
            assert_eq!(you.id, *pid);
            assert_ne!(opponent.id, *pid);
            assert_eq!(you.hand.len(), 5);
            assert_eq!(opponent.hand_size, 5);
        }
    }

    #[test]
    fn test_start_with_short_pool_draws_what_exists() {
        let (room, _) = small_room(uniform_pool(0, 2), uniform_pool(100, 5));
        let p1 = room.player(P1).unwrap();
        assert_eq!(p1.hand().len(), 2);
        assert_eq!(p1.deck_len(), 0);
    }

    #[test]
    fn test_end_turn_discards_hand_to_owner_only() {
        let mut room = standard_room();
        let notes = room.end_turn(P1).unwrap();

        assert_eq!(notes.len(), 1);
        let (pid, note) = &notes[0];
        assert_eq!(*pid, P1);
        assert!(matches!(note, Notification::DiscardCards { cards } if cards.len() == 5));
        assert!(room.player(P1).unwrap().hand().is_empty());
    }

    #[test]
    fn test_resolution_waits_for_both_players() {
        let mut room = standard_room();

        let notes = room.end_turn(P1).unwrap();
        assert!(
            !notes
                .iter()
                .any(|(_, n)| matches!(n, Notification::TurnStart { .. })),
            "resolution must not fire with one player pending"
        );

        let notes = room.end_turn(P2).unwrap();
        let turn_starts: Vec<_> = notes
            .iter()
            .filter(|(_, n)| matches!(n, Notification::TurnStart { .. }))
            .collect();
        assert_eq!(turn_starts.len(), 2);
        assert!(!room.player(P1).unwrap().turn_ended());
        assert!(!room.player(P2).unwrap().turn_ended());
    }

    #[test]
    fn test_duplicate_end_turn_is_inert() {
        let mut room = standard_room();
        room.end_turn(P1).unwrap();
        let deck_before = room.player(P1).unwrap().deck_len();

        // Second end turn from the same player: no resolution, no draws.
        let notes = room.end_turn(P1).unwrap();
        assert!(notes.is_empty());
        assert_eq!(room.player(P1).unwrap().deck_len(), deck_before);
        assert!(room.player(P1).unwrap().turn_ended());
    }

    #[test]
    fn test_refill_draws_up_to_hand_size_after_resolution() {
        let mut room = standard_room();
        room.end_turn(P1).unwrap();
        let notes = room.end_turn(P2).unwrap();

        for (pid, note) in notes {
            if let Notification::TurnStart { drawn } = note {
                assert_eq!(drawn.len(), 5);
                assert_eq!(room.player(pid).unwrap().hand().len(), 5);
                assert_eq!(room.player(pid).unwrap().deck_len(), 20);
            }
        }
    }

    #[test]
    fn test_full_turn_combat_moves_dead_to_discard() {
        // P1 fields (attack 3, defense 5); P2 fields (attack 4, defense 2).
        // P1's card survives at 1; P2's dies.
        let (mut room, _) = small_room(vec![card(1, 3, 5)], vec![card(2, 4, 2)]);
        room.play_cards(P1, &[CardId(1)]).unwrap();
        room.play_cards(P2, &[CardId(2)]).unwrap();
        room.end_turn(P1).unwrap();
        let notes = room.end_turn(P2).unwrap();

        let dead_to_p1 = notes
            .iter()
            .find_map(|(pid, n)| match (pid, n) {
                (&p, Notification::DeadCards { yours, opponents }) if p == P1 => {
                    Some((yours.clone(), opponents.clone()))
                }
                _ => None,
            })
            .expect("P1 should be told about dead cards");
        assert!(dead_to_p1.0.is_empty());
        assert_eq!(dead_to_p1.1.len(), 1);
        assert_eq!(dead_to_p1.1[0].id, CardId(2));

        let p1 = room.player(P1).unwrap();
        assert_eq!(p1.slots()[0].as_ref().unwrap().defense, 1);
        let p2 = room.player(P2).unwrap();
        assert!(p2.slots()[0].is_none());
        assert_eq!(p2.discarded().len(), 1);
    }

    #[test]
    fn test_no_dead_cards_notification_without_deaths() {
        let (mut room, _) = small_room(vec![card(1, 1, 9)], vec![card(2, 1, 9)]);
        room.play_cards(P1, &[CardId(1)]).unwrap();
        room.play_cards(P2, &[CardId(2)]).unwrap();
        room.end_turn(P1).unwrap();
        let notes = room.end_turn(P2).unwrap();

        assert!(
            !notes
                .iter()
                .any(|(_, n)| matches!(n, Notification::DeadCards { .. }))
        );
    }

    #[test]
    fn test_play_cards_broadcasts_to_both_players() {
        let (mut room, _) = small_room(uniform_pool(0, 5), uniform_pool(100, 5));
        let in_hand = room.player(P1).unwrap().hand()[0].id;

        let notes = room.play_cards(P1, &[in_hand]).unwrap();

        assert_eq!(notes.len(), 2);
        let recipients: Vec<PlayerId> = notes.iter().map(|(pid, _)| *pid).collect();
        assert!(recipients.contains(&P1) && recipients.contains(&P2));
        for (_, note) in notes {
            assert!(matches!(
                note,
                Notification::PlayCardsResult { player, ref cards }
                    if player == P1 && cards.len() == 1
            ));
        }
    }

    #[test]
    fn test_play_after_end_turn_is_rejected() {
        let (mut room, _) = small_room(uniform_pool(0, 5), uniform_pool(100, 5));
        let in_hand = room.player(P1).unwrap().hand()[0].id;
        room.end_turn(P1).unwrap();

        let result = room.play_cards(P1, &[in_hand]);
        assert!(matches!(result, Err(BattleError::InvalidMove { .. })));
    }

    #[test]
    fn test_second_play_in_same_turn_is_rejected() {
        let mut room = standard_room();
        let hand: Vec<CardId> = room.player(P1).unwrap().hand().iter().map(|c| c.id).collect();
        room.play_cards(P1, &[hand[0]]).unwrap();

        let result = room.play_cards(P1, &[hand[1]]);
        assert!(matches!(result, Err(BattleError::InvalidMove { .. })));

        // The play allowance resets with the next turn.
        room.end_turn(P1).unwrap();
        room.end_turn(P2).unwrap();
        let refilled = room.player(P1).unwrap().hand()[0].id;
        assert!(room.play_cards(P1, &[refilled]).is_ok());
    }

    #[test]
    fn test_playing_unknown_card_is_rejected_and_state_unchanged() {
        let (mut room, _) = small_room(uniform_pool(0, 5), uniform_pool(100, 5));
        let result = room.play_cards(P1, &[CardId(999)]);
        assert!(matches!(result, Err(BattleError::InvalidMove { .. })));
        assert_eq!(room.player(P1).unwrap().hand().len(), 5);
    }

    #[test]
    fn test_stranger_actions_are_not_a_member() {
        let mut room = standard_room();
        let stranger = PlayerId(42);
        assert!(matches!(
            room.end_turn(stranger),
            Err(BattleError::NotAMember(p)) if p == stranger
        ));
        assert!(matches!(
            room.play_cards(stranger, &[CardId(0)]),
            Err(BattleError::NotAMember(_))
        ));
    }

    #[test]
    fn test_ended_room_rejects_plays_and_ignores_end_turn() {
        let (mut room, _) = small_room(uniform_pool(0, 5), uniform_pool(100, 5));
        let in_hand = room.player(P1).unwrap().hand()[0].id;
        room.end();

        assert!(matches!(
            room.play_cards(P1, &[in_hand]),
            Err(BattleError::InvalidMove { .. })
        ));
        assert!(room.end_turn(P1).unwrap().is_empty());
        assert_eq!(room.phase(), RoomPhase::Ended);
    }

    #[test]
    fn test_card_conservation_across_whole_turns() {
        // Both players keep fielding cards up to free capacity; paired
        // uniform cards (attack 2, defense 3) die on their second clash,
        // so cards flow through hand, field, and discard over the run.
        let mut room = standard_room();
        for _ in 0..4 {
            for pid in [P1, P2] {
                let player = room.player(pid).unwrap();
                let free = player.slots().iter().filter(|s| s.is_none()).count();
                let picks: Vec<CardId> = player
                    .hand()
                    .iter()
                    .take(free.min(2))
                    .map(|c| c.id)
                    .collect();
                if !picks.is_empty() {
                    room.play_cards(pid, &picks).unwrap();
                }
            }
            room.end_turn(P1).unwrap();
            room.end_turn(P2).unwrap();
            assert_eq!(room.player(P1).unwrap().card_count(), 30);
            assert_eq!(room.player(P2).unwrap().card_count(), 30);
        }
        assert!(
            !room.player(P1).unwrap().discarded().is_empty(),
            "combat should have moved some cards to discard"
        );
    }
}
