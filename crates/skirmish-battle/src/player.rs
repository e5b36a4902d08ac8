//! One player's battle-facing state: deck, hand, field slots, discard.
//!
//! Every card instance belongs to exactly one of the four collections at
//! any time. All mutations here move cards between collections — nothing
//! creates or destroys a card — so `deck + hand + field + discard` stays
//! constant for the life of the match.

use rand::seq::SliceRandom;
use skirmish_protocol::{Card, CardId, PlayerId, PrivateState, PublicState};

use crate::BattleError;

/// Number of in-play slots on each player's field.
///
/// Slots are aligned by index with the opponent's field: slot `i` fights
/// slot `i`. A slot emptied by a death stays empty — cards are never
/// compacted toward slot 0.
pub const FIELD_SLOTS: usize = 5;

/// A player's card collections and per-turn flags.
#[derive(Debug)]
pub struct PlayerState {
    id: PlayerId,
    /// Draw pile, consumed from the back. Shuffled at construction.
    deck: Vec<Card>,
    /// Drawn cards, in draw order.
    hand: Vec<Card>,
    /// Fixed-capacity field; `None` is an empty slot.
    slots: [Option<Card>; FIELD_SLOTS],
    /// Dead and end-of-turn discarded cards.
    discarded: Vec<Card>,
    turn_ended: bool,
    played_this_turn: bool,
}

impl PlayerState {
    /// Builds a player from their card pool.
    ///
    /// The pool is shuffled uniformly, then truncated to `deck_size` —
    /// cards beyond the deck size are not part of this match at all, so
    /// they don't count toward conservation.
    pub fn new(id: PlayerId, mut pool: Vec<Card>, deck_size: usize) -> Self {
        pool.shuffle(&mut rand::rng());
        pool.truncate(deck_size);
        Self {
            id,
            deck: pool,
            hand: Vec::new(),
            slots: std::array::from_fn(|_| None),
            discarded: Vec::new(),
            turn_ended: false,
            played_this_turn: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn turn_ended(&self) -> bool {
        self.turn_ended
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn slots(&self) -> &[Option<Card>; FIELD_SLOTS] {
        &self.slots
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// Total cards across all four collections. Constant after
    /// construction — checked by tests after every kind of mutation.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.hand.len()
            + self.slots.iter().filter(|s| s.is_some()).count()
            + self.discarded.len()
    }

    /// Draws up to `n` cards from the deck into the hand.
    ///
    /// Drawing from an exhausted deck is not an error: it draws whatever
    /// remains, possibly nothing. Returns clones of the drawn cards for
    /// the turn-start notification.
    pub fn draw_up_to(&mut self, n: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n.min(self.deck.len()));
        for _ in 0..n {
            match self.deck.pop() {
                Some(card) => {
                    drawn.push(card.clone());
                    self.hand.push(card);
                }
                None => break,
            }
        }
        drawn
    }

    /// Moves the named cards from hand into the first free field slots.
    ///
    /// Validates the whole request before touching anything: every id must
    /// name a distinct card currently in hand, and there must be enough
    /// free slots. On any violation the hand and field are unchanged.
    pub fn play_cards(&mut self, card_ids: &[CardId]) -> Result<Vec<Card>, BattleError> {
        let free = self.slots.iter().filter(|s| s.is_none()).count();
        if card_ids.len() > free {
            return Err(BattleError::invalid_move(
                self.id,
                format!("field has {free} free slots, tried to play {}", card_ids.len()),
            ));
        }
        for (i, id) in card_ids.iter().enumerate() {
            if card_ids[..i].contains(id) {
                return Err(BattleError::invalid_move(
                    self.id,
                    format!("card {id} named twice in one play"),
                ));
            }
            if !self.hand.iter().any(|c| c.id == *id) {
                return Err(BattleError::invalid_move(
                    self.id,
                    format!("card {id} is not in hand"),
                ));
            }
        }

        let mut placed = Vec::with_capacity(card_ids.len());
        for id in card_ids {
            // Unwraps can't fire: membership was checked above and free
            // slot capacity covers every requested card.
            let pos = self
                .hand
                .iter()
                .position(|c| c.id == *id)
                .expect("card presence checked");
            let card = self.hand.remove(pos);
            let slot = self
                .slots
                .iter_mut()
                .find(|s| s.is_none())
                .expect("free capacity checked");
            placed.push(card.clone());
            *slot = Some(card);
        }
        Ok(placed)
    }

    /// Moves the whole hand to the discard pile. Returns clones of the
    /// discarded cards for the end-of-turn notification.
    pub fn discard_hand(&mut self) -> Vec<Card> {
        let cards: Vec<Card> = self.hand.drain(..).collect();
        self.discarded.extend(cards.iter().cloned());
        cards
    }

    /// Moves every dead card from the field to the discard pile, leaving
    /// its slot empty. Returns clones of the removed cards.
    pub fn sweep_dead(&mut self) -> Vec<Card> {
        let mut dead = Vec::new();
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(Card::is_dead) {
                let card = slot.take().expect("slot occupancy just checked");
                dead.push(card.clone());
                self.discarded.push(card);
            }
        }
        dead
    }

    /// Marks this player's turn as ended. Returns `false` (and changes
    /// nothing) if the turn was already ended — a repeated end-turn must
    /// not re-trigger anything downstream.
    pub fn end_turn(&mut self) -> bool {
        if self.turn_ended {
            return false;
        }
        self.turn_ended = true;
        true
    }

    /// Resets the per-turn flags. Called for both players simultaneously
    /// when a new turn begins.
    pub fn begin_turn(&mut self) {
        self.turn_ended = false;
        self.played_this_turn = false;
    }

    pub(crate) fn has_played_this_turn(&self) -> bool {
        self.played_this_turn
    }

    pub(crate) fn mark_played(&mut self) {
        self.played_this_turn = true;
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Option<Card>; FIELD_SLOTS] {
        &mut self.slots
    }

    /// The owner's full view: hand contents included.
    pub fn private_view(&self) -> PrivateState {
        PrivateState {
            id: self.id,
            deck_size: self.deck.len(),
            hand: self.hand.clone(),
            in_play: self.slots.to_vec(),
            discarded: self.discarded.clone(),
        }
    }

    /// The opponent's view: hand count only, field and discard visible.
    pub fn public_view(&self) -> PublicState {
        PublicState {
            id: self.id,
            deck_size: self.deck.len(),
            hand_size: self.hand.len(),
            in_play: self.slots.to_vec(),
            discarded: self.discarded.clone(),
        }
    }
}

#[cfg(test)]
impl PlayerState {
    /// A player with no cards anywhere, for tests that stage collections
    /// by hand.
    pub(crate) fn blank(id: PlayerId) -> Self {
        Self::new(id, Vec::new(), 0)
    }

    pub(crate) fn put_in_slot(&mut self, slot: usize, card: Card) {
        self.slots[slot] = Some(card);
    }

    pub(crate) fn push_hand(&mut self, card: Card) {
        self.hand.push(card);
    }
}
