//! The card data model: catalog templates and live combat units.
//!
//! A [`CardTemplate`] is a read-only catalog entry. A [`Card`] is a live
//! instance with mutable defense and a death flag. The one invariant that
//! matters lives here with the type: a card is dead exactly when its
//! defense has reached 0, and defense never goes below 0 (clamped
//! subtraction on `u32`). Attack is fixed at instantiation — nothing in
//! combat modifies it.

use serde::{Deserialize, Serialize};

use crate::CardId;

/// A read-only catalog entry describing a card.
///
/// The server consumes the catalog at construction time and never mutates
/// it; every player's pool is instantiated from the same templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    pub image: String,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub description: String,
}

impl CardTemplate {
    /// Creates a live card from this template.
    ///
    /// A template with 0 defense produces a card that is dead on arrival —
    /// the dead-iff-zero-defense invariant holds from the first instant.
    pub fn instantiate(&self) -> Card {
        Card {
            id: self.id,
            name: self.name.clone(),
            image: self.image.clone(),
            attack: self.attack,
            defense: self.defense,
            level: self.level,
            description: self.description.clone(),
            dead: self.defense == 0,
        }
    }
}

/// A single combat unit.
///
/// Defense is mutable only through [`Card::apply_damage`]; everything else
/// is fixed when the card is instantiated from its template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub image: String,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub description: String,
    pub dead: bool,
}

impl Card {
    /// Applies combat damage, clamping defense at 0.
    ///
    /// Marks the card dead when defense reaches 0. Damage beyond the
    /// remaining defense is discarded, never carried over.
    pub fn apply_damage(&mut self, amount: u32) {
        self.defense = self.defense.saturating_sub(amount);
        if self.defense == 0 {
            self.dead = true;
        }
    }

    /// Whether this card has been destroyed.
    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(attack: u32, defense: u32) -> CardTemplate {
        CardTemplate {
            id: CardId(1),
            name: "Grave Sentinel".into(),
            image: "grave_sentinel.png".into(),
            attack,
            defense,
            level: 2,
            description: "Stands watch.".into(),
        }
    }

    #[test]
    fn test_instantiate_copies_template_stats() {
        let card = template(3, 5).instantiate();
        assert_eq!(card.attack, 3);
        assert_eq!(card.defense, 5);
        assert!(!card.dead);
    }

    #[test]
    fn test_instantiate_zero_defense_is_dead_on_arrival() {
        let card = template(3, 0).instantiate();
        assert!(card.is_dead());
    }

    #[test]
    fn test_apply_damage_reduces_defense() {
        let mut card = template(3, 5).instantiate();
        card.apply_damage(2);
        assert_eq!(card.defense, 3);
        assert!(!card.is_dead());
    }

    #[test]
    fn test_apply_damage_exact_kill_marks_dead() {
        let mut card = template(3, 5).instantiate();
        card.apply_damage(5);
        assert_eq!(card.defense, 0);
        assert!(card.is_dead());
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        // Overkill damage never produces a negative defense.
        let mut card = template(3, 2).instantiate();
        card.apply_damage(100);
        assert_eq!(card.defense, 0);
        assert!(card.is_dead());
    }

    #[test]
    fn test_apply_zero_damage_leaves_card_alive() {
        let mut card = template(3, 5).instantiate();
        card.apply_damage(0);
        assert_eq!(card.defense, 5);
        assert!(!card.is_dead());
    }

    #[test]
    fn test_card_round_trips_through_json() {
        let card = template(4, 2).instantiate();
        let bytes = serde_json::to_vec(&card).unwrap();
        let decoded: Card = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(card, decoded);
    }
}
