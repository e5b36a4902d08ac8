//! Simultaneous combat resolution.
//!
//! Combat pairs the two fields by slot index: slot `i` fights slot `i`,
//! and only where both sides have a card there. Damage on both sides is
//! computed from a snapshot taken before anything is applied, so the
//! outcome is identical whichever player is "first" — there is no order
//! bias.

use skirmish_protocol::Card;

use crate::{FIELD_SLOTS, PlayerState};

/// Resolves one round of combat between two players' fields.
///
/// For every slot index occupied on both sides, each card takes the
/// opposing card's attack as damage (clamped at 0 defense). Cards that
/// reach 0 defense are marked dead and moved to their owner's discard
/// pile; their slots stay empty. Returns the dead cards per player, in
/// slot order.
pub fn resolve_combat(a: &mut PlayerState, b: &mut PlayerState) -> (Vec<Card>, Vec<Card>) {
    // Snapshot phase: record the paired attacks before applying anything.
    let mut exchanges: Vec<(usize, u32, u32)> = Vec::with_capacity(FIELD_SLOTS);
    for i in 0..FIELD_SLOTS {
        if let (Some(card_a), Some(card_b)) = (&a.slots()[i], &b.slots()[i]) {
            exchanges.push((i, card_a.attack, card_b.attack));
        }
    }

    // Apply phase: both sides take damage from the snapshot.
    for (i, attack_a, attack_b) in exchanges {
        if let Some(card) = &mut a.slots_mut()[i] {
            card.apply_damage(attack_b);
        }
        if let Some(card) = &mut b.slots_mut()[i] {
            card.apply_damage(attack_a);
        }
    }

    (a.sweep_dead(), b.sweep_dead())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_protocol::{CardId, CardTemplate, PlayerId};

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

    fn blank_pair() -> (PlayerState, PlayerState) {
        (
            PlayerState::blank(PlayerId(1)),
            PlayerState::blank(PlayerId(2)),
        )
    }

    #[test]
    fn test_combat_symmetry_example() {
        // A(attack=3, defense=5) vs B(attack=4, defense=2) at slot 0:
        // A survives at 1 defense, B dies and moves to discard.
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(0, card(1, 3, 5));
        b.put_in_slot(0, card(2, 4, 2));

        let (dead_a, dead_b) = resolve_combat(&mut a, &mut b);

        assert!(dead_a.is_empty());
        assert_eq!(dead_b.len(), 1);
        assert_eq!(dead_b[0].id, CardId(2));

        let survivor = a.slots()[0].as_ref().unwrap();
        assert_eq!(survivor.defense, 1);
        assert!(!survivor.is_dead());

        assert!(b.slots()[0].is_none());
        assert_eq!(b.discarded().len(), 1);
        assert!(b.discarded()[0].is_dead());
    }

    #[test]
    fn test_combat_is_simultaneous_not_sequential() {
        // Both cards kill each other. Under sequential resolution one of
        // them would die before striking back; simultaneity means both die.
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(0, card(1, 5, 3));
        b.put_in_slot(0, card(2, 5, 3));

        let (dead_a, dead_b) = resolve_combat(&mut a, &mut b);

        assert_eq!(dead_a.len(), 1);
        assert_eq!(dead_b.len(), 1);
    }

    #[test]
    fn test_defense_floor_clamps_at_zero() {
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(0, card(1, 100, 3));
        b.put_in_slot(0, card(2, 100, 3));

        resolve_combat(&mut a, &mut b);

        assert_eq!(a.discarded()[0].defense, 0);
        assert_eq!(b.discarded()[0].defense, 0);
    }

    #[test]
    fn test_unpaired_slots_do_not_fight() {
        // B has nothing at slot 1, so A's card there takes no damage.
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(0, card(1, 2, 10));
        a.put_in_slot(1, card(2, 2, 10));
        b.put_in_slot(0, card(3, 4, 10));

        let (dead_a, dead_b) = resolve_combat(&mut a, &mut b);

        assert!(dead_a.is_empty());
        assert!(dead_b.is_empty());
        assert_eq!(a.slots()[0].as_ref().unwrap().defense, 6);
        assert_eq!(a.slots()[1].as_ref().unwrap().defense, 10);
        assert_eq!(b.slots()[0].as_ref().unwrap().defense, 8);
    }

    #[test]
    fn test_pairing_is_by_index_not_occupancy_order() {
        // A occupies slot 2 only; B occupies slots 0 and 2. Only the
        // slot-2 pair fights.
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(2, card(1, 3, 5));
        b.put_in_slot(0, card(2, 9, 9));
        b.put_in_slot(2, card(3, 1, 2));

        resolve_combat(&mut a, &mut b);

        // B's slot-0 card never attacked anyone.
        assert_eq!(a.slots()[2].as_ref().unwrap().defense, 4);
        assert!(b.slots()[2].is_none()); // died to A's 3 attack
        assert_eq!(b.slots()[0].as_ref().unwrap().defense, 9);
    }

    #[test]
    fn test_empty_fields_resolve_to_nothing() {
        let (mut a, mut b) = blank_pair();
        let (dead_a, dead_b) = resolve_combat(&mut a, &mut b);
        assert!(dead_a.is_empty());
        assert!(dead_b.is_empty());
    }

    #[test]
    fn test_multiple_slots_resolve_independently() {
        let (mut a, mut b) = blank_pair();
        a.put_in_slot(0, card(1, 1, 10));
        a.put_in_slot(1, card(2, 8, 2));
        b.put_in_slot(0, card(3, 2, 10));
        b.put_in_slot(1, card(4, 8, 2));

        let (dead_a, dead_b) = resolve_combat(&mut a, &mut b);

        // Slot 0: both survive. Slot 1: both die.
        assert_eq!(a.slots()[0].as_ref().unwrap().defense, 8);
        assert_eq!(b.slots()[0].as_ref().unwrap().defense, 9);
        assert_eq!(dead_a.len(), 1);
        assert_eq!(dead_a[0].id, CardId(2));
        assert_eq!(dead_b.len(), 1);
        assert_eq!(dead_b[0].id, CardId(4));
    }
}
