//! Battle sizing configuration.

/// Sizing knobs for a battle: 30-card decks and 5-card hands by default.
#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Maximum cards dealt into each player's deck at match start.
    pub deck_size: usize,

    /// Cards drawn at match start and after each combat resolution.
    /// Drawing stops early when the deck runs out.
    pub hand_size: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            deck_size: 30,
            hand_size: 5,
        }
    }
}
