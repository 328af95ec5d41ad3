//! Game configuration.
//!
//! `GameConfig` fixes the deal sizes, the cosmetic delays the host should
//! apply to scheduled transitions, and the point values used by scoring.
//! Defaults reproduce the standard Omlongo rules.
//!
//! ```
//! use omlongo::core::GameConfig;
//!
//! let config = GameConfig::default().with_hand_size(6);
//! assert_eq!(config.hand_size, 6);
//! assert_eq!(config.initial_table_cards, 4);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Point values awarded by capture bookkeeping and the end-of-game tally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Awarded per card taken in a capture (the played card included).
    pub per_captured_card: u32,
    /// Bonus for a capture that empties the table.
    pub sweep_bonus: u32,
    /// Player with strictly more cards in their pile.
    pub most_cards: u32,
    /// Player with strictly more spades in their pile.
    pub most_spades: u32,
    /// Each ace in a pile.
    pub per_ace: u32,
    /// The ten of diamonds.
    pub ten_of_diamonds: u32,
    /// The two of spades.
    pub two_of_spades: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            per_captured_card: 1,
            sweep_bonus: 1,
            most_cards: 3,
            most_spades: 1,
            per_ace: 1,
            ten_of_diamonds: 2,
            two_of_spades: 1,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player per deal.
    pub hand_size: usize,

    /// Cards dealt face-up to the table at the start of the game.
    pub initial_table_cards: usize,

    /// How long a build/pair/sweep message stays up before the turn prompt
    /// returns.
    pub message_delay: Duration,

    /// Pause between the end of a round and the automatic redeal.
    pub redeal_delay: Duration,

    /// Point values.
    pub scoring: ScoringConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 4,
            initial_table_cards: 4,
            message_delay: Duration::from_millis(1500),
            redeal_delay: Duration::from_millis(1000),
            scoring: ScoringConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the number of cards dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        assert!(size > 0, "Hand size must be at least 1");
        self.hand_size = size;
        self
    }

    /// Set the number of cards dealt to the table at the start.
    #[must_use]
    pub fn with_initial_table_cards(mut self, count: usize) -> Self {
        self.initial_table_cards = count;
        self
    }

    /// Set the message display window.
    #[must_use]
    pub fn with_message_delay(mut self, delay: Duration) -> Self {
        self.message_delay = delay;
        self
    }

    /// Set the pause before a redeal.
    #[must_use]
    pub fn with_redeal_delay(mut self, delay: Duration) -> Self {
        self.redeal_delay = delay;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Cards consumed by the opening deal.
    #[must_use]
    pub fn opening_deal_size(&self) -> usize {
        self.hand_size * 2 + self.initial_table_cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.hand_size, 4);
        assert_eq!(config.initial_table_cards, 4);
        assert_eq!(config.opening_deal_size(), 12);
        assert_eq!(config.scoring.most_cards, 3);
        assert_eq!(config.scoring.ten_of_diamonds, 2);
    }

    #[test]
    fn test_builder_overrides() {
        let config = GameConfig::default()
            .with_initial_table_cards(0)
            .with_message_delay(Duration::ZERO)
            .with_redeal_delay(Duration::from_secs(3));

        assert_eq!(config.initial_table_cards, 0);
        assert_eq!(config.message_delay, Duration::ZERO);
        assert_eq!(config.redeal_delay, Duration::from_secs(3));
    }

    #[test]
    #[should_panic(expected = "Hand size must be at least 1")]
    fn test_zero_hand_size() {
        let _ = GameConfig::default().with_hand_size(0);
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::default().with_hand_size(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
