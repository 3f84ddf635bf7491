//! Scoring constants for the built-in strategies.

use serde::{Deserialize, Serialize};

/// Scoring weights used by `Corner`, `Defensive` and `Minimax`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Flat bonus for taking a corner (Corner).
    pub corner_bonus: i64,

    /// Multiplier on the card's attack sum (Defensive).
    pub strength_weight: i64,

    /// Penalty per opponent hand card able to flip the placement from an
    /// open neighbouring cell (Defensive).
    pub threat_penalty: i64,

    /// Bonus per side facing off the board (Defensive).
    pub edge_bonus: i64,

    /// Offset keeping Defensive scores non-negative.
    pub defensive_bias: i64,

    /// Points per flipped card (Minimax).
    pub flip_weight: i64,

    /// Defensive score is divided by this before being added (Minimax).
    pub defensive_divisor: i64,

    /// Corner bonus inside the Minimax evaluation.
    pub lookahead_corner_bonus: i64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            corner_bonus: 1000,
            strength_weight: 5,
            threat_penalty: 50,
            edge_bonus: 25,
            defensive_bias: 1000,
            flip_weight: 100,
            defensive_divisor: 2,
            lookahead_corner_bonus: 50,
        }
    }
}

impl StrategyConfig {
    #[must_use]
    pub fn with_corner_bonus(mut self, bonus: i64) -> Self {
        self.corner_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_threat_penalty(mut self, penalty: i64) -> Self {
        self.threat_penalty = penalty;
        self
    }

    #[must_use]
    pub fn with_edge_bonus(mut self, bonus: i64) -> Self {
        self.edge_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_flip_weight(mut self, weight: i64) -> Self {
        self.flip_weight = weight;
        self
    }
}
