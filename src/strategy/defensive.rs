//! Defensive strategy: strong cards in places the opponent cannot reach.
//!
//! ## Scoring
//!
//! For a candidate `(position, card)`:
//!
//! ```text
//! strength_weight * attack sum
//!   + edge_bonus per side facing off the board
//!   - threat_penalty per (open neighbour, opponent hand card) able to flip it
//!   + defensive_bias, floored at 0
//! ```
//!
//! A threat is judged with `RuleSet::beats`, so Reverse and Fallen Ace
//! change what counts as dangerous. Combo rules are not anticipated.

use tracing::{debug, instrument, trace};

use super::config::StrategyConfig;
use super::policy::{best_or_default, Move, Strategy};
use crate::cards::{CardId, Direction};
use crate::core::error::Result;
use crate::core::Player;
use crate::grid::Position;
use crate::rules::GameEngine;

#[derive(Clone, Debug, Default)]
pub struct Defensive {
    config: StrategyConfig,
}

impl Defensive {
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Score one placement for `player`. Does not check legality.
    pub fn evaluate(
        &self,
        engine: &GameEngine,
        player: Player,
        position: Position,
        card: CardId,
    ) -> Result<i64> {
        let state = engine.state()?;
        let grid = state.grid();
        let rules = engine.rules();
        let values = state.card(card)?;

        let mut score = self.config.strength_weight * values.strength();

        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(position, direction) else {
                score += self.config.edge_bonus;
                continue;
            };
            if !grid.is_open(neighbor) {
                continue;
            }

            let defense = values.attack(direction);
            let mut threats = 0;
            for &attacker in state.hand(player.opponent()) {
                let attack = state.card(attacker)?.attack(direction.opposite());
                if rules.beats(attack, defense) {
                    threats += 1;
                }
            }
            score -= self.config.threat_penalty * threats;
        }

        Ok((score + self.config.defensive_bias).max(0))
    }
}

impl Strategy for Defensive {
    fn name(&self) -> &'static str {
        "defensive"
    }

    #[instrument(level = "debug", skip(self, engine))]
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move> {
        let mut candidates = Vec::new();

        for (pos, card) in engine.legal_moves(player)? {
            let score = self.evaluate(engine, player, pos, card)?;
            trace!(%pos, %card, score, "candidate");
            candidates.push(Move::new(pos, card, score));
        }

        let best = best_or_default(engine, player, candidates)?;
        debug!(position = %best.position, score = best.score, "defensive choice");
        Ok(best)
    }
}
