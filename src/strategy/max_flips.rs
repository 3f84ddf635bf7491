//! Greedy strategy: flip as many cards as possible right now.

use tracing::{debug, instrument, trace};

use super::policy::{best_or_default, Move, Strategy};
use crate::core::error::Result;
use crate::core::Player;
use crate::rules::GameEngine;

/// Scores every legal placement by how many opponent cards it flips
/// under the engine's active rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFlips;

impl Strategy for MaxFlips {
    fn name(&self) -> &'static str {
        "max-flips"
    }

    #[instrument(level = "debug", skip(self, engine))]
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move> {
        let mut candidates = Vec::new();

        for (pos, card) in engine.legal_moves(player)? {
            let flips = engine.flips_for(player, pos.row, pos.col, card)?.len() as i64;
            trace!(%pos, %card, flips, "candidate");
            candidates.push(Move::new(pos, card, flips));
        }

        let best = best_or_default(engine, player, candidates)?;
        debug!(position = %best.position, score = best.score, "max-flips choice");
        Ok(best)
    }
}
