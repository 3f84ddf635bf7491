//! One-ply look-ahead against a modelled opponent.
//!
//! Each candidate is played on a copy of the engine, then the opponent
//! strategy picks its reply on that copy. The candidate's score is its
//! immediate value minus the reply's score:
//!
//! ```text
//! flip_weight * flips + defensive / defensive_divisor + corner bonus - reply
//! ```
//!
//! `defensive` is the score of `Defensive`'s best move for the acting
//! player, computed once per search.
//!
//! The reply counts as 0 when the candidate ends the game or the opponent
//! has nothing to play.

use tracing::{debug, instrument, trace};

use super::config::StrategyConfig;
use super::defensive::Defensive;
use super::max_flips::MaxFlips;
use super::policy::{best_or_default, Move, Strategy};
use crate::cards::CardId;
use crate::core::error::{GameError, Result};
use crate::core::Player;
use crate::grid::Position;
use crate::rules::GameEngine;

#[derive(Debug)]
pub struct Minimax {
    opponent: Box<dyn Strategy>,
    defensive: Defensive,
    config: StrategyConfig,
}

impl Default for Minimax {
    /// Models the opponent as `MaxFlips`.
    fn default() -> Self {
        Self::new(Box::new(MaxFlips))
    }
}

impl Minimax {
    #[must_use]
    pub fn new(opponent: Box<dyn Strategy>) -> Self {
        Self {
            opponent,
            defensive: Defensive::default(),
            config: StrategyConfig::default(),
        }
    }

    /// Use `config` for this search and its defensive term.
    #[must_use]
    pub fn with_config(mut self, config: StrategyConfig) -> Self {
        self.defensive = Defensive::new(config);
        self.config = config;
        self
    }

    /// Defensive's best score for `player`, scaled down by the divisor.
    fn defensive_term(&self, engine: &GameEngine, player: Player) -> Result<i64> {
        let best = self.defensive.find_best_move(engine, player)?;
        Ok(best.score / self.config.defensive_divisor.max(1))
    }

    /// Score of the move before the opponent answers.
    fn immediate(
        &self,
        engine: &GameEngine,
        player: Player,
        position: Position,
        card: CardId,
        defensive: i64,
    ) -> Result<i64> {
        let flips = engine.flips_for(player, position.row, position.col, card)?.len() as i64;
        let corner = if engine.state()?.grid().is_corner(position) {
            self.config.lookahead_corner_bonus
        } else {
            0
        };

        Ok(self.config.flip_weight * flips + defensive + corner)
    }

    /// Best score the opponent can reach after `player` plays the candidate.
    fn reply(
        &self,
        engine: &GameEngine,
        player: Player,
        position: Position,
        card: CardId,
    ) -> Result<i64> {
        let next = engine.simulate(player, position.row, position.col, card)?;
        if next.is_game_over() {
            return Ok(0);
        }

        match self.opponent.find_best_move(&next, player.opponent()) {
            Ok(reply) => Ok(reply.score),
            Err(GameError::EmptyHand(_) | GameError::NoLegalMove(_)) => Ok(0),
            Err(e) => Err(e),
        }
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &'static str {
        "minimax"
    }

    #[instrument(level = "debug", skip(self, engine), fields(opponent = self.opponent.name()))]
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move> {
        let legal = engine.legal_moves(player)?;
        let defensive = self.defensive_term(engine, player)?;
        let mut candidates = Vec::new();

        for (pos, card) in legal {
            let immediate = self.immediate(engine, player, pos, card, defensive)?;
            let reply = self.reply(engine, player, pos, card)?;
            trace!(%pos, %card, immediate, reply, "candidate");
            candidates.push(Move::new(pos, card, immediate - reply));
        }

        let best = best_or_default(engine, player, candidates)?;
        debug!(position = %best.position, score = best.score, "minimax choice");
        Ok(best)
    }
}
