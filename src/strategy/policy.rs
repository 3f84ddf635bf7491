//! Strategy contract and the helpers every strategy shares.
//!
//! - `Strategy`: pick a move for a player from a read-only engine
//! - `compare_moves`: the one total order all strategies rank with
//! - `default_move`: fallback when a strategy's own search finds nothing

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::error::{GameError, Result};
use crate::core::Player;
use crate::grid::Position;
use crate::rules::GameEngine;

// =============================================================================
// Move
// =============================================================================

/// A candidate placement with the score a strategy gave it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub card: CardId,
    pub score: i64,
}

impl Move {
    #[must_use]
    pub const fn new(position: Position, card: CardId, score: i64) -> Self {
        Self {
            position,
            card,
            score,
        }
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.position.row
    }

    #[must_use]
    pub const fn col(&self) -> usize {
        self.position.col
    }

    /// Same cell and card, whatever the score.
    #[must_use]
    pub fn same_placement(&self, position: Position, card: CardId) -> bool {
        self.position == position && self.card == card
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// A move evaluator for a computer player.
///
/// Strategies never mutate the engine they are given. The returned move
/// is always one `GameEngine::make_move` accepts when `player` is to move.
pub trait Strategy: Send + Sync + std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Choose a move for `player`.
    ///
    /// Falls back to `default_move` when the search yields no candidate.
    /// Fails with `EmptyHand` or `NoLegalMove` when even that is impossible.
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move>;
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Higher score first, then lower row, then lower column.
///
/// Moves that tie on all three keep their enumeration order under a
/// stable sort, so the earlier hand card wins.
#[must_use]
pub fn compare_moves(a: &Move, b: &Move) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.position.row.cmp(&b.position.row))
        .then(a.position.col.cmp(&b.position.col))
}

/// Sort candidates with `compare_moves` and take the head.
#[must_use]
pub fn select_best(mut candidates: Vec<Move>) -> Option<Move> {
    candidates.sort_by(compare_moves);
    candidates.into_iter().next()
}

/// First empty card cell in row-major order, paired with the first card
/// in hand, score 0.
pub fn default_move(engine: &GameEngine, player: Player) -> Result<Move> {
    let state = engine.state()?;
    let card = *state
        .hand(player)
        .front()
        .ok_or(GameError::EmptyHand(player))?;
    let position = state
        .grid()
        .empty_positions()
        .next()
        .ok_or(GameError::NoLegalMove(player))?;

    Ok(Move::new(position, card, 0))
}

/// `select_best`, falling back to `default_move` on an empty list.
pub fn best_or_default(engine: &GameEngine, player: Player, candidates: Vec<Move>) -> Result<Move> {
    match select_best(candidates) {
        Some(best) => Ok(best),
        None => default_move(engine, player),
    }
}
