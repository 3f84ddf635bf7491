//! Corner-first strategy.

use tracing::{debug, instrument};

use super::config::StrategyConfig;
use super::policy::{default_move, select_best, Move, Strategy};
use crate::core::error::Result;
use crate::core::Player;
use crate::rules::GameEngine;

/// Takes the first open corner (top-left, top-right, bottom-left,
/// bottom-right) with the strongest card in hand.
///
/// Score is the corner bonus plus the card's attack sum. With no open
/// corner it plays the default move.
#[derive(Clone, Debug, Default)]
pub struct Corner {
    config: StrategyConfig,
}

impl Corner {
    #[must_use]
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }
}

impl Strategy for Corner {
    fn name(&self) -> &'static str {
        "corner"
    }

    #[instrument(level = "debug", skip(self, engine))]
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move> {
        let state = engine.state()?;
        let grid = state.grid();

        for corner in grid.corners() {
            if !grid.is_open(corner) {
                continue;
            }

            let mut candidates = Vec::with_capacity(state.hand(player).len());
            for &card in state.hand(player) {
                let strength = state.card(card)?.strength();
                candidates.push(Move::new(corner, card, self.config.corner_bonus + strength));
            }

            if let Some(best) = select_best(candidates) {
                debug!(position = %best.position, score = best.score, "corner taken");
                return Ok(best);
            }
        }

        default_move(engine, player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameError;
    use crate::grid::Position;
    use crate::rules::RuleSet;
    use crate::strategy::fixtures::{engine, id, play, uniform};

    #[test]
    fn test_takes_top_left_with_strongest_card() {
        let engine = engine(
            &["CCC", "CCC", "CCC"],
            RuleSet::standard(),
            vec![
                uniform("r2", 2),
                uniform("r7", 7),
                uniform("r3", 3),
                uniform("r7b", 7),
                uniform("r1", 1),
            ],
            (0..5).map(|i| uniform(&format!("b{i}"), 4)).collect(),
        );

        let mv = Corner::default().find_best_move(&engine, Player::Red).unwrap();

        assert_eq!(mv.position, Position::new(0, 0));
        assert_eq!(mv.card, id(&engine, "r7"));
        assert_eq!(mv.score, 1000 + 28);
    }

    #[test]
    fn test_skips_hole_and_occupied_corners() {
        let mut engine = engine(
            &["XCX", "CCC", "CCC"],
            RuleSet::standard(),
            (0..4).map(|i| uniform(&format!("r{i}"), 5)).collect(),
            (0..4).map(|i| uniform(&format!("b{i}"), 5)).collect(),
        );
        play(&mut engine, 2, 0, "r0");

        let mv = Corner::default().find_best_move(&engine, Player::Blue).unwrap();

        assert_eq!(mv.position, Position::new(2, 2));
        assert_eq!(mv.card, id(&engine, "b0"));
    }

    #[test]
    fn test_falls_back_to_default_move() {
        let mut engine = engine(
            &["CCC"],
            RuleSet::standard(),
            vec![uniform("r0", 3), uniform("r1", 9)],
            vec![uniform("b0", 3), uniform("b1", 3)],
        );
        play(&mut engine, 0, 0, "r0");
        play(&mut engine, 0, 2, "b0");

        let mv = Corner::default().find_best_move(&engine, Player::Red).unwrap();

        assert_eq!(mv, Move::new(Position::new(0, 1), id(&engine, "r1"), 0));
    }

    #[test]
    fn test_custom_bonus() {
        let engine = engine(
            &["C"],
            RuleSet::standard(),
            vec![uniform("r", 1)],
            vec![uniform("b", 1)],
        );

        let mv = Corner::new(StrategyConfig::default().with_corner_bonus(0))
            .find_best_move(&engine, Player::Red)
            .unwrap();
        assert_eq!(mv.score, 4);
    }

    #[test]
    fn test_game_over_has_no_move() {
        let mut engine = engine(
            &["C"],
            RuleSet::standard(),
            vec![uniform("r", 1)],
            vec![uniform("b", 1)],
        );
        play(&mut engine, 0, 0, "r");

        assert_eq!(
            Corner::default().find_best_move(&engine, Player::Blue).unwrap_err(),
            GameError::NoLegalMove(Player::Blue)
        );
    }
}
