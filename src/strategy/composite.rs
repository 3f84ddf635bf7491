//! Weighted vote over several strategies.
//!
//! Every constituent picks its own best move once. A legal placement
//! scores `weight * score` from each constituent that picked exactly that
//! cell and card, and nothing from the others.

use tracing::{debug, instrument, trace};

use super::policy::{best_or_default, Move, Strategy};
use crate::core::error::{GameError, Result};
use crate::core::Player;
use crate::rules::GameEngine;

#[derive(Debug)]
pub struct Composite {
    members: Vec<(Box<dyn Strategy>, i64)>,
}

impl Composite {
    /// Pair `strategies[i]` with `weights[i]`.
    ///
    /// Fails with `InvalidComposite` if the lists are empty, differ in
    /// length, or a weight is negative.
    pub fn new(strategies: Vec<Box<dyn Strategy>>, weights: Vec<i64>) -> Result<Self> {
        if strategies.len() != weights.len() {
            return Err(GameError::InvalidComposite(format!(
                "{} strategies but {} weights",
                strategies.len(),
                weights.len()
            )));
        }
        Self::from_pairs(strategies.into_iter().zip(weights).collect())
    }

    pub fn from_pairs(members: Vec<(Box<dyn Strategy>, i64)>) -> Result<Self> {
        if members.is_empty() {
            return Err(GameError::InvalidComposite("no strategies".into()));
        }
        if let Some((strategy, weight)) = members.iter().find(|(_, w)| *w < 0) {
            return Err(GameError::InvalidComposite(format!(
                "negative weight {weight} for {}",
                strategy.name()
            )));
        }
        Ok(Self { members })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Each member's pick, weighted. Members with nothing to play are skipped.
    fn votes(&self, engine: &GameEngine, player: Player) -> Result<Vec<(Move, i64)>> {
        let mut votes = Vec::with_capacity(self.members.len());
        for (strategy, weight) in &self.members {
            match strategy.find_best_move(engine, player) {
                Ok(pick) => {
                    trace!(member = strategy.name(), position = %pick.position, score = pick.score, "vote");
                    votes.push((pick, *weight));
                }
                Err(GameError::EmptyHand(_) | GameError::NoLegalMove(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(votes)
    }
}

impl Strategy for Composite {
    fn name(&self) -> &'static str {
        "composite"
    }

    #[instrument(level = "debug", skip(self, engine), fields(members = self.members.len()))]
    fn find_best_move(&self, engine: &GameEngine, player: Player) -> Result<Move> {
        let votes = self.votes(engine, player)?;

        let candidates = engine
            .legal_moves(player)?
            .into_iter()
            .map(|(pos, card)| {
                let score = votes
                    .iter()
                    .filter(|(pick, _)| pick.same_placement(pos, card))
                    .map(|(pick, weight)| weight * pick.score)
                    .sum();
                Move::new(pos, card, score)
            })
            .collect();

        let best = best_or_default(engine, player, candidates)?;
        debug!(position = %best.position, score = best.score, "composite choice");
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Position;
    use crate::rules::RuleSet;
    use crate::strategy::corner::Corner;
    use crate::strategy::defensive::Defensive;
    use crate::strategy::fixtures::{engine, id, uniform};
    use crate::strategy::max_flips::MaxFlips;

    fn fresh() -> GameEngine {
        engine(
            &["CCC", "CCC", "CCC"],
            RuleSet::standard(),
            vec![
                uniform("r2", 2),
                uniform("r7", 7),
                uniform("r3", 3),
                uniform("r1", 1),
                uniform("r4", 4),
            ],
            (0..5).map(|i| uniform(&format!("b{i}"), 5)).collect(),
        )
    }

    fn flips_and_corner(corner_weight: i64) -> Composite {
        Composite::new(
            vec![Box::new(MaxFlips) as Box<dyn Strategy>, Box::new(Corner::default())],
            vec![2, corner_weight],
        )
        .unwrap()
    }

    #[test]
    fn test_weighted_vote() {
        let engine = fresh();

        let mv = flips_and_corner(3).find_best_move(&engine, Player::Red).unwrap();

        // MaxFlips picks r2 at (0,0) for 0; Corner picks r7 there for 1028.
        assert_eq!(mv, Move::new(Position::new(0, 0), id(&engine, "r7"), 3 * 1028));
    }

    #[test]
    fn test_zero_weight_removes_contribution() {
        let engine = fresh();

        let mv = flips_and_corner(0).find_best_move(&engine, Player::Red).unwrap();

        assert_eq!(mv, Move::new(Position::new(0, 0), id(&engine, "r2"), 0));
    }

    #[test]
    fn test_agreeing_members_add_up() {
        let engine = fresh();
        let composite = Composite::from_pairs(vec![
            (Box::new(Corner::default()) as Box<dyn Strategy>, 1),
            (Box::new(Corner::default()), 2),
        ])
        .unwrap();

        let mv = composite.find_best_move(&engine, Player::Red).unwrap();
        assert_eq!(mv.score, 3 * 1028);
    }

    #[test]
    fn test_single_member_matches_its_pick() {
        let engine = fresh();
        let alone =
            Composite::from_pairs(vec![(Box::new(Defensive::default()) as Box<dyn Strategy>, 1)])
                .unwrap();

        let expected = Defensive::default().find_best_move(&engine, Player::Red).unwrap();
        assert_eq!(alone.find_best_move(&engine, Player::Red).unwrap(), expected);
    }

    #[test]
    fn test_construction_errors() {
        let empty = Composite::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(empty, GameError::InvalidComposite(_)));

        let mismatch =
            Composite::new(vec![Box::new(MaxFlips) as Box<dyn Strategy>], vec![1, 2]).unwrap_err();
        assert!(matches!(mismatch, GameError::InvalidComposite(_)));

        let negative =
            Composite::new(vec![Box::new(MaxFlips) as Box<dyn Strategy>], vec![-1]).unwrap_err();
        assert!(matches!(negative, GameError::InvalidComposite(_)));

        assert_eq!(flips_and_corner(1).len(), 2);
    }
}
