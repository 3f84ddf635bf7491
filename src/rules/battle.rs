//! Battle resolution: which neighbours a placement flips.
//!
//! Resolution is a single pass from the placed card. Flipped cards do not
//! go on to attack their own neighbours.
//!
//! ## Pipeline
//!
//! 1. Gather a `Contest` for every occupied orthogonal neighbour
//!    (out-of-bounds cells, holes and empty cells are skipped).
//! 2. Fold the rule set's `FlipTransform`s over an empty flip set, in order.
//!
//! Comparison transforms only ever flip opponent cards. Combo transforms
//! count matches across all neighbours but also only flip the opponent's.

use smallvec::SmallVec;
use tracing::trace;

use super::variant::{ace_upset, FlipTransform, RuleSet};
use crate::cards::{Card, CardRegistry, Direction};
use crate::core::error::Result;
use crate::core::Player;
use crate::grid::{Grid, Position};

/// Positions flipped by one placement. At most four.
pub type FlipSet = SmallVec<[Position; 4]>;

/// A placed card facing one occupied neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contest {
    /// Where the neighbour sits.
    pub position: Position,
    /// Direction from the placed card to the neighbour.
    pub direction: Direction,
    /// Placed card's value on the side facing the neighbour.
    pub attack: u8,
    /// Neighbour's value on the side facing back.
    pub defense: u8,
    /// Neighbour's current owner.
    pub owner: Player,
}

/// Collect the contests for a card placed (or about to be placed) at `pos`.
///
/// The cell at `pos` itself is never read, so this works for hypothetical
/// placements on an empty cell.
pub fn contests(
    grid: &Grid,
    registry: &CardRegistry,
    pos: Position,
    card: &Card,
) -> Result<SmallVec<[Contest; 4]>> {
    let mut out = SmallVec::new();

    for direction in Direction::ALL {
        let Some(neighbor) = grid.neighbor(pos, direction) else {
            continue;
        };
        let Some(placed) = grid.placed(neighbor) else {
            continue;
        };
        let defender = registry.lookup(placed.card)?;

        out.push(Contest {
            position: neighbor,
            direction,
            attack: card.attack(direction),
            defense: defender.attack(direction.opposite()),
            owner: placed.owner,
        });
    }

    Ok(out)
}

/// Work out which neighbours flip when `placer` puts `card` at `pos`.
///
/// Pure: the grid is not modified. Positions come back without duplicates,
/// in the order the transforms found them.
pub fn resolve_battle(
    grid: &Grid,
    registry: &CardRegistry,
    pos: Position,
    card: &Card,
    placer: Player,
    rules: &RuleSet,
) -> Result<FlipSet> {
    let contests = contests(grid, registry, pos, card)?;
    let mut flips = FlipSet::new();

    for transform in rules.transforms() {
        apply_transform(transform, &contests, placer, &mut flips);
    }

    trace!(%pos, placer = %placer, rules = %rules, flips = flips.len(), "battle resolved");
    Ok(flips)
}

/// Apply one resolution step to the running flip set.
pub fn apply_transform(
    transform: FlipTransform,
    contests: &[Contest],
    placer: Player,
    flips: &mut FlipSet,
) {
    let opponents = contests.iter().filter(|c| c.owner != placer);

    match transform {
        FlipTransform::Higher => {
            for c in opponents.filter(|c| c.attack > c.defense) {
                insert(flips, c.position);
            }
        }
        FlipTransform::Lower => {
            for c in opponents.filter(|c| c.attack < c.defense) {
                insert(flips, c.position);
            }
        }
        FlipTransform::FallenAce => {
            for c in opponents.filter(|c| ace_upset(c.attack, c.defense)) {
                insert(flips, c.position);
            }
        }
        FlipTransform::Combo(_) => {
            // Plus currently shares Same's matcher.
            let matches = contests.iter().filter(|c| c.attack == c.defense).count();
            if matches >= 2 {
                for c in opponents.filter(|c| c.attack == c.defense) {
                    insert(flips, c.position);
                }
            }
        }
    }
}

fn insert(flips: &mut FlipSet, pos: Position) {
    if !flips.contains(&pos) {
        flips.push(pos);
    }
}
