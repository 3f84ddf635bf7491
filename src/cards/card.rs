//! Card definitions - static card data.
//!
//! A `Card` holds the immutable properties of a card: its name and the
//! attack value printed on each of its four sides. Who owns a card is
//! tracked by the game state, never by the card itself.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Lowest printed attack value.
pub const MIN_ATTACK: u8 = 1;
/// Highest printed attack value (the "Ace").
pub const MAX_ATTACK: u8 = 10;

/// Identifier for a card dealt into a game.
///
/// Assigned by the `CardRegistry` when the game starts. Stable for the
/// whole game: flipping changes a card's owner, never its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// One of the four sides of a card, and the matching grid direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions in the order neighbours are examined.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The side that faces back along this direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Row and column step for this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    const fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use grid_duel::cards::{Card, Direction};
///
/// let card = Card::new("Bomb", 5, 3, 10, 1).unwrap();
///
/// assert_eq!(card.attack(Direction::East), 10);
/// assert_eq!(card.strength(), 19);
/// assert!(Card::new("Broken", 0, 3, 3, 3).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Name, unique within a game.
    pub name: String,

    /// Attack values indexed north, south, east, west.
    attacks: [u8; 4],
}

impl Card {
    /// Create a card from its four attack values.
    ///
    /// Fails with `AttackOutOfRange` if any value is outside `1..=10`.
    pub fn new(name: impl Into<String>, north: u8, south: u8, east: u8, west: u8) -> Result<Self> {
        let name = name.into();
        let attacks = [north, south, east, west];

        if let Some(&value) = attacks
            .iter()
            .find(|v| !(MIN_ATTACK..=MAX_ATTACK).contains(*v))
        {
            return Err(GameError::AttackOutOfRange { name, value });
        }

        Ok(Self { name, attacks })
    }

    /// Attack value printed on the given side.
    #[must_use]
    pub const fn attack(&self, direction: Direction) -> u8 {
        self.attacks[direction.slot()]
    }

    /// Sum of all four attack values.
    #[must_use]
    pub fn strength(&self) -> i64 {
        self.attacks.iter().map(|&v| i64::from(v)).sum()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [n, s, e, w] = self.attacks;
        write!(f, "{} [N{} S{} E{} W{}]", self.name, n, s, e, w)
    }
}
