//! Error type shared by the grid, engine and strategies.

use thiserror::Error;

use super::player::Player;
use crate::cards::CardId;

/// Everything that can go wrong while building or playing a game.
///
/// Failed moves never leave partial state behind: every variant is
/// raised before anything is mutated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    // === Construction ===
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("hole mask has {actual} entries, expected {expected}")]
    HoleMaskMismatch { expected: usize, actual: usize },

    #[error("grid must have an odd number of card cells, got {0}")]
    EvenCardCells(usize),

    #[error("grid has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("attack value {value} on card {name:?} is outside 1..=10")]
    AttackOutOfRange { name: String, value: u8 },

    #[error("unrecognised grid cell {0:?}")]
    InvalidCell(char),

    // === Setup ===
    #[error("game has already been started")]
    AlreadyStarted,

    #[error("deck needs at least {needed} cards, got {available}")]
    InsufficientDeck { needed: usize, available: usize },

    #[error("each hand needs {expected} cards, got {red} (red) and {blue} (blue)")]
    InvalidHands {
        expected: usize,
        red: usize,
        blue: usize,
    },

    #[error("card name {0:?} appears more than once in the deck")]
    DuplicateCardName(String),

    #[error("the Same and Plus rules cannot both be active")]
    ConflictingComboRules,

    // === Moves ===
    #[error("game has not been started")]
    NotStarted,

    #[error("game is not in progress")]
    NotInProgress,

    #[error("{card} is not in {player}'s hand")]
    CardNotInHand { card: CardId, player: Player },

    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },

    #[error("position ({row}, {col}) is a hole")]
    Hole { row: usize, col: usize },

    #[error("position ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    // === Queries ===
    #[error("the game is not over yet")]
    GameNotOver,

    #[error("{0} is not part of this game")]
    UnknownCard(CardId),

    // === Strategies ===
    #[error("{0} has no cards in hand")]
    EmptyHand(Player),

    #[error("no legal move exists for {0}")]
    NoLegalMove(Player),

    #[error("invalid composite strategy: {0}")]
    InvalidComposite(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
