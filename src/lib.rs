//! # grid-duel
//!
//! A two-player card game on a rectangular grid, with a battle engine that
//! composes optional rule variants and a family of computer players.
//!
//! ## Design Principles
//!
//! 1. **One copy of each card**: dealt cards get a `CardId` in a per-game
//!    registry. Hands and grid cells hold ids, so ownership is never
//!    ambiguous.
//!
//! 2. **Rules as data**: `RuleSet` is a validated set of variants that
//!    battle resolution applies in a fixed order. No variant knows about
//!    another.
//!
//! 3. **Read-only strategies**: strategies inspect `&GameEngine` and
//!    return a move; only `make_move` changes a game.
//!
//! ## Architecture
//!
//! - **Persistent data structures**: grid cells and hands are `im`
//!   vectors, so look-ahead clones a whole engine in O(1).
//!
//! - **Seeded dealing**: the only randomness is the deck shuffle, driven
//!   by an injectable `GameRng`.
//!
//! ## Modules
//!
//! - `core`: players, RNG, errors, configuration
//! - `cards`: card values, ids and the per-game registry
//! - `grid`: hole mask, cells and coordinates
//! - `rules`: rule variants, battle resolution, game state and engine
//! - `strategy`: computer players and the play-out loop
//!
//! ## Example
//!
//! ```
//! use grid_duel::{play_out, Card, GameConfig, Grid, MaxFlips, Defensive, RuleVariant};
//!
//! let deck: Vec<Card> = (1..=10)
//!     .map(|v| Card::new(format!("card{v}"), v, 11 - v, v, 11 - v).unwrap())
//!     .collect();
//!
//! let (mut engine, mut rng) = GameConfig::new()
//!     .with_variant(RuleVariant::Reverse)
//!     .with_seed(7)
//!     .build()
//!     .unwrap();
//! engine.start_game(Grid::open(3, 3).unwrap(), deck, &mut rng).unwrap();
//!
//! let result = play_out(&mut engine, &MaxFlips, &Defensive::default()).unwrap();
//! assert!(engine.is_game_over());
//! println!("{result:?}");
//! ```

pub mod cards;
pub mod core;
pub mod grid;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameError, GameRng, GameRngState, Player, PlayerMap, Result};

pub use crate::cards::{Card, CardId, CardRegistry, Direction};

pub use crate::grid::{Grid, Placed, Position};

pub use crate::rules::{
    resolve_battle, ComboRule, FlipSet, GameEngine, GamePhase, GameResult, GameState, MoveOutcome,
    RuleSet, RuleVariant,
};

pub use crate::strategy::{
    play_out, Composite, Corner, Defensive, MaxFlips, Minimax, Move, Strategy, StrategyConfig,
};
