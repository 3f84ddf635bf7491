//! Core types: players, RNG, errors, configuration.
//!
//! These are the building blocks shared by the grid, the rules engine
//! and the strategies.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use player::{Player, PlayerMap};
pub use rng::{GameRng, GameRngState};
