//! Card system: static card data and per-game lookup.
//!
//! - `Card`: name plus four directional attack values in `1..=10`
//! - `CardId`: identity of a dealt card for the whole game
//! - `CardRegistry`: id → card lookup, the one authoritative copy of each card

pub mod card;
pub mod registry;

pub use card::{Card, CardId, Direction, MAX_ATTACK, MIN_ATTACK};
pub use registry::CardRegistry;
