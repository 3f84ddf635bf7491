//! Game rules: battle resolution, rule variants and the turn engine.
//!
//! - `variant`: which optional rules are active and how they compose
//! - `battle`: the pure flip computation for one placement
//! - `state`: dealt game state, scoring and move application
//! - `engine`: the `NotStarted → InProgress → GameOver` state machine

pub mod battle;
pub mod engine;
pub mod state;
pub mod variant;

pub use battle::{resolve_battle, Contest, FlipSet};
pub use engine::{GameEngine, GamePhase};
pub use state::{GameResult, GameState, MoveOutcome};
pub use variant::{ComboRule, FlipTransform, RuleSet, RuleVariant};
