//! Game configuration.
//!
//! A `GameConfig` names the rule variants in play and the dealing seed.
//! It is serde-friendly so front ends can load it from whatever format
//! they use; parsing files is their concern.

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::rng::GameRng;
use crate::rules::{GameEngine, RuleSet, RuleVariant};

/// Configuration for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Active rule variants. Order does not matter.
    #[serde(default)]
    pub variants: Vec<RuleVariant>,

    /// Seed for the deck shuffle.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variants: Vec::new(),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create a config with no variants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule variant.
    #[must_use]
    pub fn with_variant(mut self, variant: RuleVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Set the dealing seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the variant list.
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::from_variants(&self.variants)
    }

    /// A fresh engine and the RNG to deal with.
    pub fn build(&self) -> Result<(GameEngine, GameRng)> {
        Ok((GameEngine::new(self.rule_set()?), GameRng::new(self.seed)))
    }
}
