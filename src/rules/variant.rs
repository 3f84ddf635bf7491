//! Rule variants and their validated composition.
//!
//! Variants are opt-in modifications to how a placement flips its
//! neighbours. A `RuleSet` records which are active and expands them into
//! an ordered list of `FlipTransform`s: first the comparison that decides
//! ordinary captures, then the Ace exception, then at most one combo rule.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{MAX_ATTACK, MIN_ATTACK};
use crate::core::error::{GameError, Result};

/// An optional battle rule that can be switched on for a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleVariant {
    /// Lower values capture instead of higher ones.
    Reverse,
    /// A 1 captures a 10.
    FallenAce,
    /// Two or more exact matches capture every matched opponent.
    Same,
    /// Combo rule sharing the matching behaviour of `Same`.
    Plus,
}

/// The combo rule in effect, if any. Only one may be active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboRule {
    Same,
    Plus,
}

/// One step of battle resolution, applied in list order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipTransform {
    /// Capture when the attack is strictly greater.
    Higher,
    /// Capture when the attack is strictly lower.
    Lower,
    /// Add the Ace exception: a 1 captures a 10, whatever the comparison.
    FallenAce,
    /// Capture every matched opponent when two or more sides match.
    Combo(ComboRule),
}

/// Validated set of active rule variants.
///
/// ## Example
///
/// ```
/// use grid_duel::rules::{ComboRule, RuleSet, RuleVariant};
///
/// let rules = RuleSet::from_variants(&[RuleVariant::Reverse, RuleVariant::Same]).unwrap();
/// assert!(rules.reverse);
/// assert_eq!(rules.combo, Some(ComboRule::Same));
///
/// assert!(RuleSet::from_variants(&[RuleVariant::Same, RuleVariant::Plus]).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleSet {
    pub reverse: bool,
    pub fallen_ace: bool,
    pub combo: Option<ComboRule>,
}

impl RuleSet {
    /// The base rule with no variants.
    #[must_use]
    pub fn standard() -> Self {
        Self::default()
    }

    /// Compose a rule set from a list of variants.
    ///
    /// Repeating a variant is harmless. Fails with `ConflictingComboRules`
    /// if both `Same` and `Plus` are requested.
    pub fn from_variants(variants: &[RuleVariant]) -> Result<Self> {
        let mut rules = Self::standard();

        for &variant in variants {
            match variant {
                RuleVariant::Reverse => rules.reverse = true,
                RuleVariant::FallenAce => rules.fallen_ace = true,
                RuleVariant::Same => rules.set_combo(ComboRule::Same)?,
                RuleVariant::Plus => rules.set_combo(ComboRule::Plus)?,
            }
        }

        Ok(rules)
    }

    /// Enable the Reverse variant.
    #[must_use]
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Enable the FallenAce variant.
    #[must_use]
    pub fn with_fallen_ace(mut self) -> Self {
        self.fallen_ace = true;
        self
    }

    /// Enable a combo rule, replacing any previous one.
    #[must_use]
    pub fn with_combo(mut self, combo: ComboRule) -> Self {
        self.combo = Some(combo);
        self
    }

    /// The active variants, in wrapping order.
    #[must_use]
    pub fn variants(&self) -> SmallVec<[RuleVariant; 3]> {
        let mut out = SmallVec::new();
        if self.reverse {
            out.push(RuleVariant::Reverse);
        }
        if self.fallen_ace {
            out.push(RuleVariant::FallenAce);
        }
        match self.combo {
            Some(ComboRule::Same) => out.push(RuleVariant::Same),
            Some(ComboRule::Plus) => out.push(RuleVariant::Plus),
            None => {}
        }
        out
    }

    /// Resolution steps in application order.
    #[must_use]
    pub fn transforms(&self) -> SmallVec<[FlipTransform; 3]> {
        let mut out = SmallVec::new();
        out.push(if self.reverse {
            FlipTransform::Lower
        } else {
            FlipTransform::Higher
        });
        if self.fallen_ace {
            out.push(FlipTransform::FallenAce);
        }
        if let Some(combo) = self.combo {
            out.push(FlipTransform::Combo(combo));
        }
        out
    }

    /// Does `attack` capture `defense` in a single comparison under these rules?
    ///
    /// Combo rules are not considered; they depend on the whole neighbourhood.
    #[must_use]
    pub fn beats(&self, attack: u8, defense: u8) -> bool {
        let ordinary = if self.reverse {
            attack < defense
        } else {
            attack > defense
        };
        ordinary || (self.fallen_ace && ace_upset(attack, defense))
    }

    fn set_combo(&mut self, combo: ComboRule) -> Result<()> {
        match self.combo {
            Some(existing) if existing != combo => Err(GameError::ConflictingComboRules),
            _ => {
                self.combo = Some(combo);
                Ok(())
            }
        }
    }
}

impl std::fmt::Display for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.variants().iter().map(|v| format!("{v:?}")).collect();
        if names.is_empty() {
            write!(f, "Standard")
        } else {
            write!(f, "{}", names.join("+"))
        }
    }
}

/// The Ace exception: the weakest value beats the strongest one.
///
/// Reverse does not change it.
pub(crate) fn ace_upset(attack: u8, defense: u8) -> bool {
    attack == MIN_ATTACK && defense == MAX_ATTACK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_single_transform() {
        let rules = RuleSet::standard();
        assert_eq!(rules.transforms().as_slice(), &[FlipTransform::Higher]);
        assert!(rules.variants().is_empty());
        assert_eq!(rules.to_string(), "Standard");
    }

    #[test]
    fn test_transform_order() {
        let rules = RuleSet::from_variants(&[
            RuleVariant::Same,
            RuleVariant::FallenAce,
            RuleVariant::Reverse,
        ])
        .unwrap();

        assert_eq!(
            rules.transforms().as_slice(),
            &[
                FlipTransform::Lower,
                FlipTransform::FallenAce,
                FlipTransform::Combo(ComboRule::Same),
            ]
        );
        assert_eq!(rules.to_string(), "Reverse+FallenAce+Same");
    }

    #[test]
    fn test_same_and_plus_conflict() {
        assert_eq!(
            RuleSet::from_variants(&[RuleVariant::Plus, RuleVariant::Same]).unwrap_err(),
            GameError::ConflictingComboRules
        );
        assert!(RuleSet::from_variants(&[RuleVariant::Plus, RuleVariant::Plus]).is_ok());
    }

    #[test]
    fn test_beats_base_and_reverse() {
        let base = RuleSet::standard();
        assert!(base.beats(5, 3));
        assert!(!base.beats(3, 5));
        assert!(!base.beats(4, 4));

        let reverse = RuleSet::standard().with_reverse();
        assert!(reverse.beats(5, 9));
        assert!(!reverse.beats(9, 5));
        assert!(!reverse.beats(4, 4));
    }

    #[test]
    fn test_beats_fallen_ace() {
        let base = RuleSet::standard();
        let ace = RuleSet::standard().with_fallen_ace();

        assert!(!base.beats(1, 10));
        assert!(ace.beats(1, 10));
        assert!(ace.beats(7, 2));
        assert!(!ace.beats(2, 10));

        let both = ace.with_reverse();
        assert!(!both.beats(10, 1));
        assert_eq!(both.beats(10, 1), RuleSet::standard().with_reverse().beats(10, 1));
        assert!(both.beats(1, 10));
        assert!(both.beats(2, 7));
        assert!(!both.beats(9, 1));
    }

    #[test]
    fn test_rule_set_serialization() {
        let rules = RuleSet::standard().with_fallen_ace().with_combo(ComboRule::Plus);
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
