//! Card registry for per-game lookup.
//!
//! The `CardRegistry` stores every card dealt into a game and hands out
//! `CardId`s in registration order. Hands and grid cells hold ids; the
//! registry is the single place card values live.

use rustc_hash::{FxHashMap, FxHashSet};

use super::card::{Card, CardId};
use crate::core::error::{GameError, Result};

/// Registry of the cards taking part in one game.
///
/// ## Example
///
/// ```
/// use grid_duel::cards::{Card, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// let id = registry.register(Card::new("Wolf", 3, 4, 5, 6).unwrap()).unwrap();
///
/// assert_eq!(registry.get(id).unwrap().name, "Wolf");
/// assert_eq!(registry.find_by_name("Wolf"), Some(id));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Card>,
    by_name: FxHashMap<String, CardId>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of cards, assigning ids in order.
    ///
    /// Fails with `DuplicateCardName` if two cards share a name.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Register a card and return its assigned id.
    pub fn register(&mut self, card: Card) -> Result<CardId> {
        if self.by_name.contains_key(&card.name) {
            return Err(GameError::DuplicateCardName(card.name));
        }

        let id = CardId::new(self.cards.len() as u32);
        self.by_name.insert(card.name.clone(), id);
        self.cards.push(card);
        Ok(id)
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.raw() as usize)
    }

    /// Get a card by id, failing with `UnknownCard` if absent.
    pub fn lookup(&self, id: CardId) -> Result<&Card> {
        self.get(id).ok_or(GameError::UnknownCard(id))
    }

    /// Find a card's id by its name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CardId> {
        self.by_name.get(name).copied()
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        (id.raw() as usize) < self.cards.len()
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over (id, card) pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, card)| (CardId::new(i as u32), card))
    }
}

/// Check a deck for duplicate names without building a registry.
pub(crate) fn first_duplicate_name(cards: &[Card]) -> Option<&str> {
    let mut seen = FxHashSet::default();
    cards
        .iter()
        .find(|card| !seen.insert(card.name.as_str()))
        .map(|card| card.name.as_str())
}
