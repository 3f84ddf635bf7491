//! Game state for a game in progress.
//!
//! ## Card ownership
//!
//! Each dealt card lives in exactly one place: a player's hand (as a
//! `CardId`) or a grid cell (as `Placed`, which carries the owner). The
//! card values themselves sit in a shared `CardRegistry`. Placing a card
//! moves its id from hand to grid; flipping rewrites the cell's owner.
//!
//! ## Cloning
//!
//! Hands and grid cells are `im` vectors and the registry is behind an
//! `Arc`, so `clone()` is O(1). Look-ahead strategies rely on this.

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::battle::{resolve_battle, FlipSet};
use super::variant::RuleSet;
use crate::cards::registry::first_duplicate_name;
use crate::cards::{Card, CardId, CardRegistry};
use crate::core::error::{GameError, Result};
use crate::core::{GameRng, Player, PlayerMap};
use crate::grid::{Grid, Placed, Position};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning player, or `None` on a draw.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// What a successful move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub player: Player,
    pub position: Position,
    pub card: CardId,
    /// Opponent cards that changed hands.
    pub flipped: FlipSet,
    /// True if this move filled the grid.
    pub game_over: bool,
}

/// State of a dealt game.
#[derive(Clone, Debug)]
pub struct GameState {
    grid: Grid,
    hands: PlayerMap<Vector<CardId>>,
    registry: Arc<CardRegistry>,
    current: Player,
    moves_played: u32,
}

impl GameState {
    /// Shuffle the deck and deal `(cells + 1) / 2` cards to each player.
    ///
    /// Red receives the first half of the shuffled deck and moves first.
    /// Cards beyond what is dealt take no part in the game.
    pub fn deal(grid: Grid, deck: Vec<Card>, rng: &mut GameRng) -> Result<Self> {
        let per_player = (grid.card_cell_count() + 1) / 2;
        let needed = per_player * 2;

        if deck.len() < needed {
            return Err(GameError::InsufficientDeck {
                needed,
                available: deck.len(),
            });
        }
        if let Some(name) = first_duplicate_name(&deck) {
            return Err(GameError::DuplicateCardName(name.to_string()));
        }

        let mut deck = deck;
        rng.shuffle(&mut deck);
        deck.truncate(needed);

        let blue = deck.split_off(per_player);
        Self::with_hands(grid, deck, blue)
    }

    /// Start from fixed hands without shuffling.
    ///
    /// Each hand must hold exactly `(cells + 1) / 2` cards.
    pub fn with_hands(grid: Grid, red: Vec<Card>, blue: Vec<Card>) -> Result<Self> {
        let per_player = (grid.card_cell_count() + 1) / 2;
        if red.len() != per_player || blue.len() != per_player {
            return Err(GameError::InvalidHands {
                expected: per_player,
                red: red.len(),
                blue: blue.len(),
            });
        }

        let registry = CardRegistry::from_cards(red.into_iter().chain(blue))?;
        let ids: Vec<CardId> = registry.iter().map(|(id, _)| id).collect();
        let (red, blue) = ids.split_at(per_player);

        let mut hands: PlayerMap<Vector<CardId>> = PlayerMap::with_default();
        hands[Player::Red] = red.iter().copied().collect();
        hands[Player::Blue] = blue.iter().copied().collect();

        Ok(Self {
            grid,
            hands,
            registry: Arc::new(registry),
            current: Player::Red,
            moves_played: 0,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Number of moves applied so far.
    #[must_use]
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    /// A player's hand, in dealing order.
    #[must_use]
    pub fn hand(&self, player: Player) -> &Vector<CardId> {
        &self.hands[player]
    }

    /// Look up a card's values.
    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.registry.lookup(id)
    }

    /// Cards in hand plus cells owned on the grid.
    #[must_use]
    pub fn score(&self, player: Player) -> usize {
        self.hands[player].len() + self.grid.count_owned(player)
    }

    /// The game ends exactly when the grid is full.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.grid.is_full()
    }

    /// Winner by score once the grid is full, `None` before that.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        let red = self.score(Player::Red);
        let blue = self.score(Player::Blue);
        Some(match red.cmp(&blue) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::Red),
            std::cmp::Ordering::Less => GameResult::Winner(Player::Blue),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    /// Who currently owns a card: the hand holding it or the grid cell's owner.
    pub fn owner_of(&self, id: CardId) -> Result<Option<Player>> {
        if !self.registry.contains(id) {
            return Err(GameError::UnknownCard(id));
        }
        for player in Player::ALL {
            if self.hands[player].contains(&id) {
                return Ok(Some(player));
            }
        }
        Ok(self
            .grid
            .positions()
            .filter_map(|pos| self.grid.placed(pos))
            .find(|placed| placed.card == id)
            .map(|placed| placed.owner))
    }

    /// Every legal (position, card) pair for a player, row-major then hand order.
    #[must_use]
    pub fn legal_moves(&self, player: Player) -> Vec<(Position, CardId)> {
        let hand = &self.hands[player];
        self.grid
            .empty_positions()
            .flat_map(|pos| hand.iter().map(move |&card| (pos, card)))
            .collect()
    }

    /// Positions that would flip if `player` placed `card` at `(row, col)`.
    ///
    /// Does not check whose turn it is or whose hand holds the card.
    pub fn flips_for(
        &self,
        rules: &RuleSet,
        player: Player,
        row: usize,
        col: usize,
        card: CardId,
    ) -> Result<FlipSet> {
        let pos = self.grid.check_placement(row, col)?;
        let values = self.registry.lookup(card)?;
        resolve_battle(&self.grid, &self.registry, pos, values, player, rules)
    }

    // === Mutation ===

    /// Validate and apply a move for `player`, then pass the turn.
    ///
    /// Nothing is modified unless every check passes.
    pub fn apply_move(
        &mut self,
        rules: &RuleSet,
        player: Player,
        row: usize,
        col: usize,
        card: CardId,
    ) -> Result<MoveOutcome> {
        let slot = self.hands[player]
            .index_of(&card)
            .ok_or(GameError::CardNotInHand { card, player })?;
        let flipped = self.flips_for(rules, player, row, col, card)?;

        self.hands[player].remove(slot);
        let position = self.grid.place_card(row, col, Placed { card, owner: player })?;
        for &pos in &flipped {
            self.grid.set_owner(pos, player);
        }

        self.current = player.opponent();
        self.moves_played += 1;

        Ok(MoveOutcome {
            player,
            position,
            card,
            flipped,
            game_over: self.is_over(),
        })
    }
}
