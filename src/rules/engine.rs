//! Game engine: the turn state machine callers drive.
//!
//! ```text
//! NotStarted --start_game / start_with_hands--> InProgress --make_move (grid full)--> GameOver
//! ```
//!
//! The engine owns the active `RuleSet` and, once started, a `GameState`.
//! Views, controllers and strategies read it through `&GameEngine`; the
//! only mutating entry points are `start_game`, `start_with_hands` and
//! `make_move`.

use im::Vector;
use tracing::{debug, info, instrument};

use super::battle::FlipSet;
use super::state::{GameResult, GameState, MoveOutcome};
use super::variant::{RuleSet, RuleVariant};
use crate::cards::{Card, CardId};
use crate::core::error::{GameError, Result};
use crate::core::{GameRng, Player};
use crate::grid::{Grid, Placed, Position};

/// Lifecycle of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    NotStarted,
    InProgress,
    GameOver,
}

/// Two-player grid card game engine.
///
/// ## Example
///
/// ```
/// use grid_duel::cards::Card;
/// use grid_duel::core::{GameRng, Player};
/// use grid_duel::grid::Grid;
/// use grid_duel::rules::{GameEngine, GamePhase, RuleSet};
///
/// let deck: Vec<Card> = (1..=4)
///     .map(|v| Card::new(format!("c{v}"), v, v, v, v).unwrap())
///     .collect();
///
/// let mut engine = GameEngine::new(RuleSet::standard());
/// engine.start_game(Grid::open(1, 3).unwrap(), deck, &mut GameRng::new(1)).unwrap();
///
/// assert_eq!(engine.phase(), GamePhase::InProgress);
/// assert_eq!(engine.current_player().unwrap(), Player::Red);
///
/// let card = engine.player_hand(Player::Red).unwrap()[0];
/// engine.make_move(0, 0, card).unwrap();
/// assert_eq!(engine.current_player().unwrap(), Player::Blue);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine {
    rules: RuleSet,
    game: Option<GameState>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(RuleSet::standard())
    }
}

impl GameEngine {
    /// Create an engine that has not started a game yet.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules, game: None }
    }

    /// Create an engine from a list of variants.
    ///
    /// Fails with `ConflictingComboRules` if Same and Plus are both listed.
    pub fn with_variants(variants: &[RuleVariant]) -> Result<Self> {
        Ok(Self::new(RuleSet::from_variants(variants)?))
    }

    /// The active rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        match &self.game {
            None => GamePhase::NotStarted,
            Some(game) if game.is_over() => GamePhase::GameOver,
            Some(_) => GamePhase::InProgress,
        }
    }

    /// The dealt game state.
    pub fn state(&self) -> Result<&GameState> {
        self.game.as_ref().ok_or(GameError::NotStarted)
    }

    /// Deal a game on `grid` from `deck`.
    ///
    /// Requires at least `card cells + 1` cards. On failure the engine
    /// stays `NotStarted`.
    #[instrument(skip(self, grid, deck, rng), fields(rows = grid.rows(), cols = grid.cols(), deck = deck.len()))]
    pub fn start_game(&mut self, grid: Grid, deck: Vec<Card>, rng: &mut GameRng) -> Result<()> {
        if self.game.is_some() {
            return Err(GameError::AlreadyStarted);
        }

        let state = GameState::deal(grid, deck, rng)?;
        info!(
            cells = state.grid().card_cell_count(),
            hand = state.hand(Player::Red).len(),
            rules = %self.rules,
            "game started"
        );
        self.game = Some(state);
        Ok(())
    }

    /// Start a game from fixed hands instead of a shuffled deck.
    ///
    /// Each hand must hold exactly `(card cells + 1) / 2` cards.
    #[instrument(skip(self, grid, red, blue), fields(rows = grid.rows(), cols = grid.cols()))]
    pub fn start_with_hands(&mut self, grid: Grid, red: Vec<Card>, blue: Vec<Card>) -> Result<()> {
        if self.game.is_some() {
            return Err(GameError::AlreadyStarted);
        }

        let state = GameState::with_hands(grid, red, blue)?;
        info!(rules = %self.rules, "game started from fixed hands");
        self.game = Some(state);
        Ok(())
    }

    /// Play `card` from the current player's hand at `(row, col)`.
    ///
    /// Resolves the battle, passes the turn and reports what flipped.
    /// Atomic: on any error nothing changes.
    #[instrument(level = "debug", skip(self))]
    pub fn make_move(&mut self, row: usize, col: usize, card: CardId) -> Result<MoveOutcome> {
        if self.phase() != GamePhase::InProgress {
            return Err(GameError::NotInProgress);
        }
        let rules = self.rules;
        let game = self.game.as_mut().ok_or(GameError::NotInProgress)?;
        let player = game.current_player();

        let outcome = game.apply_move(&rules, player, row, col, card)?;
        debug!(
            %player,
            position = %outcome.position,
            flipped = outcome.flipped.len(),
            "move applied"
        );
        if outcome.game_over {
            info!(result = ?game.result(), "game over");
        }
        Ok(outcome)
    }

    /// Apply a move for `player` on a copy of this engine.
    ///
    /// Ignores whose turn it is; used by look-ahead search.
    pub(crate) fn simulate(
        &self,
        player: Player,
        row: usize,
        col: usize,
        card: CardId,
    ) -> Result<GameEngine> {
        let mut copy = self.clone();
        let game = copy.game.as_mut().ok_or(GameError::NotStarted)?;
        game.apply_move(&self.rules, player, row, col, card)?;
        Ok(copy)
    }

    // === Queries ===

    pub fn current_player(&self) -> Result<Player> {
        Ok(self.state()?.current_player())
    }

    pub fn player_hand(&self, player: Player) -> Result<&Vector<CardId>> {
        Ok(self.state()?.hand(player))
    }

    /// Cards in hand plus cells owned.
    pub fn player_score(&self, player: Player) -> Result<usize> {
        Ok(self.state()?.score(player))
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase() == GamePhase::GameOver
    }

    /// Final result. Fails with `GameNotOver` until the grid is full.
    pub fn winner(&self) -> Result<GameResult> {
        self.state()?.result().ok_or(GameError::GameNotOver)
    }

    pub fn is_hole(&self, row: usize, col: usize) -> Result<bool> {
        self.state()?.grid().is_hole(row, col)
    }

    pub fn card_at(&self, row: usize, col: usize) -> Result<Option<Placed>> {
        self.state()?.grid().card_at(row, col)
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.state()?.card(id)
    }

    pub fn owner_of(&self, id: CardId) -> Result<Option<Player>> {
        self.state()?.owner_of(id)
    }

    /// True if the coordinate is an in-bounds, empty card cell of a game in progress.
    #[must_use]
    pub fn can_place_card(&self, row: usize, col: usize) -> bool {
        self.phase() == GamePhase::InProgress
            && self
                .game
                .as_ref()
                .is_some_and(|game| game.grid().can_place(row, col))
    }

    /// Empty card cells in row-major order.
    pub fn empty_positions(&self) -> Result<Vec<Position>> {
        Ok(self.state()?.grid().empty_positions().collect())
    }

    /// Legal (position, card) pairs for a player, row-major then hand order.
    pub fn legal_moves(&self, player: Player) -> Result<Vec<(Position, CardId)>> {
        Ok(self.state()?.legal_moves(player))
    }

    /// Opponent cards the current player would flip with this placement.
    pub fn flippable_cards(&self, row: usize, col: usize, card: CardId) -> Result<FlipSet> {
        let game = self.state()?;
        game.flips_for(&self.rules, game.current_player(), row, col, card)
    }

    /// Opponent cards `player` would flip with this placement, honouring
    /// every active rule variant.
    pub fn flips_for(
        &self,
        player: Player,
        row: usize,
        col: usize,
        card: CardId,
    ) -> Result<FlipSet> {
        self.state()?.flips_for(&self.rules, player, row, col, card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                let v = (i % 10) as u8 + 1;
                Card::new(format!("card{i}"), v, v, v, v).unwrap()
            })
            .collect()
    }

    fn started() -> GameEngine {
        let mut engine = GameEngine::default();
        engine
            .start_game(Grid::open(3, 3).unwrap(), deck(10), &mut GameRng::new(5))
            .unwrap();
        engine
    }

    #[test]
    fn test_not_started_queries_fail() {
        let engine = GameEngine::default();

        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert_eq!(engine.current_player().unwrap_err(), GameError::NotStarted);
        assert_eq!(engine.winner().unwrap_err(), GameError::NotStarted);
        assert!(!engine.can_place_card(0, 0));
        assert!(!engine.is_game_over());
    }

    #[test]
    fn test_make_move_before_start() {
        let mut engine = GameEngine::default();
        assert_eq!(
            engine.make_move(0, 0, CardId::new(0)).unwrap_err(),
            GameError::NotInProgress
        );
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut engine = started();
        let err = engine
            .start_game(Grid::open(3, 3).unwrap(), deck(10), &mut GameRng::new(5))
            .unwrap_err();
        assert_eq!(err, GameError::AlreadyStarted);
    }

    #[test]
    fn test_failed_start_stays_not_started() {
        let mut engine = GameEngine::default();
        let err = engine
            .start_game(Grid::open(3, 3).unwrap(), deck(4), &mut GameRng::new(5))
            .unwrap_err();

        assert!(matches!(err, GameError::InsufficientDeck { .. }));
        assert_eq!(engine.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_with_variants_conflict() {
        let err = GameEngine::with_variants(&[RuleVariant::Same, RuleVariant::Plus]).unwrap_err();
        assert_eq!(err, GameError::ConflictingComboRules);
    }

    #[test]
    fn test_winner_before_end() {
        let engine = started();
        assert_eq!(engine.winner().unwrap_err(), GameError::GameNotOver);
    }

    #[test]
    fn test_simulate_leaves_original_untouched() {
        let engine = started();
        let card = engine.player_hand(Player::Blue).unwrap()[0];

        let sim = engine.simulate(Player::Blue, 2, 2, card).unwrap();

        assert_eq!(sim.card_at(2, 2).unwrap().map(|p| p.owner), Some(Player::Blue));
        assert_eq!(engine.card_at(2, 2).unwrap(), None);
        assert_eq!(engine.player_hand(Player::Blue).unwrap().len(), 5);
    }

    #[test]
    fn test_can_place_card() {
        let mut engine = started();
        let card = engine.player_hand(Player::Red).unwrap()[0];
        engine.make_move(0, 0, card).unwrap();

        assert!(!engine.can_place_card(0, 0));
        assert!(engine.can_place_card(0, 1));
        assert!(!engine.can_place_card(3, 3));
    }
}
