//! Strategy-versus-strategy game loop.

use tracing::{debug, info, instrument};

use super::policy::Strategy;
use crate::core::error::{GameError, Result};
use crate::core::{Player, PlayerMap};
use crate::rules::{GameEngine, GameResult};

/// Play a started game to the end, asking `red` and `blue` for moves in
/// turn and applying each through `GameEngine::make_move`.
///
/// Every move fills a cell, so the loop ends after at most one move per
/// card cell.
#[instrument(skip_all, fields(red = red.name(), blue = blue.name()))]
pub fn play_out(engine: &mut GameEngine, red: &dyn Strategy, blue: &dyn Strategy) -> Result<GameResult> {
    let strategies: PlayerMap<&dyn Strategy> = PlayerMap::new(|player| match player {
        Player::Red => red,
        Player::Blue => blue,
    });
    let max_moves = engine.state()?.grid().card_cell_count();

    for _ in 0..max_moves {
        if engine.is_game_over() {
            break;
        }

        let player = engine.current_player()?;
        let choice = strategies[player].find_best_move(engine, player)?;
        let outcome = engine.make_move(choice.row(), choice.col(), choice.card)?;
        debug!(
            %player,
            strategy = strategies[player].name(),
            position = %outcome.position,
            flipped = outcome.flipped.len(),
            "played"
        );
    }

    let result = engine.winner()?;
    info!(?result, "play-out finished");
    Ok(result)
}

/// Score each player ended with, for reporting after `play_out`.
pub fn final_scores(engine: &GameEngine) -> Result<PlayerMap<usize>> {
    if !engine.is_game_over() {
        return Err(GameError::GameNotOver);
    }
    let state = engine.state()?;
    Ok(PlayerMap::new(|player| state.score(player)))
}
