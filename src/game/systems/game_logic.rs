//! Clock ticking and game termination

use crate::game::events::{BoardRefresh, GameEnded};
use crate::game::resources::{ChessClock, GameOverState};
use crate::game::RulesEngine;
use bevy::prelude::*;
use std::time::Duration;

/// How often the running clock commits elapsed time.
pub const CLOCK_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Periodic clock tick.
///
/// Runs on a fixed interval while the app is up; the clock itself ignores
/// ticks while paused, so a tick scheduled before a pause commits nothing.
/// On flag fall the clock has already auto-paused; this system records the
/// verdict unless the game was decided on the board first.
pub fn tick_chess_clock(
    time: Res<Time>,
    mut clock: ResMut<ChessClock>,
    mut game_over: ResMut<GameOverState>,
    mut refresh: MessageWriter<BoardRefresh>,
    mut ended: MessageWriter<GameEnded>,
) {
    if !clock.is_running() {
        return;
    }
    clock.tick(time.elapsed());
    refresh.write(BoardRefresh);

    if let Some(flagged) = clock.flag_fallen() {
        if !game_over.is_game_over() {
            *game_over = GameOverState::won_on_time_against(flagged);
            warn!("[CLOCK] {:?} ran out of time! {}", flagged, game_over.message());
            ended.write(GameEnded { verdict: *game_over });
        }
    }
}

/// Evaluate the position after a committed move.
///
/// Sets and returns a verdict on checkmate or draw; logs check as a status
/// change only. Never downgrades an existing verdict.
pub fn evaluate_termination(
    engine: &RulesEngine,
    game_over: &mut GameOverState,
) -> Option<GameOverState> {
    if game_over.is_game_over() {
        return None;
    }
    if engine.is_checkmate() {
        *game_over = GameOverState::won_by_checkmate_against(engine.turn());
        info!("[GAME] Checkmate! {}", game_over.message());
        return Some(*game_over);
    }
    if engine.is_draw() {
        *game_over = GameOverState::Draw;
        info!("[GAME] {}", game_over.message());
        return Some(*game_over);
    }
    if engine.is_check() {
        info!("[GAME] {:?} is in check", engine.turn());
    }
    None
}
