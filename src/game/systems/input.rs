//! Intent handling systems
//!
//! Drain the presentation layer's intent messages into the lifecycle
//! functions and translate outcomes into refresh signals and terminal
//! verdicts.

use crate::game::events::{
    BoardRefresh, ClockToggled, GameEnded, PieceDropped, ResetRequested, SquareClicked,
    TimeControlChanged, UndoRequested,
};
use crate::game::lifecycle::{self, MoveOutcome};
use crate::game::resources::{
    CaptureLedger, ChessClock, GameOverState, Selection, TimeControl, TimeControlSetting,
};
use crate::game::systems::game_logic::evaluate_termination;
use crate::game::RulesEngine;
use bevy::prelude::*;

pub fn handle_square_clicks(
    mut clicks: MessageReader<SquareClicked>,
    mut engine: ResMut<RulesEngine>,
    mut clock: ResMut<ChessClock>,
    mut ledger: ResMut<CaptureLedger>,
    mut selection: ResMut<Selection>,
    mut game_over: ResMut<GameOverState>,
    mut refresh: MessageWriter<BoardRefresh>,
    mut ended: MessageWriter<GameEnded>,
) {
    for click in clicks.read() {
        let outcome = lifecycle::square_selected(
            click.square,
            &mut engine,
            &mut clock,
            &mut ledger,
            &mut selection,
        );
        apply_outcome(outcome, &engine, &mut game_over, &mut refresh, &mut ended);
    }
}

pub fn handle_piece_drops(
    mut drops: MessageReader<PieceDropped>,
    mut engine: ResMut<RulesEngine>,
    mut clock: ResMut<ChessClock>,
    mut ledger: ResMut<CaptureLedger>,
    mut selection: ResMut<Selection>,
    mut game_over: ResMut<GameOverState>,
    mut refresh: MessageWriter<BoardRefresh>,
    mut ended: MessageWriter<GameEnded>,
) {
    for dropped in drops.read() {
        let outcome = lifecycle::piece_dropped(
            dropped.from,
            dropped.to,
            &mut engine,
            &mut clock,
            &mut ledger,
            &mut selection,
        );
        apply_outcome(outcome, &engine, &mut game_over, &mut refresh, &mut ended);
    }
}

pub fn handle_undo_requests(
    mut undos: MessageReader<UndoRequested>,
    mut engine: ResMut<RulesEngine>,
    mut ledger: ResMut<CaptureLedger>,
    mut selection: ResMut<Selection>,
    mut game_over: ResMut<GameOverState>,
    mut refresh: MessageWriter<BoardRefresh>,
) {
    for _ in undos.read() {
        if lifecycle::undo_requested(&mut engine, &mut ledger, &mut selection).is_none() {
            continue;
        }
        // Taking back the deciding move reopens the game; time verdicts
        // stand because the clock is not refunded
        match *game_over {
            GameOverState::WhiteWonByCheckmate
            | GameOverState::BlackWonByCheckmate
            | GameOverState::Draw => *game_over = GameOverState::InProgress,
            _ => {}
        }
        refresh.write(BoardRefresh);
    }
}

pub fn handle_reset_requests(
    mut resets: MessageReader<ResetRequested>,
    setting: Res<TimeControlSetting>,
    mut engine: ResMut<RulesEngine>,
    mut clock: ResMut<ChessClock>,
    mut ledger: ResMut<CaptureLedger>,
    mut selection: ResMut<Selection>,
    mut game_over: ResMut<GameOverState>,
    mut refresh: MessageWriter<BoardRefresh>,
) {
    for _ in resets.read() {
        lifecycle::reset_game(
            setting.0,
            &mut engine,
            &mut clock,
            &mut ledger,
            &mut selection,
        );
        *game_over = GameOverState::InProgress;
        refresh.write(BoardRefresh);
    }
}

pub fn handle_clock_toggles(
    mut toggles: MessageReader<ClockToggled>,
    time: Res<Time>,
    mut clock: ResMut<ChessClock>,
    mut refresh: MessageWriter<BoardRefresh>,
) {
    for _ in toggles.read() {
        if clock.is_running() {
            clock.pause();
            info!("[CLOCK] Paused");
        } else if clock.flag_fallen().is_none() {
            // A fallen flag stays terminal until reconfigure/reset
            clock.start(time.elapsed());
            info!("[CLOCK] Started, {:?} to move", clock.active());
        }
        refresh.write(BoardRefresh);
    }
}

pub fn handle_time_control_changes(
    mut changes: MessageReader<TimeControlChanged>,
    mut setting: ResMut<TimeControlSetting>,
    mut clock: ResMut<ChessClock>,
    mut refresh: MessageWriter<BoardRefresh>,
) {
    for change in changes.read() {
        let control = TimeControl::parse(&change.raw);
        setting.0 = control;
        clock.configure(control);
        info!("[CLOCK] Time control set to {}", control);
        refresh.write(BoardRefresh);
    }
}

fn apply_outcome(
    outcome: MoveOutcome,
    engine: &RulesEngine,
    game_over: &mut GameOverState,
    refresh: &mut MessageWriter<BoardRefresh>,
    ended: &mut MessageWriter<GameEnded>,
) {
    match outcome {
        MoveOutcome::Ignored => {}
        MoveOutcome::Selected(_) | MoveOutcome::Deselected | MoveOutcome::Rejected => {
            refresh.write(BoardRefresh);
        }
        MoveOutcome::Committed(_) => {
            refresh.write(BoardRefresh);
            if let Some(verdict) = evaluate_termination(engine, game_over) {
                ended.write(GameEnded { verdict });
            }
        }
    }
}
