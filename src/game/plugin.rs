//! Game plugin - clock, ledger, and move lifecycle wiring
//!
//! Registers every game resource and message and orders the systems so that
//! intent handling always runs before the clock tick. The plugin has no
//! rendering dependency: the same registration drives the windowed app and
//! the headless test harness.

use super::resources::*;
use super::system_sets::GameSystems;
use super::systems::*;
use super::RulesEngine;
use crate::game::events::{
    BoardRefresh, ClockToggled, GameEnded, PieceDropped, ResetRequested, SquareClicked,
    TimeControlChanged, UndoRequested,
};
use bevy::prelude::*;
use bevy::time::common_conditions::on_timer;

/// Core game plugin.
///
/// Add after `DefaultPlugins` (or `MinimalPlugins` in tests) and before the
/// UI plugin, which reads the resources registered here.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // Register resources
        app.init_resource::<RulesEngine>()
            .init_resource::<ChessClock>()
            .init_resource::<TimeControlSetting>()
            .init_resource::<CaptureLedger>()
            .init_resource::<Selection>()
            .init_resource::<GameOverState>();

        // Register intent and signal messages
        app.add_message::<SquareClicked>()
            .add_message::<PieceDropped>()
            .add_message::<UndoRequested>()
            .add_message::<ResetRequested>()
            .add_message::<ClockToggled>()
            .add_message::<TimeControlChanged>()
            .add_message::<BoardRefresh>()
            .add_message::<GameEnded>();

        // Intents drain before time-driven updates commit
        app.configure_sets(
            Update,
            (GameSystems::Input, GameSystems::Execution).chain(),
        );

        app.add_systems(
            Update,
            (
                (
                    handle_square_clicks,
                    handle_piece_drops,
                    handle_undo_requests,
                    handle_reset_requests,
                    handle_clock_toggles,
                    handle_time_control_changes,
                )
                    .in_set(GameSystems::Input),
                tick_chess_clock
                    .in_set(GameSystems::Execution)
                    .run_if(on_timer(CLOCK_TICK_INTERVAL)),
            ),
        );
    }
}
