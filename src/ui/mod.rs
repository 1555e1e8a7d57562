//! UI module - egui presentation layer
//!
//! All rendering goes through `bevy_egui`: the board grid in the central
//! panel, the game panel on the right, and the game-over modal. The UI reads
//! game resources and writes intent messages; it owns only its display state
//! (orientation, text box contents, modal visibility, cached status text).

pub mod board_ui;
pub mod game_ui;
pub mod styles;

pub use board_ui::{board_panel, BoardUiState};
pub use game_ui::{game_status_ui, ModalState, SidePanelState, StatusCache};
pub use styles::UiColors;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// Presentation plugin. Requires `EguiPlugin` and the game/narrative plugins.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardUiState>()
            .init_resource::<SidePanelState>()
            .init_resource::<ModalState>()
            .init_resource::<StatusCache>();

        app.add_systems(
            Update,
            (game_ui::refresh_status_cache, game_ui::open_game_over_modal),
        );

        // Side panel first so egui allocates the central board area last
        app.add_systems(
            EguiPrimaryContextPass,
            (game_status_ui, board_panel).chain(),
        );
    }
}
