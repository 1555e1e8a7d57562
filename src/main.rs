use bevy::prelude::*;
use bevy_egui::EguiPlugin;

// Module declarations
mod game;
mod narrative;
mod ui;

// Imports
use game::GamePlugin;
use narrative::NarrativePlugin;
use ui::UiPlugin;

const WINDOW_WIDTH: u32 = 1366;
const WINDOW_HEIGHT: u32 = 768;

fn main() {
    let window = Window {
        title: "Bard's Gambit".to_string(),
        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
        ..default()
    };
    let primary_window = Some(window);

    App::new()
        // Core plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window,
            ..default()
        }))
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
            ..default()
        })
        // Game systems
        .add_plugins(GamePlugin)
        .add_plugins(NarrativePlugin)
        .add_plugins(UiPlugin)
        .run();
}
