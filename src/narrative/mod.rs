//! Narrative generation - themed flavor text for the played game
//!
//! Posts the game's movetext to a remote narration service and shows the
//! returned story in the side panel. Service failures become readable text in
//! the story box; nothing here can take the board down.

pub mod client;
pub mod error;
pub mod systems;

pub use client::{NarrativeClient, StoryRequest, StoryTheme, STORY_TIMEOUT};
pub use error::NarrativeError;
pub use systems::{StoryRequested, StoryState};

use bevy::prelude::*;

/// Narrative plugin. Add after [`crate::game::GamePlugin`] (it reads the
/// rules engine and the reset message registered there).
pub struct NarrativePlugin;

impl Plugin for NarrativePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StoryState>();
        app.add_message::<StoryRequested>();

        match NarrativeClient::from_env() {
            Ok(client) => {
                app.insert_resource(client);
            }
            Err(err) => {
                // The app stays playable; story requests report the gap
                error!("[STORY] Narrative client unavailable: {err}");
            }
        }

        app.add_systems(
            Update,
            (
                systems::handle_story_requests,
                systems::poll_story_results,
                systems::clear_story_on_reset,
            ),
        );
    }
}
