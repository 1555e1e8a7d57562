pub mod game;
pub mod narrative;
pub mod ui;

pub use game::GamePlugin;
pub use narrative::NarrativePlugin;
pub use ui::UiPlugin;
