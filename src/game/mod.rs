//! Chess game module - clock, capture ledger, and move lifecycle
//!
//! Legality and game-state tracking are delegated to the rules engine behind
//! [`engine::RulesEngine`]; this module owns everything that has to stay
//! consistent across time and undo:
//!
//! - `resources` - clock, capture ledger, selection, game-over verdict
//! - `engine` - the rules-engine adapter (the only place positions mutate)
//! - `lifecycle` - the shared move-attempt/undo/reset coordination path
//! - `events` - intent messages in, refresh/game-ended signals out
//! - `systems` - message draining and the periodic clock tick
//! - `plugin` - registers the lot

pub mod engine;
pub mod events;
pub mod lifecycle;
pub mod plugin;
pub mod resources;
pub mod system_sets;
pub mod systems;

pub use engine::{MoveTarget, PlayedMove, RulesEngine};
pub use plugin::GamePlugin;
