//! Game systems - the glue between intent messages and game state
//!
//! Systems here are thin: they drain messages, call into
//! [`crate::game::lifecycle`], and emit refresh/game-ended signals. All of
//! them run on the `Update` schedule, intents before the clock tick, so a
//! committed move is never interleaved with a tick.

pub mod game_logic;
pub mod input;

pub use game_logic::*;
pub use input::*;
