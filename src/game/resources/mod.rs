//! Game resources - Global game state management
//!
//! Resources are ECS singletons shared across systems. Everything mutable the
//! game owns lives here and is registered by [`crate::game::plugin::GamePlugin`];
//! the presentation layer reads these and emits intent messages, never
//! mutating game state directly.
//!
//! - [`ChessClock`] / [`TimeControlSetting`] - two-sided countdown and the
//!   configured time control
//! - [`CaptureLedger`] - captured pieces per side, consistent under undo
//! - [`Selection`] - selected square and its highlighted legal targets
//! - [`GameOverState`] - terminal verdicts (checkmate, draw, flag fall)

pub mod captured;
pub mod clock;
pub mod game_over;
pub mod selection;

pub use captured::*;
pub use clock::*;
pub use game_over::*;
pub use selection::*;
