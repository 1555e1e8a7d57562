//! Intent and signal messages
//!
//! The presentation layer talks to the game exclusively through these: user
//! intents flow in, refresh/game-ended signals flow back out.

use crate::game::resources::GameOverState;
use bevy::prelude::*;
use shakmaty::Square;

/// A board square was clicked (selection or click-move, decided downstream).
#[derive(Message, Debug, Clone, Copy)]
pub struct SquareClicked {
    pub square: Square,
}

/// A piece was dragged from one square and dropped on another.
#[derive(Message, Debug, Clone, Copy)]
pub struct PieceDropped {
    pub from: Square,
    pub to: Square,
}

/// Take back the last move.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct UndoRequested;

/// Start a new game.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetRequested;

/// Start the clock if paused, pause it if running.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ClockToggled;

/// The user applied a new time control (raw text, parsed downstream).
#[derive(Message, Debug, Clone)]
pub struct TimeControlChanged {
    pub raw: String,
}

/// Game state changed; the presentation layer should re-read and re-render.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct BoardRefresh;

/// A terminal verdict was reached.
#[derive(Message, Debug, Clone, Copy)]
pub struct GameEnded {
    pub verdict: GameOverState,
}
