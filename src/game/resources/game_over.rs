//! Game over state tracking and result management
//!
//! Tracks end-game conditions (checkmate, draw, flag fall) and provides the
//! result message shown in the status line and the game-over modal.

use bevy::prelude::*;
use shakmaty::Color;

/// Resource tracking the game's end state.
///
/// Starts as `InProgress` and transitions to a terminal state when the game
/// ends. A flag fall never overwrites a verdict already decided on the board.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum GameOverState {
    #[default]
    InProgress,
    /// Black is mated
    WhiteWonByCheckmate,
    /// White is mated
    BlackWonByCheckmate,
    /// Stalemate, insufficient material, or the 50-move rule
    Draw,
    /// Black's flag fell
    WhiteWonOnTime,
    /// White's flag fell
    BlackWonOnTime,
}

impl GameOverState {
    pub fn is_game_over(&self) -> bool {
        *self != GameOverState::InProgress
    }

    /// The winning side, if the result has one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOverState::WhiteWonByCheckmate | GameOverState::WhiteWonOnTime => {
                Some(Color::White)
            }
            GameOverState::BlackWonByCheckmate | GameOverState::BlackWonOnTime => {
                Some(Color::Black)
            }
            GameOverState::InProgress | GameOverState::Draw => None,
        }
    }

    /// Human-readable result for the UI.
    pub fn message(&self) -> &'static str {
        match self {
            GameOverState::InProgress => "Game in progress",
            GameOverState::WhiteWonByCheckmate => "White wins by checkmate!",
            GameOverState::BlackWonByCheckmate => "Black wins by checkmate!",
            GameOverState::Draw => "Game drawn",
            GameOverState::WhiteWonOnTime => "White wins on time!",
            GameOverState::BlackWonOnTime => "Black wins on time!",
        }
    }

    /// The verdict when `flagged`'s clock reaches zero.
    pub fn won_on_time_against(flagged: Color) -> GameOverState {
        match flagged {
            Color::White => GameOverState::BlackWonOnTime,
            Color::Black => GameOverState::WhiteWonOnTime,
        }
    }

    /// The verdict when `mated` has been checkmated.
    pub fn won_by_checkmate_against(mated: Color) -> GameOverState {
        match mated {
            Color::White => GameOverState::BlackWonByCheckmate,
            Color::Black => GameOverState::WhiteWonByCheckmate,
        }
    }
}
