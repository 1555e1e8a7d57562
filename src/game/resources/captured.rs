//! Captured pieces ledger
//!
//! Tracks pieces captured by each side in move order and keeps the lists
//! consistent under undo. Also calculates material advantage for the side
//! panel.
//!
//! # Material Values
//!
//! Standard piece values in pawns: Pawn 1, Knight/Bishop 3, Rook 5, Queen 9.
//! The king has no material value.

use crate::game::engine::PlayedMove;
use bevy::prelude::*;
use shakmaty::{Color, Piece, Role};

/// Resource tracking captured pieces for both sides.
///
/// `white_captured` holds Black pieces White has taken; `black_captured` the
/// reverse. Both lists are insertion-ordered, most recent capture last, and
/// are only reordered by undo removal.
#[derive(Resource, Default, Debug)]
pub struct CaptureLedger {
    /// Pieces captured by White (Black pieces taken)
    pub white_captured: Vec<Piece>,
    /// Pieces captured by Black (White pieces taken)
    pub black_captured: Vec<Piece>,
}

impl CaptureLedger {
    /// Append the move's captured piece to the mover's list. No-op for
    /// non-capturing moves.
    pub fn record_capture(&mut self, mv: &PlayedMove) {
        let Some(piece) = mv.captured_piece() else {
            return;
        };
        self.list_for_mut(mv.color).push(piece);
    }

    /// Remove the most recently appended entry matching the move's captured
    /// piece, for undo.
    ///
    /// A missing entry means move and undo bookkeeping got out of step
    /// upstream; it is logged and the undo proceeds.
    pub fn revert_capture(&mut self, mv: &PlayedMove) {
        let Some(piece) = mv.captured_piece() else {
            return;
        };
        let list = self.list_for_mut(mv.color);
        match list.iter().rposition(|entry| *entry == piece) {
            Some(index) => {
                list.remove(index);
            }
            None => {
                warn!(
                    "[LEDGER] No {:?} {:?} to revert for {:?}'s undone capture",
                    piece.color, piece.role, mv.color
                );
            }
        }
    }

    /// Pieces captured by `side`, in capture order.
    pub fn captured_by(&self, side: Color) -> &[Piece] {
        match side {
            Color::White => &self.white_captured,
            Color::Black => &self.black_captured,
        }
    }

    /// Material advantage in pawn units. Positive means White is ahead.
    pub fn material_advantage(&self) -> i32 {
        let white_score: i32 = self.white_captured.iter().map(|p| piece_value(p.role)).sum();
        let black_score: i32 = self.black_captured.iter().map(|p| piece_value(p.role)).sum();
        white_score - black_score
    }

    /// Clear both lists (for new game).
    pub fn reset(&mut self) {
        self.white_captured.clear();
        self.black_captured.clear();
    }

    fn list_for_mut(&mut self, capturer: Color) -> &mut Vec<Piece> {
        match capturer {
            Color::White => &mut self.white_captured,
            Color::Black => &mut self.black_captured,
        }
    }
}

/// Standard pawn-unit value of a piece.
fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight => 3,
        Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 0,
    }
}
