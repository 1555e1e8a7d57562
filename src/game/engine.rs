//! Rules engine adapter
//!
//! Thin seam over `shakmaty`: the rest of the game never touches the position
//! directly. The adapter owns the current position, an undo stack, and the
//! played-move list, and answers the queries the board UI needs (legal
//! targets, SAN history, FEN, PGN movetext).

use bevy::prelude::*;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{Chess, Color, EnPassantMode, File, Move, Piece, Position, Role, Square};

/// A committed move, as reported back to the caller.
///
/// `to` is the square the moved piece lands on from the player's point of
/// view; for castling that is the king's destination, not the rook's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub role: Role,
    pub captured: Option<Role>,
    pub promotion: Option<Role>,
    pub san: String,
}

impl PlayedMove {
    /// The captured piece with its color made explicit (opposite the mover).
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured.map(|role| Piece {
            color: !self.color,
            role,
        })
    }
}

/// A legal destination for a selected piece, for move highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTarget {
    pub to: Square,
    pub is_capture: bool,
}

/// Resource wrapping the external rules engine.
#[derive(Resource, Debug, Default)]
pub struct RulesEngine {
    position: Chess,
    undo_stack: Vec<Chess>,
    played: Vec<PlayedMove>,
}

/// Origin and display destination of a legal move. Castling maps to the
/// king's two-square hop (g- or c-file) the way players enter it.
fn move_endpoints(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

impl RulesEngine {
    #[cfg(test)]
    fn from_position(position: Chess) -> RulesEngine {
        RulesEngine {
            position,
            undo_stack: Vec::new(),
            played: Vec::new(),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.board().piece_at(square)
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Attempt `from -> to`. Returns the committed move, or `None` if no legal
    /// move matches; illegality is a normal outcome, not an error.
    ///
    /// Pawn promotion always resolves to a queen; underpromotion candidates
    /// are skipped so they can never be committed through this path.
    pub fn try_move(&mut self, from: Square, to: Square) -> Option<PlayedMove> {
        let legals = self.position.legal_moves();
        let chosen = legals.iter().find(|m| {
            if m.promotion().is_some() && m.promotion() != Some(Role::Queen) {
                return false;
            }
            move_endpoints(m) == Some((from, to))
        })?;

        let mut san = San::from_move(&self.position, chosen.clone()).to_string();
        let next = match self.position.clone().play(chosen.clone()) {
            Ok(next) => next,
            Err(_) => return None,
        };
        if next.is_checkmate() {
            san.push('#');
        } else if next.is_check() {
            san.push('+');
        }

        let played = PlayedMove {
            from,
            to,
            color: self.position.turn(),
            role: chosen.role(),
            captured: chosen.capture(),
            promotion: chosen.promotion(),
            san,
        };
        self.undo_stack.push(std::mem::replace(&mut self.position, next));
        self.played.push(played.clone());
        Some(played)
    }

    /// Legal destinations for the piece on `from`, deduplicated across
    /// promotion variants.
    pub fn legal_targets(&self, from: Square) -> Vec<MoveTarget> {
        let mut targets: Vec<MoveTarget> = Vec::new();
        for m in self.position.legal_moves() {
            let Some((move_from, move_to)) = move_endpoints(&m) else {
                continue;
            };
            if move_from != from || targets.iter().any(|t| t.to == move_to) {
                continue;
            }
            targets.push(MoveTarget {
                to: move_to,
                is_capture: m.is_capture(),
            });
        }
        targets
    }

    /// Take back the last move. Returns it so callers can reverse their own
    /// bookkeeping, or `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<PlayedMove> {
        let previous = self.undo_stack.pop()?;
        self.position = previous;
        self.played.pop()
    }

    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.undo_stack.clear();
        self.played.clear();
    }

    pub fn is_check(&self) -> bool {
        self.position.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    /// Stalemate, insufficient material, or the 50-move rule. Threefold
    /// repetition is not tracked.
    pub fn is_draw(&self) -> bool {
        self.position.is_stalemate()
            || self.position.is_insufficient_material()
            || self.position.halfmoves() >= 100
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    pub fn played(&self) -> &[PlayedMove] {
        &self.played
    }

    pub fn move_count(&self) -> usize {
        self.played.len()
    }

    /// SAN history in move order.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.played.iter().map(|m| m.san.as_str())
    }

    /// Move pairs for history display: (move number, white SAN, black SAN).
    pub fn move_pairs(&self) -> Vec<(usize, String, Option<String>)> {
        self.played
            .chunks(2)
            .enumerate()
            .map(|(i, chunk)| {
                let white = chunk.first().map(|m| m.san.clone()).unwrap_or_default();
                let black = chunk.get(1).map(|m| m.san.clone());
                (i + 1, white, black)
            })
            .collect()
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.position, EnPassantMode::Legal).to_string()
    }

    /// Movetext with move numbers, plus the result token once the game is
    /// decided on the board.
    pub fn pgn(&self) -> String {
        let mut out = String::new();
        for (number, white, black) in self.move_pairs() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("{}. {}", number, white));
            if let Some(black) = black {
                out.push(' ');
                out.push_str(&black);
            }
        }
        if self.is_checkmate() {
            // The side to move is the one mated
            let result = match self.turn() {
                Color::White => "0-1",
                Color::Black => "1-0",
            };
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(result);
        } else if self.is_draw() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str("1/2-1/2");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::CastlingMode;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn engine_from_fen(fen: &str) -> RulesEngine {
        let setup: Fen = fen.parse().expect("valid FEN");
        let position = setup
            .into_position(CastlingMode::Standard)
            .expect("legal position");
        RulesEngine::from_position(position)
    }

    #[test]
    fn test_start_position() {
        let engine = RulesEngine::default();
        assert_eq!(engine.turn(), Color::White);
        assert_eq!(engine.fen(), START_FEN);
        let pawn = engine.piece_at(Square::E2).expect("pawn on e2");
        assert_eq!(pawn.role, Role::Pawn);
        assert_eq!(pawn.color, Color::White);
    }

    #[test]
    fn test_illegal_move_is_rejected_without_mutation() {
        let mut engine = RulesEngine::default();
        assert!(engine.try_move(Square::E2, Square::E5).is_none());
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.fen(), START_FEN);
    }

    #[test]
    fn test_legal_move_commits_and_switches_turn() {
        let mut engine = RulesEngine::default();
        let mv = engine.try_move(Square::E2, Square::E4).expect("e4 is legal");
        assert_eq!(mv.san, "e4");
        assert_eq!(mv.color, Color::White);
        assert!(mv.captured.is_none());
        assert_eq!(engine.turn(), Color::Black);
        assert_eq!(engine.move_count(), 1);
    }

    #[test]
    fn test_capture_reports_captured_role_and_color() {
        let mut engine = RulesEngine::default();
        engine.try_move(Square::E2, Square::E4).unwrap();
        engine.try_move(Square::D7, Square::D5).unwrap();
        let capture = engine.try_move(Square::E4, Square::D5).expect("exd5");
        assert_eq!(capture.san, "exd5");
        assert_eq!(capture.captured, Some(Role::Pawn));
        let piece = capture.captured_piece().unwrap();
        assert_eq!(piece.color, Color::Black);
    }

    #[test]
    fn test_undo_restores_previous_position() {
        let mut engine = RulesEngine::default();
        engine.try_move(Square::E2, Square::E4).unwrap();
        let undone = engine.undo().expect("one move to undo");
        assert_eq!(undone.san, "e4");
        assert_eq!(engine.fen(), START_FEN);
        assert_eq!(engine.move_count(), 0);
        assert!(engine.undo().is_none());
    }

    #[test]
    fn test_scholars_mate_is_checkmate() {
        let mut engine = RulesEngine::default();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::F1, Square::C4),
            (Square::B8, Square::C6),
            (Square::D1, Square::H5),
            (Square::G8, Square::F6),
            (Square::H5, Square::F7),
        ] {
            engine.try_move(from, to).expect("scripted move is legal");
        }
        assert!(engine.is_checkmate());
        assert!(engine.is_game_over());
        let last = engine.played().last().unwrap();
        assert_eq!(last.san, "Qxf7#");
        assert!(engine.pgn().ends_with("1-0"));
    }

    #[test]
    fn test_pgn_movetext_numbering() {
        let mut engine = RulesEngine::default();
        engine.try_move(Square::E2, Square::E4).unwrap();
        engine.try_move(Square::E7, Square::E5).unwrap();
        engine.try_move(Square::G1, Square::F3).unwrap();
        assert_eq!(engine.pgn(), "1. e4 e5 2. Nf3");
    }

    #[test]
    fn test_legal_targets_from_start() {
        let engine = RulesEngine::default();
        let pawn_targets = engine.legal_targets(Square::E2);
        assert_eq!(pawn_targets.len(), 2);
        assert!(pawn_targets.iter().all(|t| !t.is_capture));
        // Rook on a1 is blocked in the start position
        assert!(engine.legal_targets(Square::A1).is_empty());
    }

    #[test]
    fn test_castling_is_entered_as_king_move() {
        let mut engine = RulesEngine::default();
        for (from, to) in [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::B8, Square::C6),
            (Square::F1, Square::C4),
            (Square::F8, Square::C5),
        ] {
            engine.try_move(from, to).unwrap();
        }
        let castle = engine.try_move(Square::E1, Square::G1).expect("O-O");
        assert_eq!(castle.san, "O-O");
        let king = engine.piece_at(Square::G1).unwrap();
        assert_eq!(king.role, Role::King);
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut engine = engine_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
        let promo = engine.try_move(Square::A7, Square::A8).expect("a8=Q");
        assert_eq!(promo.promotion, Some(Role::Queen));
        assert_eq!(promo.san, "a8=Q");
        let queen = engine.piece_at(Square::A8).unwrap();
        assert_eq!(queen.role, Role::Queen);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut engine = RulesEngine::default();
        engine.try_move(Square::E2, Square::E4).unwrap();
        engine.try_move(Square::E7, Square::E5).unwrap();
        engine.reset();
        assert_eq!(engine.fen(), START_FEN);
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.turn(), Color::White);
    }
}
