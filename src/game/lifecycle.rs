//! Move lifecycle coordination
//!
//! The shared path every input route funnels through: validate preconditions
//! (clock running), submit to the rules engine, and on success commit the
//! move (ledger record, clock side-switch, selection clear) as one step.
//! Click and drag-drop differ only in how origin and destination squares are
//! obtained; both call [`attempt_move`] so validation can never diverge.
//!
//! Functions here take `&mut` resource references and return a
//! [`MoveOutcome`] effect description; callers (the input systems) translate
//! outcomes into refresh signals and game-over evaluation.

use crate::game::engine::{PlayedMove, RulesEngine};
use crate::game::resources::{CaptureLedger, ChessClock, Selection, TimeControl};
use bevy::prelude::*;
use shakmaty::Square;

/// What a selection or move intent resolved to.
#[derive(Debug, Clone)]
pub enum MoveOutcome {
    /// Dropped without any state change (clock stopped, or nothing to do)
    Ignored,
    /// A friendly piece was selected (or reselected)
    Selected(Square),
    /// The selected square was clicked again
    Deselected,
    /// A legal move was committed
    Committed(PlayedMove),
    /// The move was illegal; selection cleared
    Rejected,
}

/// Handle a square click.
///
/// Move attempts are tried before reselection: clicking a friendly piece
/// while another is selected only reselects if the move between them is
/// rejected by the engine. All intents are ignored outright while the clock
/// is stopped; this guards play before clock start and after flag fall.
pub fn square_selected(
    square: Square,
    engine: &mut RulesEngine,
    clock: &mut ChessClock,
    ledger: &mut CaptureLedger,
    selection: &mut Selection,
) -> MoveOutcome {
    if !clock.is_running() {
        return MoveOutcome::Ignored;
    }

    if selection.selected == Some(square) {
        selection.clear();
        return MoveOutcome::Deselected;
    }

    if let Some(from) = selection.selected {
        if let Some(mv) = attempt_move(from, square, engine, clock, ledger, selection) {
            return MoveOutcome::Committed(mv);
        }
        // Rejected: a friendly piece on the target becomes the new selection
        if select_if_friendly(square, engine, selection) {
            return MoveOutcome::Selected(square);
        }
        selection.clear();
        return MoveOutcome::Rejected;
    }

    if select_if_friendly(square, engine, selection) {
        return MoveOutcome::Selected(square);
    }
    MoveOutcome::Ignored
}

/// Handle a drag-drop. Drops never reselect: they commit or clear.
pub fn piece_dropped(
    from: Square,
    to: Square,
    engine: &mut RulesEngine,
    clock: &mut ChessClock,
    ledger: &mut CaptureLedger,
    selection: &mut Selection,
) -> MoveOutcome {
    if !clock.is_running() {
        return MoveOutcome::Ignored;
    }
    match attempt_move(from, to, engine, clock, ledger, selection) {
        Some(mv) => MoveOutcome::Committed(mv),
        None => {
            selection.clear();
            MoveOutcome::Rejected
        }
    }
}

/// Take back the last move. The ledger is reverted and the selection
/// cleared, but the clock keeps its elapsed time and active side: a
/// takeback is not a time refund.
pub fn undo_requested(
    engine: &mut RulesEngine,
    ledger: &mut CaptureLedger,
    selection: &mut Selection,
) -> Option<PlayedMove> {
    let undone = engine.undo()?;
    ledger.revert_capture(&undone);
    selection.clear();
    debug!("[LIFECYCLE] Undid {}", undone.san);
    Some(undone)
}

/// Start a fresh game: engine and ledger cleared, selection dropped, clock
/// reconfigured to the given control (paused, White active).
pub fn reset_game(
    control: TimeControl,
    engine: &mut RulesEngine,
    clock: &mut ChessClock,
    ledger: &mut CaptureLedger,
    selection: &mut Selection,
) {
    engine.reset();
    ledger.reset();
    selection.clear();
    clock.configure(control);
    info!("[LIFECYCLE] New game at {}", control);
}

/// The single commit path: engine apply, ledger record, clock side-switch,
/// selection clear. Returns `None` on rejection with nothing mutated.
fn attempt_move(
    from: Square,
    to: Square,
    engine: &mut RulesEngine,
    clock: &mut ChessClock,
    ledger: &mut CaptureLedger,
    selection: &mut Selection,
) -> Option<PlayedMove> {
    let mv = engine.try_move(from, to)?;
    ledger.record_capture(&mv);
    clock.switch_active();
    selection.clear();
    debug!(
        "[LIFECYCLE] {} {}{}",
        mv.san,
        from,
        if mv.captured.is_some() { " (capture)" } else { "" }
    );
    Some(mv)
}

fn select_if_friendly(square: Square, engine: &RulesEngine, selection: &mut Selection) -> bool {
    let friendly = engine
        .piece_at(square)
        .is_some_and(|piece| piece.color == engine.turn());
    if friendly {
        selection.select(square, engine.legal_targets(square));
    }
    friendly
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Color;
    use std::time::Duration;

    struct Fixture {
        engine: RulesEngine,
        clock: ChessClock,
        ledger: CaptureLedger,
        selection: Selection,
    }

    impl Fixture {
        fn running() -> Fixture {
            let mut f = Fixture {
                engine: RulesEngine::default(),
                clock: ChessClock::default(),
                ledger: CaptureLedger::default(),
                selection: Selection::default(),
            };
            f.clock.start(Duration::ZERO);
            f
        }

        fn click(&mut self, square: Square) -> MoveOutcome {
            square_selected(
                square,
                &mut self.engine,
                &mut self.clock,
                &mut self.ledger,
                &mut self.selection,
            )
        }

        fn drop(&mut self, from: Square, to: Square) -> MoveOutcome {
            piece_dropped(
                from,
                to,
                &mut self.engine,
                &mut self.clock,
                &mut self.ledger,
                &mut self.selection,
            )
        }
    }

    #[test]
    fn test_intents_ignored_while_clock_stopped() {
        //! No selection and no engine call may happen before the clock runs
        let mut f = Fixture::running();
        f.clock.pause();

        assert!(matches!(f.click(Square::E2), MoveOutcome::Ignored));
        assert!(!f.selection.is_selected());
        assert!(matches!(
            f.drop(Square::E2, Square::E4),
            MoveOutcome::Ignored
        ));
        assert_eq!(f.engine.move_count(), 0);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut f = Fixture::running();
        assert!(matches!(f.click(Square::E2), MoveOutcome::Selected(_)));
        assert_eq!(f.selection.selected, Some(Square::E2));
        assert!(!f.selection.targets.is_empty());

        assert!(matches!(f.click(Square::E2), MoveOutcome::Deselected));
        assert!(!f.selection.is_selected());
    }

    #[test]
    fn test_clicking_enemy_or_empty_square_while_idle_is_ignored() {
        let mut f = Fixture::running();
        assert!(matches!(f.click(Square::E7), MoveOutcome::Ignored));
        assert!(matches!(f.click(Square::E5), MoveOutcome::Ignored));
        assert!(!f.selection.is_selected());
    }

    #[test]
    fn test_rejected_move_onto_friendly_piece_reselects() {
        //! a1 -> b2 is no rook move; the friendly pawn on b2 becomes the
        //! selection and nothing else changes
        let mut f = Fixture::running();
        f.click(Square::A1);
        let outcome = f.click(Square::B2);

        assert!(matches!(outcome, MoveOutcome::Selected(Square::B2)));
        assert_eq!(f.selection.selected, Some(Square::B2));
        assert_eq!(f.engine.move_count(), 0);
        assert_eq!(f.clock.active(), Color::White);
    }

    #[test]
    fn test_rejected_move_onto_empty_square_clears_selection() {
        let mut f = Fixture::running();
        f.click(Square::E2);
        let outcome = f.click(Square::E5);
        assert!(matches!(outcome, MoveOutcome::Rejected));
        assert!(!f.selection.is_selected());
        assert_eq!(f.engine.move_count(), 0);
    }

    #[test]
    fn test_commit_updates_clock_and_clears_selection() {
        let mut f = Fixture::running();
        f.click(Square::E2);
        let outcome = f.click(Square::E4);

        assert!(matches!(outcome, MoveOutcome::Committed(_)));
        assert!(!f.selection.is_selected());
        assert_eq!(f.clock.active(), Color::Black);
        assert!(f.clock.is_running());
        assert_eq!(f.engine.move_count(), 1);
    }

    #[test]
    fn test_click_and_drop_share_the_same_validation() {
        let mut f = Fixture::running();
        assert!(matches!(
            f.drop(Square::E2, Square::E5),
            MoveOutcome::Rejected
        ));
        assert!(matches!(
            f.drop(Square::E2, Square::E4),
            MoveOutcome::Committed(_)
        ));
        assert_eq!(f.clock.active(), Color::Black);
    }

    #[test]
    fn test_active_side_parity_over_committed_moves() {
        //! After N committed moves the active side is White iff N is even
        let mut f = Fixture::running();
        let script = [
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::B8, Square::C6),
        ];
        for (n, (from, to)) in script.iter().enumerate() {
            assert!(matches!(f.drop(*from, *to), MoveOutcome::Committed(_)));
            let expected = if (n + 1) % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            assert_eq!(f.clock.active(), expected);
        }
    }

    #[test]
    fn test_undo_reverts_ledger_but_not_clock() {
        //! White's capture switched the clock to Black; undoing the capture
        //! empties the ledger but the clock stays on Black
        let mut f = Fixture::running();
        f.drop(Square::E2, Square::E4);
        f.drop(Square::D7, Square::D5);
        f.drop(Square::E4, Square::D5);
        assert_eq!(f.ledger.captured_by(Color::White).len(), 1);
        assert_eq!(f.clock.active(), Color::Black);

        let undone = undo_requested(&mut f.engine, &mut f.ledger, &mut f.selection);
        assert_eq!(undone.unwrap().san, "exd5");
        assert!(f.ledger.captured_by(Color::White).is_empty());
        assert_eq!(f.clock.active(), Color::Black);
    }

    #[test]
    fn test_full_undo_empties_both_ledgers() {
        let mut f = Fixture::running();
        // 1. e4 d5 2. exd5 Qxd5, one capture for each side
        f.drop(Square::E2, Square::E4);
        f.drop(Square::D7, Square::D5);
        f.drop(Square::E4, Square::D5);
        f.drop(Square::D8, Square::D5);
        assert_eq!(f.ledger.captured_by(Color::White).len(), 1);
        assert_eq!(f.ledger.captured_by(Color::Black).len(), 1);

        while undo_requested(&mut f.engine, &mut f.ledger, &mut f.selection).is_some() {}
        assert!(f.ledger.captured_by(Color::White).is_empty());
        assert!(f.ledger.captured_by(Color::Black).is_empty());
        assert_eq!(f.engine.move_count(), 0);
    }

    #[test]
    fn test_undo_with_no_moves_is_a_no_op() {
        let mut f = Fixture::running();
        assert!(undo_requested(&mut f.engine, &mut f.ledger, &mut f.selection).is_none());
    }

    #[test]
    fn test_reset_restores_everything_but_keeps_time_control() {
        let mut f = Fixture::running();
        f.drop(Square::E2, Square::E4);
        f.click(Square::E7);

        reset_game(
            TimeControl::parse("3:00"),
            &mut f.engine,
            &mut f.clock,
            &mut f.ledger,
            &mut f.selection,
        );
        assert_eq!(f.engine.move_count(), 0);
        assert!(!f.selection.is_selected());
        assert!(!f.clock.is_running());
        assert_eq!(f.clock.active(), Color::White);
        assert_eq!(
            f.clock.remaining(Color::Black),
            Duration::from_secs(180)
        );
    }
}
