//! Board panel
//!
//! Renders the 8x8 grid as egui buttons and turns pointer activity into the
//! game's intent messages. Click and drag-drop both end up as the same
//! messages the coordinator consumes; the board never touches game state
//! itself.

use crate::game::events::{PieceDropped, SquareClicked};
use crate::game::resources::Selection;
use crate::game::RulesEngine;
use crate::ui::styles::UiColors;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use shakmaty::{Color as Side, File, Piece, Rank, Role, Square};

/// Board display state: orientation and the in-progress drag, if any.
#[derive(Resource, Debug, Default)]
pub struct BoardUiState {
    pub flipped: bool,
    drag_from: Option<Square>,
}

/// The square shown at display row/column (row 0 is the top rank on screen).
fn square_at(row: u32, col: u32, flipped: bool) -> Square {
    let (rank, file) = if flipped {
        (row, 7 - col)
    } else {
        (7 - row, col)
    };
    Square::from_coords(File::new(file), Rank::new(rank))
}

fn piece_glyph(piece: Piece) -> &'static str {
    match (piece.color, piece.role) {
        (Side::White, Role::King) => "♔",
        (Side::White, Role::Queen) => "♕",
        (Side::White, Role::Rook) => "♖",
        (Side::White, Role::Bishop) => "♗",
        (Side::White, Role::Knight) => "♘",
        (Side::White, Role::Pawn) => "♙",
        (Side::Black, Role::King) => "♚",
        (Side::Black, Role::Queen) => "♛",
        (Side::Black, Role::Rook) => "♜",
        (Side::Black, Role::Bishop) => "♝",
        (Side::Black, Role::Knight) => "♞",
        (Side::Black, Role::Pawn) => "♟",
    }
}

fn square_fill(square: Square, selection: &Selection, occupied: bool) -> egui::Color32 {
    if selection.selected == Some(square) {
        return UiColors::SELECTED;
    }
    if selection.is_target(square) {
        return if occupied {
            UiColors::CAPTURE_TARGET
        } else {
            UiColors::MOVE_TARGET
        };
    }
    if square.is_light() {
        UiColors::LIGHT_SQUARE
    } else {
        UiColors::DARK_SQUARE
    }
}

/// Central board panel. Runs after the side panel so egui lays the panels
/// out correctly.
pub fn board_panel(
    mut contexts: EguiContexts,
    engine: Res<RulesEngine>,
    selection: Res<Selection>,
    mut board_ui: ResMut<BoardUiState>,
    mut clicks: MessageWriter<SquareClicked>,
    mut drops: MessageWriter<PieceDropped>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::CentralPanel::default().show(ctx, |ui| {
        let size = (ui.available_height().min(ui.available_width()) / 8.0)
            .floor()
            .max(32.0);

        let mut square_rects: Vec<(Square, egui::Rect)> = Vec::with_capacity(64);
        let mut drag_release: Option<(Square, egui::Pos2)> = None;

        ui.spacing_mut().item_spacing = egui::Vec2::ZERO;
        ui.vertical(|ui| {
            for row in 0..8 {
                ui.horizontal(|ui| {
                    for col in 0..8 {
                        let square = square_at(row, col, board_ui.flipped);
                        let piece = engine.piece_at(square);
                        let glyph = piece.map(piece_glyph).unwrap_or("");

                        let button = egui::Button::new(
                            egui::RichText::new(glyph)
                                .size(size * 0.72)
                                .color(egui::Color32::BLACK),
                        )
                        .fill(square_fill(square, &selection, piece.is_some()))
                        .corner_radius(0.0);

                        let response = ui
                            .add_sized([size, size], button)
                            .interact(egui::Sense::click_and_drag());
                        square_rects.push((square, response.rect));

                        if response.clicked() {
                            clicks.write(SquareClicked { square });
                        }
                        if response.drag_started() && piece.is_some() {
                            board_ui.drag_from = Some(square);
                        }
                        if response.drag_stopped() {
                            if let (Some(from), Some(pos)) =
                                (board_ui.drag_from.take(), response.interact_pointer_pos())
                            {
                                drag_release = Some((from, pos));
                            }
                        }
                    }
                });
            }
        });

        // Resolve the drop target once every square rect is known
        if let Some((from, pos)) = drag_release {
            if let Some((to, _)) = square_rects.iter().find(|(_, rect)| rect.contains(pos)) {
                if *to != from {
                    drops.write(PieceDropped { from, to: *to });
                }
            }
        }
    });
}
