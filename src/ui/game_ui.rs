//! Side panel and game-over modal
//!
//! Shows the clocks, time-control input, captured pieces, move history, and
//! the story box. Everything is read-only over game state; controls emit
//! intent messages the game systems consume next frame.

use crate::game::events::{
    BoardRefresh, ClockToggled, GameEnded, ResetRequested, TimeControlChanged, UndoRequested,
};
use crate::game::resources::{
    format_clock, CaptureLedger, ChessClock, GameOverState, TimeControlSetting,
};
use crate::game::RulesEngine;
use crate::narrative::{StoryRequested, StoryState, StoryTheme};
use crate::ui::board_ui::BoardUiState;
use crate::ui::styles::UiColors;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use shakmaty::{Color as Side, Piece, Role};

/// UI-local editing state for the side panel widgets.
#[derive(Resource, Debug)]
pub struct SidePanelState {
    pub time_input: String,
    pub theme: StoryTheme,
}

impl Default for SidePanelState {
    fn default() -> Self {
        SidePanelState {
            time_input: TimeControlSetting::default().0.to_string(),
            theme: StoryTheme::default(),
        }
    }
}

/// Whether the game-over modal is showing, and for which verdict.
#[derive(Resource, Debug, Default)]
pub struct ModalState {
    pub verdict: Option<GameOverState>,
}

/// Display strings recomputed when the game signals a refresh, instead of on
/// every frame.
#[derive(Resource, Debug, Default)]
pub struct StatusCache {
    pub status_line: String,
    pub move_rows: Vec<(usize, String, Option<String>)>,
    pub fen: String,
    primed: bool,
}

/// Rebuild the cached display strings on [`BoardRefresh`].
pub fn refresh_status_cache(
    mut refreshes: MessageReader<BoardRefresh>,
    engine: Res<RulesEngine>,
    game_over: Res<GameOverState>,
    mut cache: ResMut<StatusCache>,
) {
    let dirty = refreshes.read().count() > 0 || !cache.primed;
    if !dirty {
        return;
    }
    cache.primed = true;
    cache.status_line = if game_over.is_game_over() {
        game_over.message().to_string()
    } else if engine.is_check() {
        format!("{:?} in check", engine.turn())
    } else {
        format!("{:?} to move", engine.turn())
    };
    cache.move_rows = engine.move_pairs();
    cache.fen = engine.fen();
}

/// Pop the game-over modal when a verdict lands.
pub fn open_game_over_modal(mut ended: MessageReader<GameEnded>, mut modal: ResMut<ModalState>) {
    for event in ended.read() {
        modal.verdict = Some(event.verdict);
    }
}

/// System parameter grouping everything the side panel reads and emits.
#[derive(SystemParam)]
pub struct GameUiParams<'w, 's> {
    pub contexts: EguiContexts<'w, 's>,
    pub engine: Res<'w, RulesEngine>,
    pub clock: Res<'w, ChessClock>,
    pub ledger: Res<'w, CaptureLedger>,
    pub game_over: Res<'w, GameOverState>,
    pub story: Res<'w, StoryState>,
    pub cache: Res<'w, StatusCache>,
    pub panel: ResMut<'w, SidePanelState>,
    pub modal: ResMut<'w, ModalState>,
    pub board_ui: ResMut<'w, BoardUiState>,
    pub clock_toggles: MessageWriter<'w, ClockToggled>,
    pub time_changes: MessageWriter<'w, TimeControlChanged>,
    pub undos: MessageWriter<'w, UndoRequested>,
    pub resets: MessageWriter<'w, ResetRequested>,
    pub stories: MessageWriter<'w, StoryRequested>,
}

/// The right-hand game panel plus the game-over modal.
pub fn game_status_ui(mut params: GameUiParams) {
    let Ok(ctx) = params.contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("game_panel")
        .resizable(true)
        .default_width(300.0)
        .min_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("BARD'S GAMBIT")
                        .size(16.0)
                        .color(UiColors::ACCENT_GOLD)
                        .strong(),
                );
            });
            ui.add_space(4.0);
            ui.separator();

            // === Clocks ===
            ui.label(
                egui::RichText::new("GAME CLOCK")
                    .size(12.0)
                    .color(UiColors::TEXT_TERTIARY),
            );
            clock_row(ui, "White", &params.clock, Side::White);
            clock_row(ui, "Black", &params.clock, Side::Black);

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Time")
                        .size(12.0)
                        .color(UiColors::TEXT_SECONDARY),
                );
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut params.panel.time_input).desired_width(60.0),
                );
                let apply_clicked = ui.small_button("Apply").clicked();
                if apply_clicked
                    || (edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)))
                {
                    params.time_changes.write(TimeControlChanged {
                        raw: params.panel.time_input.clone(),
                    });
                }

                let toggle_label = if params.clock.is_running() {
                    "Pause Clock"
                } else {
                    "Start Clock"
                };
                if ui.button(toggle_label).clicked() {
                    params.clock_toggles.write(ClockToggled);
                }
            });

            ui.separator();

            // === Status + controls ===
            let status_color = if params.game_over.is_game_over() {
                UiColors::ACCENT_GOLD
            } else if params.engine.is_check() {
                UiColors::DANGER
            } else {
                UiColors::TEXT_PRIMARY
            };
            ui.colored_label(
                status_color,
                egui::RichText::new(&params.cache.status_line).size(15.0),
            );

            ui.horizontal(|ui| {
                if ui.button("Undo").clicked() {
                    params.undos.write(UndoRequested);
                }
                if ui.button("New Game").clicked() {
                    params.resets.write(ResetRequested);
                }
                if ui.button("Flip Board").clicked() {
                    params.board_ui.flipped = !params.board_ui.flipped;
                }
            });

            ui.separator();

            // === Captured pieces ===
            captured_row(ui, "White has taken", params.ledger.captured_by(Side::White));
            captured_row(ui, "Black has taken", params.ledger.captured_by(Side::Black));
            let advantage = params.ledger.material_advantage();
            if advantage != 0 {
                let (side, lead) = if advantage > 0 {
                    ("White", advantage)
                } else {
                    ("Black", -advantage)
                };
                ui.label(
                    egui::RichText::new(format!("{} leads by {}", side, lead))
                        .size(12.0)
                        .color(UiColors::TEXT_SECONDARY),
                );
            }

            ui.separator();

            // === Move history ===
            ui.label(
                egui::RichText::new("MOVES")
                    .size(12.0)
                    .color(UiColors::TEXT_TERTIARY),
            );
            egui::ScrollArea::vertical()
                .id_salt("move_history")
                .max_height(140.0)
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if params.cache.move_rows.is_empty() {
                        ui.label(
                            egui::RichText::new("// Game started - White to move")
                                .italics()
                                .color(UiColors::TEXT_TERTIARY),
                        );
                    }
                    for (number, white, black) in &params.cache.move_rows {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!("{number}."))
                                    .color(UiColors::TEXT_TERTIARY),
                            );
                            ui.label(egui::RichText::new(white).color(UiColors::TEXT_PRIMARY));
                            if let Some(black) = black {
                                ui.label(
                                    egui::RichText::new(black).color(UiColors::TEXT_SECONDARY),
                                );
                            }
                        });
                    }
                });
            ui.label(
                egui::RichText::new(&params.cache.fen)
                    .monospace()
                    .size(10.0)
                    .color(UiColors::TEXT_TERTIARY),
            );

            ui.separator();

            // === Story ===
            ui.label(
                egui::RichText::new("STORY")
                    .size(12.0)
                    .color(UiColors::TEXT_TERTIARY),
            );
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_salt("story_theme")
                    .selected_text(params.panel.theme.label())
                    .show_ui(ui, |ui| {
                        for theme in StoryTheme::ALL {
                            ui.selectable_value(&mut params.panel.theme, theme, theme.label());
                        }
                    });
                let generate =
                    ui.add_enabled(!params.story.is_busy(), egui::Button::new("Generate Story"));
                if generate.clicked() {
                    params.stories.write(StoryRequested {
                        theme: params.panel.theme,
                    });
                }
            });
            egui::ScrollArea::vertical()
                .id_salt("story_box")
                .max_height(160.0)
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&params.story.text)
                            .size(12.0)
                            .color(UiColors::TEXT_SECONDARY),
                    );
                });
        });

    // === Game-over modal ===
    if let Some(verdict) = params.modal.verdict {
        let mut close = false;
        let mut new_game = false;
        egui::Window::new("Game Over")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .frame(
                egui::Frame::default()
                    .fill(UiColors::BG_OVERLAY)
                    .corner_radius(10.0)
                    .inner_margin(15.0)
                    .stroke(egui::Stroke::new(1.0, UiColors::BORDER)),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(verdict.message())
                            .size(18.0)
                            .color(UiColors::ACCENT_GOLD)
                            .strong(),
                    );
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        new_game = ui.button("New Game").clicked();
                        close = ui.button("Close").clicked();
                    });
                });
            });
        if new_game {
            params.resets.write(ResetRequested);
        }
        if new_game || close {
            params.modal.verdict = None;
        }
    }
}

fn clock_row(ui: &mut egui::Ui, name: &str, clock: &ChessClock, side: Side) {
    let active = clock.active() == side && clock.is_running();
    let color = if active {
        UiColors::ACCENT_GOLD
    } else {
        UiColors::TEXT_PRIMARY
    };
    ui.label(
        egui::RichText::new(format!("{}: {}", name, format_clock(clock.remaining(side))))
            .size(16.0)
            .color(color)
            .strong(),
    );
}

fn captured_row(ui: &mut egui::Ui, label: &str, pieces: &[Piece]) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(label)
                .size(12.0)
                .color(UiColors::TEXT_SECONDARY),
        );
        let glyphs: String = pieces.iter().map(|p| capture_glyph(*p)).collect();
        ui.label(egui::RichText::new(glyphs).size(16.0));
    });
}

fn capture_glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (Side::White, Role::King) => '♔',
        (Side::White, Role::Queen) => '♕',
        (Side::White, Role::Rook) => '♖',
        (Side::White, Role::Bishop) => '♗',
        (Side::White, Role::Knight) => '♘',
        (Side::White, Role::Pawn) => '♙',
        (Side::Black, Role::King) => '♚',
        (Side::Black, Role::Queen) => '♛',
        (Side::Black, Role::Rook) => '♜',
        (Side::Black, Role::Bishop) => '♝',
        (Side::Black, Role::Knight) => '♞',
        (Side::Black, Role::Pawn) => '♟',
    }
}
