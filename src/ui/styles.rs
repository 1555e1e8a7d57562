//! Color palette for the board and panels
//!
//! Dark panel backgrounds with gold accents; warm board colors close to a
//! wooden set. Colors are defined as egui::Color32 for direct use in UI code.

use bevy_egui::egui;

/// Primary UI color palette
pub struct UiColors;

impl UiColors {
    // === Background Colors ===

    /// Overlay background (semi-transparent)
    pub const BG_OVERLAY: egui::Color32 = egui::Color32::from_black_alpha(220);

    /// Panel border
    pub const BORDER: egui::Color32 = egui::Color32::from_rgb(70, 70, 80);

    // === Board Colors ===

    pub const LIGHT_SQUARE: egui::Color32 = egui::Color32::from_rgb(240, 217, 181);
    pub const DARK_SQUARE: egui::Color32 = egui::Color32::from_rgb(181, 136, 99);

    /// Selected square
    pub const SELECTED: egui::Color32 = egui::Color32::from_rgb(246, 246, 105);

    /// Legal quiet destination
    pub const MOVE_TARGET: egui::Color32 = egui::Color32::from_rgb(130, 165, 120);

    /// Legal capture destination
    pub const CAPTURE_TARGET: egui::Color32 = egui::Color32::from_rgb(207, 110, 95);

    // === Accent Colors ===

    /// Gold accent for results and important highlights
    pub const ACCENT_GOLD: egui::Color32 = egui::Color32::from_rgb(218, 165, 32);

    /// Error/danger color (red)
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);

    // === Text Colors ===

    /// Primary text (headings, important text)
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Secondary text (body text)
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(180, 180, 190);

    /// Tertiary text (captions, hints)
    pub const TEXT_TERTIARY: egui::Color32 = egui::Color32::from_rgb(130, 130, 140);
}
