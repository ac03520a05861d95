//! Theme constants for the replay viewer

use egui::Color32;

// Board colors - felt green
pub const BOARD_BG: Color32 = Color32::from_rgb(34, 120, 74);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(20, 70, 44);
pub const GRID_LINE: Color32 = Color32::from_rgb(16, 58, 36);
pub const LABEL_COLOR: Color32 = Color32::from_rgb(200, 230, 210);

// Stones: X plays dark, O plays light
pub const X_STONE: Color32 = Color32::from_rgb(25, 25, 30);
pub const X_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const O_STONE: Color32 = Color32::from_rgb(250, 250, 252);
pub const O_STONE_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);

pub fn hint_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 40)
}

pub fn hover_fill() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, 25)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const CENTRAL_BG: Color32 = Color32::from_rgb(40, 42, 46);
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);
pub const ACCENT: Color32 = Color32::from_rgb(80, 200, 120);
pub const WARNING: Color32 = Color32::from_rgb(255, 180, 50);

// Timing chart: one line per player
pub const CHART_X: Color32 = Color32::from_rgb(230, 70, 70);
pub const CHART_O: Color32 = Color32::from_rgb(70, 130, 230);
pub const CHART_AXIS: Color32 = Color32::from_rgb(90, 94, 102);
pub const CHART_CURSOR: Color32 = Color32::from_rgb(255, 180, 50);

// Sizes
pub const BOARD_MARGIN: f32 = 28.0;
pub const STONE_RADIUS_RATIO: f32 = 0.42;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 4.0;
pub const HINT_RADIUS_RATIO: f32 = 0.14;
pub const CHART_HEIGHT: f32 = 160.0;
pub const CHART_LINE_WIDTH: f32 = 1.5;
