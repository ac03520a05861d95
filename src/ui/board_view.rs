//! Board rendering for the replay viewer

use crate::board::{Board, Cell, Pos, BOARD_SIZE, COLUMN_NAMES};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// Board view: draws cells, stones and markers, reports the hovered cell
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 48.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the hovered cell if any.
    ///
    /// `hints` are drawn as an overlay only; the board is never modified.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        board: &Board,
        last_move: Option<Pos>,
        hints: &[Pos],
    ) -> Option<Pos> {
        let available_size = ui.available_size();

        let board_size = (available_size.x.min(available_size.y) - 20.0).max(200.0);
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / BOARD_SIZE as f32;

        let (response, painter) = ui.allocate_painter(Vec2::splat(board_size), Sense::hover());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BORDER);
        painter.rect_filled(self.grid_rect(), CornerRadius::ZERO, BOARD_BG);

        self.draw_grid(&painter);
        self.draw_coordinates(&painter);
        self.draw_hints(&painter, hints);
        self.draw_stones(&painter, board);

        if let Some(pos) = last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        let hovered = response.hover_pos().and_then(|p| self.screen_to_board(p));
        if let Some(pos) = hovered {
            painter.rect_filled(self.cell_rect(pos), CornerRadius::ZERO, hover_fill());
        }
        hovered
    }

    fn grid_rect(&self) -> Rect {
        Rect::from_min_size(
            self.board_rect.min + Vec2::splat(BOARD_MARGIN),
            Vec2::splat(self.cell_size * BOARD_SIZE as f32),
        )
    }

    fn cell_rect(&self, pos: Pos) -> Rect {
        Rect::from_center_size(self.board_to_screen(pos), Vec2::splat(self.cell_size))
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let grid = self.grid_rect();

        for i in 0..=BOARD_SIZE {
            let offset = i as f32 * self.cell_size;
            let (x, y) = (grid.min.x + offset, grid.min.y + offset);
            painter.line_segment([Pos2::new(x, grid.min.y), Pos2::new(x, grid.max.y)], stroke);
            painter.line_segment([Pos2::new(grid.min.x, y), Pos2::new(grid.max.x, y)], stroke);
        }
    }

    /// Column letters a-h across the top, rows 1-8 down the left
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(13.0);

        for (col, letter) in COLUMN_NAMES.iter().enumerate() {
            let x = self.board_to_screen(Pos::new(0, col as u8)).x;
            let pos = Pos2::new(x, self.board_rect.min.y + BOARD_MARGIN * 0.5);
            painter.text(pos, egui::Align2::CENTER_CENTER, letter, font.clone(), LABEL_COLOR);
        }

        for row in 0..BOARD_SIZE {
            let y = self.board_to_screen(Pos::new(row as u8, 0)).y;
            let pos = Pos2::new(self.board_rect.min.x + BOARD_MARGIN * 0.5, y);
            let label = format!("{}", row + 1);
            painter.text(pos, egui::Align2::CENTER_CENTER, label, font.clone(), LABEL_COLOR);
        }
    }

    fn draw_hints(&self, painter: &Painter, hints: &[Pos]) {
        for &pos in hints {
            let radius = self.cell_size * HINT_RADIUS_RATIO;
            painter.circle_filled(self.board_to_screen(pos), radius, hint_fill());
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in Pos::all() {
            let cell = board.get(pos);
            if cell != Cell::Empty {
                self.draw_stone(painter, pos, cell);
            }
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, cell: Cell) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        // Shadow
        painter.circle_filled(
            center + Vec2::new(2.0, 2.0),
            radius,
            Color32::from_rgba_unmultiplied(0, 0, 0, 60),
        );

        match cell {
            Cell::X => {
                painter.circle_filled(center, radius, X_STONE);
                let highlight = center + Vec2::splat(-radius * 0.3);
                painter.circle_filled(highlight, radius * 0.2, X_STONE_HIGHLIGHT);
            }
            Cell::O => {
                painter.circle_filled(center, radius, O_STONE);
                let rim = Stroke::new(radius * 0.1, O_STONE_SHADOW);
                painter.circle_stroke(center, radius * 0.85, rim);
            }
            Cell::Empty => {}
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min - Vec2::splat(BOARD_MARGIN);
        let col = (relative.x / self.cell_size).floor() as i32;
        let row = (relative.y / self.cell_size).floor() as i32;

        if Pos::is_valid(row, col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Center of a cell in screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + (pos.col as f32 + 0.5) * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + (pos.row as f32 + 0.5) * self.cell_size;
        Pos2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> BoardView {
        BoardView {
            cell_size: 50.0,
            board_rect: Rect::from_min_size(Pos2::ZERO, Vec2::splat(400.0 + 2.0 * BOARD_MARGIN)),
        }
    }

    #[test]
    fn test_screen_board_roundtrip() {
        let view = view();
        for pos in Pos::all() {
            assert_eq!(view.screen_to_board(view.board_to_screen(pos)), Some(pos));
        }
    }

    #[test]
    fn test_margin_is_off_board() {
        let view = view();
        assert_eq!(view.screen_to_board(Pos2::new(1.0, 1.0)), None);
        assert_eq!(view.screen_to_board(Pos2::new(BOARD_MARGIN + 401.0, 100.0)), None);
    }
}
