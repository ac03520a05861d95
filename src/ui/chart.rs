//! Per-player search time chart

use egui::{Align2, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Vec2};

use crate::board::Player;
use crate::io::GameRecord;

use super::theme::*;

const PAD: f32 = 24.0;

/// Map a series of times onto `rect`, x by index and y by `max_time`.
pub fn series_points(times: &[f64], rect: Rect, max_len: usize, max_time: f64) -> Vec<Pos2> {
    let x_span = max_len.saturating_sub(1).max(1) as f32;
    let y_span = if max_time > 0.0 { max_time } else { 1.0 };
    times
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            let x = rect.min.x + rect.width() * i as f32 / x_span;
            let y = rect.max.y - rect.height() * (t / y_span) as f32;
            Pos2::new(x, y)
        })
        .collect()
}

/// Line chart of elapsed time per move, one line per player
pub struct TimingChart {
    x_times: Vec<f64>,
    o_times: Vec<f64>,
}

impl TimingChart {
    pub fn new(record: &GameRecord) -> Self {
        Self {
            x_times: record.times(Player::X),
            o_times: record.times(Player::O),
        }
    }

    fn max_time(&self) -> f64 {
        self.x_times
            .iter()
            .chain(&self.o_times)
            .copied()
            .fold(0.0, f64::max)
    }

    /// Draw the chart; `cursor` marks the per-player move index of the current step.
    pub fn show(&self, ui: &mut egui::Ui, cursor: Option<usize>) {
        let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let plot = response.rect.shrink(PAD);

        let max_len = self.x_times.len().max(self.o_times.len());
        let max_time = self.max_time();

        self.draw_axes(&painter, plot, max_time);

        if let Some(index) = cursor.filter(|&i| i < max_len) {
            let span = max_len.saturating_sub(1).max(1) as f32;
            let x = plot.min.x + plot.width() * index as f32 / span;
            painter.line_segment(
                [Pos2::new(x, plot.min.y), Pos2::new(x, plot.max.y)],
                Stroke::new(1.0, CHART_CURSOR),
            );
        }

        for (times, color) in [(&self.x_times, CHART_X), (&self.o_times, CHART_O)] {
            let points = series_points(times, plot, max_len, max_time);
            if points.len() > 1 {
                painter.add(Shape::line(points, Stroke::new(CHART_LINE_WIDTH, color)));
            } else if let Some(&p) = points.first() {
                painter.circle_filled(p, 2.0, color);
            }
        }

        self.draw_legend(&painter, plot);
    }

    fn draw_axes(&self, painter: &Painter, plot: Rect, max_time: f64) {
        let stroke = Stroke::new(1.0, CHART_AXIS);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], stroke);
        painter.line_segment([plot.left_bottom(), plot.left_top()], stroke);

        let font = FontId::proportional(10.0);
        painter.text(
            plot.left_top() - Vec2::new(4.0, 0.0),
            Align2::RIGHT_CENTER,
            format!("{max_time:.2}s"),
            font.clone(),
            TEXT_MUTED,
        );
        painter.text(
            plot.left_bottom() - Vec2::new(4.0, 0.0),
            Align2::RIGHT_CENTER,
            "0",
            font.clone(),
            TEXT_MUTED,
        );
        painter.text(
            plot.center_bottom() + Vec2::new(0.0, 10.0),
            Align2::CENTER_CENTER,
            "move",
            font,
            TEXT_MUTED,
        );
    }

    fn draw_legend(&self, painter: &Painter, plot: Rect) {
        let font = FontId::proportional(11.0);
        let mut at = plot.right_top() + Vec2::new(-70.0, 2.0);
        for (label, color) in [("Player(X)", CHART_X), ("Player(O)", CHART_O)] {
            painter.line_segment([at, at + Vec2::new(12.0, 0.0)], Stroke::new(2.0, color));
            let text_at = at + Vec2::new(16.0, 0.0);
            painter.text(text_at, Align2::LEFT_CENTER, label, font.clone(), TEXT_SECONDARY);
            at += Vec2::new(0.0, 14.0);
        }
    }
}
