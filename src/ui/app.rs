//! Main application for the replay viewer

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use crate::board::{Player, Pos};
use crate::error::Result;
use crate::io::GameRecord;

use super::board_view::BoardView;
use super::chart::TimingChart;
use super::replay::ReplayState;
use super::theme::*;

/// Replay viewer for a self-play game log
pub struct ReplayApp {
    replay: ReplayState,
    board_view: BoardView,
    chart: TimingChart,
    show_hints: bool,
    show_chart: bool,
    hovered: Option<Pos>,
}

impl ReplayApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, record: GameRecord) -> Result<Self> {
        let chart = TimingChart::new(&record);
        Ok(Self {
            replay: ReplayState::new(record)?,
            board_view: BoardView::default(),
            chart,
            show_hints: true,
            show_chart: true,
            hovered: None,
        })
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Replay", |ui| {
                    if ui.button("First move").clicked() {
                        self.replay.set_step(0);
                        ui.close_menu();
                    }
                    if ui.button("Last move").clicked() {
                        self.replay.set_step(self.replay.len());
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit (Q)").clicked() {
                        ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_hints, "Legal move hints (H)");
                    ui.checkbox(&mut self.show_chart, "Timing chart (T)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Step {}/{}", self.replay.step(), self.replay.len()));
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let title = RichText::new("REVERSI REPLAY").size(20.0).strong();
                    ui.label(title.color(TEXT_PRIMARY));
                });
                ui.add_space(12.0);

                self.render_move_card(ui);
                ui.add_space(10.0);

                self.render_score_card(ui);
                ui.add_space(10.0);

                self.render_navigation_card(ui);
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_move_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("MOVE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            match self.replay.last_turn() {
                Some(turn) => {
                    let label = turn.mv.map_or_else(|| "pass".to_string(), |p| p.to_string());
                    ui.horizontal(|ui| {
                        let player = RichText::new(format!("{}", turn.player)).size(24.0).strong();
                        ui.label(player.color(TEXT_PRIMARY));
                        ui.add_space(8.0);
                        ui.label(RichText::new(label).size(24.0).color(ACCENT));
                    });
                    ui.label(
                        RichText::new(format!("searched {:.4}s", turn.elapsed.as_secs_f64()))
                            .size(11.0)
                            .color(TEXT_SECONDARY),
                    );
                }
                None => {
                    ui.label(RichText::new("Opening").size(18.0).color(TEXT_PRIMARY));
                }
            }

            ui.add_space(4.0);
            let next = match self.replay.side_to_move() {
                Some(player) => format!("{player} to move"),
                None => "Game over".to_string(),
            };
            ui.label(RichText::new(next).size(11.0).color(TEXT_MUTED));

            if let Some(pos) = self.hovered {
                ui.label(RichText::new(format!("cell {pos}")).size(10.0).color(TEXT_MUTED));
            }
        });
    }

    fn render_score_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            for player in [Player::X, Player::O] {
                let stats = self.replay.stats(player);
                ui.horizontal(|ui| {
                    let (fill, text) = match player {
                        Player::X => (X_STONE, O_STONE),
                        Player::O => (O_STONE, X_STONE),
                    };
                    let (rect, _) =
                        ui.allocate_exact_size(Vec2::new(24.0, 24.0), egui::Sense::hover());
                    ui.painter().circle_filled(rect.center(), 10.0, fill);
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        player.symbol(),
                        egui::FontId::proportional(11.0),
                        text,
                    );
                    let discs = RichText::new(format!("{} discs", stats.discs)).size(14.0);
                    ui.label(discs.color(TEXT_PRIMARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("weighted {}", stats.weighted))
                                .size(11.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                });
            }
        });
    }

    fn render_navigation_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("NAVIGATE").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let btn_frame = Frame::new()
                .fill(BUTTON_BG)
                .corner_radius(CornerRadius::same(6))
                .inner_margin(8.0);

            ui.horizontal(|ui| {
                btn_frame.show(ui, |ui| {
                    let text = RichText::new("< Back (B)").size(12.0).color(TEXT_PRIMARY);
                    let back = egui::Label::new(text).sense(egui::Sense::click());
                    if ui.add(back).clicked() {
                        self.replay.back();
                    }
                });
                ui.add_space(4.0);
                btn_frame.show(ui, |ui| {
                    let text = RichText::new("Forward (F) >").size(12.0).color(TEXT_PRIMARY);
                    let forward = egui::Label::new(text).sense(egui::Sense::click());
                    if ui.add(forward).clicked() {
                        self.replay.forward();
                    }
                });
            });

            ui.add_space(8.0);
            let mut step = self.replay.step();
            let slider = egui::Slider::new(&mut step, 0..=self.replay.len()).text("step");
            if ui.add(slider).changed() {
                self.replay.set_step(step);
            }

            if self.replay.is_at_end() {
                ui.label(RichText::new("End of game").size(11.0).color(WARNING));
            }
        });
    }

    fn render_board(&mut self, ctx: &Context) {
        if self.show_chart {
            TopBottomPanel::bottom("timing_chart")
                .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
                .show(ctx, |ui| {
                    ui.label(RichText::new("SEARCH TIME PER MOVE").size(10.0).color(TEXT_MUTED));
                    self.chart.show(ui, self.chart_cursor());
                });
        }

        CentralPanel::default()
            .frame(Frame::new().fill(CENTRAL_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                let hints = if self.show_hints { self.replay.hints() } else { Vec::new() };
                let last_move = self.replay.last_move();
                self.hovered = self.board_view.show(ui, self.replay.board(), last_move, &hints);
            });
    }

    /// Index of the last shown turn within its player's series
    fn chart_cursor(&self) -> Option<usize> {
        let turn = self.replay.last_turn()?;
        let played = self.replay.record().turns[..self.replay.step()]
            .iter()
            .filter(|t| t.player == turn.player)
            .count();
        played.checked_sub(1)
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let mut quit = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::F) || i.key_pressed(egui::Key::ArrowRight) {
                self.replay.forward();
            }
            if i.key_pressed(egui::Key::B) || i.key_pressed(egui::Key::ArrowLeft) {
                self.replay.back();
            }
            if i.key_pressed(egui::Key::H) {
                self.show_hints = !self.show_hints;
            }
            if i.key_pressed(egui::Key::T) {
                self.show_chart = !self.show_chart;
            }
            if i.key_pressed(egui::Key::Q) {
                quit = true;
            }
        });
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);
    }
}
