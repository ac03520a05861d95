//! GUI module for replaying recorded games
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod chart;
mod replay;
mod theme;

pub use app::ReplayApp;
pub use chart::series_points;
pub use replay::{ReplayState, SideStats};
