//! Game rules for Reversi
//!
//! This module implements:
//! - Legal move generation
//! - Move application with captures (flips) and exact reversal

pub mod flip;
pub mod moves;

// Re-exports for convenient access
pub use flip::{apply_move, play_move, reverse_move, FlipGuard, FlipRecord};
pub use moves::{has_legal_move, is_legal, legal_moves};
