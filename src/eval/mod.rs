//! Evaluation module for Reversi positions
//!
//! Positional evaluation against a fixed weight table, scored as the
//! maximizing player's total minus the minimizing player's total, plus the
//! composite ratio score used by the time-budgeted agent.

pub mod competition;
pub mod heuristic;
pub mod weights;

pub use competition::{competition_weight, composite_score, COMPETITION_WEIGHTS};
pub use heuristic::{evaluate, positional_score};
pub use weights::{weight, POSITION_WEIGHTS};
