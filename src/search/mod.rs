//! Search module for the Reversi agent
//!
//! Contains:
//! - Minimax / alpha-beta search over a shared, reversibly mutated board
//! - The node trace recorder and its observer hook
//! - Time-budgeted iterative deepening for competition play

pub mod competition;
pub mod minimax;
pub mod trace;

pub use competition::{order_moves, per_move_budget, DeepeningResult, DeepeningSearch};
pub use minimax::{SearchMode, SearchResult, Searcher};
pub use trace::{
    format_value, SearchObserver, TraceEntry, TraceRecorder, TracingObserver, INF, NEG_INF,
};
