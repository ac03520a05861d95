//! Reversi (Othello) game-tree search agent
//!
//! Given a position and the side to move, the agent picks a move by greedy
//! one-ply search, depth-limited minimax or minimax with alpha-beta pruning,
//! scoring leaves with a fixed positional weight table. A separate clock-bound
//! agent deepens within a time budget using a composite ratio evaluator.
//!
//! Rules shared by every agent:
//! - Standard 8x8 board, `X` and `O`
//! - A move must bracket at least one opposing run, which is flipped
//! - A side with no legal move is a terminal node of the search
//! - The depth-limited agents record every visited node in a trace, in visit order
//!
//! # Architecture
//!
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Move generation and the reversible flip engine
//! - [`eval`]: Position weights and the static evaluator
//! - [`search`]: Minimax / alpha-beta search, the node trace and iterative deepening
//! - [`engine`]: Agents orchestrating one move request
//! - [`io`]: Position file, output file and game log formats
//! - [`arena`]: Self-play driver
//! - [`ui`]: Replay viewer with a per-move timing chart
//!
//! # Quick Start
//!
//! ```
//! use reversi::{AgentParams, Board, Player, ReversiAgent, SearchMode};
//!
//! let params = AgentParams::new(SearchMode::Minimax, Player::X, 1, Board::initial()).unwrap();
//! let mut agent = ReversiAgent::new(params);
//! let outcome = agent.play();
//!
//! assert_eq!(outcome.best_move.map(|p| p.to_string()).as_deref(), Some("e3"));
//! assert_eq!(outcome.value, 4);
//! assert_eq!(outcome.trace[0].render(SearchMode::Minimax), "root,0,-Infinity");
//! ```

pub mod arena;
pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod io;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, Player, Pos, BOARD_SIZE};
pub use engine::{AgentOutcome, AgentParams, CompetitionAgent, CompetitionParams, ReversiAgent};
pub use error::{ReversiError, Result};
pub use search::SearchMode;
