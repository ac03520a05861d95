//! Error types for the Reversi agent
//!
//! Configuration errors are raised before any search starts. Move errors only
//! come from the checked `rules::play_move`; the search itself cannot fail.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::board::{Player, Pos};

/// Errors that can occur around the search core
#[derive(Error, Debug)]
pub enum ReversiError {
    /// Task mode not accepted by the reader in use
    #[error("Invalid task mode: {0}")]
    InvalidTask(i64),

    /// Player field is not `X` or `O`
    #[error("Unknown player symbol: {0:?}")]
    UnknownPlayer(String),

    /// Board cell holds a symbol other than `X`, `O` or `*`
    #[error("Unknown board symbol {symbol:?} in row {row}")]
    UnknownSymbol { symbol: char, row: usize },

    /// Cutoff depth must be a positive integer
    #[error("Invalid cutoff depth: {0} (must be positive)")]
    InvalidDepth(i64),

    /// Remaining clock time is not a finite, non-negative number of seconds
    #[error("Invalid time remaining: {0:?}")]
    InvalidTime(String),

    /// Board does not have 8 rows
    #[error("Board must have 8 rows, found {rows}")]
    BoardShape { rows: usize },

    /// Board row does not have 8 cells
    #[error("Board row {row} must have 8 cells, found {len}")]
    BadRow { row: usize, len: usize },

    /// Required input field is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Numeric input field failed to parse
    #[error("Invalid {field}: {source}")]
    ParseInt {
        field: &'static str,
        #[source]
        source: ParseIntError,
    },

    /// Move placed on an occupied cell
    #[error("Cell {pos} is already occupied")]
    Occupied { pos: Pos },

    /// Move that captures nothing
    #[error("Illegal move {pos} for player {player}")]
    IllegalMove { pos: Pos, player: Player },

    /// Move label that is not `root`, `pass` or a cell like `e3`
    #[error("Invalid move label: {0:?}")]
    BadMoveLabel(String),

    /// Malformed game-log line
    #[error("Invalid game log line {line}: {reason}")]
    BadLogLine { line: usize, reason: String },

    /// Reader/writer failure
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, ReversiError>;
