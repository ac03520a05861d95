//! Output file writer

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::board::{Board, Pos};
use crate::engine::AgentOutcome;
use crate::error::{ReversiError, Result};
use crate::search::SearchMode;

/// Render the board after the agent's move, then one line per trace entry.
///
/// Greedy requests write the board only.
pub fn render_output(board: &Board, outcome: &AgentOutcome) -> String {
    let mut out = board.to_string();
    if outcome.mode != SearchMode::Greedy {
        for entry in &outcome.trace {
            out.push_str(&entry.render(outcome.mode));
            out.push('\n');
        }
    }
    out
}

pub fn write_output(path: impl AsRef<Path>, board: &Board, outcome: &AgentOutcome) -> Result<()> {
    let path = path.as_ref();
    let text = render_output(board, outcome);
    fs::write(path, &text).map_err(|source| ReversiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), lines = text.lines().count(), "wrote output");
    Ok(())
}

/// Competition answer: the move label alone, or `pass`.
pub fn render_move(best_move: Option<Pos>) -> String {
    best_move.map_or_else(|| "pass".to_string(), |pos| pos.to_string())
}

pub fn write_move(path: impl AsRef<Path>, best_move: Option<Pos>) -> Result<()> {
    let path = path.as_ref();
    let text = render_move(best_move);
    fs::write(path, &text).map_err(|source| ReversiError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), answer = %text, "wrote move");
    Ok(())
}
