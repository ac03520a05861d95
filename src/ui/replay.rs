//! Replay state for a recorded game
//!
//! Step `k` shows the board after the first `k` turns. The board for a step is
//! rebuilt by replaying those turns from the opening.

use crate::board::{Board, Player, Pos};
use crate::error::Result;
use crate::eval::positional_score;
use crate::io::{GameRecord, TurnRecord};
use crate::rules::legal_moves;

/// Per-player figures shown in the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideStats {
    pub discs: u32,
    pub weighted: i32,
}

pub struct ReplayState {
    record: GameRecord,
    step: usize,
    board: Board,
}

impl ReplayState {
    /// Validates the whole record up front so that stepping never fails.
    pub fn new(record: GameRecord) -> Result<Self> {
        record.final_board()?;
        Ok(Self {
            record,
            step: 0,
            board: Board::initial(),
        })
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.record.len()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn forward(&mut self) {
        self.set_step(self.step + 1);
    }

    pub fn back(&mut self) {
        self.set_step(self.step.saturating_sub(1));
    }

    pub fn set_step(&mut self, step: usize) {
        let step = step.min(self.record.len());
        if step == self.step {
            return;
        }
        // already validated in `new`
        if let Ok(board) = self.record.board_at(step) {
            self.board = board;
            self.step = step;
        }
    }

    /// Turn that produced the current board
    pub fn last_turn(&self) -> Option<&TurnRecord> {
        self.step.checked_sub(1).and_then(|i| self.record.turns.get(i))
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.last_turn().and_then(|t| t.mv)
    }

    /// Player whose turn comes next, `None` once the record is exhausted
    pub fn side_to_move(&self) -> Option<Player> {
        self.record.turns.get(self.step).map(|t| t.player)
    }

    /// Legal moves for the side to move. Computed on demand, never stored on the board.
    pub fn hints(&self) -> Vec<Pos> {
        self.side_to_move()
            .map(|player| legal_moves(&self.board, player))
            .unwrap_or_default()
    }

    pub fn stats(&self, player: Player) -> SideStats {
        SideStats {
            discs: self.board.disc_count(player),
            weighted: positional_score(&self.board, player),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.step == self.record.len()
    }
}
