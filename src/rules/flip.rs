//! Move application with captures, and its exact inverse
//!
//! `apply_move` places a stone and flips every bracketed opponent run,
//! returning a `FlipRecord` that names the bracketing stone per capturing
//! direction. `reverse_move` uses that record to restore the board exactly.
//! Search pairs the two through `FlipGuard`, which reverses on drop, so the
//! single shared board is always restored before control returns to the parent.

use std::ops::{Deref, DerefMut};

use crate::board::{Board, Cell, Player, Pos, DIRECTIONS};
use crate::error::{ReversiError, Result};

use super::moves::{find_bracket, is_legal};

/// Bracketing stone per capturing direction, indexed like `DIRECTIONS`.
///
/// Directions without a capture hold `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlipRecord {
    brackets: [Option<Pos>; 8],
}

impl FlipRecord {
    /// Bracketing stone for a direction, if that direction captured
    #[inline]
    pub fn bracket(&self, dir: usize) -> Option<Pos> {
        self.brackets[dir]
    }

    /// Capturing directions with their bracketing stones
    pub fn iter(&self) -> impl Iterator<Item = (usize, Pos)> + '_ {
        self.brackets.iter().enumerate().filter_map(|(dir, b)| b.map(|pos| (dir, pos)))
    }

    /// True when nothing was captured
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.brackets.iter().all(Option::is_none)
    }

    /// Number of stones flipped by the move that produced this record
    pub fn flipped_count(&self, origin: Pos) -> u32 {
        self.iter()
            .map(|(_, bracket)| {
                let dr = (bracket.row as i32 - origin.row as i32).abs();
                let dc = (bracket.col as i32 - origin.col as i32).abs();
                dr.max(dc) as u32 - 1
            })
            .sum()
    }
}

/// Place `player`'s stone at `pos` and flip all captured opponent stones.
///
/// Precondition: `pos` is empty and legal for `player`, i.e. it came from
/// `legal_moves`. Use `play_move` when that is not already known.
pub fn apply_move(board: &mut Board, pos: Pos, player: Player) -> FlipRecord {
    debug_assert!(board.is_empty(pos), "apply_move on occupied cell {}", pos);

    let mut record = FlipRecord::default();
    board.set(pos, Cell::from(player));

    for dir in 0..DIRECTIONS.len() {
        if let Some(bracket) = find_bracket(board, pos, player, dir) {
            let mut cursor = pos.step(dir);
            while let Some(p) = cursor {
                if p == bracket {
                    break;
                }
                board.set(p, Cell::from(player));
                cursor = p.step(dir);
            }
            record.brackets[dir] = Some(bracket);
        }
    }

    debug_assert!(!record.is_empty(), "apply_move on illegal cell {}", pos);
    record
}

/// Undo a move made by `apply_move` using its `FlipRecord`.
///
/// Empties `pos` and turns every cell strictly between `pos` and each
/// recorded bracket back to the opponent.
pub fn reverse_move(board: &mut Board, pos: Pos, player: Player, record: &FlipRecord) {
    let opponent = Cell::from(player.opponent());
    board.set(pos, Cell::Empty);

    for (dir, bracket) in record.iter() {
        let mut cursor = pos.step(dir);
        while let Some(p) = cursor {
            if p == bracket {
                break;
            }
            board.set(p, opponent);
            cursor = p.step(dir);
        }
    }
}

/// Checked variant of `apply_move` for moves from untrusted sources.
pub fn play_move(board: &mut Board, pos: Pos, player: Player) -> Result<FlipRecord> {
    if !board.is_empty(pos) {
        return Err(ReversiError::Occupied { pos });
    }
    if !is_legal(board, pos, player) {
        return Err(ReversiError::IllegalMove { pos, player });
    }
    Ok(apply_move(board, pos, player))
}

/// A move applied to a borrowed board, reversed when the guard is dropped.
///
/// Derefs to the board so a child search can run on the post-move position.
pub struct FlipGuard<'a> {
    board: &'a mut Board,
    pos: Pos,
    player: Player,
    record: FlipRecord,
}

impl<'a> FlipGuard<'a> {
    /// Apply a legal move; the board is restored when the guard goes out of scope.
    pub fn apply(board: &'a mut Board, pos: Pos, player: Player) -> Self {
        let record = apply_move(board, pos, player);
        Self { board, pos, player, record }
    }

    #[inline]
    pub fn record(&self) -> &FlipRecord {
        &self.record
    }
}

impl Deref for FlipGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for FlipGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for FlipGuard<'_> {
    fn drop(&mut self) {
        reverse_move(self.board, self.pos, self.player, &self.record);
    }
}
