//! Positional weight table
//!
//! Corners are worth the most; the cells that give the opponent access to a
//! corner (X- and C-squares) are penalised.

use crate::board::{Pos, BOARD_SIZE};

pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [99, -8, 8, 6, 6, 8, -8, 99],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [6, -3, 4, 0, 0, 4, -3, 6],
    [8, -4, 7, 4, 4, 7, -4, 8],
    [-8, -24, -4, -3, -3, -4, -24, -8],
    [99, -8, 8, 6, 6, 8, -8, 99],
];

/// Weight of a single cell
#[inline]
pub fn weight(pos: Pos) -> i32 {
    POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
}
