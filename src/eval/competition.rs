//! Composite evaluation for time-budgeted play
//!
//! The score is the product of four factors, all seen from the maximizing
//! player's side:
//! - the weight of the move that led to the position (1.0 at the root)
//! - mobility ratio
//! - disc ratio
//! - stable-disc ratio
//!
//! Each ratio is `max(1, own) / max(1, theirs)`, so an empty side never
//! divides by zero.

use crate::board::{Board, Player, Pos, BOARD_SIZE};
use crate::rules::legal_moves;

/// Move weights used for ordering and for the last-move factor.
#[rustfmt::skip]
pub const COMPETITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [ 80, -26,  24,  -1,  -5,  28, -18,  76],
    [-23, -39, -18,  -9,  -6,  -8, -39,  -1],
    [ 46, -16,   4,   1,  -3,   6, -20,  52],
    [-13,  -5,   2,  -1,   4,   3, -12,  -2],
    [ -5,  -6,   1,  -2,  -3,   0,  -9,  -5],
    [ 48, -13,  12,   5,   0,   5, -24,  41],
    [-27, -53, -11,  -1, -11, -16, -58, -15],
    [ 87, -25,  27,  -1,   5,  36,  -3, 100],
];

#[inline]
pub fn competition_weight(pos: Pos) -> i32 {
    COMPETITION_WEIGHTS[pos.row as usize][pos.col as usize]
}

#[inline]
fn ratio(own: u32, theirs: u32) -> f64 {
    f64::from(own.max(1)) / f64::from(theirs.max(1))
}

/// Score `board` for `max_player`.
///
/// `last_move` is the move that produced the position and who played it. A
/// move by the opponent contributes its weight negated, so a good square for
/// them counts against `max_player`.
pub fn composite_score(board: &Board, max_player: Player, last_move: Option<(Pos, Player)>) -> f64 {
    let min_player = max_player.opponent();

    let heuristic = match last_move {
        Some((pos, mover)) if mover == max_player => f64::from(competition_weight(pos)),
        Some((pos, _)) => -f64::from(competition_weight(pos)),
        None => 1.0,
    };

    let mobility = ratio(
        legal_moves(board, max_player).len() as u32,
        legal_moves(board, min_player).len() as u32,
    );
    let discs = ratio(board.disc_count(max_player), board.disc_count(min_player));
    let stable = ratio(board.stable_count(max_player), board.stable_count(min_player));

    heuristic * discs * stable * mobility
}
