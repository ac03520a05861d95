//! Static evaluation of Reversi positions
//!
//! The score is the weighted positional differential between the maximizing
//! and the minimizing player. It is the only numeric signal the search
//! optimizes.

use crate::board::{Board, Player};

use super::weights::weight;

/// Sum of cell weights over the stones a player holds
pub fn positional_score(board: &Board, player: Player) -> i32 {
    board.stones(player).iter_ones().map(weight).sum()
}

/// Evaluate the board from `max_player`'s perspective.
///
/// Returns Σ weight over `max_player`'s stones minus Σ weight over
/// `min_player`'s stones.
///
/// # Arguments
/// * `board` - The current board state
/// * `max_player` - The maximizing player
/// * `min_player` - The minimizing player (always `max_player.opponent()`)
#[must_use]
pub fn evaluate(board: &Board, max_player: Player, min_player: Player) -> i32 {
    debug_assert_eq!(min_player, max_player.opponent());
    positional_score(board, max_player) - positional_score(board, min_player)
}
