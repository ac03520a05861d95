//! Legal move generation
//!
//! A placement is legal when, in at least one direction, it is followed by a
//! contiguous run of one or more opponent stones that ends on one of the
//! mover's own stones.

use crate::board::{Board, Cell, Player, Pos, DIRECTIONS};

/// Find the bracketing own stone along `dir`, if a capturable run exists.
///
/// This is the single capture scan: move generation asks whether it finds
/// anything, the flip engine uses the stone it finds.
#[inline]
pub(crate) fn find_bracket(board: &Board, pos: Pos, player: Player, dir: usize) -> Option<Pos> {
    let own = Cell::from(player);
    let opponent = Cell::from(player.opponent());

    let mut crossed = 0;
    let mut cursor = pos.step(dir)?;
    loop {
        match board.get(cursor) {
            c if c == opponent => crossed += 1,
            c if c == own => return (crossed > 0).then_some(cursor),
            _ => return None,
        }
        cursor = cursor.step(dir)?;
    }
}

/// Check if `player` may legally place a stone at `pos`.
pub fn is_legal(board: &Board, pos: Pos, player: Player) -> bool {
    board.is_empty(pos)
        && (0..DIRECTIONS.len()).any(|dir| find_bracket(board, pos, player, dir).is_some())
}

/// All legal placements for `player`, sorted ascending by (row, col).
///
/// Each cell appears once; scanning a cell stops at its first capturing
/// direction. An empty result means the player must pass.
///
/// # Example
///
/// ```
/// use reversi::{Board, Player, Pos};
/// use reversi::rules::legal_moves;
///
/// let moves = legal_moves(&Board::initial(), Player::X);
/// assert_eq!(moves, vec![Pos::new(2, 4), Pos::new(3, 5), Pos::new(4, 2), Pos::new(5, 3)]);
/// ```
pub fn legal_moves(board: &Board, player: Player) -> Vec<Pos> {
    // Pos::all() walks row-major, so the result is already sorted and unique.
    Pos::all().filter(|&pos| is_legal(board, pos, player)).collect()
}

/// Check if the player has at least one legal placement.
#[inline]
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    Pos::all().any(|pos| is_legal(board, pos, player))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_moves_x() {
        let board = Board::initial();
        let moves = legal_moves(&board, Player::X);
        assert_eq!(
            moves,
            vec![Pos::new(2, 4), Pos::new(3, 5), Pos::new(4, 2), Pos::new(5, 3)]
        );
    }

    #[test]
    fn test_opening_moves_o() {
        let board = Board::initial();
        let moves = legal_moves(&board, Player::O);
        assert_eq!(
            moves,
            vec![Pos::new(2, 3), Pos::new(3, 2), Pos::new(4, 5), Pos::new(5, 4)]
        );
    }

    #[test]
    fn test_occupied_cell_is_never_legal() {
        let board = Board::initial();
        assert!(!is_legal(&board, Pos::new(3, 3), Player::X));
        assert!(!is_legal(&board, Pos::new(3, 4), Player::X));
    }

    #[test]
    fn test_adjacent_own_stone_is_not_a_capture() {
        let mut board = Board::new();
        // X X _ : nothing to bracket
        board.set(Pos::new(0, 0), Cell::X);
        board.set(Pos::new(0, 1), Cell::X);
        assert!(!is_legal(&board, Pos::new(0, 2), Player::X));
    }

    #[test]
    fn test_run_ending_on_empty_is_not_a_capture() {
        let mut board = Board::new();
        // _ O O _ : no bracketing stone
        board.set(Pos::new(4, 1), Cell::O);
        board.set(Pos::new(4, 2), Cell::O);
        assert!(!is_legal(&board, Pos::new(4, 0), Player::X));
    }

    #[test]
    fn test_run_ending_at_edge_is_not_a_capture() {
        let mut board = Board::new();
        board.set(Pos::new(0, 6), Cell::O);
        board.set(Pos::new(0, 7), Cell::O);
        assert!(!is_legal(&board, Pos::new(0, 5), Player::X));
    }

    #[test]
    fn test_long_diagonal_capture() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::X);
        for i in 1..7 {
            board.set(Pos::new(i, i), Cell::O);
        }
        assert!(is_legal(&board, Pos::new(7, 7), Player::X));
        assert!(!is_legal(&board, Pos::new(7, 7), Player::O));
    }

    #[test]
    fn test_cell_legal_in_several_directions_listed_once() {
        let mut board = Board::new();
        //   X . X
        //   O . O
        //   . _ .    (_ = (4,4), brackets up-left and up-right)
        board.set(Pos::new(2, 2), Cell::X);
        board.set(Pos::new(3, 3), Cell::O);
        board.set(Pos::new(2, 6), Cell::X);
        board.set(Pos::new(3, 5), Cell::O);

        let moves = legal_moves(&board, Player::X);
        assert_eq!(moves.iter().filter(|&&p| p == Pos::new(4, 4)).count(), 1);
    }

    #[test]
    fn test_no_moves_is_a_pass() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::X);
        assert!(legal_moves(&board, Player::X).is_empty());
        assert!(legal_moves(&board, Player::O).is_empty());
        assert!(!has_legal_move(&board, Player::X));
        assert!(has_legal_move(&Board::initial(), Player::O));
    }

    #[test]
    fn test_generation_leaves_board_untouched() {
        let board = Board::initial();
        let before = board.clone();
        let _ = legal_moves(&board, Player::X);
        assert_eq!(board, before);
    }
}
