//! Time-budgeted iterative deepening for competition play
//!
//! Runs alpha-beta at increasing depths, keeping the result of the deepest
//! completed iteration. A new iteration starts only while less than half of
//! the per-move budget has been spent. Leaves are scored with the composite
//! ratio evaluator and moves are tried in descending table weight.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::board::{Board, Player, Pos};
use crate::eval::{competition_weight, composite_score};
use crate::rules::{legal_moves, FlipGuard};

/// Shallowest iteration, always completed
pub const MIN_DEPTH: u32 = 2;
/// Deepest iteration
pub const MAX_DEPTH: u32 = 7;

/// Number of moves each side makes over a full game.
const MOVES_PER_SIDE: u32 = 32;

/// Sort moves by descending table weight; equal weights keep their order.
pub fn order_moves(moves: &mut [Pos]) {
    moves.sort_by_key(|&pos| Reverse(competition_weight(pos)));
}

/// Share of the remaining clock for the next move.
///
/// Moves already made by the side to move are estimated from the disc count,
/// and the remaining time is split over that side's remaining moves.
pub fn per_move_budget(total: Duration, board: &Board) -> Duration {
    let made = board.stone_count().saturating_sub(4) / 2;
    total / MOVES_PER_SIDE.saturating_sub(made).max(1)
}

/// Outcome of a deepening search.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepeningResult {
    /// Best move of the deepest completed iteration, `None` for a pass
    pub best_move: Option<Pos>,
    pub value: f64,
    /// Depth of the iteration the move comes from
    pub depth: u32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Iterative deepening alpha-beta searcher.
pub struct DeepeningSearch {
    max_player: Player,
    min_player: Player,
    min_depth: u32,
    max_depth: u32,
    nodes: u64,
}

impl DeepeningSearch {
    pub fn new(max_player: Player) -> Self {
        Self::with_depth_range(max_player, MIN_DEPTH, MAX_DEPTH)
    }

    /// Searcher over `min_depth..=max_depth`; a zero depth is raised to one.
    pub fn with_depth_range(max_player: Player, min_depth: u32, max_depth: u32) -> Self {
        let min_depth = min_depth.max(1);
        Self {
            max_player,
            min_player: max_player.opponent(),
            min_depth,
            max_depth: max_depth.max(min_depth),
            nodes: 0,
        }
    }

    /// Deepen within `budget`; `board` is left exactly as it was passed in.
    pub fn search(mut self, board: &mut Board, budget: Duration) -> DeepeningResult {
        let start = Instant::now();
        let mut result = DeepeningResult {
            best_move: None,
            value: composite_score(board, self.max_player, None),
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
        };

        for depth in self.min_depth..=self.max_depth {
            let (value, best_move) =
                self.max_node(board, 0, depth, f64::NEG_INFINITY, f64::INFINITY, None);
            result.best_move = best_move;
            result.value = value;
            result.depth = depth;

            let elapsed = start.elapsed();
            debug!(
                depth,
                value,
                best_move = ?best_move.map(|p| p.to_string()),
                nodes = self.nodes,
                elapsed_ms = elapsed.as_millis() as u64,
                "iteration done"
            );

            // No move at the root: deeper iterations see the same terminal
            if best_move.is_none() || elapsed * 2 >= budget {
                break;
            }
        }

        result.nodes = self.nodes;
        result.elapsed = start.elapsed();
        result
    }

    fn ordered_moves(board: &Board, player: Player) -> Vec<Pos> {
        let mut moves = legal_moves(board, player);
        order_moves(&mut moves);
        moves
    }

    fn max_node(
        &mut self,
        board: &mut Board,
        depth: u32,
        cutoff: u32,
        mut alpha: f64,
        beta: f64,
        last: Option<(Pos, Player)>,
    ) -> (f64, Option<Pos>) {
        self.nodes += 1;

        let moves = Self::ordered_moves(board, self.max_player);
        if depth >= cutoff || moves.is_empty() {
            return (composite_score(board, self.max_player, last), None);
        }

        let mut value = f64::NEG_INFINITY;
        let mut best_move = None;
        for mv in moves {
            let child_value = {
                let mut child = FlipGuard::apply(board, mv, self.max_player);
                let last = Some((mv, self.max_player));
                self.min_node(&mut child, depth + 1, cutoff, alpha, beta, last).0
            };
            if child_value > value {
                value = child_value;
                best_move = Some(mv);
            }
            if value >= beta {
                break;
            }
            alpha = alpha.max(value);
        }

        (value, best_move)
    }

    fn min_node(
        &mut self,
        board: &mut Board,
        depth: u32,
        cutoff: u32,
        alpha: f64,
        mut beta: f64,
        last: Option<(Pos, Player)>,
    ) -> (f64, Option<Pos>) {
        self.nodes += 1;

        let moves = Self::ordered_moves(board, self.min_player);
        if depth >= cutoff || moves.is_empty() {
            return (composite_score(board, self.max_player, last), None);
        }

        let mut value = f64::INFINITY;
        let mut best_move = None;
        for mv in moves {
            let child_value = {
                let mut child = FlipGuard::apply(board, mv, self.min_player);
                let last = Some((mv, self.min_player));
                self.max_node(&mut child, depth + 1, cutoff, alpha, beta, last).0
            };
            if child_value < value {
                value = child_value;
                best_move = Some(mv);
            }
            if value <= alpha {
                break;
            }
            beta = beta.min(value);
        }

        (value, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::rules::apply_move;
    use crate::rules::testing::reachable_positions;

    /// Copying minimax without pruning over the same ordering and scores.
    fn reference(
        board: &Board,
        to_move: Player,
        max_player: Player,
        depth: u32,
        cutoff: u32,
        last: Option<(Pos, Player)>,
    ) -> (f64, Option<Pos>) {
        let mut moves = legal_moves(board, to_move);
        if depth >= cutoff || moves.is_empty() {
            return (composite_score(board, max_player, last), None);
        }
        order_moves(&mut moves);
        let maximizing = to_move == max_player;
        let mut best: Option<(f64, Pos)> = None;
        for mv in moves {
            let mut child = board.clone();
            apply_move(&mut child, mv, to_move);
            let next = to_move.opponent();
            let last = Some((mv, to_move));
            let (v, _) = reference(&child, next, max_player, depth + 1, cutoff, last);
            let better = match best {
                None => true,
                Some((b, _)) => (maximizing && v > b) || (!maximizing && v < b),
            };
            if better {
                best = Some((v, mv));
            }
        }
        best.map_or((f64::NAN, None), |(v, mv)| (v, Some(mv)))
    }

    #[test]
    fn test_order_moves_puts_corners_first() {
        let mut moves = vec![Pos::new(1, 1), Pos::new(3, 3), Pos::new(0, 0), Pos::new(7, 7)];
        order_moves(&mut moves);
        assert_eq!(moves, vec![Pos::new(7, 7), Pos::new(0, 0), Pos::new(3, 3), Pos::new(1, 1)]);
    }

    #[test]
    fn test_order_moves_is_stable_on_ties() {
        // c5 and d3 weigh 1, d1 and d4 weigh -1
        let mut moves = vec![Pos::new(4, 2), Pos::new(0, 3), Pos::new(2, 3), Pos::new(3, 3)];
        order_moves(&mut moves);
        assert_eq!(moves, vec![Pos::new(4, 2), Pos::new(2, 3), Pos::new(0, 3), Pos::new(3, 3)]);
    }

    #[test]
    fn test_per_move_budget() {
        let total = Duration::from_secs(64);
        assert_eq!(per_move_budget(total, &Board::initial()), Duration::from_secs(2));

        // 20 more discs: ten moves each, 22 left
        let mut board = Board::initial();
        let empties: Vec<Pos> = Pos::all().filter(|&p| board.is_empty(p)).take(20).collect();
        for pos in empties {
            board.set(pos, Cell::X);
        }
        assert_eq!(per_move_budget(total, &board), total / 22);

        // 60 discs placed, two moves left
        let full = Board::from_cells([[Cell::O; 8]; 8]);
        assert_eq!(per_move_budget(total, &full), total / 2);
    }

    #[test]
    fn test_zero_budget_completes_shallowest_iteration() {
        let mut board = Board::initial();
        let result = DeepeningSearch::new(Player::X).search(&mut board, Duration::ZERO);
        assert_eq!(result.depth, MIN_DEPTH);
        assert!(result.best_move.is_some());
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_large_budget_reaches_max_depth() {
        let mut board = Board::initial();
        let search = DeepeningSearch::with_depth_range(Player::O, 2, 4);
        let result = search.search(&mut board, Duration::from_secs(3600));
        assert_eq!(result.depth, 4);
        assert!(result.nodes > 0);
        assert_eq!(board, Board::initial());

        let expected = reference(&board, Player::O, Player::O, 0, 4, None);
        assert_eq!((result.value, result.best_move), expected);
    }

    #[test]
    fn test_pruning_matches_reference() {
        for (board, player) in reachable_positions(2) {
            let mut work = board.clone();
            let search = DeepeningSearch::with_depth_range(player, 3, 3);
            let result = search.search(&mut work, Duration::ZERO);
            assert_eq!(work, board, "search left the board modified");

            let (value, best_move) = reference(&board, player, player, 0, 3, None);
            assert_eq!(result.best_move, best_move);
            assert_eq!(result.value, value);
        }
    }

    #[test]
    fn test_result_is_legal_and_deterministic() {
        let mut board = Board::initial();
        apply_move(&mut board, Pos::new(2, 4), Player::X);
        let reply = legal_moves(&board, Player::O)[0];
        apply_move(&mut board, reply, Player::O);

        let first = DeepeningSearch::with_depth_range(Player::X, 2, 3)
            .search(&mut board, Duration::from_secs(3600));
        let second = DeepeningSearch::with_depth_range(Player::X, 2, 3)
            .search(&mut board, Duration::from_secs(3600));

        let mv = first.best_move.expect("X has a move");
        assert!(legal_moves(&board, Player::X).contains(&mv));
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.value, second.value);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn test_no_moves_is_a_pass() {
        let mut board = Board::new();
        board.set(Pos::new(0, 0), Cell::O);
        board.set(Pos::new(7, 7), Cell::X);
        let result = DeepeningSearch::new(Player::X).search(&mut board, Duration::from_secs(10));
        assert_eq!(result.best_move, None);
        assert_eq!(result.depth, MIN_DEPTH);
        assert_eq!(result.nodes, 1);
        assert_eq!(result.value, composite_score(&board, Player::X, None));
    }

    #[test]
    fn test_depth_range_is_normalised() {
        let search = DeepeningSearch::with_depth_range(Player::X, 0, 0);
        assert_eq!((search.min_depth, search.max_depth), (1, 1));
        let search = DeepeningSearch::with_depth_range(Player::X, 5, 3);
        assert_eq!((search.min_depth, search.max_depth), (5, 5));
    }
}
