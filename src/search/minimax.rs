//! Minimax and alpha-beta search over a single shared board
//!
//! Two mutually recursive procedures, `max_node` and `min_node`, walk the
//! game tree depth-first. Each child is entered through a `FlipGuard`, so the
//! one board buffer always reflects the current path and is restored before
//! a node returns, including on a pruning early return.
//!
//! # Example
//!
//! ```
//! use reversi::{Board, Player, Pos};
//! use reversi::search::{SearchMode, Searcher};
//!
//! let mut board = Board::initial();
//! let result = Searcher::new(SearchMode::Greedy, 3, Player::X).search(&mut board);
//!
//! assert_eq!(result.best_move, Some(Pos::new(2, 4)));
//! assert_eq!(board, Board::initial());
//! ```

use std::fmt;

use tracing::debug;

use crate::board::{Board, Player, Pos};
use crate::error::{ReversiError, Result};
use crate::eval::evaluate;
use crate::rules::{legal_moves, FlipGuard};

use super::trace::{SearchObserver, TraceEntry, TraceRecorder, INF, NEG_INF};

/// Search mode, selected by the task number 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Task 1: one ply, pick the move with the best static score
    Greedy,
    /// Task 2: full minimax to the cutoff depth
    Minimax,
    /// Task 3: minimax with alpha-beta pruning
    AlphaBeta,
}

impl SearchMode {
    pub fn from_task(task: i64) -> Result<Self> {
        match task {
            1 => Ok(SearchMode::Greedy),
            2 => Ok(SearchMode::Minimax),
            3 => Ok(SearchMode::AlphaBeta),
            other => Err(ReversiError::InvalidTask(other)),
        }
    }

    pub fn task(self) -> u8 {
        match self {
            SearchMode::Greedy => 1,
            SearchMode::Minimax => 2,
            SearchMode::AlphaBeta => 3,
        }
    }

    #[inline]
    pub fn prunes(self) -> bool {
        self == SearchMode::AlphaBeta
    }

    /// Greedy always searches exactly one ply.
    #[inline]
    pub fn effective_depth(self, cutoff_depth: u32) -> u32 {
        match self {
            SearchMode::Greedy => 1,
            SearchMode::Minimax | SearchMode::AlphaBeta => cutoff_depth,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Greedy => write!(f, "Greedy"),
            SearchMode::Minimax => write!(f, "MiniMax"),
            SearchMode::AlphaBeta => write!(f, "AlphaBeta"),
        }
    }
}

/// Search result containing the best move found and the node trace.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move for the maximizing player; `None` when it has no legal move
    pub best_move: Option<Pos>,
    /// Minimax value of the root
    pub score: i32,
    /// Nodes visited
    pub nodes: u64,
    /// Alpha and beta cutoffs taken
    pub cutoffs: u64,
    /// Every recorded node visit, in order
    pub trace: Vec<TraceEntry>,
}

/// Among two moves of equal value keep the one earlier in (row, col) order.
#[inline]
fn prefer_earlier(candidate: Pos, incumbent: Option<Pos>) -> Pos {
    match incumbent {
        Some(current) => candidate.min(current),
        None => candidate,
    }
}

/// Depth-first minimax searcher for one request.
pub struct Searcher<'o> {
    mode: SearchMode,
    cutoff_depth: u32,
    max_player: Player,
    min_player: Player,
    recorder: TraceRecorder<'o>,
    nodes: u64,
    cutoffs: u64,
}

impl<'o> Searcher<'o> {
    /// Searcher for `max_player`; the configured cutoff is ignored in greedy mode.
    pub fn new(mode: SearchMode, cutoff_depth: u32, max_player: Player) -> Self {
        Self::with_recorder(mode, cutoff_depth, max_player, TraceRecorder::new())
    }

    /// Like `new`, forwarding every trace entry to `observer` as it is recorded.
    pub fn with_observer(
        mode: SearchMode,
        cutoff_depth: u32,
        max_player: Player,
        observer: &'o mut dyn SearchObserver,
    ) -> Self {
        Self::with_recorder(mode, cutoff_depth, max_player, TraceRecorder::with_observer(observer))
    }

    fn with_recorder(
        mode: SearchMode,
        cutoff_depth: u32,
        max_player: Player,
        recorder: TraceRecorder<'o>,
    ) -> Self {
        Self {
            mode,
            cutoff_depth: mode.effective_depth(cutoff_depth),
            max_player,
            min_player: max_player.opponent(),
            recorder,
            nodes: 0,
            cutoffs: 0,
        }
    }

    #[inline]
    pub fn cutoff_depth(&self) -> u32 {
        self.cutoff_depth
    }

    /// Run the search from `board`, which is left exactly as it was passed in.
    pub fn search(mut self, board: &mut Board) -> SearchResult {
        debug!(
            mode = %self.mode,
            cutoff = self.cutoff_depth,
            player = %self.max_player,
            "search start"
        );

        let (score, best_move) = self.max_node(board, 0, NEG_INF, INF, None);

        debug!(
            score,
            best_move = ?best_move.map(|p| p.to_string()),
            nodes = self.nodes,
            cutoffs = self.cutoffs,
            trace_len = self.recorder.len(),
            "search done"
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
            trace: self.recorder.into_entries(),
        }
    }

    #[inline]
    fn is_terminal(&self, depth: u32, moves: &[Pos]) -> bool {
        depth >= self.cutoff_depth || moves.is_empty()
    }

    #[inline]
    fn record(&mut self, node: Option<Pos>, depth: u32, value: i32, alpha: i32, beta: i32) {
        self.recorder.record(TraceEntry { node, depth, value, alpha, beta });
    }

    /// Node where the maximizing player moves.
    fn max_node(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        node: Option<Pos>,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        let moves = legal_moves(board, self.max_player);
        if self.is_terminal(depth, &moves) {
            let score = evaluate(board, self.max_player, self.min_player);
            self.record(node, depth, score, alpha, beta);
            return (score, None);
        }

        let mut value = NEG_INF;
        let mut best_move = None;
        self.record(node, depth, value, alpha, beta);

        for mv in moves {
            let child_value = {
                let mut child = FlipGuard::apply(board, mv, self.max_player);
                self.min_node(&mut child, depth + 1, alpha, beta, Some(mv)).0
            };

            if child_value > value {
                value = child_value;
                best_move = Some(mv);
            } else if child_value == value {
                best_move = Some(prefer_earlier(mv, best_move));
            }

            if self.mode.prunes() {
                if value >= beta {
                    self.cutoffs += 1;
                    self.record(node, depth, value, alpha, beta);
                    return (value, best_move);
                }
                alpha = alpha.max(value);
            }
            self.record(node, depth, value, alpha, beta);
        }

        (value, best_move)
    }

    /// Node where the minimizing player moves.
    fn min_node(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: i32,
        mut beta: i32,
        node: Option<Pos>,
    ) -> (i32, Option<Pos>) {
        self.nodes += 1;

        let moves = legal_moves(board, self.min_player);
        if self.is_terminal(depth, &moves) {
            let score = evaluate(board, self.max_player, self.min_player);
            self.record(node, depth, score, alpha, beta);
            return (score, None);
        }

        let mut value = INF;
        let mut best_move = None;
        self.record(node, depth, value, alpha, beta);

        for mv in moves {
            let child_value = {
                let mut child = FlipGuard::apply(board, mv, self.min_player);
                self.max_node(&mut child, depth + 1, alpha, beta, Some(mv)).0
            };

            if child_value < value {
                value = child_value;
                best_move = Some(mv);
            } else if child_value == value {
                best_move = Some(prefer_earlier(mv, best_move));
            }

            if self.mode.prunes() {
                if value <= alpha {
                    self.cutoffs += 1;
                    self.record(node, depth, value, alpha, beta);
                    return (value, best_move);
                }
                beta = beta.min(value);
            }
            self.record(node, depth, value, alpha, beta);
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

    fn run(board: &Board, player: Player, mode: SearchMode, depth: u32) -> SearchResult {
        let mut work = board.clone();
        let result = Searcher::new(mode, depth, player).search(&mut work);
        assert_eq!(&work, board, "search left the board modified");
        result
    }

    /// Copying minimax that only replaces the incumbent on a strictly better value.
    fn reference_minimax(
        board: &Board,
        to_move: Player,
        max_player: Player,
        depth: u32,
        cutoff: u32,
    ) -> (i32, Option<Pos>) {
        let moves = legal_moves(board, to_move);
        if depth >= cutoff || moves.is_empty() {
            return (evaluate(board, max_player, max_player.opponent()), None);
        }
        let maximizing = to_move == max_player;
        let mut best: Option<(i32, Pos)> = None;
        for mv in moves {
            let mut child = board.clone();
            apply_move(&mut child, mv, to_move);
            let next = to_move.opponent();
            let (v, _) = reference_minimax(&child, next, max_player, depth + 1, cutoff);
            let better = match best {
                None => true,
                Some((b, _)) => (maximizing && v > b) || (!maximizing && v < b),
            };
            if better {
                best = Some((v, mv));
            }
        }
        match best {
            Some((v, mv)) => (v, Some(mv)),
            None => unreachable!(),
        }
    }

    #[test]
    fn test_mode_from_task() {
        assert_eq!(SearchMode::from_task(1).unwrap(), SearchMode::Greedy);
        assert_eq!(SearchMode::from_task(2).unwrap(), SearchMode::Minimax);
        assert_eq!(SearchMode::from_task(3).unwrap(), SearchMode::AlphaBeta);
        assert!(matches!(SearchMode::from_task(4), Err(ReversiError::InvalidTask(4))));
        assert!(matches!(SearchMode::from_task(0), Err(ReversiError::InvalidTask(0))));
        assert_eq!(SearchMode::AlphaBeta.task(), 3);
    }

    #[test]
    fn test_greedy_opening_picks_e3() {
        let result = run(&Board::initial(), Player::X, SearchMode::Greedy, 5);
        assert_eq!(result.best_move, Some(Pos::new(2, 4)));
        assert_eq!(result.score, 4);
        // root entry + (leaf, root update) per move
        assert_eq!(result.trace.len(), 9);
        assert!(result.trace.iter().all(|e| e.depth <= 1));
    }

    #[test]
    fn test_minimax_depth_one_trace() {
        let result = run(&Board::initial(), Player::X, SearchMode::Minimax, 1);
        let lines: Vec<String> =
            result.trace.iter().map(|e| e.render(SearchMode::Minimax)).collect();
        assert_eq!(
            lines,
            vec![
                "root,0,-Infinity",
                "e3,1,4",
                "root,0,4",
                "f4,1,4",
                "root,0,4",
                "c5,1,4",
                "root,0,4",
                "d6,1,4",
                "root,0,4",
            ]
        );
    }

    #[test]
    fn test_alphabeta_trace_carries_bounds() {
        let result = run(&Board::initial(), Player::X, SearchMode::AlphaBeta, 1);
        let lines: Vec<String> =
            result.trace.iter().map(|e| e.render(SearchMode::AlphaBeta)).collect();
        assert_eq!(lines[0], "root,0,-Infinity,-Infinity,Infinity");
        assert_eq!(lines[1], "e3,1,4,-Infinity,Infinity");
        assert_eq!(lines[2], "root,0,4,4,Infinity");
        assert_eq!(lines[3], "f4,1,4,4,Infinity");
    }

    #[test]
    fn test_no_legal_moves_is_terminal() {
        let mut board = Board::new();
        // O on h8 and g8 cannot be bracketed by the lone X on a1
        board.set(Pos::new(0, 0), Cell::X);
        board.set(Pos::new(7, 7), Cell::O);
        board.set(Pos::new(7, 6), Cell::O);
        assert!(legal_moves(&board, Player::X).is_empty());

        for mode in [SearchMode::Greedy, SearchMode::Minimax, SearchMode::AlphaBeta] {
            let result = run(&board, Player::X, mode, 3);
            assert_eq!(result.best_move, None);
            assert_eq!(result.score, evaluate(&board, Player::X, Player::O));
            assert_eq!(result.trace.len(), 1);
            assert_eq!(result.nodes, 1);
        }
    }

    #[test]
    fn test_greedy_ignores_configured_depth() {
        let board = Board::initial();
        let greedy = run(&board, Player::X, SearchMode::Greedy, 3);
        let minimax = run(&board, Player::X, SearchMode::Minimax, 3);

        assert_eq!(greedy.trace.iter().map(|e| e.depth).max(), Some(1));
        assert_eq!(minimax.trace.iter().map(|e| e.depth).max(), Some(3));
        assert!(minimax.trace.iter().all(|e| e.depth <= 3));
    }

    #[test]
    fn test_greedy_is_one_ply_argmax() {
        for (board, player) in reachable_positions(3) {
            let result = run(&board, player, SearchMode::Greedy, 4);
            let moves = legal_moves(&board, player);

            let mut expected: Option<(i32, Pos)> = None;
            for mv in moves {
                let mut child = board.clone();
                apply_move(&mut child, mv, player);
                let v = evaluate(&child, player, player.opponent());
                if expected.map_or(true, |(b, _)| v > b) {
                    expected = Some((v, mv));
                }
            }

            match expected {
                Some((v, mv)) => {
                    assert_eq!(result.best_move, Some(mv));
                    assert_eq!(result.score, v);
                }
                None => assert_eq!(result.best_move, None),
            }
        }
    }

    #[test]
    fn test_pruning_preserves_value_and_move() {
        for (board, player) in reachable_positions(2) {
            for depth in 1..=3 {
                let minimax = run(&board, player, SearchMode::Minimax, depth);
                let alphabeta = run(&board, player, SearchMode::AlphaBeta, depth);
                assert_eq!(minimax.score, alphabeta.score, "depth {}", depth);
                assert_eq!(minimax.best_move, alphabeta.best_move, "depth {}", depth);
                assert!(alphabeta.nodes <= minimax.nodes);
            }
        }
    }

    #[test]
    fn test_alphabeta_prunes_something_at_depth_four() {
        let board = Board::initial();
        let minimax = run(&board, Player::X, SearchMode::Minimax, 4);
        let alphabeta = run(&board, Player::X, SearchMode::AlphaBeta, 4);
        assert_eq!(minimax.cutoffs, 0);
        assert!(alphabeta.cutoffs > 0);
        assert!(alphabeta.nodes < minimax.nodes);
    }

    #[test]
    fn test_tie_break_matches_first_strictly_best() {
        for (board, player) in reachable_positions(2) {
            for depth in 1..=3 {
                let result = run(&board, player, SearchMode::Minimax, depth);
                let (value, mv) = reference_minimax(&board, player, player, 0, depth);
                assert_eq!(result.score, value);
                assert_eq!(result.best_move, mv);
            }
        }
    }

    #[test]
    fn test_prefer_earlier() {
        let a = Pos::new(2, 4);
        let b = Pos::new(5, 3);
        assert_eq!(prefer_earlier(b, Some(a)), a);
        assert_eq!(prefer_earlier(a, Some(b)), a);
        assert_eq!(prefer_earlier(b, None), b);
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::initial();
        let first = run(&board, Player::O, SearchMode::AlphaBeta, 3);
        let second = run(&board, Player::O, SearchMode::AlphaBeta, 3);
        assert_eq!(first.score, second.score);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.trace, second.trace);
    }

    #[test]
    fn test_observer_sees_every_entry() {
        let mut seen: Vec<TraceEntry> = Vec::new();
        let mut observer = |e: &TraceEntry| seen.push(*e);
        let mut board = Board::initial();
        let searcher = Searcher::with_observer(SearchMode::AlphaBeta, 2, Player::X, &mut observer);
        let result = searcher.search(&mut board);
        assert_eq!(seen, result.trace);
    }
}
