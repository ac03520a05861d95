//! Agent orchestrator: the single entry point for one move request
//!
//! Given validated parameters (mode, player, cutoff depth, position), the
//! agent searches from the position as the maximizing player and, if a best
//! move exists, commits it to its board. The outcome carries the search value,
//! the move and the full node trace.
//!
//! `CompetitionAgent` answers the clock-bound request instead: it splits the
//! remaining time over the moves still to play and deepens within that share.
//!
//! # Example
//!
//! ```
//! use reversi::{AgentParams, Board, Player, ReversiAgent, SearchMode};
//!
//! let params = AgentParams::new(SearchMode::AlphaBeta, Player::X, 2, Board::initial()).unwrap();
//! let mut agent = ReversiAgent::new(params);
//! let outcome = agent.play();
//!
//! println!("Best move: {:?}", outcome.best_move);
//! assert_eq!(agent.board().stone_count(), 5);
//! ```

use std::time::{Duration, Instant};

use tracing::info;

use crate::board::{Board, Player, Pos};
use crate::error::{ReversiError, Result};
use crate::rules::apply_move;
use crate::search::{
    per_move_budget, DeepeningResult, DeepeningSearch, SearchMode, SearchObserver, Searcher,
    TraceEntry,
};

/// Validate a raw cutoff depth
pub fn validate_depth(depth: i64) -> Result<u32> {
    if depth <= 0 {
        return Err(ReversiError::InvalidDepth(depth));
    }
    u32::try_from(depth).map_err(|_| ReversiError::InvalidDepth(depth))
}

/// Parameters of one move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentParams {
    pub mode: SearchMode,
    /// Player to move; the maximizing side
    pub player: Player,
    /// Configured cutoff; greedy mode searches one ply regardless
    pub cutoff_depth: u32,
    pub board: Board,
}

impl AgentParams {
    /// Build parameters, rejecting a zero cutoff depth.
    pub fn new(mode: SearchMode, player: Player, cutoff_depth: u32, board: Board) -> Result<Self> {
        if cutoff_depth == 0 {
            return Err(ReversiError::InvalidDepth(0));
        }
        Ok(Self {
            mode,
            player,
            cutoff_depth,
            board,
        })
    }

    #[inline]
    pub fn opponent(&self) -> Player {
        self.player.opponent()
    }
}

/// Result of a move request.
#[derive(Debug, Clone)]
pub struct AgentOutcome {
    /// Minimax value of the position for the agent's player
    pub value: i32,
    /// Move committed to the board, `None` for a pass
    pub best_move: Option<Pos>,
    /// Every node the search visited, in order
    pub trace: Vec<TraceEntry>,
    pub mode: SearchMode,
    /// Number of nodes searched
    pub nodes: u64,
    /// Time taken in milliseconds
    pub time_ms: u64,
}

/// Reversi agent for a single move request.
pub struct ReversiAgent {
    params: AgentParams,
}

impl ReversiAgent {
    pub fn new(params: AgentParams) -> Self {
        Self { params }
    }

    /// Current board; after `play` it holds the committed move.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.params.board
    }

    pub fn into_board(self) -> Board {
        self.params.board
    }

    /// Search and commit the best move.
    pub fn play(&mut self) -> AgentOutcome {
        let params = &self.params;
        let searcher = Searcher::new(params.mode, params.cutoff_depth, params.player);
        self.run(searcher)
    }

    /// Like `play`, forwarding each node visit to `observer`.
    pub fn play_with_observer(&mut self, observer: &mut dyn SearchObserver) -> AgentOutcome {
        let searcher = Searcher::with_observer(
            self.params.mode,
            self.params.cutoff_depth,
            self.params.player,
            observer,
        );
        self.run(searcher)
    }

    fn run(&mut self, searcher: Searcher<'_>) -> AgentOutcome {
        let start = Instant::now();
        let mode = self.params.mode;
        let player = self.params.player;

        info!(%mode, %player, cutoff = searcher.cutoff_depth(), "running agent");

        let result = searcher.search(&mut self.params.board);

        if let Some(mv) = result.best_move {
            apply_move(&mut self.params.board, mv, player);
        }

        let time_ms = start.elapsed().as_millis() as u64;
        info!(
            %player,
            best_move = %result.best_move.map_or_else(|| "pass".to_string(), |p| p.to_string()),
            value = result.score,
            nodes = result.nodes,
            time_ms,
            "agent done"
        );

        AgentOutcome {
            value: result.score,
            best_move: result.best_move,
            trace: result.trace,
            mode,
            nodes: result.nodes,
            time_ms,
        }
    }
}

/// Clock-bound move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionParams {
    pub player: Player,
    /// Time left on the player's clock for the rest of the game
    pub time_remaining: Duration,
    pub board: Board,
}

/// Agent for a clock-bound move request.
pub struct CompetitionAgent {
    params: CompetitionParams,
}

impl CompetitionAgent {
    pub fn new(params: CompetitionParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.params.board
    }

    pub fn into_board(self) -> Board {
        self.params.board
    }

    /// Time allotted to this move
    pub fn budget(&self) -> Duration {
        per_move_budget(self.params.time_remaining, &self.params.board)
    }

    /// Search within the budget and commit the chosen move.
    pub fn play(&mut self) -> DeepeningResult {
        self.play_with(DeepeningSearch::new(self.params.player))
    }

    /// Like `play`, with a caller-configured searcher.
    pub fn play_with(&mut self, search: DeepeningSearch) -> DeepeningResult {
        let player = self.params.player;
        let budget = self.budget();
        info!(%player, budget_ms = budget.as_millis() as u64, "running competition agent");

        let result = search.search(&mut self.params.board, budget);
        if let Some(mv) = result.best_move {
            apply_move(&mut self.params.board, mv, player);
        }

        info!(
            %player,
            best_move = %result.best_move.map_or_else(|| "pass".to_string(), |p| p.to_string()),
            depth = result.depth,
            nodes = result.nodes,
            time_ms = result.elapsed.as_millis() as u64,
            "competition agent done"
        );
        result
    }
}
