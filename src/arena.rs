//! Self-play driver
//!
//! Runs one agent per side from the standard opening, `X` first, until both
//! players pass in the same round. Every turn is recorded with the time its
//! search took, which is what the game log and the replay viewer consume.

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, info};

use crate::board::{Board, Player};
use crate::engine::{AgentParams, ReversiAgent};
use crate::error::{ReversiError, Result};
use crate::io::{GameRecord, TurnRecord};
use crate::search::SearchMode;

/// Per-side cutoff depths and the search mode both sides share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    pub mode: SearchMode,
    pub x_depth: u32,
    pub o_depth: u32,
}

impl ArenaConfig {
    pub fn new(mode: SearchMode, x_depth: u32, o_depth: u32) -> Result<Self> {
        for depth in [x_depth, o_depth] {
            if depth == 0 {
                return Err(ReversiError::InvalidDepth(0));
            }
        }
        Ok(Self { mode, x_depth, o_depth })
    }

    pub fn depth(&self, player: Player) -> u32 {
        match player {
            Player::X => self.x_depth,
            Player::O => self.o_depth,
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::AlphaBeta,
            x_depth: 3,
            o_depth: 3,
        }
    }
}

/// Finished game
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub record: GameRecord,
    pub board: Board,
    pub x_discs: u32,
    pub o_discs: u32,
}

impl GameSummary {
    /// Side with more discs, `None` on a draw
    pub fn winner(&self) -> Option<Player> {
        match self.x_discs.cmp(&self.o_discs) {
            Ordering::Greater => Some(Player::X),
            Ordering::Less => Some(Player::O),
            Ordering::Equal => None,
        }
    }
}

pub struct Arena {
    config: ArenaConfig,
    board: Board,
    record: GameRecord,
}

impl Arena {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            board: Board::initial(),
            record: GameRecord::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run one agent turn on a copy of the board and adopt its result.
    ///
    /// Returns `true` if the player placed a stone.
    pub fn turn(&mut self, player: Player) -> Result<bool> {
        let params = AgentParams::new(
            self.config.mode,
            player,
            self.config.depth(player),
            self.board.clone(),
        )?;
        let mut agent = ReversiAgent::new(params);

        let start = Instant::now();
        let outcome = agent.play();
        let elapsed = start.elapsed();

        self.board = agent.into_board();
        self.record.push(TurnRecord::new(player, outcome.best_move, elapsed));

        debug!(
            turn = self.record.len(),
            %player,
            mv = %outcome.best_move.map_or_else(|| "pass".to_string(), |p| p.to_string()),
            value = outcome.value,
            elapsed_ms = elapsed.as_millis() as u64,
            "turn played"
        );

        Ok(outcome.best_move.is_some())
    }

    /// Play rounds of `X` then `O` until neither side can move.
    pub fn play(mut self) -> Result<GameSummary> {
        info!(
            mode = %self.config.mode,
            x_depth = self.config.x_depth,
            o_depth = self.config.o_depth,
            "starting self-play"
        );

        loop {
            let x_moved = self.turn(Player::X)?;
            let o_moved = self.turn(Player::O)?;
            if !x_moved && !o_moved {
                break;
            }
        }

        let x_discs = self.board.disc_count(Player::X);
        let o_discs = self.board.disc_count(Player::O);
        info!(turns = self.record.len(), x_discs, o_discs, "game over");

        Ok(GameSummary {
            record: self.record,
            board: self.board,
            x_discs,
            o_discs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::has_legal_move;

    #[test]
    fn test_config_rejects_zero_depth() {
        assert!(ArenaConfig::new(SearchMode::Minimax, 0, 2).is_err());
        assert!(ArenaConfig::new(SearchMode::Minimax, 2, 0).is_err());
        let config = ArenaConfig::new(SearchMode::Greedy, 1, 4).unwrap();
        assert_eq!(config.depth(Player::X), 1);
        assert_eq!(config.depth(Player::O), 4);
    }

    #[test]
    fn test_first_turn_is_x() {
        let mut arena = Arena::new(ArenaConfig::new(SearchMode::Greedy, 1, 1).unwrap());
        assert!(arena.turn(Player::X).unwrap());
        assert_eq!(arena.board().disc_count(Player::X), 4);
        assert_eq!(arena.board().disc_count(Player::O), 1);
    }

    #[test]
    fn test_greedy_game_runs_to_completion() {
        let config = ArenaConfig::new(SearchMode::Greedy, 1, 1).unwrap();
        let summary = Arena::new(config).play().unwrap();

        assert!(!has_legal_move(&summary.board, Player::X));
        assert!(!has_legal_move(&summary.board, Player::O));
        assert_eq!(summary.x_discs + summary.o_discs, summary.board.stone_count());

        // the last round is two passes
        let turns = &summary.record.turns;
        assert!(turns.len() >= 2);
        assert!(turns[turns.len() - 1].is_pass());
        assert!(turns[turns.len() - 2].is_pass());
        assert_eq!(turns[0].player, Player::X);
        assert!(turns.chunks(2).all(|round| round[0].player == Player::X));
    }

    #[test]
    fn test_record_replays_to_final_board() {
        let config = ArenaConfig::new(SearchMode::AlphaBeta, 2, 1).unwrap();
        let summary = Arena::new(config).play().unwrap();
        assert_eq!(summary.record.final_board().unwrap(), summary.board);

        let reparsed = GameRecord::parse(&summary.record.to_string()).unwrap();
        assert_eq!(reparsed.final_board().unwrap(), summary.board);
    }

    #[test]
    fn test_self_play_is_deterministic() {
        let config = ArenaConfig::new(SearchMode::Minimax, 1, 2).unwrap();
        let a = Arena::new(config).play().unwrap();
        let b = Arena::new(config).play().unwrap();
        let moves = |s: &GameSummary| s.record.turns.iter().map(|t| t.mv).collect::<Vec<_>>();
        assert_eq!(moves(&a), moves(&b));
        assert_eq!(a.winner(), b.winner());
    }
}
