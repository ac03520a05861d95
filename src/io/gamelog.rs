//! Game log: one line per self-play turn
//!
//! ```text
//! X e3 0.0123
//! O pass 0.0004
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::board::{Board, Player, Pos};
use crate::error::{ReversiError, Result};
use crate::rules::play_move;

/// One turn: who moved, where (`None` for a pass) and how long the search took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnRecord {
    pub player: Player,
    pub mv: Option<Pos>,
    pub elapsed: Duration,
}

impl TurnRecord {
    pub fn new(player: Player, mv: Option<Pos>, elapsed: Duration) -> Self {
        Self { player, mv, elapsed }
    }

    pub fn is_pass(&self) -> bool {
        self.mv.is_none()
    }

    fn parse(line: &str, line_no: usize) -> Result<Self> {
        let bad = |reason: String| ReversiError::BadLogLine { line: line_no, reason };

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [player, mv, seconds] = fields.as_slice() else {
            return Err(bad(format!("expected 3 fields, found {}", fields.len())));
        };

        let mut symbols = player.chars();
        let player = match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => Player::from_symbol(symbol),
            _ => None,
        }
        .ok_or_else(|| bad(format!("unknown player {player:?}")))?;

        let mv = match *mv {
            "pass" => None,
            label => Some(label.parse::<Pos>()?),
        };

        let seconds: f64 = seconds
            .parse()
            .map_err(|_| bad(format!("invalid time {seconds:?}")))?;
        let elapsed = Duration::try_from_secs_f64(seconds)
            .map_err(|_| bad(format!("invalid time {seconds:?}")))?;

        Ok(Self { player, mv, elapsed })
    }
}

impl fmt::Display for TurnRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mv {
            Some(pos) => write!(f, "{} {} {:.6}", self.player, pos, self.elapsed.as_secs_f64()),
            None => write!(f, "{} pass {:.6}", self.player, self.elapsed.as_secs_f64()),
        }
    }
}

/// Ordered turns of one game, starting from the standard opening
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameRecord {
    pub turns: Vec<TurnRecord>,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: TurnRecord) {
        self.turns.push(turn);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Turns that placed a stone
    pub fn moves(&self) -> impl Iterator<Item = &TurnRecord> + '_ {
        self.turns.iter().filter(|t| !t.is_pass())
    }

    /// Search times in seconds for one player, in turn order.
    pub fn times(&self, player: Player) -> Vec<f64> {
        self.turns
            .iter()
            .filter(|t| t.player == player)
            .map(|t| t.elapsed.as_secs_f64())
            .collect()
    }

    /// Board after the first `steps` turns, replayed from the opening.
    pub fn board_at(&self, steps: usize) -> Result<Board> {
        let mut board = Board::initial();
        for turn in self.turns.iter().take(steps) {
            if let Some(pos) = turn.mv {
                play_move(&mut board, pos, turn.player)?;
            }
        }
        Ok(board)
    }

    /// Board after every turn.
    pub fn final_board(&self) -> Result<Board> {
        self.board_at(self.turns.len())
    }

    pub fn parse(text: &str) -> Result<Self> {
        let turns = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| TurnRecord::parse(line, idx + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { turns })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ReversiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let record = Self::parse(&text)?;
        debug!(path = %path.display(), turns = record.len(), "read game log");
        Ok(record)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| ReversiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), turns = self.len(), "wrote game log");
        Ok(())
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for turn in &self.turns {
            writeln!(f, "{turn}")?;
        }
        Ok(())
    }
}
