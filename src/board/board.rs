//! Board structure: an 8x8 grid of committed cell states

use std::fmt;

use super::bitboard::Bitboard;
use super::{Cell, Player, Pos, BOARD_SIZE, DIRECTIONS};

/// Game board.
///
/// Every cell is exactly one of `Empty`, `X` or `O`; the two bitboards never
/// share a set bit. Search mutates one `Board` in place through the
/// apply/reverse pair in `rules`, so `Clone` is only used by callers that want
/// an independent snapshot (the self-play driver, the replay viewer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    x: Bitboard,
    o: Bitboard,
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Standard opening: X on d4 and e5, O on e4 and d5
    pub fn initial() -> Self {
        let mut board = Self::new();
        board.set(Pos::new(3, 3), Cell::X);
        board.set(Pos::new(3, 4), Cell::O);
        board.set(Pos::new(4, 3), Cell::O);
        board.set(Pos::new(4, 4), Cell::X);
        board
    }

    /// Build a board from 8 rows of 8 cells
    pub fn from_cells(rows: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                board.set(Pos::new(r as u8, c as u8), cell);
            }
        }
        board
    }

    /// Get cell state at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Cell {
        if self.x.get(pos) {
            Cell::X
        } else if self.o.get(pos) {
            Cell::O
        } else {
            Cell::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.x.get(pos) && !self.o.get(pos)
    }

    /// Overwrite a cell, keeping the bitboards disjoint
    #[inline]
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        match cell {
            Cell::X => {
                self.o.clear(pos);
                self.x.set(pos);
            }
            Cell::O => {
                self.x.clear(pos);
                self.o.set(pos);
            }
            Cell::Empty => {
                self.x.clear(pos);
                self.o.clear(pos);
            }
        }
    }

    /// Stones held by a player
    #[inline]
    pub fn stones(&self, player: Player) -> &Bitboard {
        match player {
            Player::X => &self.x,
            Player::O => &self.o,
        }
    }

    /// Occupied cells of either colour
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    /// Number of discs a player holds
    #[inline]
    pub fn disc_count(&self, player: Player) -> u32 {
        self.stones(player).count()
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> u32 {
        self.x.count() + self.o.count()
    }

    /// Discs of `player` that can never be flipped again.
    ///
    /// A disc is counted when, along each of the four lines through it, either
    /// the line is completely filled or one side runs over the player's own
    /// discs to the edge. Corners always qualify.
    pub fn stable_count(&self, player: Player) -> u32 {
        let own = self.stones(player);
        let filled = self.occupied();
        let line_safe = |pos: Pos, dir: usize| {
            // DIRECTIONS[d] and DIRECTIONS[7 - d] point opposite ways
            let back = DIRECTIONS.len() - 1 - dir;
            let edge = |d: usize, cells: &Bitboard| Self::runs_to_edge(pos, d, cells);
            (edge(dir, own) || edge(back, own)) || (edge(dir, &filled) && edge(back, &filled))
        };
        own.iter_ones()
            .filter(|&pos| (0..DIRECTIONS.len() / 2).all(|dir| line_safe(pos, dir)))
            .count() as u32
    }

    /// True when every cell from `pos` (exclusive) to the edge along `dir` is in `cells`.
    fn runs_to_edge(pos: Pos, dir: usize, cells: &Bitboard) -> bool {
        let mut cursor = pos.step(dir);
        while let Some(p) = cursor {
            if !cells.get(p) {
                return false;
            }
            cursor = p.step(dir);
        }
        true
    }

    /// One row of the board as cell states
    pub fn row(&self, row: u8) -> [Cell; BOARD_SIZE] {
        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = self.get(Pos::new(row, col as u8));
        }
        cells
    }
}

/// Rows of space-separated symbols, the same layout the output file uses
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            let line: Vec<String> = self.row(row).iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
