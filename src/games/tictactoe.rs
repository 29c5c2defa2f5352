//! # Tic-Tac-Toe Game Implementation
//!
//! Classic 3×3 game with free placement: any empty cell may be taken and
//! three marks in a row (horizontally, vertically or diagonally) win.
//! Cells are numbered 0..9 in row-major order.
//!
//! The game tree is small enough that the engine solves it exhaustively.

use crate::error::{GameError, Result};
use crate::{Cell, GameState, Location, Side};
use std::fmt;
use std::str::FromStr;

const SIZE: usize = 3;
const CELLS: usize = SIZE * SIZE;

/// Score magnitude for a win one ply below the root. It exceeds the deepest
/// possible game (9 plies) so distance-adjusted scores stay positive.
pub const WIN_SCORE: i32 = 10;

/// A move in tic-tac-toe: the 0-based, row-major cell index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize);

impl From<TicTacToeMove> for usize {
    fn from(mv: TicTacToeMove) -> usize {
        mv.0
    }
}

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicTacToeMove {
    type Err = String;

    /// Parses a cell index such as `"4"`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let idx = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        if idx >= CELLS {
            return Err(format!("cell {} is off the board (0-{})", idx, CELLS - 1));
        }
        Ok(TicTacToeMove(idx))
    }
}

/// A 3×3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TicTacToeState {
    cells: [Cell; CELLS],
}

impl TicTacToeState {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a row-major layout of `X`, `O` and `_`/`.`.
    ///
    /// Whitespace is ignored, so `"XX_ OO_ ___"` is accepted.
    pub fn from_layout(layout: &str) -> std::result::Result<Self, String> {
        let mut cells = [Cell::Empty; CELLS];
        let mut n = 0;
        for ch in layout.chars().filter(|c| !c.is_whitespace()) {
            if n >= CELLS {
                return Err(format!("layout has more than {} cells", CELLS));
            }
            cells[n] = match ch {
                'X' | 'x' => Cell::Occupied(Side::First),
                'O' | 'o' => Cell::Occupied(Side::Second),
                '_' | '.' => Cell::Empty,
                other => return Err(format!("unexpected character '{}' in layout", other)),
            };
            n += 1;
        }
        if n != CELLS {
            return Err(format!("layout has {} cells, expected {}", n, CELLS));
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::write_grid(f, &self.cells, SIZE)
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn possible_moves(&self) -> Vec<Self::Move> {
        (0..CELLS)
            .filter(|&i| self.cells[i] == Cell::Empty)
            .map(TicTacToeMove)
            .collect()
    }

    fn is_legal(&self, mv: Self::Move) -> bool {
        mv.0 < CELLS && self.cells[mv.0] == Cell::Empty
    }

    fn place(&mut self, mv: Self::Move, side: Side) -> Result<Location> {
        if !self.is_legal(mv) {
            return Err(GameError::IllegalMove { position: mv.0 });
        }
        self.cells[mv.0] = Cell::Occupied(side);
        Ok(Location::new(mv.0 / SIZE, mv.0 % SIZE))
    }

    fn undo(&mut self, location: Location) {
        if let Some(cell) = self.cells.get_mut(location.row * SIZE + location.col) {
            *cell = Cell::Empty;
        }
    }

    fn move_at(&self, position: usize) -> Self::Move {
        TicTacToeMove(position)
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn dimensions(&self) -> (usize, usize) {
        (SIZE, SIZE)
    }

    fn line_size(&self) -> usize {
        SIZE
    }

    fn win_score(&self) -> i32 {
        WIN_SCORE
    }

    fn reset(&mut self) {
        self.cells = [Cell::Empty; CELLS];
    }
}
