//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner
//!
//! Moves are enumerated center-out (`3, 2, 4, 1, 5, 0, 6` on the standard
//! board), so the search breaks ties in favour of central columns.

use crate::error::{GameError, Result};
use crate::{Cell, GameState, Location, Side};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_LINE_SIZE: usize = 4;

/// Score magnitude for a win one ply below the root.
pub const WIN_SCORE: i32 = 1000;

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

impl From<Connect4Move> for usize {
    fn from(mv: Connect4Move) -> usize {
        mv.0
    }
}

impl fmt::Display for Connect4Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents the board of a Connect 4 game
///
/// Row 0 is the top of the board; pieces settle at the highest free row index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major)
    cells: Vec<Cell>,
    /// Board width (number of columns)
    width: usize,
    /// Board height (number of rows)
    height: usize,
    /// Number of pieces needed in a row to win
    line_size: usize,
    /// Columns in search order, center first
    column_order: Vec<usize>,
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_LINE_SIZE)
    }
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::write_grid(f, &self.cells, self.width)
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        let mut column_order: Vec<usize> = (0..width).collect();
        column_order.sort_by_key(|&c| ((2 * c as i64 - (width as i64 - 1)).abs(), c));
        Self {
            cells: vec![Cell::Empty; width * height],
            width,
            height,
            line_size,
            column_order,
        }
    }

    /// Builds a standard 6×7 board from rows given top to bottom.
    ///
    /// Each row uses `X`, `O` and `.`/`_`; pieces must rest on the bottom or
    /// on another piece.
    pub fn from_rows(rows: &[&str]) -> std::result::Result<Self, String> {
        let mut state = Self::default();
        if rows.len() != state.height {
            return Err(format!("expected {} rows, got {}", state.height, rows.len()));
        }
        for (r, row) in rows.iter().enumerate() {
            let marks: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if marks.len() != state.width {
                return Err(format!("row {} has {} cells, expected {}", r, marks.len(), state.width));
            }
            for (c, ch) in marks.into_iter().enumerate() {
                state.cells[r * state.width + c] = match ch {
                    'X' | 'x' => Cell::Occupied(Side::First),
                    'O' | 'o' => Cell::Occupied(Side::Second),
                    '.' | '_' => Cell::Empty,
                    other => return Err(format!("unexpected character '{}' in row {}", other, r)),
                };
            }
        }
        for c in 0..state.width {
            for r in 0..state.height - 1 {
                let here = state.cells[r * state.width + c];
                let below = state.cells[(r + 1) * state.width + c];
                if here != Cell::Empty && below == Cell::Empty {
                    return Err(format!("floating piece at row {}, column {}", r, c));
                }
            }
        }
        Ok(state)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The row a piece dropped into `col` would land in, if the column has room.
    pub fn next_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&r| self.cells[r * self.width + col] == Cell::Empty)
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move; // Column to drop a piece

    fn possible_moves(&self) -> Vec<Self::Move> {
        self.column_order
            .iter()
            .copied()
            .filter(|&c| self.cells[c] == Cell::Empty)
            .map(Connect4Move)
            .collect()
    }

    /// A move is legal if the column is within bounds and the top row
    /// of that column is empty.
    fn is_legal(&self, mv: Self::Move) -> bool {
        mv.0 < self.width && self.cells[mv.0] == Cell::Empty
    }

    fn place(&mut self, mv: Self::Move, side: Side) -> Result<Location> {
        let row = self
            .next_open_row(mv.0)
            .ok_or(GameError::IllegalMove { position: mv.0 })?;
        self.cells[row * self.width + mv.0] = Cell::Occupied(side);
        Ok(Location::new(row, mv.0))
    }

    fn undo(&mut self, location: Location) {
        if location.row < self.height && location.col < self.width {
            self.cells[location.row * self.width + location.col] = Cell::Empty;
        }
    }

    fn move_at(&self, position: usize) -> Self::Move {
        Connect4Move(position)
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn line_size(&self) -> usize {
        self.line_size
    }

    fn win_score(&self) -> i32 {
        WIN_SCORE
    }

    fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Columns fill bottom-up, so the top row alone decides fullness.
    fn is_full(&self) -> bool {
        self.cells[..self.width].iter().all(|c| *c != Cell::Empty)
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    /// Creates a Connect4Move from a string representation
    ///
    /// Expected format is just the column number as a string.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use minimax::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 3);
    /// ```
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}
