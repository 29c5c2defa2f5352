//! # Minimax Arena
//!
//! Adversarial move selection for two deterministic, perfect-information,
//! zero-sum board games: 3×3 tic-tac-toe (free placement) and Connect 4
//! (gravity drop). Both games implement the [`GameState`] trait and are
//! searched by the same depth-first [`Minimax`] engine with optional
//! alpha-beta pruning.
//!
//! ## Modules
//! - [`games`] — the two board variants
//! - [`search`] — minimax with alpha-beta pruning
//! - [`game_controller`] — turn order, status and move history for a live game
//! - [`game_wrapper`] — runtime selection between the variants
//! - [`config`] — search configuration presets
//! - [`error`] — the crate's error type

pub mod config;
pub mod error;
pub mod game_controller;
pub mod game_wrapper;
pub mod games;
pub mod search;

use std::fmt;
use std::hash::Hash;

pub use config::SearchConfig;
pub use error::{GameError, Result};
pub use minimax_shared::Line;
pub use search::{Minimax, SearchResult, SearchStatistics};

/// One of the two players. `First` always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The side that opens the game (the human by default), marked `X`.
    First,
    /// The side that replies (the engine by default), marked `O`.
    Second,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// The mark drawn for this side.
    pub fn symbol(self) -> char {
        match self {
            Side::First => 'X',
            Side::Second => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single square of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Side),
}

/// The cell a move actually filled, as (row, col) with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The board abstraction the search engine and the controller work against.
///
/// A board stores marks only; the side to move is tracked by the caller and
/// passed to [`GameState::place`]. Boards are mutated in place and restored
/// with [`GameState::undo`], which lets the search explore hypothetical moves
/// without allocating a board per node.
pub trait GameState: Clone + fmt::Display {
    /// The position identifier a player picks (a cell or a column).
    type Move: Copy + Eq + Hash + fmt::Debug + fmt::Display + Into<usize>;

    /// Returns all legal moves in a fixed, deterministic order.
    fn possible_moves(&self) -> Vec<Self::Move>;
    /// True iff the move targets a cell (or column) with room left.
    fn is_legal(&self, mv: Self::Move) -> bool;
    /// Places `side`'s mark and returns the cell actually filled.
    fn place(&mut self, mv: Self::Move, side: Side) -> Result<Location>;
    /// Clears a single cell previously filled by [`GameState::place`].
    fn undo(&mut self, location: Location);
    /// Builds a move from the raw position identifier a player selected.
    fn move_at(&self, position: usize) -> Self::Move;
    /// All cells in row-major order.
    fn cells(&self) -> &[Cell];
    /// Board size as (rows, columns).
    fn dimensions(&self) -> (usize, usize);
    /// Number of marks in a row needed to win.
    fn line_size(&self) -> usize;
    /// Magnitude of the score awarded for a win found one ply below the root.
    fn win_score(&self) -> i32;
    /// Clears every cell.
    fn reset(&mut self);

    fn cell(&self, location: Location) -> Option<Cell> {
        let (rows, cols) = self.dimensions();
        if location.row >= rows || location.col >= cols {
            return None;
        }
        self.cells().get(location.row * cols + location.col).copied()
    }

    /// Full-board scan for a run of `side`'s marks.
    fn has_won(&self, side: Side) -> bool {
        let (rows, cols) = self.dimensions();
        minimax_shared::check_line_win(self.cells(), cols, rows, Cell::Occupied(side), self.line_size())
    }

    /// Checks only the lines passing through `location`.
    fn has_won_through(&self, location: Location, side: Side) -> bool {
        let (rows, cols) = self.dimensions();
        minimax_shared::check_line_through(
            self.cells(),
            cols,
            rows,
            location.row,
            location.col,
            Cell::Occupied(side),
            self.line_size(),
        )
    }

    /// The first winning run of `side`'s marks, if any.
    fn winning_line(&self, side: Side) -> Option<Line> {
        let (rows, cols) = self.dimensions();
        minimax_shared::winning_line(self.cells(), cols, rows, Cell::Occupied(side), self.line_size())
    }

    fn is_full(&self) -> bool {
        self.cells().iter().all(|c| *c != Cell::Empty)
    }

    fn is_draw(&self) -> bool {
        self.is_full() && !self.has_won(Side::First) && !self.has_won(Side::Second)
    }

    fn winner(&self) -> Option<Side> {
        [Side::First, Side::Second].into_iter().find(|&s| self.has_won(s))
    }

    fn is_terminal(&self) -> bool {
        self.is_full() || self.winner().is_some()
    }

    /// Number of marks `side` has on the board.
    fn count(&self, side: Side) -> usize {
        self.cells().iter().filter(|c| **c == Cell::Occupied(side)).count()
    }

    /// The side to move in a game where `First` opened and turns alternated.
    fn side_to_move(&self) -> Side {
        if self.count(Side::First) > self.count(Side::Second) {
            Side::Second
        } else {
            Side::First
        }
    }
}

/// Writes a board as rows of `X`, `O` and `.` separated by spaces.
pub(crate) fn write_grid(f: &mut fmt::Formatter<'_>, cells: &[Cell], cols: usize) -> fmt::Result {
    for row in cells.chunks(cols) {
        for (c, cell) in row.iter().enumerate() {
            let symbol = match cell {
                Cell::Occupied(side) => side.symbol(),
                Cell::Empty => '.',
            };
            if c > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", symbol)?;
        }
        writeln!(f)?;
    }
    Ok(())
}
