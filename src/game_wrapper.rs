//! # Game Wrapper Module - Unified Game Interface
//!
//! Lets the controller and the binaries pick a game at runtime while the
//! search engine stays generic. [`GameWrapper`] implements [`GameState`] by
//! delegating to the wrapped board, so the engine searches it like any
//! other game.

use crate::config::{SearchConfig, DEFAULT_CONNECT4_DEPTH};
use crate::error::{GameError, Result};
use crate::games::connect4::{Connect4Move, Connect4State};
use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};
use crate::{Cell, GameState, Location, Side};
use std::fmt;

/// The games this crate can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GameKind {
    /// 3×3 tic-tac-toe, free placement, three in a row.
    #[value(name = "tictactoe")]
    TicTacToe,
    /// 6×7 Connect 4, gravity drop, four in a row.
    #[value(name = "connect4")]
    Connect4,
}

impl GameKind {
    /// A fresh, empty board for this game.
    pub fn new_game(self) -> GameWrapper {
        match self {
            GameKind::TicTacToe => GameWrapper::TicTacToe(TicTacToeState::new()),
            GameKind::Connect4 => GameWrapper::Connect4(Connect4State::default()),
        }
    }

    /// Exhaustive search for tic-tac-toe, depth-bounded alpha-beta for Connect 4.
    pub fn default_search_config(self) -> SearchConfig {
        match self {
            GameKind::TicTacToe => SearchConfig::exhaustive(),
            GameKind::Connect4 => SearchConfig::bounded(DEFAULT_CONNECT4_DEPTH),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic-Tac-Toe",
            GameKind::Connect4 => "Connect 4",
        }
    }
}

/// Wrapper enum for all supported game types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameWrapper {
    TicTacToe(TicTacToeState),
    Connect4(Connect4State),
}

/// Wrapper enum for all supported move types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveWrapper {
    /// Cell index 0..9
    TicTacToe(TicTacToeMove),
    /// Column index; gravity decides the row
    Connect4(Connect4Move),
}

impl From<MoveWrapper> for usize {
    fn from(mv: MoveWrapper) -> usize {
        match mv {
            MoveWrapper::TicTacToe(m) => m.0,
            MoveWrapper::Connect4(m) => m.0,
        }
    }
}

impl fmt::Display for MoveWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveWrapper::TicTacToe(m) => write!(f, "T({})", m.0),
            MoveWrapper::Connect4(m) => write!(f, "C4({})", m.0),
        }
    }
}

impl fmt::Display for GameWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameWrapper::TicTacToe(g) => write!(f, "{}", g),
            GameWrapper::Connect4(g) => write!(f, "{}", g),
        }
    }
}

impl GameWrapper {
    pub fn kind(&self) -> GameKind {
        match self {
            GameWrapper::TicTacToe(_) => GameKind::TicTacToe,
            GameWrapper::Connect4(_) => GameKind::Connect4,
        }
    }

    /// Parses user input into a move for the wrapped game.
    pub fn parse_move(&self, input: &str) -> std::result::Result<MoveWrapper, String> {
        match self {
            GameWrapper::TicTacToe(_) => input.parse().map(MoveWrapper::TicTacToe),
            GameWrapper::Connect4(_) => input.parse().map(MoveWrapper::Connect4),
        }
    }
}

impl GameState for GameWrapper {
    type Move = MoveWrapper;

    fn possible_moves(&self) -> Vec<Self::Move> {
        match self {
            GameWrapper::TicTacToe(g) => g.possible_moves().into_iter().map(MoveWrapper::TicTacToe).collect(),
            GameWrapper::Connect4(g) => g.possible_moves().into_iter().map(MoveWrapper::Connect4).collect(),
        }
    }

    fn is_legal(&self, mv: Self::Move) -> bool {
        match (self, mv) {
            (GameWrapper::TicTacToe(g), MoveWrapper::TicTacToe(m)) => g.is_legal(m),
            (GameWrapper::Connect4(g), MoveWrapper::Connect4(m)) => g.is_legal(m),
            _ => false,
        }
    }

    fn place(&mut self, mv: Self::Move, side: Side) -> Result<Location> {
        match (self, mv) {
            (GameWrapper::TicTacToe(g), MoveWrapper::TicTacToe(m)) => g.place(m, side),
            (GameWrapper::Connect4(g), MoveWrapper::Connect4(m)) => g.place(m, side),
            (_, mv) => Err(GameError::IllegalMove { position: mv.into() }),
        }
    }

    fn undo(&mut self, location: Location) {
        match self {
            GameWrapper::TicTacToe(g) => g.undo(location),
            GameWrapper::Connect4(g) => g.undo(location),
        }
    }

    fn move_at(&self, position: usize) -> Self::Move {
        match self {
            GameWrapper::TicTacToe(g) => MoveWrapper::TicTacToe(g.move_at(position)),
            GameWrapper::Connect4(g) => MoveWrapper::Connect4(g.move_at(position)),
        }
    }

    fn cells(&self) -> &[Cell] {
        match self {
            GameWrapper::TicTacToe(g) => g.cells(),
            GameWrapper::Connect4(g) => g.cells(),
        }
    }

    fn dimensions(&self) -> (usize, usize) {
        match self {
            GameWrapper::TicTacToe(g) => g.dimensions(),
            GameWrapper::Connect4(g) => g.dimensions(),
        }
    }

    fn line_size(&self) -> usize {
        match self {
            GameWrapper::TicTacToe(g) => g.line_size(),
            GameWrapper::Connect4(g) => g.line_size(),
        }
    }

    fn win_score(&self) -> i32 {
        match self {
            GameWrapper::TicTacToe(g) => g.win_score(),
            GameWrapper::Connect4(g) => g.win_score(),
        }
    }

    fn reset(&mut self) {
        match self {
            GameWrapper::TicTacToe(g) => g.reset(),
            GameWrapper::Connect4(g) => g.reset(),
        }
    }

    fn is_full(&self) -> bool {
        match self {
            GameWrapper::TicTacToe(g) => g.is_full(),
            GameWrapper::Connect4(g) => g.is_full(),
        }
    }
}
