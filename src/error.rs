//! Error types for the game engines and the controller.

use crate::Side;

/// Errors raised by boards, the search engine and the game controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The targeted cell is occupied, the targeted column is full, or the
    /// position is off the board. No state was changed.
    #[error("illegal move at position {position}")]
    IllegalMove { position: usize },

    /// A search was requested on a board with no empty cell left.
    #[error("no legal move available: the board is full")]
    NoLegalMove,

    /// The game has already been won or drawn; reset before playing on.
    #[error("the game is already over")]
    GameAlreadyOver,

    /// A move was submitted for the side that is not to move.
    #[error("it is {expected}'s turn, not {actual}'s")]
    NotYourTurn { expected: Side, actual: Side },
}

pub type Result<T> = std::result::Result<T, GameError>;
