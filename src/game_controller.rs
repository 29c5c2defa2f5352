//! # Game Controller Module - Central Game State Management
//!
//! The [`GameController`] owns the authoritative board of a live game. It
//! enforces turn order, validates human moves, asks the [`Minimax`] engine
//! for the automated side's reply, tracks the game status and keeps a move
//! history. Presentation layers drive it through four calls:
//!
//! - [`GameController::apply_human_move`]
//! - [`GameController::request_ai_move`]
//! - [`GameController::query_status`]
//! - [`GameController::reset`]
//!
//! and may subscribe to a channel of [`GameEvent`]s to learn about moves and
//! results without polling.

use crate::config::SearchConfig;
use crate::error::{GameError, Result};
use crate::search::{Minimax, SearchResult, SearchStatistics};
use crate::{GameState, Location, Side};
use std::sync::mpsc::Sender;
use std::time::SystemTime;
use tracing::{debug, info, instrument};

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Won(Side),
    /// Board filled with no winner
    Drawn,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Derives the status of an arbitrary board.
    pub fn of<S: GameState>(board: &S) -> Self {
        match board.winner() {
            Some(side) => GameStatus::Won(side),
            None if board.is_full() => GameStatus::Drawn,
            None => GameStatus::InProgress,
        }
    }
}

/// Notifications sent to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent<M> {
    /// A mark was placed.
    MovePlayed { side: Side, mv: M, location: Location },
    /// The engine finished choosing a move.
    SearchFinished(SearchResult<M>),
    /// The last move ended the game.
    GameOver(GameStatus),
    /// The board was cleared.
    Reset,
}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry<M> {
    /// When the move was made
    pub timestamp: SystemTime,
    /// Move number (1-indexed)
    pub move_number: usize,
    /// Side that made the move
    pub side: Side,
    /// The move that was made
    pub mv: M,
    /// The cell it filled
    pub location: Location,
    /// Engine score, for moves chosen by the search
    pub score: Option<i32>,
}

/// The central game controller that owns the authoritative game state
///
/// # Usage
/// ```
/// use minimax::game_controller::{GameController, GameStatus};
/// use minimax::games::tictactoe::TicTacToeState;
/// use minimax::SearchConfig;
///
/// let mut controller = GameController::new(TicTacToeState::new(), SearchConfig::exhaustive());
/// controller.apply_human_move(4).unwrap();
/// let reply = controller.request_ai_move(None).unwrap();
/// assert_ne!(reply.mv.0, 4);
/// assert_eq!(controller.query_status(), GameStatus::InProgress);
/// ```
#[derive(Debug)]
pub struct GameController<S: GameState> {
    board: S,
    side_to_move: Side,
    human_side: Side,
    status: GameStatus,
    history: Vec<MoveHistoryEntry<S::Move>>,
    engine: Minimax,
    config: SearchConfig,
    events: Option<Sender<GameEvent<S::Move>>>,
}

impl<S: GameState> GameController<S> {
    /// Creates a controller for `board`, with the human playing `First`.
    ///
    /// The side to move and the status are derived from the board, so a
    /// position set up in advance can be continued.
    pub fn new(board: S, config: SearchConfig) -> Self {
        Self {
            side_to_move: board.side_to_move(),
            status: GameStatus::of(&board),
            board,
            human_side: Side::First,
            history: Vec::new(),
            engine: Minimax::from_config(&config),
            config,
            events: None,
        }
    }

    /// Lets the human play `side` instead of `First`.
    pub fn with_human_side(mut self, side: Side) -> Self {
        self.human_side = side;
        self
    }

    /// Subscribes a channel to the controller's [`GameEvent`]s.
    pub fn with_event_sender(mut self, tx: Sender<GameEvent<S::Move>>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Places the human's mark at `position` (a cell or a column).
    ///
    /// # Errors
    /// - [`GameError::GameAlreadyOver`] once the game is won or drawn
    /// - [`GameError::NotYourTurn`] when the engine is to move
    /// - [`GameError::IllegalMove`] for an occupied cell or full column
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, position: usize) -> Result<Location> {
        if self.status.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if self.side_to_move != self.human_side {
            return Err(GameError::NotYourTurn {
                expected: self.side_to_move,
                actual: self.human_side,
            });
        }
        let mv = self.board.move_at(position);
        self.apply(mv, None)
    }

    /// Searches for the side to move, plays the chosen move and returns it.
    ///
    /// # Errors
    /// - [`GameError::NoLegalMove`] if the board is full
    /// - [`GameError::GameAlreadyOver`] if the game was already won
    #[instrument(skip(self))]
    pub fn request_ai_move(&mut self, depth_limit: Option<u32>) -> Result<SearchResult<S::Move>> {
        if self.board.is_full() {
            return Err(GameError::NoLegalMove);
        }
        if self.status.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let side = self.side_to_move;
        let result = self.engine.choose_move(&mut self.board, side, depth_limit)?;
        info!(
            side = %side,
            mv = %result.mv,
            score = result.score,
            nodes = self.engine.last_statistics().total_nodes,
            "engine move chosen"
        );
        self.notify(GameEvent::SearchFinished(result));
        self.apply(result.mv, Some(result.score))?;
        Ok(result)
    }

    /// Plays the engine's move using the configured depth limit.
    pub fn request_configured_ai_move(&mut self) -> Result<SearchResult<S::Move>> {
        self.request_ai_move(self.config.depth_limit)
    }

    pub fn query_status(&self) -> GameStatus {
        self.status
    }

    /// Clears the board and hands the move back to `First`.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.reset();
        self.side_to_move = Side::First;
        self.status = GameStatus::InProgress;
        self.history.clear();
        info!("game reset");
        self.notify(GameEvent::Reset);
    }

    pub fn board(&self) -> &S {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn human_side(&self) -> Side {
        self.human_side
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// True when the side to move is played by the engine.
    pub fn is_engine_turn(&self) -> bool {
        !self.status.is_game_over() && self.side_to_move != self.human_side
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<S::Move> {
        if self.status.is_game_over() {
            Vec::new()
        } else {
            self.board.possible_moves()
        }
    }

    pub fn move_history(&self) -> &[MoveHistoryEntry<S::Move>] {
        &self.history
    }

    /// Statistics of the engine's most recent search.
    pub fn last_statistics(&self) -> &SearchStatistics {
        self.engine.last_statistics()
    }

    /// Formats the move history, one line per move, followed by the result.
    pub fn format_history(&self) -> String {
        if self.history.is_empty() {
            return String::from("No moves made yet.\n");
        }

        let mut output = String::new();
        for entry in &self.history {
            output.push_str(&format!("{}. {} - {}", entry.move_number, entry.side, entry.mv));
            if let Some(score) = entry.score {
                output.push_str(&format!(" (score {})", score));
            }
            output.push('\n');
        }

        match self.status {
            GameStatus::Won(side) => output.push_str(&format!("\nResult: {} wins!\n", side)),
            GameStatus::Drawn => output.push_str("\nResult: Draw\n"),
            GameStatus::InProgress => {
                output.push_str(&format!("\n(Game in progress - {} to move)\n", self.side_to_move))
            }
        }
        output
    }

    fn apply(&mut self, mv: S::Move, score: Option<i32>) -> Result<Location> {
        let side = self.side_to_move;
        let location = self.board.place(mv, side)?;
        self.history.push(MoveHistoryEntry {
            timestamp: SystemTime::now(),
            move_number: self.history.len() + 1,
            side,
            mv,
            location,
            score,
        });
        self.side_to_move = side.opponent();
        debug!(side = %side, %mv, %location, "move applied");
        self.notify(GameEvent::MovePlayed { side, mv, location });

        // Only the mover can have completed a line, and only through `location`.
        if self.board.has_won_through(location, side) {
            self.status = GameStatus::Won(side);
        } else if self.board.is_full() {
            self.status = GameStatus::Drawn;
        }
        if self.status.is_game_over() {
            info!(status = ?self.status, "game over");
            self.notify(GameEvent::GameOver(self.status));
        }
        Ok(location)
    }

    fn notify(&self, event: GameEvent<S::Move>) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect4::{Connect4Move, Connect4State};
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};
    use std::sync::mpsc;

    fn tictactoe() -> GameController<TicTacToeState> {
        GameController::new(TicTacToeState::new(), SearchConfig::exhaustive())
    }

    #[test]
    fn test_valid_move() {
        let mut controller = tictactoe();
        let loc = controller.apply_human_move(4).unwrap();
        assert_eq!(loc, Location::new(1, 1));
        assert_eq!(controller.side_to_move(), Side::Second);
        assert_eq!(controller.query_status(), GameStatus::InProgress);
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut controller = GameController::new(
            TicTacToeState::from_layout("X__ _O_ ___").unwrap(),
            SearchConfig::exhaustive(),
        );
        let before = controller.board().clone();
        assert_eq!(
            controller.apply_human_move(4),
            Err(GameError::IllegalMove { position: 4 })
        );
        assert_eq!(controller.board(), &before);
        assert_eq!(controller.side_to_move(), Side::First);
        assert!(controller.move_history().is_empty());
    }

    #[test]
    fn test_out_of_turn() {
        let mut controller = tictactoe();
        controller.apply_human_move(0).unwrap();
        assert_eq!(
            controller.apply_human_move(1),
            Err(GameError::NotYourTurn {
                expected: Side::Second,
                actual: Side::First
            })
        );
    }

    #[test]
    fn test_ai_reply_and_history() {
        let mut controller = tictactoe();
        controller.apply_human_move(0).unwrap();
        let reply = controller.request_ai_move(None).unwrap();
        assert!(reply.mv != TicTacToeMove(0));
        assert_eq!(controller.move_history().len(), 2);
        assert_eq!(controller.move_history()[0].side, Side::First);
        assert_eq!(controller.move_history()[1].side, Side::Second);
        assert_eq!(controller.move_history()[1].score, Some(reply.score));
        assert_eq!(controller.side_to_move(), Side::First);
    }

    #[test]
    fn test_win_ends_game() {
        let board = TicTacToeState::from_layout("XX_ OO_ ___").unwrap();
        let (tx, rx) = mpsc::channel();
        let mut controller = GameController::new(board, SearchConfig::exhaustive()).with_event_sender(tx);
        assert_eq!(controller.side_to_move(), Side::First);

        controller.apply_human_move(2).unwrap();
        assert_eq!(controller.query_status(), GameStatus::Won(Side::First));
        assert_eq!(controller.apply_human_move(5), Err(GameError::GameAlreadyOver));
        assert_eq!(controller.request_ai_move(None), Err(GameError::GameAlreadyOver));
        assert!(controller.legal_moves().is_empty());

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                GameEvent::MovePlayed {
                    side: Side::First,
                    mv: TicTacToeMove(2),
                    location: Location::new(0, 2)
                },
                GameEvent::GameOver(GameStatus::Won(Side::First)),
            ]
        );
    }

    #[test]
    fn test_full_board_draw() {
        let board = TicTacToeState::from_layout("XOX XOO OX_").unwrap();
        let mut controller = GameController::new(board, SearchConfig::exhaustive());
        assert_eq!(controller.side_to_move(), Side::First);
        controller.apply_human_move(8).unwrap();
        assert_eq!(controller.query_status(), GameStatus::Drawn);
        assert_eq!(controller.request_ai_move(None), Err(GameError::NoLegalMove));
    }

    #[test]
    fn test_reset() {
        let (tx, rx) = mpsc::channel();
        let mut controller = tictactoe().with_event_sender(tx);
        controller.apply_human_move(4).unwrap();
        controller.request_ai_move(None).unwrap();
        controller.reset();

        assert!(controller.move_history().is_empty());
        assert_eq!(controller.board(), &TicTacToeState::new());
        assert_eq!(controller.side_to_move(), Side::First);
        assert_eq!(controller.query_status(), GameStatus::InProgress);
        assert_eq!(rx.try_iter().last(), Some(GameEvent::Reset));
    }

    #[test]
    fn test_connect4_engine_opening() {
        let mut controller =
            GameController::new(Connect4State::default(), SearchConfig::default()).with_human_side(Side::Second);
        assert!(controller.is_engine_turn());
        let result = controller.request_configured_ai_move().unwrap();
        assert_eq!(result.mv, Connect4Move(3));
        assert_eq!(controller.move_history()[0].location, Location::new(5, 3));
    }

    #[test]
    fn test_format_history() {
        let mut controller = tictactoe();
        controller.apply_human_move(4).unwrap();
        let history = controller.format_history();
        assert!(history.contains("1. X - 4"));
        assert!(history.contains("O to move"));
    }
}
