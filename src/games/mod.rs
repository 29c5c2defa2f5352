//! # Game Implementations Module
//!
//! Each game implements the [`GameState`](crate::GameState) trait, which
//! gives the search engine and the controller a common interface:
//! - Move generation in a fixed order and legality checks
//! - Placing and undoing marks
//! - Win and full-board detection
//!
//! ## Supported Games
//! - **Tic-Tac-Toe**: 3×3 board, free placement, three in a row
//! - **Connect 4**: Gravity-based connection game on a 6×7 grid
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. A move type convertible to its raw position index
//! 2. A board type with the `GameState` trait
//! 3. `Display` for the board and `FromStr` for moves

pub mod connect4;
pub mod tictactoe;
