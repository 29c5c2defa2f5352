//! # Minimax Arena - Interactive Play
//!
//! Play tic-tac-toe or Connect 4 against the minimax engine in the terminal,
//! or watch the engine play itself.
//!
//! ## Usage
//! ```text
//! play --game connect4 --depth 6
//! play --game tictactoe --human-side second
//! play --game connect4 --self-play
//! ```
//! Enter a cell (tic-tac-toe, 0-8) or a column (Connect 4, 0-6) to move,
//! `h` for the move history, `r` to restart and `q` to quit.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use minimax::game_controller::{GameController, GameStatus};
use minimax::game_wrapper::{GameKind, GameWrapper};
use minimax::games::connect4::Connect4State;
use minimax::{Cell, GameState, Side};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SideArg {
    First,
    Second,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Side {
        match side {
            SideArg::First => Side::First,
            SideArg::Second => Side::Second,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play tic-tac-toe or Connect 4 against a minimax engine", long_about = None)]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameKind::Connect4)]
    game: GameKind,

    /// Search horizon in plies below the engine's move. Defaults to
    /// exhaustive for tic-tac-toe and 5 for Connect 4.
    #[arg(long)]
    depth: Option<u32>,

    /// Disable alpha-beta pruning
    #[arg(long, default_value_t = false)]
    no_pruning: bool,

    /// Check wins only through the last placed piece while searching
    #[arg(long, default_value_t = false)]
    incremental: bool,

    /// Side the human plays; `first` moves first
    #[arg(long, value_enum, default_value_t = SideArg::First)]
    human_side: SideArg,

    /// Let the engine play both sides
    #[arg(long, default_value_t = false)]
    self_play: bool,

    /// Connect 4 board width
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Connect 4 board height
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Connect 4 pieces in a row needed to win
    #[arg(long, default_value_t = 4)]
    line_size: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.width > 0 && args.height > 0 && args.line_size > 0,
        "board dimensions and line size must be positive"
    );

    let board = match args.game {
        GameKind::TicTacToe => args.game.new_game(),
        GameKind::Connect4 => GameWrapper::Connect4(Connect4State::new(args.width, args.height, args.line_size)),
    };
    let mut config = args.game.default_search_config().with_incremental(args.incremental);
    if args.depth.is_some() {
        config = config.with_depth_limit(args.depth);
    }
    if args.no_pruning {
        config = config.with_pruning(false);
    }
    info!(game = args.game.name(), ?config, "starting game");

    let mut controller = GameController::new(board, config).with_human_side(args.human_side.into());
    println!("{}", args.game.name().bold());
    println!("Commands: position to move, h = history, r = restart, q = quit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_board(controller.board());

        let status = controller.query_status();
        if status.is_game_over() {
            print_result(status, controller.human_side(), args.self_play);
            if args.self_play {
                print!("{}", controller.format_history());
                return Ok(());
            }
            print!("Play again? [r/q] ");
        } else if args.self_play || controller.is_engine_turn() {
            let side = controller.side_to_move();
            let result = controller
                .request_configured_ai_move()
                .context("engine failed to move")?;
            let stats = controller.last_statistics();
            println!(
                "{} plays {} (score {}, {} nodes, {:.3}s)\n",
                colored_side(side),
                result.mv,
                result.score,
                stats.total_nodes,
                stats.elapsed.as_secs_f64()
            );
            continue;
        } else {
            print!("{} to move > ", colored_side(controller.side_to_move()));
        }
        io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("failed to read input")?;
        let input = line.trim();
        debug!(input, "user input");

        match input {
            "q" | "quit" => return Ok(()),
            "r" | "reset" => {
                controller.reset();
                println!();
            }
            "h" | "history" => print!("{}", controller.format_history()),
            _ if status.is_game_over() => println!("The game is over. Enter r or q."),
            _ => match controller.board().parse_move(input) {
                Ok(mv) => {
                    if let Err(e) = controller.apply_human_move(mv.into()) {
                        println!("{}", e.to_string().red());
                    }
                }
                Err(e) => println!("{}", format!("Invalid input: {}", e).red()),
            },
        }
    }
}

fn colored_side(side: Side) -> colored::ColoredString {
    let symbol = side.symbol().to_string();
    match side {
        Side::First => symbol.red().bold(),
        Side::Second => symbol.yellow().bold(),
    }
}

/// Prints the board with position labels and the winning line highlighted.
fn print_board(board: &GameWrapper) {
    let (rows, cols) = board.dimensions();
    let line = [Side::First, Side::Second]
        .into_iter()
        .find_map(|side| board.winning_line(side));

    if let GameWrapper::Connect4(_) = board {
        let header: Vec<String> = (0..cols).map(|c| c.to_string()).collect();
        println!("{}", header.join(" ").dimmed());
    }
    for r in 0..rows {
        let mut cells = Vec::with_capacity(cols);
        for c in 0..cols {
            let cell = board.cells()[r * cols + c];
            let text = match cell {
                Cell::Occupied(side) => {
                    let mark = colored_side(side);
                    if line.is_some_and(|l| l.contains(r, c)) {
                        mark.on_bright_black()
                    } else {
                        mark
                    }
                }
                Cell::Empty => match board {
                    GameWrapper::TicTacToe(_) => (r * cols + c).to_string().dimmed(),
                    GameWrapper::Connect4(_) => ".".dimmed(),
                },
            };
            cells.push(text.to_string());
        }
        println!("{}", cells.join(" "));
    }
    println!();
}

fn print_result(status: GameStatus, human: Side, self_play: bool) {
    match status {
        GameStatus::Won(side) if self_play => println!("{} wins!", colored_side(side)),
        GameStatus::Won(side) if side == human => println!("{}", "You win!".green().bold()),
        GameStatus::Won(_) => println!("{}", "The engine wins!".red().bold()),
        GameStatus::Drawn => println!("{}", "It's a draw!".bold()),
        GameStatus::InProgress => {}
    }
}
