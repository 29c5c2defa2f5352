use anyhow::{ensure, Result};
use clap::Parser;
use colored::Colorize;
use minimax::game_wrapper::{GameKind, GameWrapper};
use minimax::{GameState, Minimax, SearchConfig, Side};
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compares plain minimax with alpha-beta pruning", long_about = None)]
struct Args {
    /// Game to benchmark
    #[arg(long, value_enum, default_value_t = GameKind::Connect4)]
    game: GameKind,

    /// Search horizon (default: exhaustive for tic-tac-toe, 5 for Connect 4)
    #[arg(long)]
    depth: Option<u32>,

    /// Number of random positions to search (default: 20)
    #[arg(long, default_value_t = 20)]
    positions: usize,

    /// Random plies played before each search (default: 4)
    #[arg(long, default_value_t = 4)]
    opening_plies: usize,

    /// Seed for the opening generator
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,

    /// Also run the pruned search with incremental win checks
    #[arg(long, default_value_t = false)]
    incremental: bool,
}

#[derive(Debug, Default)]
struct Totals {
    nodes: u64,
    cutoffs: u64,
    elapsed: Duration,
}

impl Totals {
    fn add(&mut self, engine: &Minimax) {
        let stats = engine.last_statistics();
        self.nodes += stats.total_nodes;
        self.cutoffs += stats.cutoffs;
        self.elapsed += stats.elapsed;
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let depth = args.depth.or(args.game.default_search_config().depth_limit);

    println!("Minimax Arena - Benchmark Tool");
    println!("==============================");
    println!("Game: {}", args.game.name());
    println!("Depth: {}", depth.map_or("exhaustive".to_string(), |d| d.to_string()));
    println!("Positions: {}", args.positions);
    println!("Opening plies: {}", args.opening_plies);
    println!("------------------------------");

    #[cfg(debug_assertions)]
    println!("WARNING: Running in debug mode. Performance will be significantly lower.\nUse --release for accurate benchmarks.\n");

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(args.seed);
    let mut plain = Minimax::new(false);
    let mut pruned = Minimax::new(true);
    let mut incremental = Minimax::from_config(&SearchConfig::default().with_incremental(true));
    let (mut plain_totals, mut pruned_totals, mut incremental_totals) =
        (Totals::default(), Totals::default(), Totals::default());

    let mut searched = 0;
    for i in 0..args.positions {
        let Some((mut board, side)) = random_position(args.game, args.opening_plies, &mut rng) else {
            debug!(position = i, "random opening ended the game, skipping");
            continue;
        };

        let a = plain.choose_move(&mut board, side, depth)?;
        plain_totals.add(&plain);
        let b = pruned.choose_move(&mut board, side, depth)?;
        pruned_totals.add(&pruned);
        ensure!(a == b, "pruning changed the result on position {}: {:?} vs {:?}\n{}", i, a, b, board);

        if args.incremental {
            let c = incremental.choose_move(&mut board, side, depth)?;
            incremental_totals.add(&incremental);
            ensure!(a == c, "incremental checks changed the result on position {}\n{}", i, board);
        }
        info!(position = i, mv = %a.mv, score = a.score, "position searched");
        searched += 1;
    }

    println!("\nSearched {} positions, all results identical.\n", searched);
    print_stats("Minimax", &plain_totals);
    print_stats("Alpha-beta", &pruned_totals);
    if args.incremental {
        print_stats("Alpha-beta + incremental", &incremental_totals);
    }
    if pruned_totals.nodes > 0 {
        let ratio = plain_totals.nodes as f64 / pruned_totals.nodes as f64;
        println!("{}", format!("Pruning visits {:.1}x fewer nodes", ratio).green().bold());
    }
    Ok(())
}

/// Plays `plies` uniformly random legal moves from an empty board.
/// Returns `None` if the game ends during the opening.
fn random_position(game: GameKind, plies: usize, rng: &mut Xoshiro256PlusPlus) -> Option<(GameWrapper, Side)> {
    let mut board = game.new_game();
    let mut side = Side::First;
    for _ in 0..plies {
        let moves = board.possible_moves();
        if moves.is_empty() {
            return None;
        }
        let mv = moves[rng.next_u32() as usize % moves.len()];
        board.place(mv, side).ok()?;
        if board.is_terminal() {
            return None;
        }
        side = side.opponent();
    }
    Some((board, side))
}

fn print_stats(name: &str, totals: &Totals) {
    let secs = totals.elapsed.as_secs_f64();
    let nps = if secs > 0.0 { totals.nodes as f64 / secs } else { 0.0 };

    println!("{} Results:", name);
    println!("  Total Nodes: {}", totals.nodes);
    println!("  Cutoffs: {}", totals.cutoffs);
    println!("  Time: {:.3}s", secs);
    println!("  NPS: {:.0} nodes/sec", nps);
}
