//! Box & Vertex arena
//!
//! Plays a match between two built-in strategies and prints the results.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vertex_bot::arena::{run_match, MatchConfig};
use vertex_bot::{StrategyKind, DEFAULT_DEPTH};
use vertex_core::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "arena", about = "Pit Box & Vertex strategies against each other")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Strategy for P1 (moves first)
    #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
    p1: StrategyKind,

    /// Strategy for P2
    #[arg(long, value_enum, default_value_t = StrategyKind::Random)]
    p2: StrategyKind,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 6)]
    board_size: u8,

    /// Place symmetric walls on the board
    #[arg(long)]
    blockers: bool,

    /// Games longer than this are abandoned
    #[arg(long, default_value_t = 500)]
    max_plies: usize,

    /// Search depth for the lookahead strategy
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Seconds between progress lines
    #[arg(long, default_value_t = 5)]
    log_interval: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("Box & Vertex Arena");
    println!("==================");
    println!(
        "{} (P1) vs {} (P2), {} games on {}x{}{}",
        args.p1,
        args.p2,
        args.games,
        args.board_size,
        args.board_size,
        if args.blockers { " with blockers" } else { "" }
    );
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing up...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let config = MatchConfig {
        games: args.games,
        game: GameConfig::new(args.board_size, args.blockers),
        max_plies: args.max_plies,
        seed: args.seed,
        depth: args.depth,
    };

    let stats = match run_match(&config, args.p1, args.p2, &running, args.log_interval) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("\n==================");
    println!("Match complete!");
    println!("==================");
    stats.print_summary();

    ExitCode::SUCCESS
}
