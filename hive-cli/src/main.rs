//! Hive CLI - Command-line interface
//!
//! Commands:
//! - play: Run games between computer and random players
//! - perft: Count move-tree leaves and compare search node counts

mod perft;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "Hive rules engine and search AI")]
struct Cli {
    /// Log search progress (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Seed for random players and openings
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between AI and random players
    Play(play::PlayArgs),
    /// Count legal-move tree leaves
    Perft(perft::PerftArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Perft(args) => perft::run(args, cli.seed),
    }
}
