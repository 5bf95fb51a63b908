//! Perft command - count move-tree leaves and time the search
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_position(), run_perft(), run_search_comparison(), report_results()
//! - Level 3: perft_at_depth(), time_search()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hive_core::{GameEngine, Move, Player, RandomPlayer, SearchAI, DEFAULT_BOARD_SIZE};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PerftArgs {
    /// Deepest perft depth to count
    #[arg(long, default_value = "3")]
    pub depth: u32,

    /// Board side length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub board_size: i16,

    /// Random plies to play before counting
    #[arg(long, default_value = "0")]
    pub opening_plies: usize,

    /// Also compare minimax and alpha-beta node counts up to this depth
    #[arg(long)]
    pub search_depth: Option<u32>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Leaf count at one depth
#[derive(Clone, Debug, serde::Serialize)]
struct PerftResult {
    depth: u32,
    nodes: u64,
    time_ms: f64,
}

/// Minimax vs alpha-beta at one depth
#[derive(Clone, Debug, serde::Serialize)]
struct SearchResult {
    depth: u32,
    score: i32,
    minimax_nodes: u64,
    alpha_beta_nodes: u64,
    minimax_ms: f64,
    alpha_beta_ms: f64,
}

#[derive(Clone, Debug, Default, serde::Serialize)]
struct AllResults {
    opening: Vec<Move>,
    perft: Vec<PerftResult>,
    search: Vec<SearchResult>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run perft command
///
/// 1. Build the starting position (optionally after random plies)
/// 2. Count leaves for each depth
/// 3. Optionally compare search node counts
/// 4. Report all results
pub fn run(args: PerftArgs, seed: Option<u64>) -> Result<()> {
    if args.board_size < 3 {
        anyhow::bail!("board size must be at least 3, got {}", args.board_size);
    }

    let mut rng = create_rng(seed);
    let (mut engine, opening) = build_position(&args, &mut rng);

    tracing::info!(
        "Starting perft to depth {} after {} opening plies",
        args.depth,
        opening.len()
    );

    let mut results = AllResults {
        opening,
        ..AllResults::default()
    };
    run_perft(&mut engine, &args, &mut results);

    if let Some(depth) = args.search_depth {
        run_search_comparison(&mut engine, depth, &mut results);
    }

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play random plies from an empty board, stopping early if the game ends
fn build_position(args: &PerftArgs, rng: &mut ChaCha8Rng) -> (GameEngine, Vec<Move>) {
    let mut engine = GameEngine::new(args.board_size);
    let mut random = RandomPlayer::with_seed(rng.gen());
    let mut opening = Vec::with_capacity(args.opening_plies);

    for _ in 0..args.opening_plies {
        if engine.is_game_over() {
            break;
        }
        let mv = random.choose(&engine).unwrap_or(Move::Pass);
        engine.apply_move(mv, engine.current_player());
        opening.push(mv);
    }

    (engine, opening)
}

fn run_perft(engine: &mut GameEngine, args: &PerftArgs, results: &mut AllResults) {
    for depth in 1..=args.depth {
        let result = perft_at_depth(engine, depth);
        tracing::info!("perft({}) = {} in {:.1}ms", depth, result.nodes, result.time_ms);
        results.perft.push(result);
    }
}

fn run_search_comparison(engine: &mut GameEngine, max_depth: u32, results: &mut AllResults) {
    for depth in 1..=max_depth {
        let result = time_search(engine, depth);
        tracing::info!(
            "search depth {}: minimax {} nodes, alpha-beta {} nodes",
            depth,
            result.minimax_nodes,
            result.alpha_beta_nodes
        );
        results.search.push(result);
    }
}

fn report_results(results: &AllResults, args: &PerftArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn perft_at_depth(engine: &mut GameEngine, depth: u32) -> PerftResult {
    let start = Instant::now();
    let nodes = engine.perft(depth);
    PerftResult {
        depth,
        nodes,
        time_ms: millis(start.elapsed()),
    }
}

/// Run minimax then alpha-beta from the same position
fn time_search(engine: &mut GameEngine, depth: u32) -> SearchResult {
    let maximizing = engine.current_player() == Player::One;
    let mut ai = SearchAI::new(engine);

    let start = Instant::now();
    let score = ai.minimax(depth, maximizing);
    let minimax_ms = millis(start.elapsed());
    let minimax_nodes = ai.stats().nodes;

    ai.reset_stats();
    let start = Instant::now();
    let pruned = ai.alpha_beta(depth, maximizing, i32::MIN, i32::MAX);
    let alpha_beta_ms = millis(start.elapsed());
    if pruned != score {
        tracing::warn!("alpha-beta score {} differs from minimax {}", pruned, score);
    }

    SearchResult {
        depth,
        score,
        minimax_nodes,
        alpha_beta_nodes: ai.stats().nodes,
        minimax_ms,
        alpha_beta_ms,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Format duration for display
fn format_duration(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{:.1}us", ms * 1000.0)
    }
}

fn print_json_results(results: &AllResults) {
    match serde_json::to_string_pretty(results) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

fn print_text_results(results: &AllResults) {
    println!("\n=== Perft ===");
    if !results.opening.is_empty() {
        println!("Opening: {} plies", results.opening.len());
    }
    println!("{:<6} {:>14} {:>12}", "Depth", "Nodes", "Time");
    println!("{}", "-".repeat(34));
    for r in &results.perft {
        println!("{:<6} {:>14} {:>12}", r.depth, r.nodes, format_duration(r.time_ms));
    }

    if results.search.is_empty() {
        return;
    }

    println!("\n=== Search ===");
    println!(
        "{:<6} {:>8} {:>14} {:>14} {:>12} {:>12}",
        "Depth", "Score", "Minimax", "Alpha-Beta", "MM Time", "AB Time"
    );
    println!("{}", "-".repeat(72));
    for r in &results.search {
        println!(
            "{:<6} {:>8} {:>14} {:>14} {:>12} {:>12}",
            r.depth,
            r.score,
            r.minimax_nodes,
            r.alpha_beta_nodes,
            format_duration(r.minimax_ms),
            format_duration(r.alpha_beta_ms)
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
