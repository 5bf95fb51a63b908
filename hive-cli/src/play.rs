//! Play command - run games between computer and random players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_seats(), play_match(), report_results()
//! - Level 3: play_single_game(), choose_move(), compute_match_statistics()
//! - Level 4: parsing and formatting utilities

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use hive_core::{
    AiConfig, Difficulty, GameEngine, GameResult, Move, Player, RandomPlayer, SearchAI,
    DEFAULT_BOARD_SIZE,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Player 1: easy, medium, hard or random
    #[arg(long, default_value = "easy")]
    pub player_one: PlayerKind,

    /// Player 2: easy, medium, hard or random
    #[arg(long, default_value = "random")]
    pub player_two: PlayerKind,

    /// AI config JSON file, overrides the difficulty presets for both sides
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Board side length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    pub board_size: i16,

    /// Stop a game as unfinished after this many moves
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Print the board after every move
    #[arg(long)]
    pub show_board: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Who controls one side
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKind {
    Computer(Difficulty),
    Random,
}

impl FromStr for PlayerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("random") {
            Ok(PlayerKind::Random)
        } else {
            Ok(PlayerKind::Computer(s.parse()?))
        }
    }
}

/// A side ready to play: its controller plus resolved search settings
enum Seat {
    Computer(AiConfig),
    Random(RandomPlayer),
}

/// Result of a single game
#[derive(Clone, Debug, serde::Serialize)]
struct GameRecord {
    game_number: usize,
    result: GameResult,
    moves: Vec<Move>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    player_one_wins: usize,
    player_two_wins: usize,
    draws: usize,
    unfinished: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve both seats (AI settings or seeded random players)
/// 2. Play the requested games
/// 3. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    if args.board_size < 3 {
        anyhow::bail!("board size must be at least 3, got {}", args.board_size);
    }

    let mut rng = create_rng(seed);
    let mut seats = build_seats(&args, &mut rng)?;

    tracing::info!(
        "Starting play: {:?} vs {:?} ({} games, board {})",
        args.player_one,
        args.player_two,
        args.games,
        args.board_size
    );

    let results = play_match(&mut seats, &args)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Resolve both player kinds into seats
fn build_seats(args: &PlayArgs, rng: &mut ChaCha8Rng) -> Result<[Seat; 2]> {
    let override_config = match &args.config {
        Some(path) => Some(
            AiConfig::load(path)
                .with_context(|| format!("Failed to load AI config: {}", path.display()))?,
        ),
        None => None,
    };

    let mut seat = |kind: PlayerKind| match kind {
        PlayerKind::Computer(difficulty) => Seat::Computer(
            override_config
                .clone()
                .unwrap_or_else(|| AiConfig::from_difficulty(difficulty)),
        ),
        PlayerKind::Random => Seat::Random(RandomPlayer::with_seed(rng.gen())),
    };

    Ok([seat(args.player_one), seat(args.player_two)])
}

/// Play all games in the match
fn play_match(seats: &mut [Seat; 2], args: &PlayArgs) -> Result<MatchResults> {
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let record = play_single_game(seats, game_num + 1, args)?;

        tracing::info!(
            "Game {}: {} ({} moves)",
            record.game_number,
            describe_result(record.result),
            record.moves.len()
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &PlayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to a result or the move cap
fn play_single_game(seats: &mut [Seat; 2], game_number: usize, args: &PlayArgs) -> Result<GameRecord> {
    let mut engine = GameEngine::new(args.board_size);
    let mut moves = Vec::new();

    while engine.result() == GameResult::Ongoing && moves.len() < args.max_moves {
        let player = engine.current_player();
        let mv = choose_move(&mut seats[player.index()], &mut engine).unwrap_or(Move::Pass);

        engine
            .try_play(mv, player)
            .with_context(|| format!("{} chose an illegal move: {}", player, mv))?;
        tracing::debug!("{}: {}", player, mv);

        if args.show_board {
            println!("{} plays {}\n{}", player, mv, engine.board());
        }
        moves.push(mv);
    }

    Ok(GameRecord {
        game_number,
        result: engine.result(),
        moves,
    })
}

/// Ask a seat for its move in the current position
fn choose_move(seat: &mut Seat, engine: &mut GameEngine) -> Option<Move> {
    match seat {
        Seat::Computer(config) => {
            let weights = config.weights.clone();
            SearchAI::with_weights(engine, weights).best_move(config)
        }
        Seat::Random(random) => random.choose(engine),
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.result == result).count();
    let player_one_wins = count(GameResult::Winner(Player::One));
    let player_two_wins = count(GameResult::Winner(Player::Two));
    let draws = count(GameResult::Draw);
    let unfinished = count(GameResult::Ongoing);

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        player_one_wins,
        player_two_wins,
        draws,
        unfinished,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn describe_result(result: GameResult) -> String {
    match result {
        GameResult::Ongoing => "unfinished".to_string(),
        GameResult::Winner(player) => format!("{} wins", player),
        GameResult::Draw => "draw".to_string(),
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        player_one_wins: usize,
        player_two_wins: usize,
        draws: usize,
        unfinished: usize,
        avg_moves: f32,
        games: &'a [GameRecord],
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        player_one_wins: results.player_one_wins,
        player_two_wins: results.player_two_wins,
        draws: results.draws,
        unfinished: results.unfinished,
        avg_moves: results.avg_moves,
        games: &results.games,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();
    let pct = |n: usize| {
        if total > 0 {
            n as f32 / total as f32 * 100.0
        } else {
            0.0
        }
    };

    println!("\n=== Match Results ===");
    println!("Total games:     {}", total);
    println!("Player 1 wins:   {} ({:.1}%)", results.player_one_wins, pct(results.player_one_wins));
    println!("Player 2 wins:   {} ({:.1}%)", results.player_two_wins, pct(results.player_two_wins));
    println!("Draws:           {} ({:.1}%)", results.draws, pct(results.draws));
    println!("Unfinished:      {} ({:.1}%)", results.unfinished, pct(results.unfinished));
    println!("Avg moves:       {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {} in {} moves",
            game.game_number,
            describe_result(game.result),
            game.moves.len()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
