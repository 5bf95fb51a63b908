//! Minimax / alpha-beta search with time-bounded iterative deepening
//!
//! The search walks the tree by applying and undoing moves on the one
//! engine it borrows; no board is ever cloned. Player one is the
//! maximizing side.

use std::time::{Duration, Instant};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::config::AiConfig;
use crate::eval::{evaluate, EvalWeights};
use crate::game::{GameEngine, Move};
use crate::pieces::Player;

/// Node counters for the last search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
}

fn side(maximizing: bool) -> Player {
    if maximizing {
        Player::One
    } else {
        Player::Two
    }
}

// ============================================================================
// SEARCH AI
// ============================================================================

/// Game-tree search over a borrowed engine
pub struct SearchAI<'a> {
    engine: &'a mut GameEngine,
    weights: EvalWeights,
    stats: SearchStats,
}

impl<'a> SearchAI<'a> {
    pub fn new(engine: &'a mut GameEngine) -> Self {
        Self::with_weights(engine, EvalWeights::default())
    }

    pub fn with_weights(engine: &'a mut GameEngine, weights: EvalWeights) -> Self {
        Self {
            engine,
            weights,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    /// Static evaluation of the current position
    pub fn evaluate_board(&self) -> i32 {
        evaluate(&*self.engine, &self.weights)
    }

    /// Best move for the side to move under `config`
    pub fn best_move(&mut self, config: &AiConfig) -> Option<Move> {
        let maximizing = self.engine.current_player() == Player::One;
        self.iterative_deepening(maximizing, config.max_depth, config.time_limit())
    }

    // ========================================================================
    // TREE SEARCH
    // ========================================================================

    /// Plain fixed-depth minimax
    pub fn minimax(&mut self, depth: u32, maximizing: bool) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || self.engine.is_game_over() {
            return self.evaluate_board();
        }

        let player = side(maximizing);
        let moves = self.engine.all_moves(player);
        if moves.is_empty() {
            return self.evaluate_board();
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            self.engine.apply_move(mv, player);
            let score = self.minimax(depth - 1, !maximizing);
            self.engine.undo_move(mv, player);

            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }

    /// Minimax with alpha-beta pruning; same value as `minimax` for the
    /// same depth and a full window
    pub fn alpha_beta(&mut self, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
        self.stats.nodes += 1;
        if depth == 0 || self.engine.is_game_over() {
            return self.evaluate_board();
        }

        let player = side(maximizing);
        let moves = self.engine.all_moves(player);
        if moves.is_empty() {
            return self.evaluate_board();
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                self.engine.apply_move(mv, player);
                let score = self.alpha_beta(depth - 1, false, alpha, beta);
                self.engine.undo_move(mv, player);

                best = best.max(score);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                self.engine.apply_move(mv, player);
                let score = self.alpha_beta(depth - 1, true, alpha, beta);
                self.engine.undo_move(mv, player);

                best = best.min(score);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// Root search at one depth. Returns the best move found and whether
    /// every root move was searched before the deadline.
    ///
    /// The clock is read only between root moves, and not at all at depth 1,
    /// so a depth-1 search always completes.
    pub fn find_best_move(
        &mut self,
        depth: u32,
        maximizing: bool,
        start: Instant,
        time_limit: Duration,
    ) -> (Option<Move>, bool) {
        let player = side(maximizing);
        let moves = self.engine.all_moves(player);

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        let mut fully_evaluated = true;

        for mv in moves {
            if depth > 1 && start.elapsed() >= time_limit {
                fully_evaluated = false;
                break;
            }

            self.engine.apply_move(mv, player);
            let score = self.alpha_beta(depth.saturating_sub(1), !maximizing, i32::MIN, i32::MAX);
            self.engine.undo_move(mv, player);

            let better = if maximizing { score > best_score } else { score < best_score };
            if better || best_move.is_none() {
                best_score = score;
                best_move = Some(mv);
            }
        }

        (best_move, fully_evaluated)
    }

    /// Deepen from 1 to `max_depth` until the time limit passes, keeping the
    /// move of the deepest fully searched depth. Depth 1 is always kept.
    pub fn iterative_deepening(
        &mut self,
        maximizing: bool,
        max_depth: u32,
        time_limit: Duration,
    ) -> Option<Move> {
        let start = Instant::now();
        let mut best_move = None;
        self.reset_stats();

        for depth in 1..=max_depth {
            if start.elapsed() >= time_limit {
                tracing::debug!("time limit reached before depth {}", depth);
                break;
            }

            let (current, fully_evaluated) = self.find_best_move(depth, maximizing, start, time_limit);

            if (fully_evaluated || depth == 1) && current.is_some() {
                best_move = current;
                tracing::debug!(
                    "depth {} complete: {:?} ({} nodes, {:?})",
                    depth,
                    current,
                    self.stats.nodes,
                    start.elapsed()
                );
            } else {
                tracing::debug!("depth {} abandoned at deadline", depth);
            }
        }

        best_move
    }
}

// ============================================================================
// RANDOM PLAYER
// ============================================================================

/// Picks uniformly among legal moves
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// A random legal move for the side to move, `None` if it has none
    pub fn choose(&mut self, engine: &GameEngine) -> Option<Move> {
        engine
            .all_moves(engine.current_player())
            .choose(&mut self.rng)
            .copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================
