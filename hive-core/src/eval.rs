//! Static position evaluation
//!
//! Scores are from player one's point of view: positive favors player one,
//! negative favors player two.

use serde::{Deserialize, Serialize};

use crate::game::GameEngine;
use crate::pieces::Player;

/// Evaluation weights
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    /// Bonus (or penalty) for a fully surrounded Bee
    pub surround: i32,
    /// Per occupied neighbor of the opponent's Bee
    pub bee_threat: i32,
    /// Per legal move
    pub mobility: i32,
    /// Per piece on the board
    pub piece_count: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            surround: 10_000,
            bee_threat: 800,
            mobility: 5,
            piece_count: 3,
        }
    }
}

/// Occupied neighbor cells of `player`'s Bee, zero before it is placed
pub fn bee_threat(engine: &GameEngine, player: Player) -> i32 {
    match engine.bee_coord(player) {
        Some(bee) => engine.board().occupied_neighbor_count(bee, None) as i32,
        None => 0,
    }
}

/// Evaluate the position for player one
pub fn evaluate(engine: &GameEngine, weights: &EvalWeights) -> i32 {
    let mut score = 0;

    if engine.bee_surrounded(Player::One) {
        score -= weights.surround;
    }
    if engine.bee_surrounded(Player::Two) {
        score += weights.surround;
    }

    for player in Player::BOTH {
        let sign = match player {
            Player::One => 1,
            Player::Two => -1,
        };
        let pressure = bee_threat(engine, player.opponent());
        let mobility = engine.all_moves(player).len() as i32;
        let pieces = engine.board().piece_count(player) as i32;

        score += sign
            * (pressure * weights.bee_threat
                + mobility * weights.mobility
                + pieces * weights.piece_count);
    }

    score
}
