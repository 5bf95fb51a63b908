//! Hive Core - Rules engine and search AI
//!
//! This crate provides the core logic for a Hive-style tile game:
//! - Board geometry (offset hex grid with column-parity neighbors)
//! - Piece types, stacks and reserve inventories
//! - Per-piece move generation under the one-hive rule
//! - Reversible move application and terminal checks
//! - Minimax / alpha-beta search with iterative deepening

pub mod board;
pub mod pieces;
pub mod moves;
pub mod game;
pub mod error;
pub mod eval;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{Cell, Coord, HexBoard, DEFAULT_BOARD_SIZE};
pub use pieces::{Inventory, Piece, PieceType, PlacedPiece, Player, PIECE_TYPES};
pub use game::{GameEngine, GameResult, Move};
pub use error::RuleError;
pub use eval::{evaluate, EvalWeights};
pub use ai::{RandomPlayer, SearchAI, SearchStats};
pub use config::{AiConfig, Difficulty};
