//! Rule violations reported by the validated engine entry points

use crate::board::Coord;
use crate::pieces::{PieceType, Player};

/// Why a placement, movement or pass was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("{0} is outside the board")]
    OutOfBounds(Coord),

    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),

    #[error("no piece at {0}")]
    EmptyCell(Coord),

    #[error("{player} has no {kind} left to place")]
    OutOfPieces { player: Player, kind: PieceType },

    #[error("placement at {0} touches an opponent piece")]
    OpponentAdjacent(Coord),

    #[error("the hive would split")]
    HiveWouldBreak,

    #[error("{0} cannot move pieces before placing the Bee")]
    BeeNotYetPlaced(Player),

    #[error("{0} must place the Bee this turn")]
    BeeMustBePlaced(Player),

    #[error("piece cannot slide between {from} and {to}")]
    SlidingBlocked { from: Coord, to: Coord },

    #[error("{to} is not a reachable destination from {from}")]
    IllegalDestination { from: Coord, to: Coord },

    #[error("it is not {0}'s turn")]
    WrongTurn(Player),

    #[error("{0} still has legal moves and cannot pass")]
    PassNotAllowed(Player),

    #[error("the game is already over")]
    GameOver,
}
