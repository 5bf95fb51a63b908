//! Players, piece types and unplaced reserves

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Coord;

/// One of the two sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

/// Bug kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    Bee,
    Ant,
    Spider,
    Grasshopper,
    Beetle,
}

/// All piece types in inventory order
pub const PIECE_TYPES: [PieceType; 5] = [
    PieceType::Bee,
    PieceType::Ant,
    PieceType::Spider,
    PieceType::Grasshopper,
    PieceType::Beetle,
];

impl PieceType {
    pub fn index(self) -> usize {
        self as usize
    }

    /// Copies of this type each player starts with
    pub const fn starting_count(self) -> u8 {
        match self {
            PieceType::Bee => 1,
            PieceType::Ant => 3,
            PieceType::Spider => 2,
            PieceType::Grasshopper => 3,
            PieceType::Beetle => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Bee => "Bee",
            PieceType::Ant => "Ant",
            PieceType::Spider => "Spider",
            PieceType::Grasshopper => "Grasshopper",
            PieceType::Beetle => "Beetle",
        }
    }

    /// Single-letter board symbol (the Bee is `Q` to keep `B` for the Beetle)
    pub fn symbol(self) -> char {
        match self {
            PieceType::Bee => 'Q',
            PieceType::Ant => 'A',
            PieceType::Spider => 'S',
            PieceType::Grasshopper => 'G',
            PieceType::Beetle => 'B',
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece as it sits on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(owner: Player, kind: PieceType) -> Self {
        Self { owner, kind }
    }

    /// Board symbol: upper case for player one, lower case for player two
    pub fn symbol(&self) -> char {
        match self.owner {
            Player::One => self.kind.symbol(),
            Player::Two => self.kind.symbol().to_ascii_lowercase(),
        }
    }
}

/// Bookkeeping entry for one physical piece on the board, buried or not
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub coord: Coord,
    pub kind: PieceType,
}

/// Pieces a player has not placed yet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u8; 5],
}

impl Default for Inventory {
    fn default() -> Self {
        Self::full()
    }
}

impl Inventory {
    /// Starting allotment
    pub fn full() -> Self {
        let mut counts = [0u8; 5];
        for kind in PIECE_TYPES {
            counts[kind.index()] = kind.starting_count();
        }
        Self { counts }
    }

    pub fn remaining(&self, kind: PieceType) -> u8 {
        self.counts[kind.index()]
    }

    pub fn has(&self, kind: PieceType) -> bool {
        self.remaining(kind) > 0
    }

    /// Types with at least one copy left, in inventory order
    pub fn available(&self) -> impl Iterator<Item = PieceType> + '_ {
        PIECE_TYPES.into_iter().filter(move |&kind| self.has(kind))
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }

    /// Remove one copy for placement
    pub fn take(&mut self, kind: PieceType) {
        let count = &mut self.counts[kind.index()];
        assert!(*count > 0, "no {} left in inventory", kind);
        *count -= 1;
    }

    /// Return one copy (placement undone)
    pub fn restore(&mut self, kind: PieceType) {
        let count = &mut self.counts[kind.index()];
        assert!(
            *count < kind.starting_count(),
            "{} inventory already full",
            kind
        );
        *count += 1;
    }
}
