//! Turn state, rule checks and reversible move application

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Coord, HexBoard};
use crate::error::RuleError;
use crate::moves;
use crate::pieces::{Inventory, Piece, PieceType, Player};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pieces a player may place before the Bee becomes mandatory
const BEE_DEADLINE_TURN: u16 = 3;

/// Occupied neighbors (besides the other endpoint) that block a slide
const SLIDE_BLOCK_NEIGHBORS: usize = 5;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A turn action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put a new piece from the inventory on the board
    Place { to: Coord, kind: PieceType },
    /// Move the top piece of `from` onto `to`
    Movement { from: Coord, to: Coord },
    /// Skip the turn; only legal with no other move available
    Pass,
}

impl Move {
    /// Cell the piece leaves, `None` for placements
    pub fn origin(&self) -> Option<Coord> {
        match self {
            Move::Movement { from, .. } => Some(*from),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<Coord> {
        match self {
            Move::Place { to, .. } | Move::Movement { to, .. } => Some(*to),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place { to, kind } => write!(f, "place {} at {}", kind, to),
            Move::Movement { from, to } => write!(f, "move {} -> {}", from, to),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Winner(Player),
    /// Both Bees surrounded at once
    Draw,
}

/// Undo record. `applied` differs from `requested` only for the opening
/// placement, which always lands on the center cell.
#[derive(Clone, Debug, PartialEq, Eq)]
struct MoveRecord {
    requested: Move,
    applied: Move,
    player: Player,
    previous_player: Player,
    /// Index into the mover's piece records touched by a movement
    moved_record: Option<usize>,
}

// ============================================================================
// GAME ENGINE
// ============================================================================

/// Authoritative game state, mutated in place and restored through
/// `undo_move`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameEngine {
    board: HexBoard,
    current_player: Player,
    turn_counter: [u16; 2],
    bee_coord: [Option<Coord>; 2],
    inventories: [Inventory; 2],
    history: Vec<MoveRecord>,
}

impl GameEngine {
    pub fn new(board_size: i16) -> Self {
        Self {
            board: HexBoard::new(board_size),
            current_player: Player::One,
            turn_counter: [0; 2],
            bee_coord: [None; 2],
            inventories: [Inventory::full(); 2],
            history: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &HexBoard {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Moves `player` has made so far (passes excluded)
    pub fn turn_count(&self, player: Player) -> u16 {
        self.turn_counter[player.index()]
    }

    pub fn bee_coord(&self, player: Player) -> Option<Coord> {
        self.bee_coord[player.index()]
    }

    pub fn bee_placed(&self, player: Player) -> bool {
        self.bee_coord(player).is_some()
    }

    pub fn inventory(&self, player: Player) -> &Inventory {
        &self.inventories[player.index()]
    }

    /// Moves as actually applied, oldest first
    pub fn move_history(&self) -> impl Iterator<Item = Move> + '_ {
        self.history.iter().map(|r| r.applied)
    }

    // ========================================================================
    // RULE CHECKS
    // ========================================================================

    /// Check a placement for `player`, reporting the first rule it breaks
    pub fn check_placement(&self, player: Player, to: Coord, kind: PieceType) -> Result<(), RuleError> {
        if !self.board.in_bounds(to) {
            return Err(RuleError::OutOfBounds(to));
        }
        if !self.inventory(player).has(kind) {
            return Err(RuleError::OutOfPieces { player, kind });
        }
        if self.board.is_occupied(to) {
            return Err(RuleError::CellOccupied(to));
        }
        if !self.board.hive_intact_after_move(None, to) {
            return Err(RuleError::HiveWouldBreak);
        }

        let turn = self.turn_count(player);
        if turn == 0 {
            return Ok(());
        }

        let touches_opponent = self
            .board
            .neighbors(to)
            .filter_map(|n| self.board.top(n))
            .any(|piece| piece.owner != player);
        if touches_opponent {
            return Err(RuleError::OpponentAdjacent(to));
        }

        if turn >= BEE_DEADLINE_TURN && !self.bee_placed(player) && kind != PieceType::Bee {
            return Err(RuleError::BeeMustBePlaced(player));
        }

        Ok(())
    }

    pub fn is_placement_valid(&self, player: Player, to: Coord, kind: PieceType) -> bool {
        self.check_placement(player, to, kind).is_ok()
    }

    /// Check moving the top piece of `from` onto `to`: occupancy, sliding
    /// room at both ends, and hive connectivity. Does not check that `to` is
    /// reachable for the piece type.
    pub fn check_move(&self, from: Coord, to: Coord) -> Result<(), RuleError> {
        for coord in [from, to] {
            if !self.board.in_bounds(coord) {
                return Err(RuleError::OutOfBounds(coord));
            }
        }
        let piece = self.board.top(from).ok_or(RuleError::EmptyCell(from))?;

        if self.board.is_occupied(to) && piece.kind != PieceType::Beetle {
            return Err(RuleError::CellOccupied(to));
        }

        // Grasshoppers jump, so they never need sliding room
        if piece.kind != PieceType::Grasshopper
            && (self.board.occupied_neighbor_count(from, Some(to)) >= SLIDE_BLOCK_NEIGHBORS
                || self.board.occupied_neighbor_count(to, Some(from)) >= SLIDE_BLOCK_NEIGHBORS)
        {
            return Err(RuleError::SlidingBlocked { from, to });
        }

        if !self.board.hive_intact_after_move(Some(from), to) {
            return Err(RuleError::HiveWouldBreak);
        }

        Ok(())
    }

    pub fn is_move_valid(&self, from: Coord, to: Coord) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Legal destinations for the top piece at `at`
    pub fn piece_moves(&self, at: Coord) -> Vec<Coord> {
        let Some(piece) = self.board.top(at) else {
            return Vec::new();
        };
        moves::destinations(&self.board, piece.kind, at)
            .into_iter()
            .filter(|&to| self.is_move_valid(at, to))
            .collect()
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Every legal move for `player`, movements first, then placements
    pub fn all_moves(&self, player: Player) -> Vec<Move> {
        let inventory = self.inventory(player);

        if self.board.is_empty() {
            let center = self.board.center();
            return inventory
                .available()
                .map(|kind| Move::Place { to: center, kind })
                .collect();
        }

        let mut result = Vec::new();

        if self.bee_placed(player) {
            let mut origins: Vec<Coord> = self
                .board
                .pieces_on_board(player)
                .iter()
                .filter(|p| self.board.top(p.coord) == Some(Piece::new(player, p.kind)))
                .map(|p| p.coord)
                .collect();
            origins.sort_unstable();
            origins.dedup();

            for from in origins {
                result.extend(
                    self.piece_moves(from)
                        .into_iter()
                        .map(|to| Move::Movement { from, to }),
                );
            }
        }

        let frontier = self.placement_frontier();
        for kind in inventory.available() {
            for &to in &frontier {
                if self.is_placement_valid(player, to, kind) {
                    result.push(Move::Place { to, kind });
                }
            }
        }

        result
    }

    /// Empty cells touching the hive; no other cell can take a placement
    fn placement_frontier(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self
            .board
            .occupied_coords()
            .flat_map(|c| self.board.neighbors(c))
            .filter(|&n| !self.board.is_occupied(n))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    // ========================================================================
    // TERMINAL CONDITIONS
    // ========================================================================

    /// True once every neighbor cell of the player's Bee is occupied
    pub fn bee_surrounded(&self, player: Player) -> bool {
        match self.bee_coord(player) {
            Some(bee) => self.board.neighbors(bee).all(|n| self.board.is_occupied(n)),
            None => false,
        }
    }

    pub fn is_game_over(&self) -> bool {
        Player::BOTH.iter().any(|&p| self.bee_surrounded(p))
    }

    pub fn result(&self) -> GameResult {
        match (self.bee_surrounded(Player::One), self.bee_surrounded(Player::Two)) {
            (true, true) => GameResult::Draw,
            (true, false) => GameResult::Winner(Player::Two),
            (false, true) => GameResult::Winner(Player::One),
            (false, false) => GameResult::Ongoing,
        }
    }

    // ========================================================================
    // APPLY / UNDO
    // ========================================================================

    /// Opening placements go to the center whatever cell was asked for
    fn resolve(&self, mv: Move) -> Move {
        match mv {
            Move::Place { kind, .. } if self.board.is_empty() => Move::Place {
                to: self.board.center(),
                kind,
            },
            other => other,
        }
    }

    /// Apply a pre-validated move for `player`. Legality is not rechecked.
    pub fn apply_move(&mut self, mv: Move, player: Player) {
        let applied = self.resolve(mv);
        let mut moved_record = None;

        match applied {
            Move::Place { to, kind } => {
                self.inventories[player.index()].take(kind);
                self.board.place_piece(to, Piece::new(player, kind));
                if kind == PieceType::Bee {
                    self.bee_coord[player.index()] = Some(to);
                }
                self.turn_counter[player.index()] += 1;
            }
            Move::Movement { from, to } => {
                let (piece, record) = self
                    .board
                    .move_top(from, to)
                    .expect("No piece at from position");
                if piece.kind == PieceType::Bee {
                    self.bee_coord[piece.owner.index()] = Some(to);
                }
                moved_record = Some(record);
                self.turn_counter[player.index()] += 1;
            }
            Move::Pass => {}
        }

        self.history.push(MoveRecord {
            requested: mv,
            applied,
            player,
            previous_player: self.current_player,
            moved_record,
        });
        self.current_player = player.opponent();
    }

    /// Exact inverse of the matching `apply_move`.
    ///
    /// Panics if `mv`/`player` is not the most recently applied move.
    pub fn undo_move(&mut self, mv: Move, player: Player) {
        let record = self.history.pop().expect("undo_move with empty history");
        assert!(
            record.requested == mv && record.player == player,
            "undo_move({}, {}) does not match last applied {} by {}",
            mv,
            player,
            record.requested,
            record.player
        );

        match record.applied {
            Move::Place { to, kind } => {
                self.board.remove_placed(to).expect("No piece at placed position");
                self.inventories[player.index()].restore(kind);
                if kind == PieceType::Bee {
                    self.bee_coord[player.index()] = None;
                }
                self.turn_counter[player.index()] -= 1;
            }
            Move::Movement { from, to } => {
                let index = record
                    .moved_record
                    .expect("movement recorded without its piece record");
                let piece = self
                    .board
                    .return_top(to, from, index)
                    .expect("No piece at moved-to position");
                if piece.kind == PieceType::Bee {
                    self.bee_coord[piece.owner.index()] = Some(from);
                }
                self.turn_counter[player.index()] -= 1;
            }
            Move::Pass => {}
        }

        self.current_player = record.previous_player;
    }

    /// Validated entry point for drivers: turn order, ownership and full
    /// legality are checked before the move is applied.
    pub fn try_play(&mut self, mv: Move, player: Player) -> Result<(), RuleError> {
        if self.result() != GameResult::Ongoing {
            return Err(RuleError::GameOver);
        }
        if player != self.current_player {
            return Err(RuleError::WrongTurn(player));
        }

        match mv {
            Move::Place { to, kind } => {
                if !self.board.is_empty() {
                    self.check_placement(player, to, kind)?;
                } else if !self.inventory(player).has(kind) {
                    return Err(RuleError::OutOfPieces { player, kind });
                }
            }
            Move::Movement { from, to } => {
                let piece = self.board.top(from).ok_or(RuleError::EmptyCell(from))?;
                if piece.owner != player {
                    return Err(RuleError::WrongTurn(player));
                }
                if !self.bee_placed(player) {
                    return Err(RuleError::BeeNotYetPlaced(player));
                }
                if !self.piece_moves(from).contains(&to) {
                    self.check_move(from, to)?;
                    return Err(RuleError::IllegalDestination { from, to });
                }
            }
            Move::Pass => {
                if !self.all_moves(player).is_empty() {
                    return Err(RuleError::PassNotAllowed(player));
                }
            }
        }

        self.apply_move(mv, player);
        Ok(())
    }

    /// Count leaf positions of the legal-move tree `depth` plies deep
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 || self.is_game_over() {
            return 1;
        }
        let player = self.current_player;
        let moves = self.all_moves(player);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.apply_move(mv, player);
            nodes += self.perft(depth - 1);
            self.undo_move(mv, player);
        }
        nodes
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn place(engine: &mut GameEngine, player: Player, row: i16, col: i16, kind: PieceType) {
        engine.apply_move(Move::Place { to: Coord::new(row, col), kind }, player);
    }

    /// Center (10,10) holds the origin piece; five of its six neighbors are
    /// filled, SE (10,11) stays open.
    fn crowded_center(kind: PieceType) -> GameEngine {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, kind);
        place(&mut engine, Player::Two, 9, 10, PieceType::Bee);
        place(&mut engine, Player::One, 11, 10, PieceType::Bee);
        place(&mut engine, Player::Two, 9, 9, PieceType::Ant);
        place(&mut engine, Player::One, 9, 11, PieceType::Spider);
        place(&mut engine, Player::Two, 10, 9, PieceType::Ant);
        engine
    }

    /// Empty (10,12) with five filled neighbors; the origin piece sits on
    /// the sixth, (10,13)
    fn crowded_destination(kind: PieceType) -> GameEngine {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        place(&mut engine, Player::Two, 10, 11, PieceType::Bee);
        place(&mut engine, Player::One, 9, 11, PieceType::Ant);
        place(&mut engine, Player::Two, 9, 12, PieceType::Ant);
        place(&mut engine, Player::One, 9, 13, PieceType::Spider);
        place(&mut engine, Player::Two, 11, 12, PieceType::Ant);
        place(&mut engine, Player::One, 10, 13, kind);
        engine
    }

    #[test]
    fn test_game_creation() {
        let engine = GameEngine::new(20);
        assert_eq!(engine.current_player(), Player::One);
        assert_eq!(engine.result(), GameResult::Ongoing);
        assert!(!engine.bee_placed(Player::One));
        assert_eq!(engine.inventory(Player::Two).total(), 11);
    }

    #[test]
    fn test_first_placement_goes_to_center() {
        let mut engine = GameEngine::new(20);
        assert!(engine.is_placement_valid(Player::One, Coord::new(3, 3), PieceType::Bee));

        engine.apply_move(Move::Place { to: Coord::new(3, 3), kind: PieceType::Bee }, Player::One);

        let center = Coord::new(10, 10);
        assert_eq!(engine.board().top(center), Some(Piece::new(Player::One, PieceType::Bee)));
        assert!(!engine.board().is_occupied(Coord::new(3, 3)));
        assert_eq!(engine.bee_coord(Player::One), Some(center));
        assert_eq!(engine.inventory(Player::One).remaining(PieceType::Bee), 0);
        assert_eq!(engine.current_player(), Player::Two);
        assert_eq!(engine.turn_count(Player::One), 1);
    }

    #[test]
    fn test_apply_undo_round_trip() {
        let mut engine = GameEngine::new(20);
        let before = engine.clone();
        let opening = Move::Place { to: Coord::new(0, 0), kind: PieceType::Ant };
        engine.apply_move(opening, Player::One);
        engine.undo_move(opening, Player::One);
        assert_eq!(engine, before);

        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        place(&mut engine, Player::Two, 9, 10, PieceType::Beetle);
        place(&mut engine, Player::One, 11, 10, PieceType::Ant);
        place(&mut engine, Player::Two, 9, 11, PieceType::Bee);

        let snapshot = engine.clone();
        for mv in engine.all_moves(Player::One) {
            engine.apply_move(mv, Player::One);
            engine.undo_move(mv, Player::One);
            assert_eq!(engine, snapshot, "round trip failed for {}", mv);
        }
    }

    #[test]
    fn test_beetle_stack_round_trip() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        place(&mut engine, Player::Two, 9, 10, PieceType::Beetle);
        place(&mut engine, Player::One, 11, 10, PieceType::Ant);
        place(&mut engine, Player::Two, 9, 11, PieceType::Bee);
        let snapshot = engine.clone();

        let climb = Move::Movement { from: Coord::new(9, 10), to: Coord::new(10, 10) };
        assert!(engine.piece_moves(Coord::new(9, 10)).contains(&Coord::new(10, 10)));
        engine.apply_move(climb, Player::Two);

        let center = engine.board().cell(Coord::new(10, 10));
        assert_eq!(center.height(), 2);
        assert_eq!(center.top().map(|p| p.kind), Some(PieceType::Beetle));
        // The Bee is buried but still tracked at the center
        assert_eq!(engine.bee_coord(Player::One), Some(Coord::new(10, 10)));

        engine.undo_move(climb, Player::Two);
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn test_beetle_onto_own_beetle_round_trip() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Beetle);
        place(&mut engine, Player::Two, 11, 10, PieceType::Bee);
        place(&mut engine, Player::One, 9, 11, PieceType::Bee);
        place(&mut engine, Player::Two, 12, 10, PieceType::Ant);
        place(&mut engine, Player::One, 10, 11, PieceType::Beetle);
        place(&mut engine, Player::Two, 11, 11, PieceType::Ant);
        engine.apply_move(
            Move::Movement { from: Coord::new(10, 11), to: Coord::new(9, 11) },
            Player::One,
        );
        place(&mut engine, Player::Two, 10, 11, PieceType::Grasshopper);

        // Second Beetle joins the first on the Bee: two records share (9,11)
        let climb = Move::Movement { from: Coord::new(10, 10), to: Coord::new(9, 11) };
        assert!(engine.all_moves(Player::One).contains(&climb));
        let snapshot = engine.clone();

        engine.apply_move(climb, Player::One);
        assert_eq!(engine.board().cell(Coord::new(9, 11)).height(), 3);
        engine.undo_move(climb, Player::One);

        assert_eq!(engine, snapshot);
        assert_eq!(
            engine.board().pieces_on_board(Player::One)[0].coord,
            Coord::new(10, 10)
        );
    }

    #[test]
    #[should_panic]
    fn test_undo_mismatch_panics() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        engine.undo_move(Move::Place { to: Coord::new(10, 10), kind: PieceType::Ant }, Player::One);
    }

    #[test]
    fn test_bee_surrounded_ends_game() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        let ring = [(9, 10), (11, 10), (9, 9), (9, 11), (10, 9), (10, 11)];
        for (i, &(row, col)) in ring.iter().enumerate() {
            let player = if i % 2 == 0 { Player::Two } else { Player::One };
            place(&mut engine, player, row, col, PieceType::Ant);
            if i < ring.len() - 1 {
                assert!(!engine.is_game_over());
            }
        }

        assert!(engine.bee_surrounded(Player::One));
        assert!(!engine.bee_surrounded(Player::Two));
        assert!(engine.is_game_over());
        assert_eq!(engine.result(), GameResult::Winner(Player::Two));
    }

    #[test]
    fn test_placement_rules() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);

        // Turn 0 may touch the opponent
        assert!(engine.is_placement_valid(Player::Two, Coord::new(9, 10), PieceType::Ant));
        place(&mut engine, Player::Two, 9, 10, PieceType::Ant);

        assert_eq!(engine.check_placement(Player::One, Coord::new(11, 10), PieceType::Ant), Ok(()));
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(9, 9), PieceType::Ant),
            Err(RuleError::OpponentAdjacent(Coord::new(9, 9)))
        );
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(0, 0), PieceType::Ant),
            Err(RuleError::HiveWouldBreak)
        );
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(10, 10), PieceType::Ant),
            Err(RuleError::CellOccupied(Coord::new(10, 10)))
        );
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(11, 10), PieceType::Bee),
            Err(RuleError::OutOfPieces { player: Player::One, kind: PieceType::Bee })
        );
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(20, 3), PieceType::Ant),
            Err(RuleError::OutOfBounds(Coord::new(20, 3)))
        );
    }

    #[test]
    fn test_bee_deadline() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Ant);
        place(&mut engine, Player::Two, 9, 10, PieceType::Ant);
        place(&mut engine, Player::One, 11, 10, PieceType::Ant);
        place(&mut engine, Player::Two, 8, 10, PieceType::Ant);
        place(&mut engine, Player::One, 12, 10, PieceType::Spider);
        place(&mut engine, Player::Two, 7, 10, PieceType::Spider);

        assert_eq!(engine.turn_count(Player::One), 3);
        assert_eq!(
            engine.check_placement(Player::One, Coord::new(13, 10), PieceType::Ant),
            Err(RuleError::BeeMustBePlaced(Player::One))
        );
        assert!(engine.is_placement_valid(Player::One, Coord::new(13, 10), PieceType::Bee));

        let moves = engine.all_moves(Player::One);
        assert!(!moves.is_empty());
        assert!(moves
            .iter()
            .all(|mv| matches!(mv, Move::Place { kind: PieceType::Bee, .. })));
    }

    #[test]
    fn test_sliding_blocked_except_grasshopper() {
        let engine = crowded_center(PieceType::Ant);
        let (from, to) = (Coord::new(10, 10), Coord::new(10, 11));
        assert_eq!(engine.check_move(from, to), Err(RuleError::SlidingBlocked { from, to }));
        assert!(!engine.piece_moves(from).contains(&to));

        let engine = crowded_center(PieceType::Grasshopper);
        assert_eq!(engine.check_move(from, to), Ok(()));
    }

    #[test]
    fn test_sliding_blocked_at_destination() {
        let (from, to) = (Coord::new(10, 13), Coord::new(10, 12));

        let engine = crowded_destination(PieceType::Ant);
        assert_eq!(engine.board().occupied_neighbor_count(from, Some(to)), 2);
        assert_eq!(engine.board().occupied_neighbor_count(to, Some(from)), 5);
        assert_eq!(engine.check_move(from, to), Err(RuleError::SlidingBlocked { from, to }));
        assert!(!engine.piece_moves(from).contains(&to));

        let engine = crowded_destination(PieceType::Grasshopper);
        assert_eq!(engine.check_move(from, to), Ok(()));
    }

    #[test]
    fn test_only_beetle_lands_on_pieces() {
        let engine = crowded_center(PieceType::Ant);
        let (from, to) = (Coord::new(11, 10), Coord::new(10, 10));
        assert_eq!(engine.check_move(from, to), Err(RuleError::CellOccupied(to)));

        let engine = crowded_center(PieceType::Beetle);
        let beetle = Coord::new(10, 10);
        assert!(engine.piece_moves(beetle).contains(&Coord::new(9, 10)));
    }

    #[test]
    fn test_no_moves_before_bee() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Ant);
        place(&mut engine, Player::Two, 9, 10, PieceType::Bee);

        assert!(engine
            .all_moves(Player::One)
            .iter()
            .all(|mv| matches!(mv, Move::Place { .. })));
        assert_eq!(
            engine.try_play(Move::Movement { from: Coord::new(10, 10), to: Coord::new(9, 9) }, Player::One),
            Err(RuleError::BeeNotYetPlaced(Player::One))
        );
    }

    #[test]
    fn test_try_play_turn_order() {
        let mut engine = GameEngine::new(20);
        let mv = Move::Place { to: Coord::new(10, 10), kind: PieceType::Bee };
        assert_eq!(engine.try_play(mv, Player::Two), Err(RuleError::WrongTurn(Player::Two)));
        assert_eq!(engine.try_play(Move::Pass, Player::One), Err(RuleError::PassNotAllowed(Player::One)));
        assert_eq!(engine.try_play(mv, Player::One), Ok(()));
        assert_eq!(engine.current_player(), Player::Two);

        let far = Move::Place { to: Coord::new(2, 2), kind: PieceType::Ant };
        assert_eq!(engine.try_play(far, Player::Two), Err(RuleError::HiveWouldBreak));
    }

    #[test]
    fn test_try_play_rejects_unreachable_destination() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        place(&mut engine, Player::Two, 9, 10, PieceType::Bee);

        // Bee steps one cell; two cells away is not reachable
        let mv = Move::Movement { from: Coord::new(10, 10), to: Coord::new(8, 11) };
        assert!(matches!(
            engine.try_play(mv, Player::One),
            Err(RuleError::IllegalDestination { .. }) | Err(RuleError::HiveWouldBreak)
        ));
        let step = Move::Movement { from: Coord::new(10, 10), to: Coord::new(9, 11) };
        assert_eq!(engine.try_play(step, Player::One), Ok(()));
        assert_eq!(engine.bee_coord(Player::One), Some(Coord::new(9, 11)));
    }

    #[test]
    fn test_pass_round_trip() {
        let mut engine = GameEngine::new(20);
        place(&mut engine, Player::One, 10, 10, PieceType::Bee);
        let snapshot = engine.clone();
        engine.apply_move(Move::Pass, Player::Two);
        assert_eq!(engine.current_player(), Player::One);
        assert_eq!(engine.turn_count(Player::Two), 0);
        engine.undo_move(Move::Pass, Player::Two);
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn test_perft_opening() {
        let mut engine = GameEngine::new(20);
        assert_eq!(engine.perft(1), 5);
        assert_eq!(engine.perft(2), 150);
        assert_eq!(engine, GameEngine::new(20));
    }

    #[test]
    fn test_move_accessors() {
        let mv = Move::Movement { from: Coord::new(1, 2), to: Coord::new(3, 4) };
        assert_eq!(mv.origin(), Some(Coord::new(1, 2)));
        assert_eq!(mv.destination(), Some(Coord::new(3, 4)));
        let place = Move::Place { to: Coord::new(5, 5), kind: PieceType::Ant };
        assert_eq!(place.origin(), None);
        assert_eq!(Move::Pass.destination(), None);
        assert_eq!(place.to_string(), "place Ant at (5, 5)");
    }
}
