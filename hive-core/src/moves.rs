//! Destination generation per piece type
//!
//! Every generator is read-only over the board and already filters by hive
//! connectivity. Sliding restrictions are applied later by the engine.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::{Coord, HexBoard};
use crate::pieces::PieceType;

/// Spider path length counting the start cell
const SPIDER_PATH_LEN: usize = 4;

/// Candidate destinations for the piece of type `kind` on top of `origin`
pub fn destinations(board: &HexBoard, kind: PieceType, origin: Coord) -> Vec<Coord> {
    match kind {
        PieceType::Bee => bee_moves(board, origin),
        PieceType::Ant => ant_moves(board, origin),
        PieceType::Spider => spider_moves(board, origin),
        PieceType::Beetle => beetle_moves(board, origin),
        PieceType::Grasshopper => grasshopper_moves(board, origin),
    }
}

/// One step onto an empty neighbor
pub fn bee_moves(board: &HexBoard, origin: Coord) -> Vec<Coord> {
    board
        .neighbors(origin)
        .filter(|&n| !board.is_occupied(n) && board.hive_intact_after_move(Some(origin), n))
        .collect()
}

/// Any empty cell reachable through a chain of empty cells. Only the final
/// cell is checked for connectivity.
pub fn ant_moves(board: &HexBoard, origin: Coord) -> Vec<Coord> {
    let mut visited = FxHashSet::default();
    let mut queue = VecDeque::from([origin]);
    let mut moves = Vec::new();

    while let Some(current) = queue.pop_front() {
        for n in board.neighbors(current) {
            if board.is_occupied(n) || !visited.insert(n) {
                continue;
            }
            if board.hive_intact_after_move(Some(origin), n) {
                moves.push(n);
            }
            queue.push_back(n);
        }
    }

    moves
}

/// Exactly three steps through empty cells without revisiting any cell
pub fn spider_moves(board: &HexBoard, origin: Coord) -> Vec<Coord> {
    let mut path = vec![origin];
    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();
    spider_walk(board, &mut path, &mut seen, &mut moves);
    moves
}

fn spider_walk(
    board: &HexBoard,
    path: &mut Vec<Coord>,
    seen: &mut FxHashSet<Coord>,
    moves: &mut Vec<Coord>,
) {
    let current = path[path.len() - 1];

    if path.len() == SPIDER_PATH_LEN {
        if seen.insert(current) && board.hive_intact_after_move(Some(path[0]), current) {
            moves.push(current);
        }
        return;
    }

    for n in board.neighbors(current) {
        if path.contains(&n) || board.is_occupied(n) {
            continue;
        }
        path.push(n);
        spider_walk(board, path, seen, moves);
        path.pop();
    }
}

/// One step in any direction, climbing onto occupied cells if needed
pub fn beetle_moves(board: &HexBoard, origin: Coord) -> Vec<Coord> {
    board
        .neighbors(origin)
        .filter(|&n| board.hive_intact_after_move(Some(origin), n))
        .collect()
}

/// Straight-line jump over one or more pieces to the first empty cell.
/// The direction index is re-applied at each cell, since the offset vector
/// changes with column parity.
pub fn grasshopper_moves(board: &HexBoard, origin: Coord) -> Vec<Coord> {
    let mut moves = Vec::new();

    for direction in 0..6 {
        let mut current = origin.step(direction);
        let mut jumped = false;

        while board.in_bounds(current) {
            if !board.is_occupied(current) {
                if jumped && board.hive_intact_after_move(Some(origin), current) {
                    moves.push(current);
                }
                break;
            }
            jumped = true;
            current = current.step(direction);
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, Player};

    fn board_with(pieces: &[(Coord, PieceType)]) -> HexBoard {
        let mut board = HexBoard::new(10);
        for &(coord, kind) in pieces {
            board.place_piece(coord, Piece::new(Player::One, kind));
        }
        board
    }

    fn sorted(mut coords: Vec<Coord>) -> Vec<Coord> {
        coords.sort();
        coords
    }

    /// Brute-force check for a simple 3-step path through empty cells
    fn has_spider_path(board: &HexBoard, origin: Coord, target: Coord) -> bool {
        for a in board.neighbors(origin) {
            for b in board.neighbors(a) {
                for c in board.neighbors(b) {
                    let cells = [origin, a, b, c];
                    let distinct = (0..4).all(|i| (i + 1..4).all(|j| cells[i] != cells[j]));
                    let empty = [a, b, c].iter().all(|&x| !board.is_occupied(x));
                    if c == target && distinct && empty {
                        return true;
                    }
                }
            }
        }
        false
    }

    #[test]
    fn test_bee_steps_along_hive() {
        let board = board_with(&[
            (Coord::new(4, 4), PieceType::Ant),
            (Coord::new(5, 4), PieceType::Bee),
        ]);
        let moves = sorted(bee_moves(&board, Coord::new(5, 4)));
        assert_eq!(moves, vec![Coord::new(4, 3), Coord::new(4, 5)]);
    }

    #[test]
    fn test_ant_reaches_every_touching_cell() {
        let board = board_with(&[
            (Coord::new(4, 4), PieceType::Bee),
            (Coord::new(5, 4), PieceType::Ant),
        ]);
        let moves = sorted(ant_moves(&board, Coord::new(5, 4)));
        assert_eq!(
            moves,
            vec![
                Coord::new(3, 3),
                Coord::new(3, 4),
                Coord::new(3, 5),
                Coord::new(4, 3),
                Coord::new(4, 5),
            ]
        );
    }

    #[test]
    fn test_spider_three_step_paths() {
        let origin = Coord::new(5, 4);
        let board = board_with(&[
            (Coord::new(4, 4), PieceType::Bee),
            (origin, PieceType::Spider),
        ]);
        let moves = spider_moves(&board, origin);

        assert!(moves.contains(&Coord::new(3, 4)));
        assert!(moves.contains(&Coord::new(4, 5)));
        let unique: FxHashSet<_> = moves.iter().collect();
        assert_eq!(unique.len(), moves.len());
        for dest in moves {
            assert_ne!(dest, origin);
            assert!(has_spider_path(&board, origin, dest), "no 3-step path to {}", dest);
            assert!(board.neighbors(dest).any(|n| n == Coord::new(4, 4)));
        }
    }

    #[test]
    fn test_beetle_may_climb() {
        let board = board_with(&[
            (Coord::new(4, 4), PieceType::Bee),
            (Coord::new(5, 4), PieceType::Beetle),
        ]);
        let moves = sorted(beetle_moves(&board, Coord::new(5, 4)));
        assert_eq!(moves, vec![Coord::new(4, 3), Coord::new(4, 4), Coord::new(4, 5)]);
    }

    #[test]
    fn test_grasshopper_straight_jump() {
        let board = board_with(&[
            (Coord::new(5, 4), PieceType::Grasshopper),
            (Coord::new(4, 4), PieceType::Ant),
            (Coord::new(3, 4), PieceType::Ant),
        ]);
        assert_eq!(grasshopper_moves(&board, Coord::new(5, 4)), vec![Coord::new(2, 4)]);
    }

    #[test]
    fn test_grasshopper_diagonal_switches_parity() {
        // NE from an even column: (4,5) then (4,6) then (3,7)
        let board = board_with(&[
            (Coord::new(5, 4), PieceType::Grasshopper),
            (Coord::new(4, 5), PieceType::Ant),
            (Coord::new(4, 6), PieceType::Ant),
        ]);
        assert_eq!(grasshopper_moves(&board, Coord::new(5, 4)), vec![Coord::new(3, 7)]);
    }

    #[test]
    fn test_grasshopper_needs_a_jump() {
        let board = board_with(&[(Coord::new(5, 4), PieceType::Grasshopper)]);
        assert!(grasshopper_moves(&board, Coord::new(5, 4)).is_empty());
    }

    #[test]
    fn test_grasshopper_stops_at_edge() {
        let board = board_with(&[
            (Coord::new(1, 4), PieceType::Grasshopper),
            (Coord::new(0, 4), PieceType::Ant),
        ]);
        assert!(grasshopper_moves(&board, Coord::new(1, 4)).is_empty());
    }

    #[test]
    fn test_dispatch_matches_generators() {
        let board = board_with(&[
            (Coord::new(4, 4), PieceType::Bee),
            (Coord::new(5, 4), PieceType::Ant),
        ]);
        let origin = Coord::new(5, 4);
        assert_eq!(destinations(&board, PieceType::Ant, origin), ant_moves(&board, origin));
        assert_eq!(destinations(&board, PieceType::Bee, origin), bee_moves(&board, origin));
    }
}
