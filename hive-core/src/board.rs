//! Hex board geometry with offset (row, col) coordinates
//!
//! Columns alternate parity: odd columns sit half a cell lower than even
//! ones, so the six neighbor offsets depend on the column of the cell.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, PlacedPiece, Player};

/// Side length of the standard square board
pub const DEFAULT_BOARD_SIZE: i16 = 20;

/// Offset hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i16,
    pub col: i16,
}

impl Coord {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Check if this cell lies on a `size` x `size` board
    pub fn is_within(&self, size: i16) -> bool {
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }

    /// Neighbor in direction (0-5), using this cell's column parity.
    /// The result may be off the board.
    pub fn step(&self, direction: usize) -> Coord {
        let (dr, dc) = directions_for(self.col)[direction % 6];
        Coord::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction vectors (dr, dc) for even columns.
/// Index: 0=N, 1=S, 2=NW, 3=NE, 4=SW, 5=SE
pub const EVEN_COL_DIRECTIONS: [(i16, i16); 6] = [
    (-1, 0),  // N
    (1, 0),   // S
    (-1, -1), // NW
    (-1, 1),  // NE
    (0, -1),  // SW
    (0, 1),   // SE
];

/// Direction vectors for odd columns, same index order
pub const ODD_COL_DIRECTIONS: [(i16, i16); 6] = [
    (-1, 0), // N
    (1, 0),  // S
    (0, -1), // NW
    (0, 1),  // NE
    (1, -1), // SW
    (1, 1),  // SE
];

/// Direction table for a column
pub fn directions_for(col: i16) -> &'static [(i16, i16); 6] {
    if col.rem_euclid(2) == 0 {
        &EVEN_COL_DIRECTIONS
    } else {
        &ODD_COL_DIRECTIONS
    }
}

// ============================================================================
// CELLS
// ============================================================================

/// Contents of one board cell. A `Stack` always holds two or more pieces,
/// bottom first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Single(Piece),
    Stack(Vec<Piece>),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The piece that owns the cell for adjacency and movement
    pub fn top(&self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Single(piece) => Some(*piece),
            Cell::Stack(pieces) => pieces.last().copied(),
        }
    }

    pub fn height(&self) -> usize {
        self.pieces().len()
    }

    /// Pieces bottom to top
    pub fn pieces(&self) -> &[Piece] {
        match self {
            Cell::Empty => &[],
            Cell::Single(piece) => std::slice::from_ref(piece),
            Cell::Stack(pieces) => pieces,
        }
    }

    /// Put a piece on top, growing into a stack if needed
    pub fn push(&mut self, piece: Piece) {
        *self = match std::mem::take(self) {
            Cell::Empty => Cell::Single(piece),
            Cell::Single(bottom) => Cell::Stack(vec![bottom, piece]),
            Cell::Stack(mut pieces) => {
                pieces.push(piece);
                Cell::Stack(pieces)
            }
        };
    }

    /// Lift the top piece, collapsing a two-piece stack back to `Single`
    pub fn pop(&mut self) -> Option<Piece> {
        match std::mem::take(self) {
            Cell::Empty => None,
            Cell::Single(piece) => Some(piece),
            Cell::Stack(mut pieces) => {
                let top = pieces.pop();
                *self = if pieces.len() == 1 {
                    Cell::Single(pieces[0])
                } else {
                    Cell::Stack(pieces)
                };
                top
            }
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Square hex grid plus per-player records of every piece on it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexBoard {
    size: i16,
    cells: Vec<Cell>,
    pieces_on_board: [Vec<PlacedPiece>; 2],
}

impl HexBoard {
    pub fn new(size: i16) -> Self {
        assert!(size > 0, "board size must be positive");
        let area = size as usize * size as usize;
        Self {
            size,
            cells: vec![Cell::Empty; area],
            pieces_on_board: [Vec::new(), Vec::new()],
        }
    }

    pub fn size(&self) -> i16 {
        self.size
    }

    /// Cell every game starts on
    pub fn center(&self) -> Coord {
        Coord::new(self.size / 2, self.size / 2)
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.is_within(self.size)
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row as usize * self.size as usize + coord.col as usize
    }

    /// Contents of a cell; off-board cells read as empty
    pub fn cell(&self, coord: Coord) -> &Cell {
        if self.in_bounds(coord) {
            &self.cells[self.index(coord)]
        } else {
            &EMPTY_CELL
        }
    }

    pub fn top(&self, coord: Coord) -> Option<Piece> {
        self.cell(coord).top()
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        !self.cell(coord).is_empty()
    }

    /// In-bounds neighbors in direction-table order
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let size = self.size;
        directions_for(coord.col)
            .iter()
            .map(move |&(dr, dc)| Coord::new(coord.row + dr, coord.col + dc))
            .filter(move |n| n.is_within(size))
    }

    /// Occupied neighbors of `coord`, not counting `excluding`
    pub fn occupied_neighbor_count(&self, coord: Coord, excluding: Option<Coord>) -> usize {
        self.neighbors(coord)
            .filter(|&n| Some(n) != excluding && self.is_occupied(n))
            .count()
    }

    /// Every piece a player has on the board, including buried ones
    pub fn pieces_on_board(&self, player: Player) -> &[PlacedPiece] {
        &self.pieces_on_board[player.index()]
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces_on_board[player.index()].len()
    }

    /// Occupied cells in row-major order
    pub fn occupied_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(i, _)| Coord::new((i / size as usize) as i16, (i % size as usize) as i16))
    }

    pub fn is_empty(&self) -> bool {
        self.pieces_on_board.iter().all(|pieces| pieces.is_empty())
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Put a new piece on a cell
    pub fn place_piece(&mut self, coord: Coord, piece: Piece) {
        let idx = self.index(coord);
        self.cells[idx].push(piece);
        self.pieces_on_board[piece.owner.index()].push(PlacedPiece {
            coord,
            kind: piece.kind,
        });
    }

    /// Take back the most recently placed piece at `coord`
    pub fn remove_placed(&mut self, coord: Coord) -> Option<Piece> {
        let idx = self.index(coord);
        let piece = self.cells[idx].pop()?;
        let records = &mut self.pieces_on_board[piece.owner.index()];
        if let Some(pos) = records
            .iter()
            .rposition(|p| p.coord == coord && p.kind == piece.kind)
        {
            records.remove(pos);
        }
        Some(piece)
    }

    /// Lift the top piece of `from` onto `to`, keeping its record in place.
    /// Returns the piece and the index of the record that now points at `to`.
    pub fn move_top(&mut self, from: Coord, to: Coord) -> Option<(Piece, usize)> {
        let piece = self.top(from)?;
        let record = self.pieces_on_board[piece.owner.index()]
            .iter()
            .rposition(|p| p.coord == from && p.kind == piece.kind)?;
        self.lift(from, to)?;
        self.pieces_on_board[piece.owner.index()][record].coord = to;
        Some((piece, record))
    }

    /// Inverse of `move_top`: move the top piece of `from` back onto `to`
    /// and repoint exactly the record `move_top` reported. Two stacked
    /// Beetles of one player share a coordinate, so a search by position
    /// could pick the buried one.
    pub fn return_top(&mut self, from: Coord, to: Coord, record: usize) -> Option<Piece> {
        let piece = self.top(from)?;
        if record >= self.pieces_on_board[piece.owner.index()].len() {
            return None;
        }
        self.lift(from, to)?;
        self.pieces_on_board[piece.owner.index()][record].coord = to;
        Some(piece)
    }

    fn lift(&mut self, from: Coord, to: Coord) -> Option<Piece> {
        let from_idx = self.index(from);
        let to_idx = self.index(to);
        let piece = self.cells[from_idx].pop()?;
        self.cells[to_idx].push(piece);
        Some(piece)
    }

    // ========================================================================
    // CONNECTIVITY
    // ========================================================================

    /// Would the hive stay in one piece if the top piece of `origin` (or a
    /// new piece when `origin` is `None`) ended up on `destination`?
    ///
    /// The real board is not touched. A stacked origin keeps its cell
    /// occupied by the pieces underneath.
    pub fn hive_intact_after_move(&self, origin: Option<Coord>, destination: Coord) -> bool {
        let mut occupied: FxHashSet<Coord> = self
            .pieces_on_board
            .iter()
            .flatten()
            .map(|p| p.coord)
            .collect();

        if let Some(origin) = origin {
            if self.cell(origin).height() <= 1 {
                occupied.remove(&origin);
            }
        }
        occupied.insert(destination);

        let start = match occupied.iter().next() {
            Some(&c) if occupied.len() > 1 => c,
            _ => return true,
        };

        let mut visited = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            for n in self.neighbors(current) {
                if occupied.contains(&n) && !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }

        visited.len() == occupied.len()
    }

    /// Bounding box of occupied cells as (min_row, max_row, min_col, max_col)
    pub fn bounding_box(&self) -> Option<(i16, i16, i16, i16)> {
        self.occupied_coords().fold(None, |acc, c| {
            Some(match acc {
                None => (c.row, c.row, c.col, c.col),
                Some((r0, r1, c0, c1)) => (r0.min(c.row), r1.max(c.row), c0.min(c.col), c1.max(c.col)),
            })
        })
    }
}

/// Renders the occupied region, one text line per row. Stacked cells show the
/// top piece followed by the stack height.
impl fmt::Display for HexBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((r0, r1, c0, c1)) = self.bounding_box() else {
            return writeln!(f, "(empty board)");
        };
        let (r0, r1) = ((r0 - 1).max(0), (r1 + 1).min(self.size - 1));
        let (c0, c1) = ((c0 - 1).max(0), (c1 + 1).min(self.size - 1));

        write!(f, "    ")?;
        for col in c0..=c1 {
            write!(f, "{:>3}", col)?;
        }
        writeln!(f)?;

        for row in r0..=r1 {
            write!(f, "{:>3} ", row)?;
            for col in c0..=c1 {
                let cell = self.cell(Coord::new(row, col));
                match cell.top() {
                    None => write!(f, "  .")?,
                    Some(piece) if cell.height() > 1 => {
                        write!(f, " {}{}", piece.symbol(), cell.height())?
                    }
                    Some(piece) => write!(f, "  {}", piece.symbol())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
