//! Tic-tac-toe game logic with bit-based board representation.
//!
//! # Board Encoding (64-bit)
//!
//! ```text
//! Bits 0-49: Board state (up to 25 cells × 2 bits per cell)
//! Bits 50-63: Unused (zero)
//!
//! Each cell (2 bits): 0 = empty, 1 = X, 2 = O
//!
//! Cells are stored in row-major order. Indices for a 3×3 board:
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! The board side length is fixed per game at 3, 4, or 5 ([`BoardSize`]), so
//! the largest board uses 25 × 2 = 50 bits. The board itself never tracks
//! whose turn it is; the turn belongs to the caller (see [`game::Game`]).
//!
//! # Win Detection
//!
//! [`Board::check_winner`] scans lines in a fixed order — rows 0..N, columns
//! 0..N, main diagonal, anti-diagonal — and reports the first fully-marked
//! line. The ordering is part of the contract: presentation layers rely on it
//! to pick which line to strike through when a full board completes more
//! than one.

pub mod ai;
pub mod game;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Mark {
    X = 1,
    O = 2,
}

impl Mark {
    /// Get the opposing mark.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert from cell bits (1 or 2) to a Mark. Zero means empty.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Mark> {
        match bits {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_char('X'),
            Mark::O => f.write_char('O'),
        }
    }
}

/// Board side length. Only 3, 4, and 5 are playable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum BoardSize {
    Three = 3,
    Four = 4,
    Five = 5,
}

impl BoardSize {
    /// Convert from a raw side length.
    #[inline]
    pub fn from_u8(n: u8) -> Option<BoardSize> {
        match n {
            3 => Some(BoardSize::Three),
            4 => Some(BoardSize::Four),
            5 => Some(BoardSize::Five),
            _ => None,
        }
    }

    /// Side length.
    #[inline]
    pub const fn n(self) -> u8 {
        self as u8
    }

    /// Total cell count (N²).
    #[inline]
    pub const fn cells(self) -> u32 {
        (self as u32) * (self as u32)
    }

    /// The center cell `(⌊N/2⌋, ⌊N/2⌋)`.
    ///
    /// Only a true center for odd N; for N = 4 this is simply cell (2,2).
    #[inline]
    pub const fn center(self) -> Pos {
        let mid = self as u8 / 2;
        Pos { row: mid, col: mid }
    }
}

/// A cell coordinate. Rows and columns count from the top-left.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }
}

/// Which kind of line completed a win.
///
/// Serialized as `"row"`, `"col"`, `"diag"` — the labels the presentation
/// layer consumes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum LineKind {
    #[serde(rename = "row")]
    Row,
    #[serde(rename = "col")]
    Column,
    #[serde(rename = "diag")]
    Diagonal,
}

/// A winning line: a row or column index 0..N, or diagonal 0 (main,
/// top-left → bottom-right) / 1 (anti, top-right → bottom-left).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct WinLine {
    pub kind: LineKind,
    pub index: u8,
}

impl WinLine {
    /// All candidate lines for a board size, in scan order:
    /// rows 0..N, columns 0..N, main diagonal, anti-diagonal.
    pub fn all(size: BoardSize) -> impl Iterator<Item = WinLine> {
        let n = size.n();
        (0..n)
            .map(|index| WinLine { kind: LineKind::Row, index })
            .chain((0..n).map(|index| WinLine { kind: LineKind::Column, index }))
            .chain([
                WinLine { kind: LineKind::Diagonal, index: 0 },
                WinLine { kind: LineKind::Diagonal, index: 1 },
            ])
    }

    /// The cells making up this line, in order.
    pub fn cells(self, size: BoardSize) -> impl Iterator<Item = Pos> {
        let n = size.n();
        (0..n).map(move |i| match self.kind {
            LineKind::Row => Pos::new(self.index, i),
            LineKind::Column => Pos::new(i, self.index),
            LineKind::Diagonal if self.index == 0 => Pos::new(i, i),
            LineKind::Diagonal => Pos::new(i, n - 1 - i),
        })
    }

    /// Occupancy bitmask for this line (bit `row * N + col` per cell).
    pub fn mask(self, size: BoardSize) -> u32 {
        let n = size.n() as u32;
        self.cells(size)
            .fold(0, |m, pos| m | 1 << (pos.row as u32 * n + pos.col as u32))
    }
}

/// A completed win: who won and on which line.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WinResult {
    pub winner: Mark,
    pub line: WinLine,
}

/// Upper bound on cells for any supported board size (5×5).
pub const MAX_CELLS: usize = 25;

/// A fixed-size move list that avoids heap allocation.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Pos; MAX_CELLS],
    len: u8,
}

impl MoveList {
    /// Create an empty move list.
    #[inline]
    pub const fn new() -> MoveList {
        MoveList {
            moves: [Pos { row: 0, col: 0 }; MAX_CELLS],
            len: 0,
        }
    }

    /// Add a move to the list.
    #[inline]
    pub fn push(&mut self, pos: Pos) {
        debug_assert!((self.len as usize) < MAX_CELLS);
        self.moves[self.len as usize] = pos;
        self.len += 1;
    }

    /// Get the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a move by index.
    #[inline]
    pub const fn get(&self, idx: usize) -> Pos {
        self.moves[idx]
    }

    /// Iterate over moves.
    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.moves[..self.len as usize].iter().copied()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact board state - all cells fit in a single u64.
///
/// See module documentation for encoding details. Cells are reached only
/// through accessors; a cell never reverts to empty except via [`reset`],
/// and the size is fixed for the life of the value.
///
/// [`reset`]: Board::reset
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    bits: u64,
    size: BoardSize,
}

impl Board {
    /// Bits per cell (2 bits: 0=empty, 1=X, 2=O).
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell.
    const CELL_MASK: u64 = 0b11;

    /// Create a new empty board.
    #[inline]
    pub fn new(size: BoardSize) -> Board {
        Board { bits: 0, size }
    }

    /// Build a board from row strings of `X`, `O` and `.` characters.
    ///
    /// Intended for fixtures and debugging. Panics if the rows do not form
    /// a square board of a supported size.
    pub fn from_rows(rows: &[&str]) -> Board {
        let size = BoardSize::from_u8(rows.len() as u8).expect("board size must be 3, 4, or 5");
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                size.n() as usize,
                "row {row} is not {} cells wide",
                size.n()
            );
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as u8, col as u8);
                match ch {
                    'X' => board.place(pos, Mark::X),
                    'O' => board.place(pos, Mark::O),
                    '.' => {}
                    _ => panic!("unexpected cell character {ch:?}"),
                }
            }
        }
        board
    }

    /// Board side length.
    #[inline]
    pub fn size(&self) -> BoardSize {
        self.size
    }

    // ========== Cell Accessors ==========

    /// Flat cell index (bit position within occupancy masks).
    #[inline]
    fn cell_index(&self, pos: Pos) -> u32 {
        pos.row as u32 * self.size.n() as u32 + pos.col as u32
    }

    /// Bit offset of a cell within the packed encoding.
    #[inline]
    fn cell_shift(&self, pos: Pos) -> u32 {
        self.cell_index(pos) * Self::CELL_BITS
    }

    /// Check that a coordinate is on the board.
    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size.n() && pos.col < self.size.n()
    }

    /// Get the mark at a position. Returns None for an empty cell.
    #[inline]
    pub fn mark_at(&self, pos: Pos) -> Option<Mark> {
        debug_assert!(self.in_bounds(pos));
        Mark::from_bits(((self.bits >> self.cell_shift(pos)) & Self::CELL_MASK) as u8)
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.mark_at(pos).is_none()
    }

    /// Place a mark at a position.
    ///
    /// Does NOT validate - callers must check [`is_valid_move`] first.
    ///
    /// [`is_valid_move`]: Board::is_valid_move
    #[inline]
    pub fn place(&mut self, pos: Pos, mark: Mark) {
        debug_assert!(self.in_bounds(pos));
        debug_assert!(self.is_empty(pos));
        let shift = self.cell_shift(pos);
        self.bits = (self.bits & !(Self::CELL_MASK << shift)) | ((mark as u64) << shift);
    }

    /// Clear every cell. The only way a non-empty cell becomes empty again.
    #[inline]
    pub fn reset(&mut self) {
        self.bits = 0;
    }

    // ========== Rule Engine ==========

    /// Check whether a move is legal: on the board and targeting an empty
    /// cell. Out-of-range coordinates are simply illegal, never an error.
    #[inline]
    pub fn is_valid_move(&self, row: u8, col: u8) -> bool {
        row < self.size.n() && col < self.size.n() && self.is_empty(Pos::new(row, col))
    }

    /// Compute occupancy masks for both players.
    /// Returns (x_mask, o_mask) where bit `row * N + col` is set if that
    /// player has marked the cell.
    pub fn occupancy_masks(&self) -> (u32, u32) {
        let mut x_mask = 0u32;
        let mut o_mask = 0u32;

        let n = self.size.n();
        for row in 0..n {
            for col in 0..n {
                let pos = Pos::new(row, col);
                match self.mark_at(pos) {
                    Some(Mark::X) => x_mask |= 1 << self.cell_index(pos),
                    Some(Mark::O) => o_mask |= 1 << self.cell_index(pos),
                    None => {}
                }
            }
        }

        (x_mask, o_mask)
    }

    /// Number of placed marks.
    #[inline]
    pub fn mark_count(&self) -> u32 {
        let (x_mask, o_mask) = self.occupancy_masks();
        (x_mask | o_mask).count_ones()
    }

    /// Check if every cell is marked, regardless of any winner.
    ///
    /// This is the draw predicate; callers are expected to consult
    /// [`check_winner`] first so a full winning board reports as a win.
    ///
    /// [`check_winner`]: Board::check_winner
    #[inline]
    pub fn is_full(&self) -> bool {
        self.mark_count() == self.size.cells()
    }

    /// Scan for a winner and report the first fully-marked line.
    ///
    /// Lines are tested in a fixed order: rows 0..N, columns 0..N, main
    /// diagonal, anti-diagonal. Returns None if no line is complete.
    pub fn check_winner(&self) -> Option<WinResult> {
        let (x_mask, o_mask) = self.occupancy_masks();

        for line in WinLine::all(self.size) {
            let mask = line.mask(self.size);
            if x_mask & mask == mask {
                return Some(WinResult { winner: Mark::X, line });
            }
            if o_mask & mask == mask {
                return Some(WinResult { winner: Mark::O, line });
            }
        }

        None
    }

    /// All empty cells in row-major scan order.
    pub fn available_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        let n = self.size.n();
        for row in 0..n {
            for col in 0..n {
                let pos = Pos::new(row, col);
                if self.is_empty(pos) {
                    moves.push(pos);
                }
            }
        }
        moves
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size.n();
        for row in 0..n {
            for col in 0..n {
                match self.mark_at(Pos::new(row, col)) {
                    None => f.write_char('.')?,
                    Some(mark) => write!(f, "{mark}")?,
                }
                if col + 1 < n {
                    f.write_char(' ')?;
                }
            }
            if row + 1 < n {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
