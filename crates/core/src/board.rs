//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`CellKind`].
//! Uses a flat array for cache locality and zero allocation on the hot paths.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the grid (y < 0) are legal positions for falling pieces but never store cells.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::rng::SimpleRng;
use crate::types::{Cell, CellKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Board width as usize
pub const WIDTH: usize = BOARD_WIDTH as usize;

/// Board height as usize
pub const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row indices removed by one [`Board::clear_lines`] call, top to bottom
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Build a board from a picture, bottom-aligned.
    ///
    /// Each string is one row; `.` or space is empty, anything else is a garbage cell. The
    /// last string is the bottom row. Rows shorter than the board are padded with empty cells.
    ///
    /// ```
    /// use tetris_versus_core::Board;
    ///
    /// let board = Board::from_ascii(&["#........#", "##########"]);
    /// assert!(board.is_row_full(19));
    /// assert!(board.is_occupied(0, 18));
    /// assert!(!board.is_occupied(1, 18));
    /// ```
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut board = Self::new();
        let skip = rows.len().saturating_sub(HEIGHT);
        let top = HEIGHT - (rows.len() - skip);
        for (i, row) in rows.iter().skip(skip).enumerate() {
            let y = top + i;
            for (x, ch) in row.chars().take(WIDTH).enumerate() {
                if ch != '.' && ch != ' ' {
                    board.cells[y * WIDTH + x] = Some(CellKind::Garbage);
                }
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single mino may sit at (x, y).
    ///
    /// Columns must be on the board and rows above the bottom; rows above the top (y < 0)
    /// are always free.
    #[inline]
    pub fn is_cell_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || self.cells[(y as usize) * WIDTH + (x as usize)].is_none()
    }

    /// Whether every mino of `piece` is free (see [`Board::is_cell_free`])
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&(x, y)| self.is_cell_free(x, y))
    }

    /// Write the piece's color into each of its on-grid cells.
    ///
    /// No validation: callers check [`Board::is_valid_position`] first. Minos above the top
    /// row are dropped.
    pub fn place(&mut self, piece: &Piece) {
        let cell = Some(CellKind::Piece(piece.kind));
        for (x, y) in piece.cells() {
            if (0..BOARD_HEIGHT as i8).contains(&y) {
                self.set(x, y, cell);
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row at once and let the rest fall.
    ///
    /// Returns the removed row indices in their original top-to-bottom order. Uses a
    /// two-pointer pass from the bottom with no allocation.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    let dst_start = write_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * WIDTH] {
            *cell = None;
        }

        // Collected bottom-up.
        cleared_rows.reverse();
        cleared_rows
    }

    /// Push `count` garbage rows in from the bottom.
    ///
    /// The top `count` rows are discarded whatever they contain, everything else moves up,
    /// and each new bottom row is full except for one gap at a uniformly random column.
    /// `count` is clamped to the board height.
    pub fn add_garbage_lines(&mut self, count: usize, rng: &mut SimpleRng) {
        let count = count.min(HEIGHT);
        if count == 0 {
            return;
        }

        self.cells.copy_within(count * WIDTH.., 0);

        for y in HEIGHT - count..HEIGHT {
            let gap = rng.next_range(WIDTH as u32) as usize;
            let start = y * WIDTH;
            for (x, cell) in self.cells[start..start + WIDTH].iter_mut().enumerate() {
                *cell = if x == gap {
                    None
                } else {
                    Some(CellKind::Garbage)
                };
            }
        }
    }

    /// True if the top row holds any block
    pub fn is_game_over(&self) -> bool {
        self.cells[..WIDTH].iter().any(|cell| cell.is_some())
    }

    /// Height of every column: rows from the bottom up to and including its top block
    pub fn column_heights(&self) -> [u8; WIDTH] {
        let mut heights = [0u8; WIDTH];
        for (x, h) in heights.iter_mut().enumerate() {
            for y in 0..HEIGHT {
                if self.cells[y * WIDTH + x].is_some() {
                    *h = (HEIGHT - y) as u8;
                    break;
                }
            }
        }
        heights
    }

    /// Occupancy grid, indexed `[y][x]`
    pub fn occupancy(&self) -> [[bool; WIDTH]; HEIGHT] {
        let mut out = [[false; WIDTH]; HEIGHT];
        for (y, row) in out.iter_mut().enumerate() {
            for (x, filled) in row.iter_mut().enumerate() {
                *filled = self.cells[y * WIDTH + x].is_some();
            }
        }
        out
    }

    /// Write snapshot color codes (0 = empty) into `out`
    pub fn write_code_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, code) in row.iter_mut().enumerate() {
                *code = self.cells[y * WIDTH + x].map_or(0, |c| c.code());
            }
        }
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of one row, `None` below the grid
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        self.cells.get(start..start + WIDTH)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
