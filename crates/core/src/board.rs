//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! kind of the piece that locked there. Cells live in one flat row-major vector,
//! so every row has exactly `width` cells by construction.
//!
//! Coordinates: `(x, y)` with `x` in `0..width` (left to right) and `y` in
//! `0..height` (top to bottom). Piece cells may sit above the board (`y < 0`).

use crate::pieces::Piece;
use crate::types::Cell;

/// The game board, flat row-major storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// `y * width + x`
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Row `y` as a slice of exactly `width` cells.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `chunks` panics on a zero chunk size; an empty board yields no rows.
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map_or(false, |row| row.iter().all(|cell| cell.is_some()))
    }

    /// Whether `piece` may occupy its current placement.
    ///
    /// Every occupied shape cell must lie in a column of the board and above the
    /// floor. Cells above the top row are unobstructed; cells on the board must
    /// be empty. This is the only collision rule in the crate.
    pub fn accepts(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| {
            if x < 0 || x as usize >= self.width || y >= self.height as i32 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece's occupied cells onto the board, tagged with its kind.
    ///
    /// Cells outside the board (above the top row) are dropped.
    /// Returns the number of cells written.
    pub fn stamp(&mut self, piece: &Piece) -> usize {
        let mut written = 0;
        for (x, y) in piece.cells() {
            if self.set(x, y, Some(piece.kind)) {
                written += 1;
            }
        }
        written
    }

    /// Remove every full row, shift the rows above down, refill the top with
    /// empty rows, and return how many rows were removed.
    ///
    /// Scans bottom to top with a separate write cursor, so several full rows
    /// (adjacent or not) are removed in one pass and the remaining rows keep
    /// their relative order.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);

        cleared
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}
