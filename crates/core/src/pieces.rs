//! Pieces module - canonical shapes, shape matrices and piece instances
//!
//! Every kind has one canonical shape, a small rectangular 0/1 matrix. The
//! table is static and never mutated: each piece instance owns an independent
//! copy of its matrix, and rotation always produces a new matrix.
//!
//! Rotation is a plain 90° clockwise transpose-and-reverse of the matrix.
//! There is no rotation state, pivot, or wall kick.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest supported side of a shape matrix
pub const MAX_SHAPE_SIDE: usize = 4;

const MAX_SHAPE_CELLS: usize = MAX_SHAPE_SIDE * MAX_SHAPE_SIDE;

const I_SHAPE: &[&[u8]] = &[&[1, 1, 1, 1]];
const O_SHAPE: &[&[u8]] = &[&[1, 1], &[1, 1]];
const T_SHAPE: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const S_SHAPE: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const Z_SHAPE: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];
const J_SHAPE: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_SHAPE: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];

/// Canonical (spawn) matrix for a piece kind.
pub fn canonical_shape(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    }
}

/// Rectangular 0/1 occupancy matrix, stored row-major without heap allocation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: ArrayVec<u8, MAX_SHAPE_CELLS>,
}

impl Shape {
    /// Fresh, independently owned copy of the canonical shape of `kind`.
    pub fn of(kind: PieceKind) -> Self {
        let rows = canonical_shape(kind);
        let mut cells = ArrayVec::new();
        for row in rows {
            cells.extend(row.iter().copied());
        }
        Self {
            rows: rows.len(),
            cols: rows[0].len(),
            cells,
        }
    }

    /// Build a shape from explicit rows.
    ///
    /// Returns `None` unless the rows are non-empty, rectangular, at most
    /// `MAX_SHAPE_SIDE` on each side, and contain only 0 and 1.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || cols > MAX_SHAPE_SIDE || rows.len() > MAX_SHAPE_SIDE {
            return None;
        }

        let mut cells = ArrayVec::new();
        for row in rows {
            if row.len() != cols || row.iter().any(|&v| v > 1) {
                return None;
            }
            cells.extend(row.iter().copied());
        }

        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of matrix rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of matrix columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at column `dx`, row `dy` is occupied.
    /// Out-of-range offsets are unoccupied.
    pub fn get(&self, dx: usize, dy: usize) -> bool {
        dx < self.cols && dy < self.rows && self.cells[dy * self.cols + dx] != 0
    }

    /// Occupied `(dx, dy)` offsets in row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(i, _)| (i % cols, i / cols))
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// The shape rotated 90° clockwise.
    ///
    /// For an `R x C` matrix the result is `C x R` with
    /// `rotated[x][R - 1 - y] = original[y][x]`.
    pub fn rotated_cw(&self) -> Self {
        let (r, c) = (self.rows, self.cols);
        let mut cells: ArrayVec<u8, MAX_SHAPE_CELLS> = ArrayVec::new();
        cells.extend(std::iter::repeat(0).take(r * c));

        for y in 0..r {
            for x in 0..c {
                // New matrix has `r` columns.
                cells[x * r + (r - 1 - y)] = self.cells[y * c + x];
            }
        }

        Self {
            rows: c,
            cols: r,
            cells,
        }
    }

    /// Copy out as nested rows (for snapshots and display).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(|row| row.to_vec()).collect()
    }
}

/// A piece instance: kind, its own shape matrix, and the board offset of the
/// matrix's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(kind: PieceKind, shape: Shape, x: i32, y: i32) -> Self {
        Self { kind, shape, x, y }
    }

    /// Canonical shape at the given offset.
    pub fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self::new(kind, Shape::of(kind), x, y)
    }

    /// Spawn placement: horizontally centred (`floor((width - cols) / 2)`), top row.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = Shape::of(kind);
        let x = (board_width as i32 - shape.cols() as i32).div_euclid(2);
        Self::new(kind, shape, x, 0)
    }

    /// Same shape, offset by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Same kind and origin, different matrix.
    pub fn with_shape(&self, shape: Shape) -> Self {
        Self {
            kind: self.kind,
            shape,
            x: self.x,
            y: self.y,
        }
    }

    /// Same origin, shape rotated clockwise.
    pub fn rotated(&self) -> Self {
        self.with_shape(self.shape.rotated_cw())
    }

    /// Absolute `(x, y)` board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
    }
}
