//! Shapes module - the piece catalog and matrix rotation
//!
//! Every piece is a small 0/1 matrix (its bounding box). The seven templates
//! are immutable; rotating produces a new matrix and never touches a template.

use crate::types::{Position, ShapeKind, BOARD_WIDTH, MAX_SHAPE_DIM};

type Matrix = [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];

/// Occupancy matrix of a piece, indexed `[row][column]`.
///
/// Cells outside `width × height` are always zero, so two shapes compare
/// equal exactly when their bounding boxes and contents match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: Matrix,
}

const fn matrix<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Shape {
    assert!(W > 0 && H > 0 && W <= MAX_SHAPE_DIM && H <= MAX_SHAPE_DIM);

    let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut y = 0;
    while y < H {
        let mut x = 0;
        while x < W {
            cells[y][x] = (rows[y][x] != 0) as u8;
            x += 1;
        }
        y += 1;
    }

    Shape {
        width: W as u8,
        height: H as u8,
        cells,
    }
}

/// The seven templates, indexed by [`ShapeKind::index`]
pub const CATALOG: [Shape; 7] = [
    // I
    matrix([[1, 1, 1, 1]]),
    // O
    matrix([[1, 1], [1, 1]]),
    // T
    matrix([[1, 1, 1], [0, 1, 0]]),
    // J
    matrix([[1, 1, 1], [0, 0, 1]]),
    // L
    matrix([[1, 1, 1], [1, 0, 0]]),
    // S
    matrix([[0, 1, 1], [1, 1, 0]]),
    // Z
    matrix([[1, 1, 0], [0, 1, 1]]),
];

impl Shape {
    /// Template for a shape kind
    pub fn template(kind: ShapeKind) -> Self {
        CATALOG[kind.index()]
    }

    /// Build a shape from row data.
    ///
    /// Returns None for an empty or ragged matrix, or one larger than 4x4.
    /// Any nonzero entry counts as occupied.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.as_ref().len();
        if width == 0 || width > MAX_SHAPE_DIM || height > MAX_SHAPE_DIM {
            return None;
        }

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return None;
            }
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = (v != 0) as u8;
            }
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at column `x`, row `y` of the bounding box is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width as usize && y < self.height as usize && self.cells[y][x] != 0
    }

    /// Offsets (dx, dy) of every occupied cell, row by row
    pub fn minos(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height as usize).flat_map(move |y| {
            (0..self.width as usize)
                .filter(move |&x| self.cells[y][x] != 0)
                .map(move |x| (x as i8, y as i8))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.minos().count()
    }

    /// Rotate 90° clockwise into a new matrix.
    ///
    /// Row `i` of the result is column `i` of this shape read bottom to top,
    /// so the bounding box dimensions swap.
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }

        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Spawn anchor: horizontally centered, top row
    pub fn spawn_position(&self) -> Position {
        let x = (BOARD_WIDTH / 2) as i8 - (self.width / 2) as i8;
        Position::new(x, 0)
    }

    /// Occupancy as nested rows (for display and tests)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| self.cells[y][..self.width as usize].to_vec())
            .collect()
    }
}
