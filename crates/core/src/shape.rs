//! Shape module - piece templates as small bit matrices
//!
//! A shape is an R x C boolean matrix (R, C <= 4) packed into a `u16`, bit
//! `row * 4 + col`. Shapes are `Copy`: rotating produces a new value with swapped
//! dimensions and never touches the catalog templates.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ShapeKind;

/// Largest bounding box side supported by the bit packing
pub const MAX_SIDE: u8 = 4;

/// Rejected matrix when building a shape from rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape matrix is empty")]
    Empty,
    #[error("shape matrix is {rows}x{cols}, max side is {MAX_SIDE}")]
    TooLarge { rows: usize, cols: usize },
    #[error("shape row {row} has {len} columns, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Filled-cell matrix of a piece's bounding box
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Vec<u8>>", try_from = "Vec<Vec<u8>>")]
pub struct Shape {
    rows: u8,
    cols: u8,
    bits: u16,
}

const fn bit(row: usize, col: usize) -> u16 {
    1 << (row * MAX_SIDE as usize + col)
}

/// Build a template from row masks, leftmost column in the highest bit.
const fn from_row_masks(cols: u8, masks: &[u8]) -> Shape {
    let mut bits = 0u16;
    let mut r = 0;
    while r < masks.len() {
        let mut c = 0;
        while c < cols as usize {
            if masks[r] & (1 << (cols as usize - 1 - c)) != 0 {
                bits |= bit(r, c);
            }
            c += 1;
        }
        r += 1;
    }
    Shape {
        rows: masks.len() as u8,
        cols,
        bits,
    }
}

const I_SHAPE: Shape = from_row_masks(4, &[0b1111]);
const O_SHAPE: Shape = from_row_masks(2, &[0b11, 0b11]);
const T_SHAPE: Shape = from_row_masks(3, &[0b010, 0b111]);
const S_SHAPE: Shape = from_row_masks(3, &[0b110, 0b011]);
const Z_SHAPE: Shape = from_row_masks(3, &[0b011, 0b110]);
const L_SHAPE: Shape = from_row_masks(3, &[0b111, 0b100]);
const J_SHAPE: Shape = from_row_masks(3, &[0b111, 0b001]);

impl Shape {
    /// Spawn-orientation template for a catalog kind
    pub const fn template(kind: ShapeKind) -> Shape {
        match kind {
            ShapeKind::I => I_SHAPE,
            ShapeKind::O => O_SHAPE,
            ShapeKind::T => T_SHAPE,
            ShapeKind::S => S_SHAPE,
            ShapeKind::Z => Z_SHAPE,
            ShapeKind::L => L_SHAPE,
            ShapeKind::J => J_SHAPE,
        }
    }

    /// Build a shape from a 0/1 matrix (row 0 is the top)
    pub fn from_matrix<T: AsRef<[u8]>>(matrix: &[T]) -> Result<Shape, ShapeError> {
        let rows = matrix.len();
        let cols = matrix.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        if rows > MAX_SIDE as usize || cols > MAX_SIDE as usize {
            return Err(ShapeError::TooLarge { rows, cols });
        }

        let mut bits = 0u16;
        for (r, row) in matrix.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(ShapeError::Ragged {
                    row: r,
                    len: row.len(),
                    expected: cols,
                });
            }
            for (c, &v) in row.iter().enumerate() {
                if v != 0 {
                    bits |= bit(r, c);
                }
            }
        }

        Ok(Shape {
            rows: rows as u8,
            cols: cols as u8,
            bits,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether cell (row, col) is filled; false outside the bounding box
    pub fn get(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits & bit(row as usize, col as usize) != 0
    }

    /// Offsets `(dx, dy)` of filled cells relative to the top-left corner
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols)
                .filter(move |&c| self.get(r, c))
                .map(move |c| (c as i8, r as i8))
        })
    }

    pub fn filled_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// Quarter turn: an R x C shape becomes C x R with `new[i][j] = old[j][C-1-i]`.
    ///
    /// New row `i` is old column `C-1-i` read top to bottom. Four turns are the identity.
    pub fn rotated(&self) -> Shape {
        let mut bits = 0u16;
        for i in 0..self.cols {
            for j in 0..self.rows {
                if self.get(j, self.cols - 1 - i) {
                    bits |= bit(i as usize, j as usize);
                }
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Row-major 0/1 matrix
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.get(r, c) as u8).collect())
            .collect()
    }
}

impl From<Shape> for Vec<Vec<u8>> {
    fn from(shape: Shape) -> Self {
        shape.to_matrix()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Shape {
    type Error = ShapeError;

    fn try_from(matrix: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Shape::from_matrix(&matrix)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("matrix", &self.to_matrix())
            .finish()
    }
}
