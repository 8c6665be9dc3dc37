//! Grid module - the fixed-size playfield
//!
//! The grid is a 10x20 array where each cell is empty or holds the color of a
//! committed piece. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{Cell, Color, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Upper bound on rows removed by a single clear
pub const MAX_CLEARED_ROWS: usize = GRID_HEIGHT as usize;

/// One row of cells, left to right
pub type Row = [Cell; GRID_WIDTH as usize];

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a grid from explicit rows (row 0 is the top)
    pub fn from_rows(rows: [Row; GRID_HEIGHT as usize]) -> Self {
        let mut grid = Self::new();
        for (y, row) in rows.iter().enumerate() {
            let start = y * GRID_WIDTH as usize;
            grid.cells[start..start + GRID_WIDTH as usize].copy_from_slice(row);
        }
        grid
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
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

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Borrow a single row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= GRID_HEIGHT as usize {
            return None;
        }
        let start = y * GRID_WIDTH as usize;
        Some(&self.cells[start..start + GRID_WIDTH as usize])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(GRID_WIDTH as usize)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Check if a row is completely empty
    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_none()))
            .unwrap_or(false)
    }

    /// Fill every cell of a row with one color (test fixtures, garbage rows)
    pub fn fill_row(&mut self, y: usize, color: Color) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * GRID_WIDTH as usize;
        for cell in &mut self.cells[start..start + GRID_WIDTH as usize] {
            *cell = Some(color);
        }
        true
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Surviving rows keep their relative order and settle at the bottom; the
    /// same number of empty rows appear at the top. Two-pointer compaction, no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, MAX_CLEARED_ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let width = GRID_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Export as color ids (0 = empty) for snapshots
    pub fn write_u8_grid(&self, out: &mut [[u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map(|c| c.id()).unwrap_or(0);
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells = [None; GRID_SIZE];
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_grid_flat_array() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(Color::Cyan));
        grid.set(5, 10, Some(Color::Red));

        assert_eq!(grid.cells[0], Some(Color::Cyan));
        assert_eq!(grid.cells[10 * 10 + 5], Some(Color::Red));
    }

    #[test]
    fn test_clear_full_rows_reports_bottom_to_top() {
        let mut grid = Grid::new();
        grid.fill_row(19, Color::Blue);
        grid.fill_row(17, Color::Blue);
        grid.set(0, 18, Some(Color::Green));

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(grid.get(0, 19), Some(Some(Color::Green)));
        assert!(grid.is_row_empty(0));
        assert!(grid.is_row_empty(1));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_clear_every_row() {
        let mut grid = Grid::new();
        for y in 0..GRID_HEIGHT as usize {
            grid.fill_row(y, Color::Orange);
        }
        assert_eq!(grid.clear_full_rows().len(), GRID_HEIGHT as usize);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_write_u8_grid() {
        let mut grid = Grid::new();
        grid.set(2, 3, Some(Color::Purple));

        let mut out = [[0u8; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[3][2], Color::Purple.id());
        assert_eq!(out.iter().flatten().filter(|&&v| v != 0).count(), 1);
    }
}
