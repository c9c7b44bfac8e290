//! Console Grid
//!
//! A dense row-major store of cells. Reads outside the grid return
//! [`Cell::ZERO`]; writes outside the grid are dropped.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// The console cell buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Cells, index = row * cols + col
    cells: Vec<Cell>,
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cells: vec![Cell::default(); cols * rows],
            cols,
            rows,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat offset of a coordinate, if it lies inside the grid
    pub fn offset_of(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Coordinate of a flat offset, if it lies inside the grid
    pub fn position_of(&self, offset: usize) -> Option<(usize, usize)> {
        if offset >= self.cells.len() {
            return None;
        }
        Some((offset % self.cols, offset / self.cols))
    }

    /// Get a cell by coordinate
    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.offset_of(col, row)
            .map(|offset| self.cells[offset])
            .unwrap_or(Cell::ZERO)
    }

    /// Get a cell by flat offset
    pub fn cell_at_offset(&self, offset: usize) -> Cell {
        self.cells.get(offset).copied().unwrap_or(Cell::ZERO)
    }

    /// Overwrite the cell at `offset`, returning what was there before.
    /// Returns `None` and leaves the grid untouched when out of range.
    pub fn replace_at_offset(&mut self, offset: usize, cell: Cell) -> Option<Cell> {
        self.cells
            .get_mut(offset)
            .map(|slot| std::mem::replace(slot, cell))
    }

    /// Overwrite the cell at a coordinate, returning the previous content
    pub fn replace(&mut self, col: usize, row: usize, cell: Cell) -> Option<Cell> {
        let offset = self.offset_of(col, row)?;
        self.replace_at_offset(offset, cell)
    }

    /// Get a row as a slice
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Set every cell to `cell`
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Reallocate for new dimensions. Previous content is discarded since
    /// the row stride changes.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cells.clear();
        self.cells.resize(cols * rows, Cell::default());
        self.cols = cols;
        self.rows = rows;
    }

    /// Shift the grid up by `n` rows. Rows revealed at the bottom (or the
    /// whole grid when `n >= rows`) are set to `fill`.
    pub fn scroll_up(&mut self, n: usize, fill: Cell) {
        if n == 0 {
            return;
        }
        if n >= self.rows {
            self.cells.fill(fill);
            return;
        }

        let shift = n * self.cols;
        let retained = self.cells.len() - shift;
        self.cells.copy_within(shift.., 0);
        self.cells[retained..].fill(fill);
    }
}
