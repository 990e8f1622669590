//! The grid abstraction a cursor navigates.
//!
//! A grid resolves 1-based `(row, col)` coordinates into its own native cell and
//! range handles. Callers that only need coordinates can keep working with
//! [`CellRef`]/[`Range`] and resolve handles at the edge.

use thiserror::Error;

use crate::{CellRef, CellValue, MergeError, Range, SheetLimits};

/// A cell handle produced by a [`Grid`].
///
/// Handles must be able to report their own coordinates so that consumers can
/// remap them onto another grid or compute bounding rectangles.
pub trait GridCell {
    /// 1-based row of the cell.
    fn row(&self) -> u32;

    /// 1-based column of the cell.
    fn col(&self) -> u32;

    /// Coordinates of the cell.
    fn cell_ref(&self) -> CellRef {
        CellRef::new(self.row(), self.col())
    }
}

impl GridCell for CellRef {
    fn row(&self) -> u32 {
        self.row
    }

    fn col(&self) -> u32 {
        self.col
    }

    fn cell_ref(&self) -> CellRef {
        *self
    }
}

/// A 2-D addressable surface.
pub trait Grid {
    /// Native cell handle.
    type Cell: GridCell + Clone + PartialEq;
    /// Native range handle.
    type Range;

    /// Resolve `(row, col)` to a cell handle.
    fn cell_at(&self, row: u32, col: u32) -> Self::Cell;

    /// Resolve an inclusive rectangle to a range handle.
    fn range_at(&self, first_row: u32, last_row: u32, first_col: u32, last_col: u32)
        -> Self::Range;

    /// Resolve a [`Range`] to a range handle.
    fn range_of(&self, range: Range) -> Self::Range {
        self.range_at(range.start.row, range.end.row, range.start.col, range.end.col)
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    type Cell = G::Cell;
    type Range = G::Range;

    fn cell_at(&self, row: u32, col: u32) -> Self::Cell {
        (**self).cell_at(row, col)
    }

    fn range_at(
        &self,
        first_row: u32,
        last_row: u32,
        first_col: u32,
        last_col: u32,
    ) -> Self::Range {
        (**self).range_at(first_row, last_row, first_col, last_col)
    }
}

impl<G: Grid + ?Sized> Grid for &mut G {
    type Cell = G::Cell;
    type Range = G::Range;

    fn cell_at(&self, row: u32, col: u32) -> Self::Cell {
        (**self).cell_at(row, col)
    }

    fn range_at(
        &self,
        first_row: u32,
        last_row: u32,
        first_col: u32,
        last_col: u32,
    ) -> Self::Range {
        (**self).range_at(first_row, last_row, first_col, last_col)
    }
}

/// A grid that accepts writes.
pub trait GridWrite: Grid {
    /// Store `value` at `cell`.
    fn write_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), GridError>;

    /// Merge `range` into a single region anchored at its top-left cell.
    fn merge_cells(&mut self, range: Range) -> Result<(), GridError>;
}

impl<G: GridWrite + ?Sized> GridWrite for &mut G {
    fn write_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), GridError> {
        (**self).write_value(cell, value)
    }

    fn merge_cells(&mut self, range: Range) -> Result<(), GridError> {
        (**self).merge_cells(range)
    }
}

/// Errors raised by grid operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell {cell} is outside the grid ({} rows x {} columns)", .limits.max_rows, .limits.max_cols)]
    OutOfBounds { cell: CellRef, limits: SheetLimits },
    #[error("range {range} is outside the grid ({} rows x {} columns)", .limits.max_rows, .limits.max_cols)]
    RangeOutOfBounds { range: Range, limits: SheetLimits },
    #[error("invalid sheet limits: {} rows x {} columns", .0.max_rows, .0.max_cols)]
    InvalidLimits(SheetLimits),
    #[error(transparent)]
    Merge(#[from] MergeError),
}
