use sheet_model::{CellRef, CellValue, GridWrite, Range};

use crate::error::CursorError;
use crate::Cursor;

impl<G: GridWrite> Cursor<G> {
    /// Write `value` into the current cell.
    pub fn write_value(&mut self, value: impl Into<CellValue>) -> Result<&mut Self, CursorError> {
        let cell = self.position();
        self.grid_mut().write_value(cell, value.into())?;
        Ok(self)
    }

    /// Write `values` left to right, starting at the current cell.
    ///
    /// The cursor ends on the last written column, growing the canvas as it goes.
    /// If the grid rejects a value the cursor stays where it was, although cells
    /// written before the failure remain in the grid.
    pub fn write_row<I>(&mut self, values: I) -> Result<&mut Self, CursorError>
    where
        I: IntoIterator,
        I::Item: Into<CellValue>,
    {
        let row = self.row();
        let mut col = self.col();
        let mut last = None;
        for value in values {
            if last.is_some() {
                col = col.checked_add(1).ok_or(CursorError::OutOfRange {
                    name: "values",
                    value: i64::from(col),
                    reason: "row would run past the last addressable column",
                })?;
            }
            self.grid_mut()
                .write_value(CellRef::new(row, col), value.into())?;
            last = Some(col);
        }

        if let Some(last) = last {
            self.move_right(i64::from(last - self.col()))?;
        }
        Ok(self)
    }

    /// Merge the bounding range of the cells marked with `name`.
    pub fn merge_marked_range(&mut self, name: &str) -> Result<&mut Self, CursorError> {
        let bounds = self.marked_bounds(name)?;
        self.grid_mut().merge_cells(bounds)?;
        Ok(self)
    }

    /// Merge the canvassed part of the current row.
    pub fn merge_row_canvas(&mut self) -> Result<&mut Self, CursorError> {
        let range = Range::from_bounds(self.row(), self.row(), self.start_col(), self.max_col());
        self.grid_mut().merge_cells(range)?;
        Ok(self)
    }
}
