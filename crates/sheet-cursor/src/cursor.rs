use sheet_model::{CellRef, Grid, Range};

use crate::error::{CursorError, InvalidOperation};
use crate::markers::Markers;

/// A movable position over a [`Grid`].
///
/// The cursor remembers where it started and the furthest row and column it has
/// ever reached. The rectangle between the two is the *canvas*: it only grows,
/// no matter how the cursor moves afterwards.
///
/// Cells can be tagged with named markers while moving and looked up later,
/// either one by one or as the rectangle bounding all cells under a name.
///
/// The grid is a type parameter: a cursor can own its grid, borrow it (`&G`), or
/// borrow it mutably (`&mut G`) to write through it.
#[derive(Clone, Debug)]
pub struct Cursor<G> {
    grid: G,
    pub(crate) row: u32,
    pub(crate) col: u32,
    pub(crate) start_row: u32,
    pub(crate) start_col: u32,
    pub(crate) max_row: u32,
    pub(crate) max_col: u32,
    pub(crate) markers: Markers,
}

impl<G: Grid> Cursor<G> {
    /// Create a cursor at the top-left cell (`A1`).
    pub fn new(grid: G) -> Self {
        Self::from_parts(grid, 1, 1)
    }

    /// Create a cursor starting at `(row, col)`.
    ///
    /// Both coordinates are 1-based; zero fails with [`CursorError::OutOfRange`].
    pub fn at(grid: G, row: u32, col: u32) -> Result<Self, CursorError> {
        if row < 1 {
            return Err(CursorError::OutOfRange {
                name: "row",
                value: i64::from(row),
                reason: "row numbers start at 1",
            });
        }
        if col < 1 {
            return Err(CursorError::OutOfRange {
                name: "col",
                value: i64::from(col),
                reason: "column numbers start at 1",
            });
        }
        Ok(Self::from_parts(grid, row, col))
    }

    fn from_parts(grid: G, row: u32, col: u32) -> Self {
        Self {
            grid,
            row,
            col,
            start_row: row,
            start_col: col,
            max_row: row,
            max_col: col,
            markers: Markers::default(),
        }
    }

    pub(crate) fn with_state(
        grid: G,
        position: CellRef,
        start: CellRef,
        max: CellRef,
        markers: Markers,
    ) -> Self {
        Self {
            grid,
            row: position.row,
            col: position.col,
            start_row: start.row,
            start_col: start.col,
            max_row: max.row,
            max_col: max.col,
            markers,
        }
    }

    /// Copy this cursor onto another grid.
    ///
    /// Position, start, canvas and markers carry over unchanged. Markers are
    /// coordinates, so marked cells resolve against `grid` from now on.
    pub fn clone_with_grid<H: Grid>(&self, grid: H) -> Cursor<H> {
        log::debug!(
            "rebinding cursor at {} ({} markers) to a new grid",
            self.position(),
            self.markers.len()
        );
        Cursor::with_state(
            grid,
            self.position(),
            self.start(),
            CellRef::new(self.max_row, self.max_col),
            self.markers.clone(),
        )
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    /// Current row (1-based).
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Current column (1-based).
    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn start_row(&self) -> u32 {
        self.start_row
    }

    pub fn start_col(&self) -> u32 {
        self.start_col
    }

    /// Highest row the cursor has reached.
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Highest column the cursor has reached.
    pub fn max_col(&self) -> u32 {
        self.max_col
    }

    /// Current coordinates.
    pub fn position(&self) -> CellRef {
        CellRef::new(self.row, self.col)
    }

    pub(crate) fn start(&self) -> CellRef {
        CellRef::new(self.start_row, self.start_col)
    }

    /// The canvassed rectangle as plain coordinates.
    pub fn canvas(&self) -> Range {
        Range::from_bounds(self.start_row, self.max_row, self.start_col, self.max_col)
    }

    /// A1 reference of the current cell.
    pub fn cell_reference(&self) -> String {
        self.position().to_a1()
    }

    /// The current cell.
    pub fn cell(&self) -> G::Cell {
        self.grid.cell_at(self.row, self.col)
    }

    /// The current cell as a single-cell range.
    pub fn cell_range(&self) -> G::Range {
        self.grid.range_at(self.row, self.row, self.col, self.col)
    }

    /// The canvassed part of the current row.
    pub fn row_range(&self) -> G::Range {
        self.grid
            .range_at(self.row, self.row, self.start_col, self.max_col)
    }

    /// The canvassed part of the current column.
    pub fn column_range(&self) -> G::Range {
        self.grid
            .range_at(self.start_row, self.max_row, self.col, self.col)
    }

    /// The whole canvas.
    pub fn canvas_range(&self) -> G::Range {
        self.grid.range_of(self.canvas())
    }

    /// Move `by` rows down, growing the canvas if needed.
    pub fn move_down(&mut self, by: i64) -> Result<&mut Self, CursorError> {
        let row = self
            .row
            .checked_add(move_amount(by)?)
            .ok_or_else(|| overflow(by, "row number would overflow"))?;
        self.row = row;
        self.max_row = self.max_row.max(row);
        Ok(self)
    }

    /// Move `by` columns right, growing the canvas if needed.
    pub fn move_right(&mut self, by: i64) -> Result<&mut Self, CursorError> {
        let col = self
            .col
            .checked_add(move_amount(by)?)
            .ok_or_else(|| overflow(by, "column number would overflow"))?;
        self.col = col;
        self.max_col = self.max_col.max(col);
        Ok(self)
    }

    /// Move `by` rows up. Fails if that would pass the start row.
    pub fn move_up(&mut self, by: i64) -> Result<&mut Self, CursorError> {
        let amount = move_amount(by)?;
        match self.row.checked_sub(amount) {
            Some(row) if row >= self.start_row => {
                self.row = row;
                Ok(self)
            }
            _ => Err(InvalidOperation::AboveStartRow {
                row: self.row,
                by,
                start_row: self.start_row,
            }
            .into()),
        }
    }

    /// Move `by` columns left. Fails if that would pass the start column.
    pub fn move_left(&mut self, by: i64) -> Result<&mut Self, CursorError> {
        let amount = move_amount(by)?;
        match self.col.checked_sub(amount) {
            Some(col) if col >= self.start_col => {
                self.col = col;
                Ok(self)
            }
            _ => Err(InvalidOperation::LeftOfStartColumn {
                col: self.col,
                by,
                start_col: self.start_col,
            }
            .into()),
        }
    }

    pub fn reset_row(&mut self) -> &mut Self {
        self.row = self.start_row;
        self
    }

    pub fn reset_column(&mut self) -> &mut Self {
        self.col = self.start_col;
        self
    }

    /// Return to the start cell. The canvas is kept.
    pub fn reset(&mut self) -> &mut Self {
        self.reset_row().reset_column()
    }

    pub fn move_down_to_max_row(&mut self) -> &mut Self {
        self.row = self.max_row;
        self
    }

    pub fn move_right_to_max_column(&mut self) -> &mut Self {
        self.col = self.max_col;
        self
    }

    pub fn move_to_bottom_right_of_canvas(&mut self) -> &mut Self {
        self.move_down_to_max_row().move_right_to_max_column()
    }
}

fn move_amount(by: i64) -> Result<u32, CursorError> {
    if by < 0 {
        return Err(CursorError::OutOfRange {
            name: "by",
            value: by,
            reason: "move amount must not be negative",
        });
    }
    u32::try_from(by).map_err(|_| overflow(by, "move amount exceeds the addressable grid"))
}

fn overflow(by: i64, reason: &'static str) -> CursorError {
    CursorError::OutOfRange {
        name: "by",
        value: by,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use sheet_model::{CellId, RangeId, Sheet};

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn new_cursor_starts_at_a1() {
        let sheet = Sheet::new(1, "Sheet1");
        let cursor = Cursor::new(&sheet);
        assert_eq!(cursor.position(), CellRef::new(1, 1));
        assert_eq!(cursor.canvas(), Range::from_a1("A1").unwrap());
        assert_eq!(cursor.cell(), CellId::new(1, 1, 1));
    }

    #[test]
    fn zero_coordinates_are_rejected() {
        let sheet = Sheet::new(1, "Sheet1");
        let err = Cursor::at(&sheet, 0, 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(matches!(err, CursorError::OutOfRange { name: "row", .. }));

        let err = Cursor::at(&sheet, 3, 0).unwrap_err();
        assert!(matches!(err, CursorError::OutOfRange { name: "col", .. }));
    }

    #[test]
    fn negative_amounts_leave_state_untouched() {
        let sheet = Sheet::new(1, "Sheet1");
        let mut cursor = Cursor::at(&sheet, 2, 2).unwrap();
        for result in [
            cursor.move_down(-1).map(|_| ()),
            cursor.move_right(-1).map(|_| ()),
            cursor.move_up(-1).map(|_| ()),
            cursor.move_left(-1).map(|_| ()),
        ] {
            assert_eq!(result.unwrap_err().kind(), ErrorKind::OutOfRange);
        }
        assert_eq!(cursor.position(), CellRef::new(2, 2));
        assert_eq!(cursor.canvas(), Range::single(CellRef::new(2, 2)));
    }

    #[test]
    fn overflowing_move_fails_cleanly() {
        let sheet = Sheet::new(1, "Sheet1");
        let mut cursor = Cursor::new(&sheet);
        let err = cursor.move_down(i64::from(u32::MAX)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        let err = cursor.move_right(i64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(cursor.position(), CellRef::new(1, 1));
    }

    #[test]
    fn row_and_column_ranges_follow_the_canvas() {
        let sheet = Sheet::new(4, "Sheet4");
        let mut cursor = Cursor::at(&sheet, 2, 2).unwrap();
        cursor.move_right(3).unwrap().move_down(2).unwrap();
        cursor.reset_column();

        assert_eq!(cursor.cell_reference(), "B4");
        assert_eq!(
            cursor.cell_range(),
            RangeId::new(4, Range::from_a1("B4").unwrap())
        );
        assert_eq!(
            cursor.row_range(),
            RangeId::new(4, Range::from_a1("B4:E4").unwrap())
        );
        assert_eq!(
            cursor.column_range(),
            RangeId::new(4, Range::from_a1("B2:B4").unwrap())
        );
        assert_eq!(
            cursor.canvas_range(),
            RangeId::new(4, Range::from_a1("B2:E4").unwrap())
        );
    }
}
