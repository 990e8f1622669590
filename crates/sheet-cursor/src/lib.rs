//! `sheet-cursor` provides [`Cursor`], a position tracker for laying out content on
//! a spreadsheet-like grid.
//!
//! A cursor:
//! - starts at a fixed cell and refuses to move above or left of it
//! - remembers the furthest row and column it has reached (the *canvas*)
//! - tags cells with named markers that can be looked up, merged and turned into
//!   ranges later
//!
//! The cursor is written against the [`sheet_model::Grid`] traits and only keeps
//! coordinates internally, so it can be moved onto another grid with
//! [`Cursor::clone_with_grid`].
//!
//! ```
//! use sheet_cursor::Cursor;
//! use sheet_model::{CellValue, Range, Sheet};
//!
//! # fn main() -> Result<(), sheet_cursor::CursorError> {
//! let mut sheet = Sheet::new(1, "Report");
//! let mut cursor = Cursor::at(&mut sheet, 2, 2)?;
//!
//! cursor.add_marker("header")?.write_row(["Name", "Total"])?;
//! cursor.reset_column().move_down(1)?.write_row([CellValue::from("a"), 3.into()])?;
//!
//! assert_eq!(cursor.canvas(), Range::from_a1("B2:C3").unwrap());
//! assert_eq!(cursor.marked_cell_reference("header")?, "B2");
//! # Ok(())
//! # }
//! ```

mod cursor;
mod error;
mod markers;
mod state;
mod write;

pub use cursor::Cursor;
pub use error::{CursorError, ErrorKind, InvalidOperation};
pub use state::CursorState;
