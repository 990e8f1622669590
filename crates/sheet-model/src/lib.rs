//! `sheet-model` defines the grid a cell cursor navigates.
//!
//! It provides 1-based cell/range addressing with A1 notation, configurable sheet
//! limits, the [`Grid`] traits a cursor is written against, and [`Sheet`], a
//! sparse in-memory implementation of those traits.

mod address;
mod cell;
mod grid;
mod merge;
mod sheet;
mod value;

pub use address::{A1ParseError, CellRef, Range, RangeParseError};
pub use cell::{Cell, CellId, CellKey, RangeId, SheetId, SheetLimits, EXCEL_MAX_COLS, EXCEL_MAX_ROWS};
pub use grid::{Grid, GridCell, GridError, GridWrite};
pub use merge::{MergeError, MergedRegion, MergedRegions};
pub use sheet::{Sheet, SheetA1Error};
pub use value::CellValue;
