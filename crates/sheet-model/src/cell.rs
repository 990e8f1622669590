use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{CellRef, CellValue, GridError, Range};

/// Excel-compatible maximum rows per worksheet (1,048,576).
pub const EXCEL_MAX_ROWS: u32 = 1_048_576;

/// Excel-compatible maximum columns per worksheet (16,384).
pub const EXCEL_MAX_COLS: u32 = 16_384;

const COL_BITS: u32 = 15; // columns are 1..=16,384, which needs 15 bits.
const COL_MASK: u64 = (1u64 << COL_BITS) - 1;

fn default_max_rows() -> u32 {
    EXCEL_MAX_ROWS
}

fn default_max_cols() -> u32 {
    EXCEL_MAX_COLS
}

/// Physical bounds of a grid.
///
/// Limits are configuration: they deserialize with Excel defaults for any missing
/// field, so `{}` is a valid (Excel-sized) configuration. Deserialized limits go
/// through [`SheetLimits::validate`] like those built with [`SheetLimits::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SheetLimits {
    /// Highest addressable row (1-based, inclusive).
    pub max_rows: u32,
    /// Highest addressable column (1-based, inclusive).
    pub max_cols: u32,
}

impl<'de> Deserialize<'de> for SheetLimits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default = "default_max_rows")]
            max_rows: u32,
            #[serde(default = "default_max_cols")]
            max_cols: u32,
        }

        let helper = Helper::deserialize(deserializer)?;
        SheetLimits::new(helper.max_rows, helper.max_cols).map_err(D::Error::custom)
    }
}

impl Default for SheetLimits {
    fn default() -> Self {
        Self::EXCEL
    }
}

impl SheetLimits {
    /// The limits of an Excel worksheet.
    pub const EXCEL: SheetLimits = SheetLimits {
        max_rows: EXCEL_MAX_ROWS,
        max_cols: EXCEL_MAX_COLS,
    };

    /// Create limits for a smaller grid.
    ///
    /// Both dimensions must be at least 1 and no larger than the Excel maxima.
    pub fn new(max_rows: u32, max_cols: u32) -> Result<Self, GridError> {
        let limits = Self { max_rows, max_cols };
        limits.validate()?;
        Ok(limits)
    }

    /// Check that the limits describe a non-empty, Excel-sized (or smaller) grid.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.max_rows == 0
            || self.max_cols == 0
            || self.max_rows > EXCEL_MAX_ROWS
            || self.max_cols > EXCEL_MAX_COLS
        {
            return Err(GridError::InvalidLimits(*self));
        }
        Ok(())
    }

    /// Returns true if `cell` is addressable under these limits.
    #[inline]
    pub const fn contains(&self, cell: CellRef) -> bool {
        cell.row >= 1 && cell.col >= 1 && cell.row <= self.max_rows && cell.col <= self.max_cols
    }

    /// Returns true if every cell of `range` is addressable.
    #[inline]
    pub const fn contains_range(&self, range: &Range) -> bool {
        self.contains(range.start) && self.contains(range.end)
    }
}

/// Compact key used for sparse cell storage.
///
/// The key is a packed `(row, col)` pair into a `u64`:
///
/// ```text
/// key = (row << 15) | col
/// ```
///
/// Both components are 1-based. Excel's maximum dimensions fit within 36 bits,
/// which keeps the key JSON-safe for JavaScript numbers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
pub struct CellKey(u64);

impl CellKey {
    /// Encode a `(row, col)` coordinate into a compact [`CellKey`].
    #[inline]
    pub fn new(row: u32, col: u32) -> Self {
        assert!(
            (1..=EXCEL_MAX_ROWS).contains(&row),
            "row out of Excel bounds: {row}"
        );
        assert!(
            (1..=EXCEL_MAX_COLS).contains(&col),
            "col out of Excel bounds: {col}"
        );
        Self(((row as u64) << COL_BITS) | (col as u64))
    }

    /// Decode the row component (1-based).
    #[inline]
    pub const fn row(self) -> u32 {
        (self.0 >> COL_BITS) as u32
    }

    /// Decode the column component (1-based).
    #[inline]
    pub const fn col(self) -> u32 {
        (self.0 & COL_MASK) as u32
    }

    /// Convert to a [`CellRef`].
    #[inline]
    pub const fn to_ref(self) -> CellRef {
        CellRef::new(self.row(), self.col())
    }

    /// Create a key from a [`CellRef`].
    #[inline]
    pub fn from_ref(cell: CellRef) -> Self {
        Self::new(cell.row, cell.col)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        let row = raw >> COL_BITS;
        let col = raw & COL_MASK;

        if row == 0 || row > EXCEL_MAX_ROWS as u64 {
            return Err(D::Error::custom(format!(
                "CellKey row out of Excel bounds: {row}"
            )));
        }
        if col == 0 || col > EXCEL_MAX_COLS as u64 {
            return Err(D::Error::custom(format!(
                "CellKey col out of Excel bounds: {col}"
            )));
        }

        Ok(CellKey(raw))
    }
}

impl From<CellRef> for CellKey {
    fn from(value: CellRef) -> Self {
        Self::from_ref(value)
    }
}

/// Identifier for a sheet.
pub type SheetId = u32;

/// Grid-native handle for a single cell of a [`Sheet`](crate::Sheet).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId {
    /// Sheet the cell belongs to.
    pub sheet_id: SheetId,
    /// Cell coordinates within the sheet.
    pub cell: CellRef,
}

impl CellId {
    /// Create a new [`CellId`].
    pub const fn new(sheet_id: SheetId, row: u32, col: u32) -> Self {
        Self {
            sheet_id,
            cell: CellRef::new(row, col),
        }
    }
}

/// Grid-native handle for a rectangular region of a [`Sheet`](crate::Sheet).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeId {
    /// Sheet the range belongs to.
    pub sheet_id: SheetId,
    /// Range coordinates within the sheet.
    pub range: Range,
}

impl RangeId {
    /// Create a new [`RangeId`].
    pub const fn new(sheet_id: SheetId, range: Range) -> Self {
        Self { sheet_id, range }
    }
}

/// A single stored cell record.
///
/// Cells are stored sparsely: a cell with an empty value is removed from the
/// sheet map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's literal value.
    #[serde(default)]
    pub value: CellValue,
}

impl Cell {
    /// Create a new cell with the given value.
    pub fn new(value: CellValue) -> Self {
        Self { value }
    }
}
