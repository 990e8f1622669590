use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::{
    A1ParseError, Cell, CellId, CellKey, CellRef, CellValue, Grid, GridError, GridWrite,
    MergedRegion, MergedRegions, Range, RangeId, SheetId, SheetLimits,
};

/// A sparse, in-memory sheet.
///
/// Only cells with content are stored. Cells are keyed by [`CellKey`], so
/// iteration is row-major and the serialized form stays JSON-safe.
///
/// Deserializing checks that stored cells and merged regions fit the sheet's
/// limits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sheet {
    /// Sheet identifier (higher layers may assign meaning).
    pub id: SheetId,

    /// User-visible sheet name.
    pub name: String,

    /// Physical bounds of the sheet.
    #[serde(default)]
    limits: SheetLimits,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    cells: BTreeMap<CellKey, Cell>,

    #[serde(default, skip_serializing_if = "MergedRegions::is_empty")]
    merged_regions: MergedRegions,
}

impl<'de> Deserialize<'de> for Sheet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            id: SheetId,
            name: String,
            #[serde(default)]
            limits: SheetLimits,
            #[serde(default)]
            cells: BTreeMap<CellKey, Cell>,
            #[serde(default)]
            merged_regions: MergedRegions,
        }

        let helper = Helper::deserialize(deserializer)?;
        let limits = helper.limits;

        if let Some(key) = helper.cells.keys().find(|key| !limits.contains(key.to_ref())) {
            return Err(D::Error::custom(GridError::OutOfBounds {
                cell: key.to_ref(),
                limits,
            }));
        }
        if let Some(region) = helper
            .merged_regions
            .iter()
            .find(|region| !limits.contains_range(&region.range))
        {
            return Err(D::Error::custom(GridError::RangeOutOfBounds {
                range: region.range,
                limits,
            }));
        }

        Ok(Sheet {
            id: helper.id,
            name: helper.name,
            limits,
            cells: helper.cells,
            merged_regions: helper.merged_regions,
        })
    }
}

impl Sheet {
    /// Create an empty, Excel-sized sheet.
    pub fn new(id: SheetId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            limits: SheetLimits::default(),
            cells: BTreeMap::new(),
            merged_regions: MergedRegions::new(),
        }
    }

    /// Create an empty sheet with custom limits.
    pub fn with_limits(
        id: SheetId,
        name: impl Into<String>,
        limits: SheetLimits,
    ) -> Result<Self, GridError> {
        limits.validate()?;
        Ok(Self {
            limits,
            ..Self::new(id, name)
        })
    }

    pub fn limits(&self) -> SheetLimits {
        self.limits
    }

    fn check_bounds(&self, cell: CellRef) -> Result<(), GridError> {
        if self.limits.contains(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                cell,
                limits: self.limits,
            })
        }
    }

    /// Number of stored (non-empty) cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Stored cell record at `cell`, ignoring merges.
    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        if !self.limits.contains(cell) {
            return None;
        }
        self.cells.get(&CellKey::from(cell))
    }

    /// Value shown at `cell`.
    ///
    /// Cells covered by a merged region report the value of the region's anchor.
    pub fn value(&self, cell: CellRef) -> CellValue {
        let anchor = self.merged_regions.resolve(cell);
        self.cell(anchor)
            .map(|c| c.value.clone())
            .unwrap_or_default()
    }

    /// Set the value at `cell`.
    ///
    /// Writing into a merged region targets the region's anchor. Writing
    /// [`CellValue::Empty`] removes the stored record.
    pub fn set_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), GridError> {
        self.check_bounds(cell)?;
        let target = self.merged_regions.resolve(cell);
        if target != cell {
            log::warn!(
                "write to {cell} on sheet {:?} redirected to merge anchor {target}",
                self.name
            );
        }

        let key = CellKey::from(target);
        if value.is_empty() {
            self.cells.remove(&key);
        } else {
            self.cells.insert(key, Cell::new(value));
        }
        Ok(())
    }

    /// Remove any stored content at `cell`.
    pub fn clear_cell(&mut self, cell: CellRef) {
        if self.limits.contains(cell) {
            self.cells.remove(&CellKey::from(cell));
        }
    }

    /// Iterate stored cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(key, cell)| (key.to_ref(), cell))
    }

    /// Minimal rectangle enclosing every stored cell, or `None` for an empty sheet.
    pub fn used_range(&self) -> Option<Range> {
        Range::bounding(self.cells.keys().map(|key| key.to_ref()))
    }

    /// Merge `range`, keeping only the anchor cell's content.
    pub fn merge_range(&mut self, range: Range) -> Result<(), GridError> {
        let range = range.normalized();
        if !self.limits.contains_range(&range) {
            return Err(GridError::RangeOutOfBounds {
                range,
                limits: self.limits,
            });
        }
        if !self.merged_regions.add(range)? {
            return Ok(());
        }

        let anchor = MergedRegion::new(range).anchor();
        let dropped: Vec<CellKey> = self
            .cells
            .range(CellKey::from(range.start)..=CellKey::from(range.end))
            .map(|(key, _)| *key)
            .filter(|key| range.contains(key.to_ref()) && key.to_ref() != anchor)
            .collect();
        for key in &dropped {
            self.cells.remove(key);
        }
        log::debug!(
            "merged {range} on sheet {:?} (dropped {} cells)",
            self.name,
            dropped.len()
        );
        Ok(())
    }

    /// Remove every merged region intersecting `range`.
    ///
    /// Returns the number of regions removed.
    pub fn unmerge_range(&mut self, range: Range) -> usize {
        self.merged_regions.remove_intersecting(range)
    }

    pub fn merged_regions(&self) -> &MergedRegions {
        &self.merged_regions
    }

    /// Set a value using an A1 reference.
    pub fn set_value_a1(&mut self, a1: &str, value: CellValue) -> Result<(), SheetA1Error> {
        let cell = CellRef::from_a1(a1)?;
        Ok(self.set_value(cell, value)?)
    }

    /// Read a value using an A1 reference.
    pub fn value_a1(&self, a1: &str) -> Result<CellValue, A1ParseError> {
        Ok(self.value(CellRef::from_a1(a1)?))
    }
}

/// Errors raised by the A1 convenience helpers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SheetA1Error {
    #[error(transparent)]
    Parse(#[from] A1ParseError),
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl Grid for Sheet {
    type Cell = CellId;
    type Range = RangeId;

    fn cell_at(&self, row: u32, col: u32) -> CellId {
        CellId::new(self.id, row, col)
    }

    fn range_at(&self, first_row: u32, last_row: u32, first_col: u32, last_col: u32) -> RangeId {
        RangeId::new(
            self.id,
            Range::from_bounds(first_row, last_row, first_col, last_col),
        )
    }
}

impl GridWrite for Sheet {
    fn write_value(&mut self, cell: CellRef, value: CellValue) -> Result<(), GridError> {
        self.set_value(cell, value)
    }

    fn merge_cells(&mut self, range: Range) -> Result<(), GridError> {
        self.merge_range(range)
    }
}

impl crate::GridCell for CellId {
    fn row(&self) -> u32 {
        self.cell.row
    }

    fn col(&self) -> u32 {
        self.cell.col
    }
}
