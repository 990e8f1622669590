use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellRef, Range};

/// A merged block of cells, anchored at its top-left cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedRegion {
    pub range: Range,
}

impl MergedRegion {
    pub const fn new(range: Range) -> Self {
        Self { range }
    }

    /// The cell that owns the region's value.
    #[inline]
    pub const fn anchor(&self) -> CellRef {
        self.range.start
    }
}

/// Errors raised when adding a merged region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("merge {requested} overlaps existing merged region {existing}")]
    Overlap { existing: Range, requested: Range },
}

/// The non-overlapping merged regions of a sheet.
///
/// Serialized as a plain list. Deserializing replays [`MergedRegions::add`] over the
/// list, so overlapping input is rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedRegions {
    regions: Vec<MergedRegion>,
}

impl<'de> Deserialize<'de> for MergedRegions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let regions = Vec::<MergedRegion>::deserialize(deserializer)?;
        let mut merges = MergedRegions::new();
        for region in regions {
            merges.add(region.range).map_err(D::Error::custom)?;
        }
        Ok(merges)
    }
}

impl MergedRegions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MergedRegion> {
        self.regions.iter()
    }

    /// Add a region. Single-cell ranges are not recorded.
    ///
    /// Returns `Ok(false)` when nothing was added.
    pub fn add(&mut self, range: Range) -> Result<bool, MergeError> {
        let range = range.normalized();
        if range.is_single_cell() {
            return Ok(false);
        }
        if let Some(existing) = self.regions.iter().find(|r| r.range.intersects(&range)) {
            return Err(MergeError::Overlap {
                existing: existing.range,
                requested: range,
            });
        }
        self.regions.push(MergedRegion::new(range));
        Ok(true)
    }

    /// Remove every region intersecting `range`, returning how many were removed.
    pub fn remove_intersecting(&mut self, range: Range) -> usize {
        let range = range.normalized();
        let before = self.regions.len();
        self.regions.retain(|r| !r.range.intersects(&range));
        before - self.regions.len()
    }

    /// The region containing `cell`, if any.
    pub fn containing(&self, cell: CellRef) -> Option<&MergedRegion> {
        self.regions.iter().find(|r| r.range.contains(cell))
    }

    /// Resolve `cell` to the cell that actually stores its value.
    pub fn resolve(&self, cell: CellRef) -> CellRef {
        self.containing(cell).map_or(cell, MergedRegion::anchor)
    }
}
