use std::collections::BTreeMap;

use sheet_model::{CellRef, Grid, Range};

use crate::error::{require_name, CursorError, InvalidOperation};
use crate::Cursor;

/// Named groups of cell coordinates.
///
/// Each name maps to the cells marked under it, in the order they were first
/// marked. A cell appears at most once per name, and a name never maps to an
/// empty list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Markers {
    map: BTreeMap<String, Vec<CellRef>>,
}

impl Markers {
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Append `cell` under `name`. Returns false if it was already there.
    pub(crate) fn add(&mut self, name: &str, cell: CellRef) -> bool {
        let cells = self.map.entry(name.to_owned()).or_default();
        if cells.contains(&cell) {
            return false;
        }
        cells.push(cell);
        true
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        self.map.remove(name).is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    pub(crate) fn get(&self, name: &str) -> Option<&[CellRef]> {
        let cells = self.map.get(name)?;
        debug_assert!(!cells.is_empty(), "marker {name:?} has no cells");
        if cells.is_empty() {
            None
        } else {
            Some(cells)
        }
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[CellRef])> {
        self.map
            .iter()
            .map(|(name, cells)| (name.as_str(), cells.as_slice()))
    }

    /// Install a complete cell list under `name`, replacing any previous one.
    ///
    /// Callers must have validated that `cells` is non-empty and duplicate free.
    pub(crate) fn insert(&mut self, name: String, cells: Vec<CellRef>) {
        debug_assert!(!cells.is_empty());
        self.map.insert(name, cells);
    }

    /// Move every cell of `source` into `target` and drop `source`.
    ///
    /// Returns the number of cells that were new to `target`.
    pub(crate) fn merge(&mut self, source: &str, target: &str) -> Result<usize, InvalidOperation> {
        let Some(source_cells) = self.map.remove(source) else {
            return Err(InvalidOperation::SourceMarkerNotFound(source.to_owned()));
        };
        if source == target {
            self.map.insert(source.to_owned(), source_cells);
            return Ok(0);
        }
        let Some(target_cells) = self.map.get_mut(target) else {
            // Leave the source untouched when the merge cannot happen.
            self.map.insert(source.to_owned(), source_cells);
            return Err(InvalidOperation::TargetMarkerNotFound(target.to_owned()));
        };

        let mut added = 0;
        for cell in source_cells {
            if !target_cells.contains(&cell) {
                target_cells.push(cell);
                added += 1;
            }
        }
        Ok(added)
    }
}

impl<G: Grid> Cursor<G> {
    /// Mark the current cell with `name`.
    ///
    /// Marking the same cell twice under one name has no effect; marking another
    /// cell appends it.
    pub fn add_marker(&mut self, name: &str) -> Result<&mut Self, CursorError> {
        require_name(name, "name")?;
        let cell = self.position();
        if self.markers.add(name, cell) {
            log::trace!("marked {cell} as {name:?}");
        }
        Ok(self)
    }

    /// Returns true if any cell is marked with `name`.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.contains(name)
    }

    /// Forget `name`. Removing an unknown marker is not an error.
    pub fn remove_marker(&mut self, name: &str) -> Result<&mut Self, CursorError> {
        require_name(name, "name")?;
        self.markers.remove(name);
        Ok(self)
    }

    pub fn remove_all_markers(&mut self) -> &mut Self {
        self.markers.clear();
        self
    }

    /// Names of all markers, sorted.
    pub fn marker_names(&self) -> impl Iterator<Item = &str> {
        self.markers.names()
    }

    fn marked(&self, name: &str) -> Result<&[CellRef], CursorError> {
        require_name(name, "name")?;
        self.markers
            .get(name)
            .ok_or_else(|| InvalidOperation::MarkerNotFound(name.to_owned()).into())
    }

    fn single_marked(&self, name: &str) -> Result<CellRef, CursorError> {
        match self.marked(name)? {
            [cell] => Ok(*cell),
            cells => Err(InvalidOperation::MultipleCellsMarked {
                name: name.to_owned(),
                count: cells.len(),
            }
            .into()),
        }
    }

    /// All cells marked with `name`, in marking order.
    pub fn marked_cells(&self, name: &str) -> Result<Vec<G::Cell>, CursorError> {
        Ok(self
            .marked(name)?
            .iter()
            .map(|cell| self.grid().cell_at(cell.row, cell.col))
            .collect())
    }

    /// The only cell marked with `name`.
    ///
    /// Fails with [`InvalidOperation::MultipleCellsMarked`] if the marker covers
    /// more than one cell.
    pub fn marked_cell(&self, name: &str) -> Result<G::Cell, CursorError> {
        let cell = self.single_marked(name)?;
        Ok(self.grid().cell_at(cell.row, cell.col))
    }

    /// A1 reference of the only cell marked with `name`.
    pub fn marked_cell_reference(&self, name: &str) -> Result<String, CursorError> {
        Ok(self.single_marked(name)?.to_a1())
    }

    /// Jump to the only cell marked with `name`.
    ///
    /// Start and canvas are left alone.
    pub fn move_to_marked_cell(&mut self, name: &str) -> Result<&mut Self, CursorError> {
        let cell = self.single_marked(name)?;
        self.row = cell.row;
        self.col = cell.col;
        Ok(self)
    }

    /// Bounding rectangle of every cell marked with `name`.
    pub fn marked_bounds(&self, name: &str) -> Result<Range, CursorError> {
        let cells = self.marked(name)?;
        Range::bounding(cells.iter().copied())
            .ok_or_else(|| InvalidOperation::MarkerNotFound(name.to_owned()).into())
    }

    /// Bounding range of every cell marked with `name`.
    pub fn marked_range(&self, name: &str) -> Result<G::Range, CursorError> {
        let bounds = self.marked_bounds(name)?;
        Ok(self.grid().range_of(bounds))
    }

    /// A1 reference of the bounding range of `name`.
    pub fn marked_range_reference(&self, name: &str) -> Result<String, CursorError> {
        Ok(self.marked_bounds(name)?.to_a1())
    }

    /// Fold `source` into `target`.
    ///
    /// Cells of `source` not already under `target` are appended in their
    /// original order, then `source` is removed.
    pub fn merge_markers(&mut self, source: &str, target: &str) -> Result<&mut Self, CursorError> {
        require_name(source, "source")?;
        require_name(target, "target")?;
        let added = self.markers.merge(source, target)?;
        log::debug!("merged marker {source:?} into {target:?} ({added} new cells)");
        Ok(self)
    }
}
