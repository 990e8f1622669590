use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sheet_model::{CellRef, Grid};

use crate::error::{require_name, CursorError, InvalidOperation};
use crate::markers::Markers;
use crate::Cursor;

/// Serializable snapshot of a cursor, without its grid.
///
/// Snapshots let a layout be paused and resumed elsewhere, for example after the
/// grid has been persisted and reloaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorState {
    /// Current cell.
    pub position: CellRef,
    /// Cell the cursor was created at.
    pub start: CellRef,
    /// Bottom-right corner of the canvas.
    pub max: CellRef,
    /// Marked cells by marker name, each list in marking order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markers: BTreeMap<String, Vec<CellRef>>,
}

impl CursorState {
    /// Check every invariant a live cursor maintains.
    pub fn validate(&self) -> Result<(), CursorError> {
        let invalid = |msg: String| -> CursorError { InvalidOperation::InvalidState(msg).into() };

        let CursorState {
            position,
            start,
            max,
            ..
        } = self;
        if start.row < 1 || start.col < 1 {
            return Err(invalid(format!("start {start:?} is not 1-based")));
        }
        if position.row < start.row || position.col < start.col {
            return Err(invalid(format!(
                "position {position} lies before start {start}"
            )));
        }
        if max.row < position.row || max.col < position.col {
            return Err(invalid(format!(
                "canvas corner {max} does not cover position {position}"
            )));
        }

        for (name, cells) in &self.markers {
            require_name(name, "markers")?;
            if cells.is_empty() {
                return Err(invalid(format!("marker {name:?} has no cells")));
            }
            for (idx, cell) in cells.iter().enumerate() {
                if cell.row < start.row
                    || cell.col < start.col
                    || cell.row > max.row
                    || cell.col > max.col
                {
                    return Err(invalid(format!(
                        "marker {name:?} cell {cell} lies outside the canvas"
                    )));
                }
                if cells[..idx].contains(cell) {
                    return Err(invalid(format!(
                        "marker {name:?} lists {cell} more than once"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<G: Grid> Cursor<G> {
    /// Snapshot the cursor's position, canvas and markers.
    pub fn state(&self) -> CursorState {
        CursorState {
            position: self.position(),
            start: self.start(),
            max: CellRef::new(self.max_row(), self.max_col()),
            markers: self
                .markers
                .iter()
                .map(|(name, cells)| (name.to_owned(), cells.to_vec()))
                .collect(),
        }
    }

    /// Rebuild a cursor over `grid` from a snapshot.
    ///
    /// The snapshot is validated first; an inconsistent snapshot fails with
    /// [`InvalidOperation::InvalidState`].
    pub fn from_state(grid: G, state: CursorState) -> Result<Self, CursorError> {
        state.validate()?;

        let mut markers = Markers::default();
        for (name, cells) in state.markers {
            markers.insert(name, cells);
        }
        log::debug!(
            "restored cursor at {} with canvas {}:{} ({} markers)",
            state.position,
            state.start,
            state.max,
            markers.len()
        );
        Ok(Cursor::with_state(
            grid,
            state.position,
            state.start,
            state.max,
            markers,
        ))
    }
}
