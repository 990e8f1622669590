use sheet_model::GridError;
use thiserror::Error;

/// Broad category of a [`CursorError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required argument was not supplied.
    MissingArgument,
    /// A string argument was whitespace only.
    BlankArgument,
    /// A numeric argument fell outside its allowed range.
    OutOfRange,
    /// The operation is not valid in the cursor's current state.
    InvalidOperation,
    /// The underlying grid rejected a write.
    Grid,
}

/// State-dependent failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("moving up {by} from row {row} would place cursor above start row {start_row}")]
    AboveStartRow { row: u32, by: i64, start_row: u32 },
    #[error("moving left {by} from column {col} would place cursor left of start column {start_col}")]
    LeftOfStartColumn { col: u32, by: i64, start_col: u32 },
    #[error("marker {0:?} does not exist")]
    MarkerNotFound(String),
    #[error("source marker {0:?} does not exist")]
    SourceMarkerNotFound(String),
    #[error("target marker {0:?} does not exist")]
    TargetMarkerNotFound(String),
    #[error("multiple cells are marked with {name:?} ({count} cells)")]
    MultipleCellsMarked { name: String, count: usize },
    #[error("invalid cursor state: {0}")]
    InvalidState(String),
}

/// Errors raised by [`Cursor`](crate::Cursor) operations.
///
/// Every failing operation leaves the cursor exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("missing required argument `{name}`")]
    MissingArgument { name: &'static str },
    #[error("argument `{name}` cannot be blank")]
    BlankArgument { name: &'static str },
    #[error("argument `{name}` is out of range ({value}): {reason}")]
    OutOfRange {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CursorError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CursorError::MissingArgument { .. } => ErrorKind::MissingArgument,
            CursorError::BlankArgument { .. } => ErrorKind::BlankArgument,
            CursorError::OutOfRange { .. } => ErrorKind::OutOfRange,
            CursorError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            CursorError::Grid(_) => ErrorKind::Grid,
        }
    }
}

/// Reject empty and whitespace-only names.
pub(crate) fn require_name(value: &str, name: &'static str) -> Result<(), CursorError> {
    if value.is_empty() {
        return Err(CursorError::MissingArgument { name });
    }
    if value.trim().is_empty() {
        return Err(CursorError::BlankArgument { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_checks_distinguish_missing_from_blank() {
        assert_eq!(
            require_name("", "name").unwrap_err().kind(),
            ErrorKind::MissingArgument
        );
        assert_eq!(
            require_name(" \t", "name").unwrap_err().kind(),
            ErrorKind::BlankArgument
        );
        assert!(require_name(" header ", "name").is_ok());
    }

    #[test]
    fn messages_name_the_failing_boundary() {
        let err = CursorError::from(InvalidOperation::AboveStartRow {
            row: 3,
            by: 5,
            start_row: 2,
        });
        assert_eq!(
            err.to_string(),
            "moving up 5 from row 3 would place cursor above start row 2"
        );
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
