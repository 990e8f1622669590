use pretty_assertions::assert_eq;
use sheet_cursor::{Cursor, CursorError, ErrorKind, InvalidOperation};
use sheet_model::{CellId, CellRef, Range, RangeId, Sheet};

#[test]
fn marked_cells_keep_visit_order_without_duplicates() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);

    cursor.move_down(2).unwrap().add_marker("m").unwrap();
    cursor.move_right(3).unwrap().add_marker("m").unwrap();
    cursor.move_left(3).unwrap().add_marker("m").unwrap();

    assert_eq!(
        cursor.marked_cells("m").unwrap(),
        vec![CellId::new(1, 3, 1), CellId::new(1, 3, 4)]
    );
}

#[test]
fn markers_are_case_sensitive() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);
    cursor.add_marker("Total").unwrap();

    assert!(cursor.has_marker("Total"));
    assert!(!cursor.has_marker("total"));
    assert_eq!(
        cursor.marked_cells("total").unwrap_err(),
        CursorError::InvalidOperation(InvalidOperation::MarkerNotFound("total".into()))
    );
}

#[test]
fn blank_and_missing_names_are_rejected() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);

    assert_eq!(
        cursor.add_marker("").unwrap_err().kind(),
        ErrorKind::MissingArgument
    );
    assert_eq!(
        cursor.add_marker("   ").unwrap_err().kind(),
        ErrorKind::BlankArgument
    );
    assert_eq!(
        cursor.remove_marker("\t").unwrap_err().kind(),
        ErrorKind::BlankArgument
    );
    assert_eq!(
        cursor.marked_cell("").unwrap_err().kind(),
        ErrorKind::MissingArgument
    );
    assert!(!cursor.has_marker(" "));
    assert_eq!(cursor.marker_names().count(), 0);
}

#[test]
fn single_cell_lookup_is_ambiguous_for_groups() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);
    cursor.move_down(1).unwrap().add_marker("one").unwrap();
    assert_eq!(cursor.marked_cell("one").unwrap(), CellId::new(1, 2, 1));
    assert_eq!(cursor.marked_cell_reference("one").unwrap(), "A2");

    cursor.move_right(1).unwrap().add_marker("one").unwrap();
    let err = cursor.marked_cell("one").unwrap_err();
    assert_eq!(
        err,
        CursorError::InvalidOperation(InvalidOperation::MultipleCellsMarked {
            name: "one".into(),
            count: 2,
        })
    );
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    assert!(cursor.marked_cell_reference("one").is_err());
}

#[test]
fn marked_range_is_the_bounding_rectangle() {
    let sheet = Sheet::new(2, "Sheet2");
    let mut cursor = Cursor::new(&sheet);
    cursor.add_marker("box").unwrap();
    cursor.move_down(2).unwrap().move_right(2).unwrap().add_marker("box").unwrap();

    assert_eq!(
        cursor.marked_range("box").unwrap(),
        RangeId::new(2, Range::from_bounds(1, 3, 1, 3))
    );
    assert_eq!(cursor.marked_range_reference("box").unwrap(), "A1:C3");

    // Order of marking does not matter for the bounds.
    cursor.reset().move_down(1).unwrap().move_right(4).unwrap().add_marker("skew").unwrap();
    cursor.reset().move_down(3).unwrap().add_marker("skew").unwrap();
    assert_eq!(cursor.marked_bounds("skew").unwrap(), Range::from_a1("A2:E4").unwrap());
}

#[test]
fn move_to_marked_cell_does_not_touch_canvas() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::at(&sheet, 2, 2).unwrap();
    cursor.move_down(1).unwrap().move_right(1).unwrap().add_marker("spot").unwrap();
    cursor.move_down(5).unwrap().move_right(5).unwrap();

    cursor.move_to_marked_cell("spot").unwrap();
    assert_eq!(cursor.position(), CellRef::new(3, 3));
    assert_eq!(cursor.canvas(), Range::from_a1("B2:H8").unwrap());
    assert_eq!((cursor.start_row(), cursor.start_col()), (2, 2));
}

#[test]
fn move_to_marked_cell_fails_for_groups_and_keeps_position() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);
    cursor.add_marker("g").unwrap();
    cursor.move_down(1).unwrap().add_marker("g").unwrap();
    cursor.move_down(1).unwrap();

    assert!(cursor.move_to_marked_cell("g").is_err());
    assert!(cursor.move_to_marked_cell("missing").is_err());
    assert_eq!(cursor.position(), CellRef::new(3, 1));
}

#[test]
fn merge_markers_unions_without_duplicates() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);

    // a = {(1,1), (2,2)}, b = {(2,2), (3,3)}
    cursor.add_marker("a").unwrap();
    cursor.move_down(1).unwrap().move_right(1).unwrap();
    cursor.add_marker("a").unwrap().add_marker("b").unwrap();
    cursor.move_down(1).unwrap().move_right(1).unwrap().add_marker("b").unwrap();

    cursor.merge_markers("a", "b").unwrap();

    assert!(!cursor.has_marker("a"));
    assert_eq!(
        cursor.marked_cells("b").unwrap(),
        vec![
            CellId::new(1, 2, 2),
            CellId::new(1, 3, 3),
            CellId::new(1, 1, 1),
        ]
    );
}

#[test]
fn merge_markers_requires_both_sides() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);
    cursor.add_marker("a").unwrap();

    assert_eq!(
        cursor.merge_markers("nope", "a").unwrap_err(),
        CursorError::InvalidOperation(InvalidOperation::SourceMarkerNotFound("nope".into()))
    );
    assert_eq!(
        cursor.merge_markers("a", "nope").unwrap_err(),
        CursorError::InvalidOperation(InvalidOperation::TargetMarkerNotFound("nope".into()))
    );
    assert_eq!(
        cursor.merge_markers(" ", "a").unwrap_err().kind(),
        ErrorKind::BlankArgument
    );
    assert!(cursor.has_marker("a"));
}

#[test]
fn removing_markers() {
    let sheet = Sheet::new(1, "Sheet1");
    let mut cursor = Cursor::new(&sheet);
    for name in ["x", "y", "z"] {
        cursor.add_marker(name).unwrap().move_down(1).unwrap();
    }
    assert_eq!(cursor.marker_names().collect::<Vec<_>>(), vec!["x", "y", "z"]);

    cursor.remove_marker("y").unwrap();
    cursor.remove_marker("never-added").unwrap();
    assert!(!cursor.has_marker("y"));
    assert!(cursor.has_marker("x"));

    cursor.remove_all_markers();
    for name in ["x", "y", "z"] {
        assert!(!cursor.has_marker(name));
    }
}
