use sheet_model::{CellRef, CellValue, GridError, MergeError, Range, Sheet};

#[test]
fn merge_edit_unmerge_behaves_like_excel_anchor_cell() {
    let mut sheet = Sheet::new(1, "Sheet1");

    sheet
        .set_value(CellRef::new(1, 1), CellValue::String("keep".into()))
        .unwrap();
    sheet
        .set_value(CellRef::new(1, 2), CellValue::String("drop".into()))
        .unwrap();

    sheet
        .merge_range(Range::new(CellRef::new(1, 1), CellRef::new(1, 2)))
        .expect("merge");

    // Only the top-left cell is stored.
    assert_eq!(sheet.iter_cells().count(), 1);
    assert_eq!(
        sheet.value(CellRef::new(1, 1)),
        CellValue::String("keep".into())
    );
    assert_eq!(
        sheet.value(CellRef::new(1, 2)),
        CellValue::String("keep".into())
    );

    // Editing any cell inside a merge writes the anchor cell.
    sheet
        .set_value(CellRef::new(1, 2), CellValue::String("hello".into()))
        .unwrap();
    assert_eq!(sheet.iter_cells().count(), 1);
    assert_eq!(
        sheet.value(CellRef::new(1, 1)),
        CellValue::String("hello".into())
    );

    // Unmerge enables independent cells again.
    assert_eq!(
        sheet.unmerge_range(Range::new(CellRef::new(1, 1), CellRef::new(1, 1))),
        1
    );
    sheet
        .set_value(CellRef::new(1, 2), CellValue::String("b".into()))
        .unwrap();
    assert_eq!(sheet.iter_cells().count(), 2);
    assert_eq!(
        sheet.value(CellRef::new(1, 1)),
        CellValue::String("hello".into())
    );
    assert_eq!(
        sheet.value(CellRef::new(1, 2)),
        CellValue::String("b".into())
    );
}

#[test]
fn overlapping_merge_is_rejected_without_touching_cells() {
    let mut sheet = Sheet::new(1, "Sheet1");
    sheet.merge_range(Range::from_a1("A1:B2").unwrap()).unwrap();
    sheet.set_value_a1("C3", CellValue::Number(1.0)).unwrap();

    let err = sheet
        .merge_range(Range::from_a1("B2:C3").unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        GridError::Merge(MergeError::Overlap {
            existing: Range::from_a1("A1:B2").unwrap(),
            requested: Range::from_a1("B2:C3").unwrap(),
        })
    );
    assert_eq!(sheet.value_a1("C3").unwrap(), CellValue::Number(1.0));
    assert_eq!(sheet.merged_regions().len(), 1);
}

#[test]
fn merge_outside_limits_is_rejected() {
    let limits = sheet_model::SheetLimits::new(4, 4).unwrap();
    let mut sheet = Sheet::with_limits(1, "Small", limits).unwrap();
    let err = sheet
        .merge_range(Range::from_a1("C3:E5").unwrap())
        .unwrap_err();
    assert!(matches!(err, GridError::RangeOutOfBounds { .. }));
    assert!(sheet.merged_regions().is_empty());
}

#[test]
fn merge_accepts_corners_in_any_order() {
    let mut sheet = Sheet::new(1, "Sheet1");
    sheet.set_value_a1("A1", CellValue::from("keep")).unwrap();
    sheet.set_value_a1("B2", CellValue::from("drop")).unwrap();

    let reversed = Range {
        start: CellRef::new(3, 3),
        end: CellRef::new(1, 1),
    };
    sheet.merge_range(reversed).unwrap();

    let region = sheet.merged_regions().iter().next().copied().unwrap();
    assert_eq!(region.range, Range::from_a1("A1:C3").unwrap());
    assert_eq!(sheet.value_a1("C3").unwrap(), CellValue::from("keep"));
    assert_eq!(sheet.cell_count(), 1);

    assert_eq!(
        sheet.unmerge_range(Range {
            start: CellRef::new(2, 2),
            end: CellRef::new(1, 1),
        }),
        1
    );
}
