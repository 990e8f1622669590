#![no_main]

use libfuzzer_sys::fuzz_target;

use sheet_cursor::Cursor;
use sheet_model::{Range, Sheet, SheetLimits};

/// Keep runs short: each input byte pair is one cursor operation.
const MAX_OPS: usize = 4_096;
const MARKER_NAMES: [&str; 4] = ["a", "b", "c", " "];

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let Ok(limits) = SheetLimits::new(256, 64) else {
        return;
    };
    let Ok(mut sheet) = Sheet::with_limits(1, "Fuzz", limits) else {
        return;
    };
    let start_row = u32::from(data[0] % 16) + 1;
    let start_col = u32::from(data[1] % 16) + 1;
    let Ok(mut cursor) = Cursor::at(&mut sheet, start_row, start_col) else {
        return;
    };

    for pair in data[2..].chunks_exact(2).take(MAX_OPS) {
        let (selector, arg) = (pair[0], pair[1]);
        let by = i64::from(arg % 24) - 4;
        let name = MARKER_NAMES[usize::from(arg) % MARKER_NAMES.len()];
        let before = cursor.state();

        let failed = match selector % 14 {
            0 => cursor.move_down(by).is_err(),
            1 => cursor.move_right(by).is_err(),
            2 => cursor.move_up(by).is_err(),
            3 => cursor.move_left(by).is_err(),
            4 => {
                cursor.reset();
                false
            }
            5 => {
                cursor.move_to_bottom_right_of_canvas();
                false
            }
            6 => cursor.add_marker(name).is_err(),
            7 => cursor.remove_marker(name).is_err(),
            8 => {
                let target = MARKER_NAMES[usize::from(selector) % MARKER_NAMES.len()];
                cursor.merge_markers(name, target).is_err()
            }
            9 => cursor.move_to_marked_cell(name).is_err(),
            10 => cursor.write_value(f64::from(arg)).is_err(),
            11 => cursor.write_row([1.0, 2.0, 3.0]).is_err(),
            12 => cursor.merge_marked_range(name).is_err(),
            _ => {
                cursor.reset_row();
                false
            }
        };

        // Failures never leave a partially applied cursor behind.
        if failed {
            assert_eq!(cursor.state(), before);
        }

        let state = cursor.state();
        assert!(state.validate().is_ok(), "invalid state: {state:?}");
        assert!(state.max.row >= before.max.row && state.max.col >= before.max.col);

        for marker in cursor.marker_names().map(str::to_owned).collect::<Vec<_>>() {
            let cells = cursor.marked_cells(&marker).unwrap_or_default();
            assert!(!cells.is_empty());
            let bounds = cursor.marked_bounds(&marker).ok();
            assert_eq!(bounds, Range::bounding(cells.iter().map(|id| id.cell)));
        }
    }
});
