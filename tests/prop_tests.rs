use proptest::prelude::*;

use unitgrid::classify;
use unitgrid::detect;
use unitgrid::grid::{Cell, RawGrid};

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        "[A-Za-z ]{0,12}".prop_map(Cell::Text),
        "[A-Z]{2,4}-[0-9]{1,4}".prop_map(Cell::Text),
        (0.0f64..1_000_000.0).prop_map(Cell::Number),
        any::<bool>().prop_map(Cell::Bool),
    ]
}

fn arb_grid() -> impl Strategy<Value = RawGrid> {
    prop::collection::vec(prop::collection::vec(arb_cell(), 0..8), 0..20)
}

proptest! {
    /// Detection is a pure function: repeated calls agree.
    #[test]
    fn detection_is_idempotent(grid in arb_grid()) {
        let first = detect::detect(&grid);
        prop_assert_eq!(detect::detect(&grid), first);
    }

    /// Boundaries stay inside the grid and ordered.
    #[test]
    fn boundaries_are_well_formed(grid in arb_grid()) {
        let r = detect::detect(&grid);
        prop_assert!(r.data_start <= r.data_end);
        prop_assert!(r.data_end <= grid.len());
        if let Some(h) = r.header_row {
            prop_assert!(h < r.data_start);
        }
    }

    /// Exactly one record per data row, each with a non-empty unit number.
    #[test]
    fn one_record_per_row_with_unit_numbers(grid in arb_grid()) {
        let detection = detect::detect(&grid);
        let out = classify::build(&grid, &detection);
        prop_assert_eq!(out.records.len(), detection.data_end - detection.data_start);
        for r in &out.records {
            prop_assert!(!r.unit_number.is_empty());
        }
    }

    /// Every populated cell survives into the attribute bag.
    #[test]
    fn no_silent_cell_loss(grid in arb_grid()) {
        let detection = detect::detect(&grid);
        let out = classify::build(&grid, &detection);
        for (i, row) in grid[detection.data_start..detection.data_end].iter().enumerate() {
            let populated = row.iter().filter(|c| !c.is_empty()).count();
            prop_assert_eq!(out.records[i].custom_fields.len(), populated);
        }
    }
}
