//! Property-Based Tests for the occupancy grid
//!
//! Properties:
//! - Conflict checks never mutate the grid
//! - A candidate sharing a cell with a filled slot always conflicts
//! - Dropping a preview guard restores the grid exactly
//! - Range summaries are ascending and cover exactly the marked indices

use jwxt_core::CellStatus;
use jwxt_grid::{ConflictStatus, OccupancyGrid, RangeSegment, RangeSummary};
use jwxt_test_utils::generators::{arb_cell_status, arb_slot};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn filled_grid(slots: &[jwxt_core::ParsedSlot], status: CellStatus) -> OccupancyGrid {
    let mut grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
    grid.reset();
    grid.fill_all(slots, status);
    grid
}

proptest! {
    #[test]
    fn prop_check_is_pure(
        filled in prop::collection::vec(arb_slot(16, 13), 0..4),
        candidate in prop::collection::vec(arb_slot(16, 13), 0..4),
        status in arb_cell_status(),
    ) {
        let grid = filled_grid(&filled, status);
        let before = grid.clone();
        let _ = grid.check_conflict(&candidate);
        let _ = grid.conflicting_cells(&candidate);
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn prop_shared_cell_conflicts(slot in arb_slot(16, 13)) {
        let grid = filled_grid(std::slice::from_ref(&slot), CellStatus::Selected);
        prop_assert_eq!(grid.check_conflict(&[slot.clone()]), ConflictStatus::Conflict);
        prop_assert_eq!(grid.conflicting_cells(&[slot.clone()]).len(), slot.cell_count());
    }

    #[test]
    fn prop_check_agrees_with_slot_overlap(
        a in arb_slot(16, 13),
        b in arb_slot(16, 13),
    ) {
        let grid = filled_grid(std::slice::from_ref(&a), CellStatus::Selected);
        let expected = if a.overlaps(&b) {
            ConflictStatus::Conflict
        } else {
            ConflictStatus::Clear
        };
        prop_assert_eq!(grid.check_conflict(&[b]), expected);
    }

    #[test]
    fn prop_preview_restores(
        filled in prop::collection::vec(arb_slot(16, 13), 0..4),
        candidate in prop::collection::vec(arb_slot(20, 15), 1..4),
    ) {
        let mut grid = filled_grid(&filled, CellStatus::Pending);
        let before = grid.clone();
        drop(grid.preview(&candidate));
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn prop_summary_covers_marked_indices(indices in prop::collection::vec(1u32..60, 0..30)) {
        let summary = RangeSummary::from_indices(indices.clone());
        let mut covered = Vec::new();
        for seg in summary.segments() {
            match *seg {
                RangeSegment::Single(i) => covered.push(i),
                RangeSegment::Run(start, end) => {
                    prop_assert!(start < end);
                    covered.extend(start..=end);
                }
            }
        }
        let expected: Vec<u32> = indices.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(covered, expected);

        // Adjacent segments never touch, otherwise they would have merged.
        let bounds: Vec<(u32, u32)> = summary
            .segments()
            .iter()
            .map(|s| match *s {
                RangeSegment::Single(i) => (i, i),
                RangeSegment::Run(a, b) => (a, b),
            })
            .collect();
        for pair in bounds.windows(2) {
            prop_assert!(pair[0].1 + 1 < pair[1].0);
        }
    }
}
