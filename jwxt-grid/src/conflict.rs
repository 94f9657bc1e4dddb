//! Conflict detection against an occupancy grid

use crate::OccupancyGrid;
use jwxt_core::{CellStatus, ParsedSlot, Weekday};
use tracing::debug;

/// Result of checking candidate slots against a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictStatus {
    /// Every candidate cell is free.
    Clear,
    /// At least one candidate cell is occupied.
    Conflict,
    /// The grid has not been populated, or a candidate cell lies outside
    /// it, so no answer can be given.
    Unknown,
}

impl ConflictStatus {
    pub fn is_conflict(self) -> bool {
        matches!(self, ConflictStatus::Conflict)
    }

    pub fn is_known(self) -> bool {
        !matches!(self, ConflictStatus::Unknown)
    }
}

/// An occupied cell touched by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellConflict {
    pub weekday: Weekday,
    pub section: u8,
    pub week: u32,
    pub status: CellStatus,
}

impl OccupancyGrid {
    /// Check candidate slots without mutating the grid.
    ///
    /// A candidate reaching past the grid's weeks or periods yields
    /// [`ConflictStatus::Unknown`]: the grid holds no answer for those cells.
    pub fn check_conflict(&self, slots: &[ParsedSlot]) -> ConflictStatus {
        if !self.is_populated() {
            debug!("conflict check on unpopulated grid");
            return ConflictStatus::Unknown;
        }
        let mut occupied = false;
        for slot in slots {
            for (section, week) in slot.cells() {
                match self.query(slot.weekday(), section, week) {
                    Some(status) => occupied |= !status.is_free(),
                    None => {
                        debug!(
                            weekday = %slot.weekday(),
                            section,
                            week,
                            "candidate cell outside grid"
                        );
                        return ConflictStatus::Unknown;
                    }
                }
            }
        }
        if occupied {
            ConflictStatus::Conflict
        } else {
            ConflictStatus::Clear
        }
    }

    /// Every occupied cell the candidates touch, in slot then cell order.
    ///
    /// Returns an empty list for an unpopulated grid; use
    /// [`OccupancyGrid::check_conflict`] to tell that case apart.
    pub fn conflicting_cells(&self, slots: &[ParsedSlot]) -> Vec<CellConflict> {
        if !self.is_populated() {
            return Vec::new();
        }
        slots
            .iter()
            .flat_map(|slot| {
                slot.cells().filter_map(move |(section, week)| {
                    let status = self.query(slot.weekday(), section, week)?;
                    (!status.is_free()).then_some(CellConflict {
                        weekday: slot.weekday(),
                        section,
                        week,
                        status,
                    })
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: Weekday, s: u8, e: u8, weeks: impl IntoIterator<Item = u32>) -> ParsedSlot {
        ParsedSlot::new(day, s, e, weeks).unwrap()
    }

    fn populated() -> OccupancyGrid {
        let mut grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
        grid.reset();
        grid.fill(&slot(Weekday::Monday, 1, 2, 1..=16), CellStatus::Selected);
        grid
    }

    #[test]
    fn test_shared_cell_conflicts() {
        let grid = populated();
        let candidate = [slot(Weekday::Monday, 2, 3, [16])];
        assert_eq!(grid.check_conflict(&candidate), ConflictStatus::Conflict);
        let cells = grid.conflicting_cells(&candidate);
        assert_eq!(
            cells,
            vec![CellConflict {
                weekday: Weekday::Monday,
                section: 2,
                week: 16,
                status: CellStatus::Selected,
            }]
        );
    }

    #[test]
    fn test_disjoint_slot_is_clear() {
        let grid = populated();
        let before = grid.clone();
        let candidate = [
            slot(Weekday::Monday, 3, 4, 1..=16),
            slot(Weekday::Tuesday, 1, 2, 1..=16),
        ];
        assert_eq!(grid.check_conflict(&candidate), ConflictStatus::Clear);
        assert!(grid.conflicting_cells(&candidate).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_unpopulated_is_unknown() {
        let grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
        let status = grid.check_conflict(&[slot(Weekday::Monday, 1, 1, [1])]);
        assert_eq!(status, ConflictStatus::Unknown);
        assert!(!status.is_known());
        assert!(!status.is_conflict());
    }

    #[test]
    fn test_pending_counts_as_occupied() {
        let mut grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
        grid.reset();
        grid.fill(&slot(Weekday::Friday, 5, 5, [3]), CellStatus::Pending);
        assert!(grid
            .check_conflict(&[slot(Weekday::Friday, 5, 6, [3, 4])])
            .is_conflict());
    }

    #[test]
    fn test_out_of_grid_candidate_is_unknown() {
        let mut grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
        grid.reset();
        let late = slot(Weekday::Monday, 1, 2, [17, 18]);
        let report = grid.fill(&late, CellStatus::Selected);
        assert_eq!(report.written, 0);
        assert_eq!(grid.check_conflict(&[late]), ConflictStatus::Unknown);

        // One stray week is enough, even beside an in-grid clash.
        grid.fill(&slot(Weekday::Monday, 1, 1, [16]), CellStatus::Selected);
        assert_eq!(
            grid.check_conflict(&[slot(Weekday::Monday, 1, 1, [16, 17])]),
            ConflictStatus::Unknown
        );
        assert_eq!(
            grid.check_conflict(&[slot(Weekday::Monday, 14, 14, [1])]),
            ConflictStatus::Unknown
        );
        assert_eq!(
            grid.check_conflict(&[slot(Weekday::Monday, 1, 1, [16])]),
            ConflictStatus::Conflict
        );
    }

    #[test]
    fn test_empty_candidate_is_clear() {
        assert_eq!(populated().check_conflict(&[]), ConflictStatus::Clear);
    }
}
