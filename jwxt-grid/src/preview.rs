//! Hover preview with automatic restore

use crate::{FillReport, OccupancyGrid};
use jwxt_core::{CellStatus, ParsedSlot};
use std::ops::Deref;

/// Grid borrowed with candidate cells marked [`CellStatus::Preview`].
///
/// Dropping the guard restores every touched cell to its prior status.
/// Read access goes through `Deref`, so range summaries and queries can be
/// rendered while the preview is visible.
#[must_use = "the preview is undone as soon as the guard is dropped"]
pub struct PreviewGuard<'g> {
    grid: &'g mut OccupancyGrid,
    saved: Vec<(usize, CellStatus)>,
    report: FillReport,
}

impl<'g> PreviewGuard<'g> {
    /// Cells written and clipped by the preview fill.
    pub fn report(&self) -> FillReport {
        self.report
    }

    /// Keep the preview cells in the grid instead of restoring them.
    pub fn commit(mut self) {
        self.saved.clear();
    }
}

impl Deref for PreviewGuard<'_> {
    type Target = OccupancyGrid;

    fn deref(&self) -> &OccupancyGrid {
        &*self.grid
    }
}

impl Drop for PreviewGuard<'_> {
    fn drop(&mut self) {
        // Reverse order so a cell touched twice ends at its original status.
        while let Some((index, status)) = self.saved.pop() {
            self.grid.set_at(index, status);
        }
    }
}

impl OccupancyGrid {
    /// Mark the candidate slots as preview until the returned guard drops.
    pub fn preview(&mut self, slots: &[ParsedSlot]) -> PreviewGuard<'_> {
        let mut saved = Vec::new();
        let mut report = FillReport::default();
        for slot in slots {
            for (section, week) in slot.cells() {
                match self.index(slot.weekday(), section, week) {
                    Some(index) => {
                        saved.push((index, self.status_at(index)));
                        self.set_at(index, CellStatus::Preview);
                        report.written += 1;
                    }
                    None => report.clipped += 1,
                }
            }
        }
        PreviewGuard {
            grid: self,
            saved,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwxt_core::Weekday;

    fn slot(day: Weekday, s: u8, e: u8, weeks: impl IntoIterator<Item = u32>) -> ParsedSlot {
        ParsedSlot::new(day, s, e, weeks).unwrap()
    }

    #[test]
    fn test_preview_restores_on_drop() {
        let mut grid = OccupancyGrid::with_dimensions(16, 13).unwrap();
        grid.reset();
        grid.fill(&slot(Weekday::Monday, 1, 2, 1..=8), CellStatus::Selected);
        let before = grid.clone();

        {
            let guard = grid.preview(&[slot(Weekday::Monday, 2, 3, [8, 9])]);
            assert_eq!(guard.report().written, 4);
            assert_eq!(guard.query(Weekday::Monday, 2, 8), Some(CellStatus::Preview));
            assert_eq!(guard.query(Weekday::Monday, 3, 9), Some(CellStatus::Preview));
        }

        assert_eq!(grid, before);
        assert_eq!(grid.query(Weekday::Monday, 2, 8), Some(CellStatus::Selected));
    }

    #[test]
    fn test_preview_overlapping_candidates_restore() {
        let mut grid = OccupancyGrid::with_dimensions(4, 4).unwrap();
        grid.reset();
        grid.fill(&slot(Weekday::Friday, 1, 1, [1]), CellStatus::Pending);
        let before = grid.clone();
        let candidates = [
            slot(Weekday::Friday, 1, 1, [1, 2]),
            slot(Weekday::Friday, 1, 2, [1]),
        ];
        drop(grid.preview(&candidates));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_commit_keeps_preview() {
        let mut grid = OccupancyGrid::with_dimensions(4, 4).unwrap();
        grid.reset();
        grid.preview(&[slot(Weekday::Sunday, 4, 5, [4, 5])]).commit();
        assert_eq!(grid.query(Weekday::Sunday, 4, 4), Some(CellStatus::Preview));
        assert_eq!(grid.occupied_count(), 1);
    }
}
