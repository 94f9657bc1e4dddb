//! Occupancy grid over one term

use jwxt_core::{CellStatus, ConfigError, ParsedSlot, TermCalendar, Weekday};
use tracing::debug;

const DAYS: usize = 7;

/// Outcome of a [`OccupancyGrid::fill`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    /// Cells written inside the grid.
    pub written: usize,
    /// Cells that fell outside the term and were skipped.
    pub clipped: usize,
}

impl std::ops::AddAssign for FillReport {
    fn add_assign(&mut self, other: Self) {
        self.written += other.written;
        self.clipped += other.clipped;
    }
}

/// Weekday × section × week status table for one schedule-review session.
///
/// A new grid is unpopulated: conflict checks report
/// [`crate::ConflictStatus::Unknown`] until [`OccupancyGrid::reset`] starts a
/// fresh render. Rebuild wholesale (invalidate, reset, fill) when the
/// underlying course list changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    total_weeks: u32,
    sections_per_day: u8,
    /// Row-major: weekday, then section, then week. A (weekday, section)
    /// row of weeks is contiguous.
    cells: Vec<CellStatus>,
    populated: bool,
}

impl OccupancyGrid {
    /// Create an unpopulated grid sized for the calendar.
    ///
    /// Fails if the calendar does not pass [`TermCalendar::validate`].
    pub fn new(calendar: &TermCalendar) -> Result<Self, ConfigError> {
        calendar.validate()?;
        let (total_weeks, sections_per_day) = (calendar.total_weeks, calendar.sections_per_day);
        let len = DAYS * usize::from(sections_per_day) * total_weeks as usize;
        Ok(Self {
            total_weeks,
            sections_per_day,
            cells: vec![CellStatus::Free; len],
            populated: false,
        })
    }

    pub fn with_dimensions(total_weeks: u32, sections_per_day: u8) -> Result<Self, ConfigError> {
        Self::new(&TermCalendar::new("", total_weeks, sections_per_day))
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    pub fn sections_per_day(&self) -> u8 {
        self.sections_per_day
    }

    /// Set every cell to Free and mark the grid populated.
    pub fn reset(&mut self) {
        self.cells.fill(CellStatus::Free);
        self.populated = true;
    }

    /// Mark the grid stale; checks report unknown until the next reset.
    pub fn invalidate(&mut self) {
        self.populated = false;
    }

    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Write `status` to every cell the slot covers. Last write wins.
    pub fn fill(&mut self, slot: &ParsedSlot, status: CellStatus) -> FillReport {
        let mut report = FillReport::default();
        for (section, week) in slot.cells() {
            match self.index(slot.weekday(), section, week) {
                Some(i) => {
                    self.cells[i] = status;
                    report.written += 1;
                }
                None => report.clipped += 1,
            }
        }
        if report.clipped > 0 {
            debug!(
                weekday = slot.weekday().index(),
                clipped = report.clipped,
                total_weeks = self.total_weeks,
                sections_per_day = self.sections_per_day,
                "slot extends past the term grid, cells clipped"
            );
        }
        report
    }

    /// Fill several slots with the same status.
    pub fn fill_all<'a>(
        &mut self,
        slots: impl IntoIterator<Item = &'a ParsedSlot>,
        status: CellStatus,
    ) -> FillReport {
        let mut report = FillReport::default();
        for slot in slots {
            report += self.fill(slot, status);
        }
        report
    }

    /// Status of one cell, or `None` outside the grid.
    pub fn query(&self, weekday: Weekday, section: u8, week: u32) -> Option<CellStatus> {
        self.index(weekday, section, week).map(|i| self.cells[i])
    }

    /// Statuses of weeks `1..=total_weeks` for one (weekday, section).
    pub fn week_row(&self, weekday: Weekday, section: u8) -> Option<&[CellStatus]> {
        let start = self.index(weekday, section, 1)?;
        Some(&self.cells[start..start + self.total_weeks as usize])
    }

    /// Number of non-Free cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_free()).count()
    }

    pub(crate) fn index(&self, weekday: Weekday, section: u8, week: u32) -> Option<usize> {
        if section == 0 || section > self.sections_per_day || week == 0 || week > self.total_weeks
        {
            return None;
        }
        let day = usize::from(weekday.index() - 1);
        let row = day * usize::from(self.sections_per_day) + usize::from(section - 1);
        Some(row * self.total_weeks as usize + (week as usize - 1))
    }

    pub(crate) fn status_at(&self, index: usize) -> CellStatus {
        self.cells[index]
    }

    pub(crate) fn set_at(&mut self, index: usize, status: CellStatus) {
        self.cells[index] = status;
    }
}
