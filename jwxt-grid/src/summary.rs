//! Week-range summaries for display

use crate::OccupancyGrid;
use jwxt_core::{CellStatus, Weekday};
use std::fmt;

/// One element of a range summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSegment {
    Single(u32),
    /// Inclusive run, `start < end`.
    Run(u32, u32),
}

impl fmt::Display for RangeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSegment::Single(i) => write!(f, "{}", i),
            RangeSegment::Run(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

/// Ascending, non-overlapping segments. Displays as `1-3, 5, 7-8`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSummary {
    segments: Vec<RangeSegment>,
}

impl RangeSummary {
    /// Collapse marked indices into runs. Order and duplicates in the input
    /// do not matter.
    pub fn from_indices(indices: impl IntoIterator<Item = u32>) -> Self {
        let mut sorted: Vec<u32> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let mut segments = Vec::new();
        let mut iter = sorted.into_iter();
        if let Some(first) = iter.next() {
            let (mut start, mut end) = (first, first);
            for i in iter {
                if i == end + 1 {
                    end = i;
                } else {
                    segments.push(segment(start, end));
                    start = i;
                    end = i;
                }
            }
            segments.push(segment(start, end));
        }

        Self { segments }
    }

    /// Summarize a per-week status row; index 0 is week 1.
    pub fn from_row(row: &[CellStatus]) -> Self {
        Self::from_indices(
            row.iter()
                .zip(1u32..)
                .filter(|(status, _)| !status.is_free())
                .map(|(_, week)| week),
        )
    }

    pub fn segments(&self) -> &[RangeSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn segment(start: u32, end: u32) -> RangeSegment {
    if start == end {
        RangeSegment::Single(start)
    } else {
        RangeSegment::Run(start, end)
    }
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

/// `summarize_indices([1, 2, 3, 5, 7, 8]) == "1-3, 5, 7-8"`
pub fn summarize_indices(indices: impl IntoIterator<Item = u32>) -> String {
    RangeSummary::from_indices(indices).to_string()
}

pub fn summarize_row(row: &[CellStatus]) -> String {
    RangeSummary::from_row(row).to_string()
}

impl OccupancyGrid {
    /// Occupied weeks of one (weekday, section); empty outside the grid.
    pub fn summarize_weeks(&self, weekday: Weekday, section: u8) -> RangeSummary {
        self.week_row(weekday, section)
            .map(RangeSummary::from_row)
            .unwrap_or_default()
    }
}
