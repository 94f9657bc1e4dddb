//! Decoded weekly meeting pattern

use crate::{SlotError, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One decoded meeting pattern: weekday, inclusive period range and active weeks.
///
/// Invariants: `1 <= section_start <= section_end`, every week is `>= 1`,
/// and `weeks` is never empty. Construction goes through [`ParsedSlot::new`]
/// (deserialization included).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSlot")]
pub struct ParsedSlot {
    weekday: Weekday,
    section_start: u8,
    section_end: u8,
    weeks: BTreeSet<u32>,
}

#[derive(Deserialize)]
struct RawSlot {
    weekday: Weekday,
    section_start: u8,
    section_end: u8,
    weeks: BTreeSet<u32>,
}

impl TryFrom<RawSlot> for ParsedSlot {
    type Error = SlotError;

    fn try_from(raw: RawSlot) -> Result<Self, Self::Error> {
        ParsedSlot::new(raw.weekday, raw.section_start, raw.section_end, raw.weeks)
    }
}

impl ParsedSlot {
    pub fn new(
        weekday: Weekday,
        section_start: u8,
        section_end: u8,
        weeks: impl IntoIterator<Item = u32>,
    ) -> Result<Self, SlotError> {
        if section_start == 0 || section_start > section_end {
            return Err(SlotError::InvalidSectionRange {
                start: section_start,
                end: section_end,
            });
        }
        let weeks: BTreeSet<u32> = weeks.into_iter().collect();
        if weeks.contains(&0) {
            return Err(SlotError::ZeroWeek);
        }
        if weeks.is_empty() {
            return Err(SlotError::EmptyWeeks);
        }
        Ok(Self {
            weekday,
            section_start,
            section_end,
            weeks,
        })
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn section_start(&self) -> u8 {
        self.section_start
    }

    pub fn section_end(&self) -> u8 {
        self.section_end
    }

    /// Covered periods, ascending.
    pub fn sections(&self) -> impl Iterator<Item = u8> {
        self.section_start..=self.section_end
    }

    /// Active weeks, ascending.
    pub fn weeks(&self) -> &BTreeSet<u32> {
        &self.weeks
    }

    /// Every `(section, week)` pair this slot occupies on its weekday.
    pub fn cells(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.sections()
            .flat_map(move |section| self.weeks.iter().map(move |&week| (section, week)))
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        usize::from(self.section_end - self.section_start + 1) * self.weeks.len()
    }

    /// True when both slots claim at least one common (weekday, section, week).
    pub fn overlaps(&self, other: &ParsedSlot) -> bool {
        self.weekday == other.weekday
            && self.section_start <= other.section_end
            && other.section_start <= self.section_end
            && !self.weeks.is_disjoint(&other.weeks)
    }
}
