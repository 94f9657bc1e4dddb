//! Parsed clause types

use jwxt_core::{Parity, ParsedSlot, SlotError, Weekday};
use std::collections::BTreeSet;

/// Weekday and period range shared by both grammars (`星期X第a-b节`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHead {
    pub weekday: Weekday,
    pub section_start: u8,
    pub section_end: u8,
}

/// One decoded time token, tagged by the grammar that accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeClause {
    /// `{a-b周}` with an optional `(单)` / `(双)` filter.
    ContinuousRun {
        head: SlotHead,
        week_start: u32,
        week_end: u32,
        parity: Option<Parity>,
    },
    /// `{a周,b周,...}`, the exact weeks listed.
    SeparatedList { head: SlotHead, weeks: Vec<u32> },
}

impl TimeClause {
    pub fn head(&self) -> &SlotHead {
        match self {
            TimeClause::ContinuousRun { head, .. } | TimeClause::SeparatedList { head, .. } => head,
        }
    }

    /// Weeks implied by the clause, after any parity filter.
    pub fn weeks(&self) -> BTreeSet<u32> {
        match self {
            TimeClause::ContinuousRun {
                week_start,
                week_end,
                parity,
                ..
            } => (*week_start..=*week_end)
                .filter(|w| parity.map_or(true, |p| p.admits(*w)))
                .collect(),
            TimeClause::SeparatedList { weeks, .. } => weeks.iter().copied().collect(),
        }
    }

    pub fn to_slot(&self) -> Result<ParsedSlot, SlotError> {
        let head = self.head();
        ParsedSlot::new(
            head.weekday,
            head.section_start,
            head.section_end,
            self.weeks(),
        )
    }
}
