//! Week-span classification

use jwxt_core::{ParsedSlot, TermCalendar, WeekSpan};
use std::collections::BTreeSet;

/// Classify a week set against a term of `total_weeks` weeks.
///
/// Only exact matches count: `{1..N}` is the full term, `{1..N/2}` the first
/// half and `{N/2+1..N}` the second half (integer division). Everything else,
/// including any set when `N` is 0, is [`WeekSpan::Custom`].
pub fn classify(weeks: &BTreeSet<u32>, total_weeks: u32) -> WeekSpan {
    if total_weeks == 0 {
        return WeekSpan::Custom;
    }
    let half = total_weeks / 2;

    if is_run(weeks, 1, total_weeks) {
        WeekSpan::FullTerm
    } else if half >= 1 && is_run(weeks, 1, half) {
        WeekSpan::FirstHalf
    } else if is_run(weeks, half + 1, total_weeks) {
        WeekSpan::SecondHalf
    } else {
        WeekSpan::Custom
    }
}

pub fn classify_slot(slot: &ParsedSlot, calendar: &TermCalendar) -> WeekSpan {
    classify(slot.weeks(), calendar.total_weeks)
}

// A BTreeSet holds distinct values, so matching bounds and length is an exact match.
fn is_run(weeks: &BTreeSet<u32>, first: u32, last: u32) -> bool {
    if first > last {
        return false;
    }
    weeks.len() as u64 == u64::from(last - first) + 1
        && weeks.first() == Some(&first)
        && weeks.last() == Some(&last)
}
