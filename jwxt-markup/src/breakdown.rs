//! Enrollment breakdown (已选人数明细) extraction

use crate::html::{collapse_whitespace, parse_int_loose, strip_html};
use jwxt_core::{
    BreakdownItem, BreakdownWarning, EnrollmentBreakdown, ExtractError, RankWindow,
    SelectionContext,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Glyph marking the row of the current user's batch.
pub const USER_BATCH_MARKER: char = '★';

const TOTAL_LABEL: &str = "总计";

static ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("static regex must compile")
});

static CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]>").expect("static regex must compile")
});

/// Parse a breakdown table.
///
/// Rows are read in document order. The first `类型 / 数值` row is taken as
/// the header and the `总计` row as the declared total; every other row is
/// an item. The running total before the first ★-marked row gives the rank
/// window of the user's batch. Unparseable counts become 0 with a
/// [`BreakdownWarning::NonNumericCount`], and a declared total that
/// disagrees with the item sum adds [`BreakdownWarning::TotalMismatch`].
pub fn parse_enrollment_breakdown(html: &str) -> Result<EnrollmentBreakdown, ExtractError> {
    let mut breakdown = EnrollmentBreakdown::default();
    let mut running: u32 = 0;

    for row in ROW.captures_iter(html) {
        let cells: Vec<String> = CELL
            .captures_iter(&row[1])
            .map(|cell| strip_html(&cell[1]))
            .collect();
        if cells.len() < 2 {
            continue;
        }

        let label = collapse_whitespace(&cells[0]);
        let raw_value_text = collapse_whitespace(&cells[1]);
        if label.is_empty() {
            continue;
        }

        if breakdown.header.is_none() && label == "类型" && raw_value_text == "数值" {
            breakdown.header = Some(cells.into_iter().filter(|c| !c.is_empty()).collect());
            continue;
        }

        let marked = label.contains(USER_BATCH_MARKER)
            || cells.get(2).is_some_and(|c| c.contains(USER_BATCH_MARKER));
        let label = label.replace(USER_BATCH_MARKER, "").trim().to_string();
        let parsed = parse_int_loose(&raw_value_text).and_then(|n| u32::try_from(n).ok());

        if label.contains(TOTAL_LABEL) {
            breakdown.declared_total = parsed;
            continue;
        }

        let count = match parsed {
            Some(n) => n,
            None => {
                debug!(label = %label, raw = %raw_value_text, "non-numeric breakdown count, using 0");
                breakdown.warnings.push(BreakdownWarning::NonNumericCount {
                    label: label.clone(),
                    raw_value_text: raw_value_text.clone(),
                });
                0
            }
        };

        if marked && breakdown.user_batch_label.is_none() {
            breakdown.user_batch_label = Some(label.clone());
            breakdown.rank = Some(RankWindow {
                start: running.saturating_add(1),
                end: running.saturating_add(count),
            });
        }
        running = running.saturating_add(count);

        breakdown.items.push(BreakdownItem {
            label,
            count,
            raw_value_text,
            marker: marked,
        });
    }

    if breakdown.items.is_empty() {
        return Err(ExtractError::EmptyBreakdownTable);
    }

    breakdown.total = running;
    if let Some(declared) = breakdown.declared_total {
        if declared != running {
            warn!(
                declared,
                summed = running,
                "enrollment breakdown total does not match the sum of its rows"
            );
            breakdown.warnings.push(BreakdownWarning::TotalMismatch {
                declared,
                summed: running,
            });
        }
    }

    Ok(breakdown)
}

/// Query parameters for the breakdown endpoint of one teaching class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownQuery {
    pub kch_id: String,
    pub jxb_id: String,
    pub xnm: String,
    pub xqm: String,
}

impl BreakdownQuery {
    /// Build from a selection context, reading `xnm`/`xqm` with a fallback
    /// to `xkxnm`/`xkxqm`.
    pub fn from_context(
        context: &SelectionContext,
        kch_id: &str,
        jxb_id: &str,
    ) -> Result<Self, ExtractError> {
        let term_value = |short: &str, long: &str| {
            context
                .non_empty(short)
                .or_else(|| context.non_empty(long))
                .map(|v| v.trim().to_string())
                .ok_or_else(|| ExtractError::MissingContextValue {
                    field: short.to_string(),
                    purpose: "enrollment breakdown query".to_string(),
                })
        };

        Ok(Self {
            kch_id: kch_id.trim().to_string(),
            jxb_id: jxb_id.trim().to_string(),
            xnm: term_value("xnm", "xkxnm")?,
            xqm: term_value("xqm", "xkxqm")?,
        })
    }

    /// Form fields in request order.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("kch_id", self.kch_id.as_str()),
            ("jxb_id", self.jxb_id.as_str()),
            ("xnm", self.xnm.as_str()),
            ("xqm", self.xqm.as_str()),
        ]
    }
}
