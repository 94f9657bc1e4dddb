//! Enrollment breakdown (已选人数明细) types

use serde::{Deserialize, Serialize};

/// One category row of the breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    /// Label with the batch marker removed.
    pub label: String,
    /// Coerced count; non-numeric cells count as zero.
    pub count: u32,
    pub raw_value_text: String,
    /// Row carries the user-batch marker (★).
    pub marker: bool,
}

/// 1-based rank interval occupied by the user's batch.
///
/// `start > end` when the marked row counts nobody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankWindow {
    pub start: u32,
    pub end: u32,
}

impl RankWindow {
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_add(1).saturating_sub(self.start)
    }
}

/// Recoverable anomalies found while reading a breakdown table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BreakdownWarning {
    NonNumericCount { label: String, raw_value_text: String },
    TotalMismatch { declared: u32, summed: u32 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentBreakdown {
    pub header: Option<Vec<String>>,
    pub items: Vec<BreakdownItem>,
    /// Sum of item counts.
    pub total: u32,
    /// Value of the table's own 总计 row, if rendered.
    pub declared_total: Option<u32>,
    pub user_batch_label: Option<String>,
    pub rank: Option<RankWindow>,
    pub warnings: Vec<BreakdownWarning>,
}

impl EnrollmentBreakdown {
    pub fn has_total_mismatch(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, BreakdownWarning::TotalMismatch { .. }))
    }

    pub fn item(&self, label: &str) -> Option<&BreakdownItem> {
        self.items.iter().find(|item| item.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_serializes_tagged() {
        let w = BreakdownWarning::TotalMismatch {
            declared: 20,
            summed: 18,
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains(r#""kind":"total_mismatch""#));
    }

    #[test]
    fn test_rank_window_len() {
        assert_eq!(RankWindow { start: 10, end: 15 }.len(), 6);
        let empty = RankWindow { start: 13, end: 12 };
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_has_total_mismatch() {
        let mut b = EnrollmentBreakdown::default();
        assert!(!b.has_total_mismatch());
        b.warnings.push(BreakdownWarning::TotalMismatch {
            declared: 1,
            summed: 2,
        });
        assert!(b.has_total_mismatch());
    }
}
