//! Enrollment breakdown extraction against captured tables.

use jwxt_core::{BreakdownWarning, RankWindow};
use jwxt_markup::{parse_enrollment_breakdown, parse_int_loose};
use jwxt_test_utils::fixtures::{BREAKDOWN_MARKED_HTML, BREAKDOWN_MISMATCH_HTML};
use jwxt_test_utils::generators::arb_loose_count;
use proptest::prelude::*;

#[test]
fn test_marked_table_rank_window() {
    let b = parse_enrollment_breakdown(BREAKDOWN_MARKED_HTML).unwrap();

    assert_eq!(
        b.header,
        Some(vec![
            "类型".to_string(),
            "数值".to_string(),
            "所属类型".to_string()
        ])
    );
    let counts: Vec<u32> = b.items.iter().map(|i| i.count).collect();
    assert_eq!(counts, [5, 4, 6, 3]);
    assert_eq!(b.total, 18);
    assert_eq!(b.declared_total, Some(18));
    assert_eq!(b.user_batch_label.as_deref(), Some("高年级已选人数"));
    assert_eq!(b.rank, Some(RankWindow { start: 10, end: 15 }));
    assert_eq!(b.item("培养方案已选人数").map(|i| i.raw_value_text.as_str()), Some("4 人"));
    assert!(b.warnings.is_empty());
}

#[test]
fn test_mismatch_table_warnings() {
    let b = parse_enrollment_breakdown(BREAKDOWN_MISMATCH_HTML).unwrap();

    assert_eq!(b.header, None);
    assert_eq!(b.total, 15);
    assert_eq!(b.declared_total, Some(20));
    assert_eq!(b.user_batch_label.as_deref(), Some("其他已选人数"));

    let rank = b.rank.unwrap();
    assert_eq!(rank, RankWindow { start: 13, end: 12 });
    assert!(rank.is_empty());

    assert_eq!(
        b.warnings,
        vec![
            BreakdownWarning::NonNumericCount {
                label: "其他已选人数".to_string(),
                raw_value_text: "--".to_string(),
            },
            BreakdownWarning::TotalMismatch {
                declared: 20,
                summed: 15,
            },
        ]
    );
}

proptest! {
    #[test]
    fn prop_loose_count_recovers_number((n, text) in arb_loose_count()) {
        prop_assert_eq!(parse_int_loose(&text), Some(i64::from(n)));
    }

    #[test]
    fn prop_rank_window_matches_prefix_sum(
        counts in prop::collection::vec(0u32..200, 1..8),
        marked in 0usize..8,
    ) {
        let marked = marked % counts.len();
        let rows: String = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let star = if i == marked { "★" } else { "" };
                format!("<tr><td>类别{}{}</td><td>{}</td></tr>", i, star, c)
            })
            .collect();
        let b = parse_enrollment_breakdown(&format!("<table>{}</table>", rows)).unwrap();

        let before: u32 = counts[..marked].iter().sum();
        prop_assert_eq!(b.total, counts.iter().sum::<u32>());
        prop_assert_eq!(
            b.rank,
            Some(RankWindow { start: before + 1, end: before + counts[marked] })
        );
    }

    #[test]
    fn prop_breakdown_never_panics(html in "\\PC{0,200}") {
        let _ = parse_enrollment_breakdown(&html);
    }
}
