//! JWXT Test Utilities
//!
//! Centralized test infrastructure for the JWXT workspace:
//! - Proptest generators for slots and time tokens
//! - Markup and raw-record fixtures captured from the portal
//! - Custom assertions for slot and grid validation

// Re-export core types for convenience
pub use jwxt_core::{
    CellStatus, EnrollmentBreakdown, GrammarError, JwxtError, JwxtResult, Parity, ParsedSlot,
    TermCalendar, WeekSpan, Weekday,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating slots and their textual encodings.

    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    /// A continuous-run token together with the values it encodes.
    #[derive(Debug, Clone)]
    pub struct ContinuousToken {
        pub text: String,
        pub weekday: Weekday,
        pub section_start: u8,
        pub section_end: u8,
        pub week_start: u32,
        pub week_end: u32,
        pub parity: Option<Parity>,
    }

    impl ContinuousToken {
        /// Weeks the token should decode to.
        pub fn expected_weeks(&self) -> BTreeSet<u32> {
            (self.week_start..=self.week_end)
                .filter(|w| self.parity.map_or(true, |p| p.admits(*w)))
                .collect()
        }
    }

    /// A separated-list token together with the weeks it lists.
    #[derive(Debug, Clone)]
    pub struct SeparatedToken {
        pub text: String,
        pub weekday: Weekday,
        pub section_start: u8,
        pub section_end: u8,
        pub weeks: Vec<u32>,
    }

    pub fn arb_weekday() -> impl Strategy<Value = Weekday> {
        prop::sample::select(Weekday::ALL.to_vec())
    }

    pub fn arb_parity() -> impl Strategy<Value = Parity> {
        prop_oneof![Just(Parity::Odd), Just(Parity::Even)]
    }

    pub fn arb_cell_status() -> impl Strategy<Value = CellStatus> {
        prop_oneof![
            Just(CellStatus::Free),
            Just(CellStatus::Selected),
            Just(CellStatus::Pending),
            Just(CellStatus::Preview),
        ]
    }

    /// Generate an inclusive period range inside `1..=max_section`.
    pub fn arb_section_range(max_section: u8) -> impl Strategy<Value = (u8, u8)> {
        (1..=max_section)
            .prop_flat_map(move |start| (Just(start), start..=max_section))
    }

    /// Generate a non-empty week set inside `1..=max_week`.
    pub fn arb_week_set(max_week: u32) -> impl Strategy<Value = BTreeSet<u32>> {
        prop::collection::btree_set(1..=max_week, 1..=max_week.min(10) as usize)
    }

    /// Generate a valid slot within a term of `max_week` weeks and `max_section` periods.
    pub fn arb_slot(max_week: u32, max_section: u8) -> impl Strategy<Value = ParsedSlot> {
        (
            arb_weekday(),
            arb_section_range(max_section),
            arb_week_set(max_week),
        )
            .prop_filter_map("slot invariants", |(weekday, (start, end), weeks)| {
                ParsedSlot::new(weekday, start, end, weeks).ok()
            })
    }

    /// Generate a well-formed continuous-run token whose weeks are non-empty.
    pub fn arb_continuous_token() -> impl Strategy<Value = ContinuousToken> {
        (
            arb_weekday(),
            arb_section_range(13),
            (1u32..=20).prop_flat_map(|start| (Just(start), start..=20u32)),
            prop::option::of(arb_parity()),
            any::<bool>(),
        )
            .prop_filter(
                "parity must leave at least one week",
                |(_, _, (ws, we), parity, _)| {
                    parity.map_or(true, |p| (*ws..=*we).any(|w| p.admits(w)))
                },
            )
            .prop_map(
                |(weekday, (section_start, section_end), (week_start, week_end), parity, full_width)| {
                    let parity_text = match parity {
                        Some(p) if full_width => format!("（{}）", p.glyph()),
                        Some(p) => format!("({})", p.glyph()),
                        None => String::new(),
                    };
                    let text = format!(
                        "星期{}第{}-{}节{{{}-{}周{}}}",
                        weekday.glyph(),
                        section_start,
                        section_end,
                        week_start,
                        week_end,
                        parity_text
                    );
                    ContinuousToken {
                        text,
                        weekday,
                        section_start,
                        section_end,
                        week_start,
                        week_end,
                        parity,
                    }
                },
            )
    }

    /// Generate a well-formed separated-list token.
    pub fn arb_separated_token() -> impl Strategy<Value = SeparatedToken> {
        (
            arb_weekday(),
            arb_section_range(13),
            prop::collection::vec(1u32..=20, 1..6),
        )
            .prop_map(|(weekday, (section_start, section_end), weeks)| {
                let list = weeks
                    .iter()
                    .map(|w| format!("{}周", w))
                    .collect::<Vec<_>>()
                    .join(",");
                SeparatedToken {
                    text: format!(
                        "星期{}第{}-{}节{{{}}}",
                        weekday.glyph(),
                        section_start,
                        section_end,
                        list
                    ),
                    weekday,
                    section_start,
                    section_end,
                    weeks,
                }
            })
    }

    /// Generate a loosely formatted numeric cell: digits wrapped in noise.
    pub fn arb_loose_count() -> impl Strategy<Value = (u32, String)> {
        (0u32..10_000, "[ 人名]{0,2}", "[ 人]{0,2}")
            .prop_map(|(n, prefix, suffix)| (n, format!("{}{}{}", prefix, n, suffix)))
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Markup and raw records captured from the portal, plus small builders.

    use super::*;
    use serde_json::{json, Value};

    /// Selection page with hidden fields, four round tabs and a campus select.
    pub const SELECTION_INDEX_HTML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/selection_index.html"
    ));

    /// Single-round selection page that renders no tabs.
    pub const SELECTION_SINGLE_ROUND_HTML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/selection_single_round.html"
    ));

    /// Selection page missing `xkxqm`.
    pub const SELECTION_MISSING_TERM_HTML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/selection_missing_term.html"
    ));

    /// Breakdown table with counts [5, 4, 6, 3], ★ on the third row, 总计 18.
    pub const BREAKDOWN_MARKED_HTML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/breakdown_marked.html"
    ));

    /// Breakdown table with a non-numeric row and a declared total that disagrees.
    pub const BREAKDOWN_MISMATCH_HTML: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/breakdown_mismatch.html"
    ));

    /// Legacy portal list rows (two sections of one course, one bad record).
    pub const LEGACY_RECORDS_JSON: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/legacy_records.json"
    ));

    /// 2025 crawler snapshot rows.
    pub const SNAPSHOT_RECORDS_JSON: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tests/fixtures/snapshot_records.json"
    ));

    /// Parse a bundled JSON fixture into its records.
    pub fn records(source: &str) -> Vec<Value> {
        match serde_json::from_str::<Value>(source) {
            Ok(Value::Array(items)) => items,
            Ok(other) => panic!("fixture is not a JSON array: {}", other),
            Err(e) => panic!("fixture is not valid JSON: {}", e),
        }
    }

    /// Build a slot, panicking on invalid input.
    #[track_caller]
    pub fn slot(
        weekday: Weekday,
        section_start: u8,
        section_end: u8,
        weeks: impl IntoIterator<Item = u32>,
    ) -> ParsedSlot {
        match ParsedSlot::new(weekday, section_start, section_end, weeks) {
            Ok(slot) => slot,
            Err(e) => panic!("invalid fixture slot: {}", e),
        }
    }

    /// Minimal legacy list row.
    pub fn legacy_record(course_code: &str, section_id: &str, sksj: &str) -> Value {
        json!({
            "kch_id": course_code,
            "kcmc": format!("{} 课程", course_code),
            "jxb_id": section_id,
            "jsxx": "T0001/张三/教授",
            "sksj": sksj,
            "jxdd": "东教101",
            "jxbrl": "60",
            "yxzrs": "12",
            "xf": "2.0"
        })
    }

    /// Minimal 2025 snapshot row.
    pub fn snapshot_record(course_code: &str, section_id: &str, class_time: &str) -> Value {
        json!({
            "courseId": course_code,
            "courseName": format!("{} 课程", course_code),
            "teachingClassId": section_id,
            "teacherId": "T1001",
            "teacherName": "赵六",
            "classTime": class_time,
            "position": "信息楼305",
            "capacity": 80,
            "number": 10,
            "credit": 2,
            "campus": "紫金港"
        })
    }

    /// A 16-week, 13-period calendar.
    pub fn sixteen_week_term() -> TermCalendar {
        TermCalendar::new("2025-2026 春", 16, 13)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for slot validation.

    use super::*;

    /// Assert that a result failed with a malformed-token error.
    #[track_caller]
    pub fn assert_malformed<T: std::fmt::Debug>(result: &Result<T, GrammarError>) {
        match result {
            Err(GrammarError::MalformedTimeToken { .. }) => {}
            other => panic!("Expected MalformedTimeToken, got: {:?}", other),
        }
    }

    /// Assert that a slot covers exactly the given sections and weeks.
    #[track_caller]
    pub fn assert_slot_covers(
        slot: &ParsedSlot,
        weekday: Weekday,
        sections: std::ops::RangeInclusive<u8>,
        weeks: &[u32],
    ) {
        assert_eq!(slot.weekday(), weekday, "weekday mismatch");
        assert_eq!(
            (slot.section_start(), slot.section_end()),
            (*sections.start(), *sections.end()),
            "section range mismatch"
        );
        let actual: Vec<u32> = slot.weeks().iter().copied().collect();
        let mut expected = weeks.to_vec();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(actual, expected, "week set mismatch");
    }
}

// ============================================================================
// TESTS
// ============================================================================
