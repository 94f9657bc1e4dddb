//! Fuzz target for the selection-page and breakdown extractors
//!
//! Run with: cargo +nightly fuzz run markup_fuzz -- -max_total_time=60

#![no_main]

use jwxt_markup::{parse_enrollment_breakdown, parse_round_tabs, parse_selection_index};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data) {
        if let Ok(breakdown) = parse_enrollment_breakdown(html) {
            assert!(!breakdown.items.is_empty());
            let summed: u64 = breakdown.items.iter().map(|i| u64::from(i.count)).sum();
            assert!(summed >= u64::from(breakdown.total));
            if let Some(rank) = breakdown.rank {
                assert!(rank.start >= 1);
            }
        }

        for tab in parse_round_tabs(html) {
            assert!(!tab.classification_code.is_empty());
            assert!(!tab.context_id.is_empty());
        }

        if let Ok(index) = parse_selection_index(html, None) {
            assert_eq!(index.context.get("xnm"), index.context.get("xkxnm"));
            assert_eq!(index.context.get("xqm"), index.context.get("xkxqm"));
        }
    }
});
