//! Record strategies, one per portal generation

mod legacy;
mod snapshot_2025;

pub use legacy::LegacyListParser;
pub use snapshot_2025::Snapshot2025Parser;

use once_cell::sync::Lazy;
use regex::Regex;

// 2023-3, 2023-12, 2023-16 (xnm-xqm codes), accepted by every generation
static TERM_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(?:3|12|16)$").expect("static regex must compile"));

/// Leading four-digit year of a term label.
fn label_year(label: &str) -> Option<u32> {
    label.get(..4).and_then(|year| year.parse().ok())
}

/// First year served by the crawler-snapshot export.
pub(crate) const SNAPSHOT_FIRST_YEAR: u32 = 2025;
