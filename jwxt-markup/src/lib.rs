//! JWXT Markup - portal page extraction
//!
//! Reads the selection index page into a [`jwxt_core::SelectionContext`] for later
//! course queries, and the per-class enrollment breakdown table into an
//! [`jwxt_core::EnrollmentBreakdown`] with the user's rank window.

pub mod breakdown;
pub mod html;
pub mod selection;

pub use breakdown::{parse_enrollment_breakdown, BreakdownQuery, USER_BATCH_MARKER};
pub use html::{decode_entities, parse_int_loose, strip_html};
pub use selection::{
    active_context_id, build_query_context, extract_round_meta, parse_round_tabs,
    parse_select_options, parse_selection_fields, parse_selection_index, select_round_tab,
    synthesize_round_tab, FieldMap, SelectionIndex, DEFAULT_FIELD_VALUES, REQUEST_FIELD_KEYS,
};
