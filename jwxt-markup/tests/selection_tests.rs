//! Selection-page extraction against captured portal markup.

use jwxt_core::ExtractError;
use jwxt_markup::{parse_selection_index, BreakdownQuery};
use jwxt_test_utils::fixtures::{
    SELECTION_INDEX_HTML, SELECTION_MISSING_TERM_HTML, SELECTION_SINGLE_ROUND_HTML,
};

#[test]
fn test_index_context_mirrors_term_fields() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, None).unwrap();
    let ctx = &index.context;

    assert_eq!(ctx.get("xkxnm"), Some("2025"));
    assert_eq!(ctx.get("xkxqm"), Some("12"));
    assert_eq!(ctx.xnm(), Some("2025"));
    assert_eq!(ctx.xqm(), Some("12"));
    assert_eq!(ctx.context_id(), Some("3F6A1C0E2B9D4E7F"));
}

#[test]
fn test_index_context_overlays_page_values_on_defaults() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, None).unwrap();
    let ctx = &index.context;

    // page values
    assert_eq!(ctx.get("rwlx"), Some("2"));
    assert_eq!(ctx.get("xkly"), Some("0"));
    assert_eq!(ctx.get("xz"), Some("4"));
    assert_eq!(ctx.get("ccdm"), Some("3"));
    assert_eq!(ctx.get("kklxdm"), Some("01"));
    assert_eq!(ctx.get("njdm_id"), Some("2023"));
    assert_eq!(ctx.get("zyh_id"), Some("0801"));
    assert_eq!(ctx.get("xqh_id"), Some("1"));
    // empty on the page, so the default stays
    assert_eq!(ctx.get("sfkknj"), Some("1"));
    assert_eq!(ctx.get("rlzlkz"), Some("1"));
    // not a request field
    assert_eq!(ctx.get("firstKklxmc"), None);
}

#[test]
fn test_index_round_tabs() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, None).unwrap();

    let ids: Vec<&str> = index.tabs.iter().map(|t| t.context_id.as_str()).collect();
    assert_eq!(ids, ["3F6A1C0E2B9D4E7F", "9C2E4B7A11D05F38", "77AA00BB11CC22DD"]);
    assert_eq!(index.tabs[1].label, "通识选修 & 体育");
    assert_eq!(index.tabs[1].classification_code, "10");
    assert!(index.tabs[0].active);
    assert!(!index.tabs[2].active);
    assert_eq!(index.tabs[2].grade_code, "2024");
    assert_eq!(index.tabs[2].major_code, "0802");

    assert_eq!(index.active_context_id.as_deref(), Some("3F6A1C0E2B9D4E7F"));
    assert_eq!(
        index.selected_tab.as_ref().map(|t| t.context_id.as_str()),
        Some("3F6A1C0E2B9D4E7F")
    );
    assert_eq!(index.round.code.as_deref(), Some("2"));
    assert_eq!(index.round.name.as_deref(), Some("第2轮选课"));
}

#[test]
fn test_preferred_tab_drives_context() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, Some("77AA00BB11CC22DD")).unwrap();
    let ctx = &index.context;

    assert_eq!(ctx.context_id(), Some("77AA00BB11CC22DD"));
    assert_eq!(ctx.get("kklxdm"), Some("05"));
    assert_eq!(ctx.get("njdm_id"), Some("2024"));
    assert_eq!(ctx.get("zyh_id"), Some("0802"));

    let request = index.display_request().unwrap();
    assert!(request.contains(&("xkkz_id", "77AA00BB11CC22DD".to_string())));
    assert!(request.contains(&("kklxdm", "05".to_string())));
}

#[test]
fn test_unknown_preferred_tab_falls_back_to_active() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, Some("NOPE")).unwrap();
    assert_eq!(index.context.context_id(), Some("3F6A1C0E2B9D4E7F"));
}

#[test]
fn test_campus_options() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, None).unwrap();
    let labels: Vec<&str> = index.campus_options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["--请选择--", "紫金港校区", "玉泉校区"]);
    assert!(index.campus_options[1].selected);
}

#[test]
fn test_single_round_page_synthesizes_tab() {
    let index = parse_selection_index(SELECTION_SINGLE_ROUND_HTML, None).unwrap();

    assert_eq!(index.tabs.len(), 1);
    let tab = &index.tabs[0];
    assert_eq!(tab.context_id, "AB12CD34");
    assert_eq!(tab.classification_code, "06");
    assert_eq!(tab.label, "体育课");
    assert_eq!(index.selected_tab.as_ref(), Some(tab));

    assert_eq!(index.round.name.as_deref(), Some("第3轮 补退选"));
    assert_eq!(index.round.number(), Some(3));

    let ctx = &index.context;
    assert_eq!(ctx.xnm(), Some("2024"));
    assert_eq!(ctx.xqm(), Some("3"));
    assert_eq!(ctx.context_id(), Some("AB12CD34"));
    assert_eq!(ctx.get("xklc"), Some("3"));
}

#[test]
fn test_missing_term_field_is_reported() {
    let err = parse_selection_index(SELECTION_MISSING_TERM_HTML, None).unwrap_err();
    assert_eq!(
        err,
        ExtractError::MissingSelectionField {
            field: "xkxqm".to_string()
        }
    );
}

#[test]
fn test_display_page_merge() {
    let mut index = parse_selection_index(SELECTION_SINGLE_ROUND_HTML, None).unwrap();
    let display = r#"
        <input type="hidden" id="rwlx" value="2"/>
        <input type="hidden" id="xkxqm" value=""/>
        <select id="xqh_id"><option value="1">A</option><option value="2" selected>B</option></select>"#;

    index.merge_display_page(display).unwrap();

    assert_eq!(index.context.get("rwlx"), Some("2"));
    assert_eq!(index.context.get("xqh_id"), Some("2"));
    // empty display values never clobber the index page
    assert_eq!(index.context.xqm(), Some("3"));
}

#[test]
fn test_context_feeds_breakdown_query() {
    let index = parse_selection_index(SELECTION_INDEX_HTML, None).unwrap();
    let query = BreakdownQuery::from_context(&index.context, "MATH1001", "JXB-01").unwrap();
    assert_eq!(query.xnm, "2025");
    assert_eq!(query.xqm, "12");
}
