//! Selection-page extraction: hidden fields, round tabs and query context

use crate::html::{attribute, has_class, parse_attributes, strip_html};
use jwxt_core::{ExtractError, RoundMeta, RoundTab, SelectOption, SelectionContext};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

/// Hidden-field values of a page, keyed by `id` (falling back to `name`).
pub type FieldMap = BTreeMap<String, String>;

/// Fields forwarded from the selection page to course queries.
pub const REQUEST_FIELD_KEYS: &[&str] = &[
    "rwlx",
    "xklc",
    "xkly",
    "bklx_id",
    "sfkkjyxdxnxq",
    "kzkcgs",
    "xqh_id",
    "jg_id_1",
    "njdm_id_1",
    "zyh_id_1",
    "gnjkxdnj",
    "zyh_id",
    "zyfx_id",
    "njdm_id",
    "bh_id",
    "bjgkczxbbjwcx",
    "xbm",
    "xslbdm",
    "mzm",
    "xz",
    "ccdm",
    "xsbj",
    "sfkknj",
    "sfkkzy",
    "kzybkxy",
    "sfznkx",
    "zdkxms",
    "sfkxq",
    "sfkcfx",
    "kkbk",
    "kkbkdj",
    "bklbkcj",
    "sfkgbcx",
    "sfrxtgkcxd",
    "tykczgxdcs",
    "xkxnm",
    "xkxqm",
    "kklxdm",
    "bbhzxjxb",
    "xkkz_id",
    "rlkz",
    "xkzgbj",
    "xszxzt",
    // Capacity and round-policy flags; presence varies between portal upgrades.
    "xkkzrlsrlmxsfs",
    "sxrlkzlx",
    "txbsfrl",
    "xkxskcgskg",
    "rlzlkz",
    "cdrlkz",
    "jxbzcxskg",
    "sfyxsksjct",
];

/// Values the portal's own UI sends when a field is absent or empty.
pub const DEFAULT_FIELD_VALUES: &[(&str, &str)] = &[
    ("rwlx", "1"),
    ("xklc", "1"),
    ("xkly", "1"),
    ("bklx_id", "0"),
    ("sfkkjyxdxnxq", "0"),
    ("kzkcgs", "0"),
    ("sfkknj", "1"),
    ("sfkkzy", "1"),
    ("kzybkxy", "0"),
    ("sfznkx", "0"),
    ("zdkxms", "0"),
    ("sfkxq", "1"),
    ("sfkcfx", "1"),
    ("kkbk", "0"),
    ("kkbkdj", "0"),
    ("bklbkcj", "0"),
    ("sfkgbcx", "1"),
    ("sfrxtgkcxd", "1"),
    ("tykczgxdcs", "0"),
    ("bbhzxjxb", "0"),
    ("rlkz", "0"),
    ("cdrlkz", "0"),
    ("rlzlkz", "1"),
    ("xkzgbj", "0"),
    ("xszxzt", "1"),
    ("sfyxsksjct", "0"),
    ("txbsfrl", "0"),
];

/// `first*` page fields that override the generic request fields.
const FIRST_OVERRIDES: &[(&str, &str)] = &[
    ("xkkz_id", "firstXkkzId"),
    ("kklxdm", "firstKklxdm"),
    ("njdm_id", "firstNjdmId"),
    ("zyh_id", "firstZyhId"),
];

static INPUT_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<input\b[^>]*>").expect("static regex must compile"));

static ROUND_TAB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<li\b([^>]*)>\s*<a\b[^>]*\bonclick\s*=\s*"([^"]*queryCourse[^"]*)"[^>]*>(.*?)</a>\s*</li>"#,
    )
    .expect("static regex must compile")
});

static QUOTED_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'([^']*)'|"([^"]*)""#).expect("static regex must compile"));

static ROUND_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)\bid\s*=\s*(?:"txt_xklc"|'txt_xklc'|txt_xklc\b)[^>]*>(.*?)</[a-z0-9:_-]+>"#,
    )
    .expect("static regex must compile")
});

static ROUND_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"第\s*([0-9]+)\s*轮").expect("static regex must compile"));

static SELECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<select\b([^>]*)>(.*?)</select>").expect("static regex must compile")
});

static OPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option>").expect("static regex must compile")
});

static SELECTED_FLAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bselected\b").expect("static regex must compile"));

// ============================================================================
// FIELD EXTRACTION
// ============================================================================

/// Every `<input>` value, keyed by `id` or, when absent, `name`.
/// Later inputs overwrite earlier ones with the same key.
pub fn parse_selection_fields(html: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for tag in INPUT_TAG.find_iter(html) {
        let attrs = parse_attributes(tag.as_str());
        let key = attribute(&attrs, "id")
            .filter(|id| !id.is_empty())
            .or_else(|| attribute(&attrs, "name").filter(|n| !n.is_empty()));
        if let Some(key) = key {
            let value = attribute(&attrs, "value").unwrap_or_default();
            fields.insert(key.to_string(), value.to_string());
        }
    }
    fields
}

/// Round code and name from `xklc` / `xklcmc`, the `txt_xklc` element, and
/// finally the `第N轮` number inside the name.
pub fn extract_round_meta(html: &str, fields: &FieldMap) -> RoundMeta {
    let field = |key: &str| {
        fields
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let mut meta = RoundMeta {
        code: field("xklc").or_else(|| field("txt_xklc")),
        name: field("xklcmc").or_else(|| field("txt_xklcmc")),
    };

    if meta.name.is_none() {
        meta.name = ROUND_TEXT
            .captures(html)
            .map(|caps| strip_html(&caps[1]))
            .filter(|text| !text.is_empty());
    }

    if meta.code.is_none() {
        meta.code = meta
            .name
            .as_deref()
            .and_then(|name| ROUND_NUMBER.captures(name))
            .map(|caps| caps[1].to_string());
    }

    meta
}

/// Options of the `<select>` whose `id` is `select_id`; empty when absent.
pub fn parse_select_options(html: &str, select_id: &str) -> Vec<SelectOption> {
    let Some(inner) = SELECT.captures_iter(html).find_map(|caps| {
        let attrs = parse_attributes(&caps[1]);
        (attribute(&attrs, "id") == Some(select_id)).then(|| caps.get(2).map_or("", |m| m.as_str()))
    }) else {
        return Vec::new();
    };

    OPTION
        .captures_iter(inner)
        .map(|caps| {
            let attrs = parse_attributes(&caps[1]);
            SelectOption {
                value: attribute(&attrs, "value").unwrap_or_default().to_string(),
                label: strip_html(&caps[2]),
                selected: SELECTED_FLAG.is_match(&caps[1]),
            }
        })
        .collect()
}

// ============================================================================
// ROUND TABS
// ============================================================================

/// Round tabs in document order.
///
/// Each tab's `queryCourse(...)` handler carries quoted arguments in a fixed
/// order: classification code, context id, grade code, major code. Tabs
/// without a classification code or context id are skipped.
pub fn parse_round_tabs(html: &str) -> Vec<RoundTab> {
    let mut tabs = Vec::new();
    for caps in ROUND_TAB.captures_iter(html) {
        let li_attrs = parse_attributes(&caps[1]);
        let args: Vec<String> = QUOTED_ARG
            .captures_iter(&caps[2])
            .map(|arg| {
                arg.get(1)
                    .or_else(|| arg.get(2))
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_string()
            })
            .collect();
        let arg = |i: usize| args.get(i).cloned().unwrap_or_default();

        let tab = RoundTab {
            label: strip_html(&caps[3]),
            active: has_class(&li_attrs, "active"),
            classification_code: arg(0),
            context_id: arg(1),
            grade_code: arg(2),
            major_code: arg(3),
        };
        if tab.classification_code.is_empty() || tab.context_id.is_empty() {
            debug!(label = %tab.label, "skipping round tab without classification or context id");
            continue;
        }
        tabs.push(tab);
    }
    tabs
}

fn first_non_empty<'a>(fields: &'a FieldMap, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| fields.get(*k))
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
}

/// Context id the page itself is showing (`firstXkkzId`, else `xkkz_id`).
pub fn active_context_id(fields: &FieldMap) -> Option<&str> {
    first_non_empty(fields, &["firstXkkzId", "xkkz_id"])
}

/// A tab assembled from the page's hidden `first*` fields.
pub fn synthesize_round_tab(fields: &FieldMap) -> Option<RoundTab> {
    let context_id = active_context_id(fields)?;
    Some(RoundTab {
        label: first_non_empty(fields, &["firstKklxmc", "kklxmc"])
            .unwrap_or("选课")
            .to_string(),
        active: true,
        classification_code: first_non_empty(fields, &["firstKklxdm", "kklxdm"])
            .unwrap_or("1")
            .to_string(),
        context_id: context_id.to_string(),
        grade_code: first_non_empty(fields, &["firstNjdmId", "njdm_id"])
            .unwrap_or_default()
            .to_string(),
        major_code: first_non_empty(fields, &["firstZyhId", "zyh_id"])
            .unwrap_or_default()
            .to_string(),
    })
}

/// Pick the round to query.
///
/// Preference order: the tab matching `preferred_context_id`, the tab
/// matching the page's active context id, the tab flagged active, the first
/// tab, and finally a tab synthesized from the page fields.
pub fn select_round_tab(
    fields: &FieldMap,
    tabs: &[RoundTab],
    preferred_context_id: Option<&str>,
) -> Option<RoundTab> {
    let by_id = |id: Option<&str>| {
        id.map(str::trim)
            .filter(|id| !id.is_empty())
            .and_then(|id| tabs.iter().find(|tab| tab.context_id == id))
    };

    by_id(preferred_context_id)
        .or_else(|| by_id(active_context_id(fields)))
        .or_else(|| tabs.iter().find(|tab| tab.active))
        .or_else(|| tabs.first())
        .cloned()
        .or_else(|| synthesize_round_tab(fields))
}

// ============================================================================
// QUERY CONTEXT
// ============================================================================

/// Build the query context from page fields.
///
/// Starts from [`DEFAULT_FIELD_VALUES`], overlays non-empty
/// [`REQUEST_FIELD_KEYS`], applies the `first*` overrides and mirrors
/// `xnm ← xkxnm`, `xqm ← xkxqm`.
pub fn build_query_context(fields: &FieldMap) -> Result<SelectionContext, ExtractError> {
    let mut params: FieldMap = DEFAULT_FIELD_VALUES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    for key in REQUEST_FIELD_KEYS {
        if let Some(value) = fields.get(*key).filter(|v| !v.is_empty()) {
            params.insert(key.to_string(), value.clone());
        }
    }

    for (key, first_key) in FIRST_OVERRIDES {
        if let Some(value) = fields.get(*first_key).filter(|v| !v.is_empty()) {
            params.insert(key.to_string(), value.clone());
        }
    }

    for required in ["xkxnm", "xkxqm", "xkkz_id"] {
        if params.get(required).map_or(true, |v| v.is_empty()) {
            return Err(ExtractError::MissingSelectionField {
                field: required.to_string(),
            });
        }
    }

    let xnm = params.get("xkxnm").cloned().unwrap_or_default();
    let xqm = params.get("xkxqm").cloned().unwrap_or_default();
    params.insert("xnm".to_string(), xnm);
    params.insert("xqm".to_string(), xqm);

    Ok(params.into_iter().collect())
}

// ============================================================================
// SELECTION INDEX
// ============================================================================

/// Everything extracted from the selection index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionIndex {
    /// Raw hidden fields of the page.
    pub fields: FieldMap,
    pub round: RoundMeta,
    /// Tabs in document order; a single synthesized tab for single-round pages.
    pub tabs: Vec<RoundTab>,
    pub active_context_id: Option<String>,
    pub selected_tab: Option<RoundTab>,
    /// Fields with round metadata and the selected tab folded in.
    pub merged_fields: FieldMap,
    /// Campus choices (`xqh_id`), when the page renders them.
    pub campus_options: Vec<SelectOption>,
    pub context: SelectionContext,
}

/// Parse the selection index page.
///
/// Fails with [`ExtractError::MissingSelectionField`] when the page lacks
/// the term fields or a round context id; callers treat that as a page that
/// has not finished loading.
pub fn parse_selection_index(
    html: &str,
    preferred_context_id: Option<&str>,
) -> Result<SelectionIndex, ExtractError> {
    let fields = parse_selection_fields(html);
    let round = extract_round_meta(html, &fields);

    let mut tabs = parse_round_tabs(html);
    if tabs.is_empty() {
        tabs.extend(synthesize_round_tab(&fields));
    }

    let active_context_id = active_context_id(&fields).map(str::to_string);
    let selected_tab = select_round_tab(&fields, &tabs, preferred_context_id);

    let mut merged_fields = fields.clone();
    fill_round_meta(&mut merged_fields, &round);
    if let Some(tab) = &selected_tab {
        apply_selected_tab(&mut merged_fields, tab);
    }

    let campus_options = parse_select_options(html, "xqh_id");
    apply_selected_campus(&mut merged_fields, &campus_options);

    let context = build_query_context(&merged_fields)?;

    Ok(SelectionIndex {
        fields,
        round,
        tabs,
        active_context_id,
        selected_tab,
        merged_fields,
        campus_options,
        context,
    })
}

impl SelectionIndex {
    /// Fold in the course-display page loaded for the selected tab.
    ///
    /// Non-empty display fields win over index fields, missing round
    /// metadata is filled from the display page, and the selected campus
    /// option is recorded as `xqh_id`. The query context is rebuilt.
    pub fn merge_display_page(&mut self, display_html: &str) -> Result<(), ExtractError> {
        let display_fields = parse_selection_fields(display_html);
        let display_round = extract_round_meta(display_html, &display_fields);

        let campus_options = parse_select_options(display_html, "xqh_id");
        if !campus_options.is_empty() {
            apply_selected_campus(&mut self.merged_fields, &campus_options);
            self.campus_options = campus_options;
        }

        for (key, value) in display_fields {
            if !value.is_empty() {
                self.merged_fields.insert(key, value);
            }
        }
        fill_round_meta(&mut self.merged_fields, &display_round);
        if self.round.code.is_none() {
            self.round.code = display_round.code;
        }
        if self.round.name.is_none() {
            self.round.name = display_round.name;
        }

        self.context = build_query_context(&self.merged_fields)?;
        Ok(())
    }

    /// Form fields for the course-display request of the selected tab.
    pub fn display_request(&self) -> Option<Vec<(&'static str, String)>> {
        let tab = self.selected_tab.as_ref()?;
        let xszxzt = first_non_empty(&self.fields, &["xszxzt"]).unwrap_or("1");
        Some(vec![
            ("xkkz_id", tab.context_id.clone()),
            ("xszxzt", xszxzt.to_string()),
            ("kklxdm", tab.classification_code.clone()),
            ("njdm_id", tab.grade_code.clone()),
            ("zyh_id", tab.major_code.clone()),
            ("kspage", "0".to_string()),
            ("jspage", "0".to_string()),
        ])
    }
}

fn fill_round_meta(fields: &mut FieldMap, round: &RoundMeta) {
    for (key, value) in [("xklc", &round.code), ("xklcmc", &round.name)] {
        if let Some(value) = value {
            let missing = fields.get(key).map_or(true, |v| v.is_empty());
            if missing {
                fields.insert(key.to_string(), value.clone());
            }
        }
    }
}

fn apply_selected_tab(fields: &mut FieldMap, tab: &RoundTab) {
    fields.insert("firstKklxdm".to_string(), tab.classification_code.clone());
    fields.insert("firstXkkzId".to_string(), tab.context_id.clone());
    if !tab.label.is_empty() {
        fields.insert("firstKklxmc".to_string(), tab.label.clone());
    }
    if !tab.grade_code.is_empty() {
        fields.insert("firstNjdmId".to_string(), tab.grade_code.clone());
    }
    if !tab.major_code.is_empty() {
        fields.insert("firstZyhId".to_string(), tab.major_code.clone());
    }
}

fn apply_selected_campus(fields: &mut FieldMap, options: &[SelectOption]) {
    if let Some(campus) = options.iter().find(|o| o.selected && !o.value.is_empty()) {
        fields.insert("xqh_id".to_string(), campus.value.clone());
    }
}
