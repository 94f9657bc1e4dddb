//! Portal list rows (`kch_id`, `sksj`, ...) as returned by the course query

use jwxt_core::{Course, RecordError, TermCalendar, Teacher};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{label_year, SNAPSHOT_FIRST_YEAR, TERM_CODE};
use crate::record::{split_list, CourseFields, RawRecord};
use crate::registry::TermParser;

// 2023-2024-1, 2023-2024-2, ...
static ACADEMIC_YEAR_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{4}-[123]$").expect("static regex must compile"));

#[derive(Debug, Clone, Default)]
pub struct LegacyListParser;

impl LegacyListParser {
    pub fn new() -> Self {
        Self
    }
}

impl TermParser for LegacyListParser {
    fn id(&self) -> &str {
        "jwxt-legacy"
    }

    fn term_labels(&self) -> &[&str] {
        &[]
    }

    fn version(&self) -> &str {
        "2019.1"
    }

    fn matches_label(&self, label: &str) -> bool {
        (ACADEMIC_YEAR_TERM.is_match(label) || TERM_CODE.is_match(label))
            && label_year(label).is_some_and(|year| year < SNAPSHOT_FIRST_YEAR)
    }

    fn parse(&self, record: &Value, calendar: &TermCalendar) -> Result<Course, RecordError> {
        let raw = RawRecord::new(record)?;
        CourseFields {
            course_code: raw.required("kch_id")?,
            section_id: raw.required("jxb_id")?,
            title: raw.text("kcmc").unwrap_or_default(),
            credit: raw.decimal("xf"),
            teachers: raw.text("jsxx").map(|t| parse_teachers(&t)).unwrap_or_default(),
            time_pattern: raw.text("sksj").unwrap_or_default(),
            location_text: raw.text("jxdd").unwrap_or_default(),
            capacity: raw.count("jxbrl"),
            enrolled: raw.count("yxzrs"),
            campus: raw.first_text(&["xqumc", "yqmc"]),
        }
        .into_course(calendar)
    }
}

/// `id/name/title` entries separated by `;` or `,`. A lone segment is a name.
fn parse_teachers(jsxx: &str) -> Vec<Teacher> {
    split_list(jsxx)
        .into_iter()
        .filter_map(|entry| {
            let parts: Vec<&str> = entry
                .split('/')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            match parts.as_slice() {
                [] => None,
                [name] => Some(Teacher {
                    id: None,
                    name: name.to_string(),
                    title: None,
                }),
                [id, name, rest @ ..] => Some(Teacher {
                    id: Some(id.to_string()),
                    name: name.to_string(),
                    title: rest.first().map(|t| t.to_string()),
                }),
            }
        })
        .collect()
}
