//! Crawler snapshots (`courseId`, `classTime`, ...) from 2025 onwards

use jwxt_core::{Course, RecordError, TermCalendar, Teacher};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{label_year, SNAPSHOT_FIRST_YEAR, TERM_CODE};
use crate::record::{split_list, CourseFields, RawRecord};
use crate::registry::TermParser;

const TERM_LABELS: &[&str] = &["2025-2026 春", "2025 Spring"];

static SEASON_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{4}\s*[春夏秋]$").expect("static regex must compile"));

#[derive(Debug, Clone, Default)]
pub struct Snapshot2025Parser;

impl Snapshot2025Parser {
    pub fn new() -> Self {
        Self
    }
}

impl TermParser for Snapshot2025Parser {
    fn id(&self) -> &str {
        "snapshot-2025"
    }

    fn term_labels(&self) -> &[&str] {
        TERM_LABELS
    }

    fn version(&self) -> &str {
        "2025.1"
    }

    fn matches_label(&self, label: &str) -> bool {
        (SEASON_LABEL.is_match(label) || TERM_CODE.is_match(label))
            && label_year(label).is_some_and(|year| year >= SNAPSHOT_FIRST_YEAR)
    }

    fn parse(&self, record: &Value, calendar: &TermCalendar) -> Result<Course, RecordError> {
        let raw = RawRecord::new(record)?;
        CourseFields {
            course_code: raw.required("courseId")?,
            section_id: raw.required("teachingClassId")?,
            title: raw.text("courseName").unwrap_or_default(),
            credit: raw.decimal("credit"),
            teachers: parse_teachers(&raw),
            time_pattern: raw.text("classTime").unwrap_or_default(),
            location_text: raw.text("position").unwrap_or_default(),
            capacity: raw.count("capacity"),
            enrolled: raw.count("number"),
            campus: raw.text("campus"),
        }
        .into_course(calendar)
    }
}

/// Parallel `teacherId` / `teacherName` / `teacherTitle` lists, driven by names.
fn parse_teachers(raw: &RawRecord<'_>) -> Vec<Teacher> {
    let ids = raw.text("teacherId").unwrap_or_default();
    let names = raw.text("teacherName").unwrap_or_default();
    let titles = raw.text("teacherTitle").unwrap_or_default();
    let ids = split_list(&ids);
    let titles = split_list(&titles);

    split_list(&names)
        .into_iter()
        .enumerate()
        .map(|(i, name)| Teacher {
            id: ids.get(i).map(|s| s.to_string()),
            name: name.to_string(),
            title: titles.get(i).map(|s| s.to_string()),
        })
        .collect()
}
