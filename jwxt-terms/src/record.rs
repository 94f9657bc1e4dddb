//! Raw record access and course assembly shared by the strategies

use jwxt_core::{ClassSession, Course, ParsedSlot, RecordError, Section, TermCalendar, Teacher};
use jwxt_grammar::{classify_slot, parse_time_token, split_time_tokens};
use jwxt_markup::{decode_entities, parse_int_loose};
use serde_json::{Map, Value};

/// Read-only view of one raw JSON record.
///
/// Field values arrive as strings or numbers depending on the exporter;
/// every accessor accepts both.
#[derive(Debug, Clone, Copy)]
pub struct RawRecord<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawRecord<'a> {
    pub fn new(value: &'a Value) -> Result<Self, RecordError> {
        value
            .as_object()
            .map(|fields| Self { fields })
            .ok_or(RecordError::NotAnObject)
    }

    /// Trimmed text of `key`; empty strings and nulls are absent.
    pub fn text(&self, key: &str) -> Option<String> {
        let text = match self.fields.get(key)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    /// First present key of `keys`.
    pub fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    pub fn required(&self, key: &str) -> Result<String, RecordError> {
        self.text(key).ok_or_else(|| RecordError::MissingField {
            field: key.to_string(),
        })
    }

    /// Non-negative count, tolerating decorated text such as `"60人"`.
    pub fn count(&self, key: &str) -> Option<u32> {
        match self.fields.get(key)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
                .and_then(|n| u32::try_from(n).ok()),
            Value::String(s) => parse_int_loose(s).and_then(|n| u32::try_from(n).ok()),
            _ => None,
        }
    }

    pub fn decimal(&self, key: &str) -> Option<f64> {
        let value = match self.fields.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|f| f.is_finite())
    }
}

/// One record's fields after a strategy has mapped its generation's names.
#[derive(Debug, Clone, Default)]
pub struct CourseFields {
    pub course_code: String,
    pub title: String,
    pub credit: Option<f64>,
    pub section_id: String,
    pub teachers: Vec<Teacher>,
    pub time_pattern: String,
    pub location_text: String,
    pub capacity: Option<u32>,
    pub enrolled: Option<u32>,
    pub campus: Option<String>,
}

impl CourseFields {
    /// Build the single-section course tree.
    pub fn into_course(self, calendar: &TermCalendar) -> Result<Course, RecordError> {
        let sessions = build_sessions(&self.time_pattern, &self.location_text, calendar)?;
        Ok(Course {
            course_code: self.course_code,
            title: decode_entities(&self.title),
            credit: self.credit,
            term_label: calendar.label.clone(),
            sections: vec![Section {
                section_id: self.section_id,
                teachers: self.teachers,
                capacity: self.capacity,
                enrolled: self.enrolled,
                campus: self.campus,
                sessions,
            }],
        })
    }
}

/// Group a record's meeting tokens into sessions.
///
/// The location list runs parallel to the tokens; when it is shorter, its
/// last entry applies to the remaining tokens. Consecutive tokens sharing a
/// week set and location form one session.
pub fn build_sessions(
    time_pattern: &str,
    location_text: &str,
    calendar: &TermCalendar,
) -> Result<Vec<ClassSession>, RecordError> {
    let locations: Vec<String> = split_time_tokens(location_text)
        .into_iter()
        .map(decode_entities)
        .collect();

    let mut sessions: Vec<ClassSession> = Vec::new();
    for (i, token) in split_time_tokens(time_pattern).into_iter().enumerate() {
        let slot = parse_time_token(token)?;
        let location = locations.get(i).or(locations.last()).cloned();

        match sessions.last_mut() {
            Some(session) if same_session(session, &slot, &location) => session.slots.push(slot),
            _ => sessions.push(ClassSession {
                week_span: classify_slot(&slot, calendar),
                slots: vec![slot],
                location,
            }),
        }
    }
    Ok(sessions)
}

fn same_session(session: &ClassSession, slot: &ParsedSlot, location: &Option<String>) -> bool {
    session.location == *location
        && session
            .slots
            .first()
            .is_some_and(|first| first.weeks() == slot.weeks())
}

/// Split a delimited list (`,` `，` `;` `；`) into trimmed, non-empty parts.
pub fn split_list(text: &str) -> Vec<&str> {
    text.split([',', '，', ';', '；'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}
