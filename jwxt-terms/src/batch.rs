//! Batch parsing of raw record lists

use jwxt_core::{Course, RecordError, RegistryError, TermCalendar};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::registry::{ParserRegistry, TermParser};

/// A record that was rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Position in the input list.
    pub index: usize,
    pub error: RecordError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    /// Courses in first-seen order, sections in record order.
    pub courses: Vec<Course>,
    pub failures: Vec<RecordFailure>,
}

impl ParsedBatch {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.courses.iter().map(|c| c.sections.len()).sum()
    }

    pub fn course(&self, course_code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.course_code == course_code)
    }
}

/// Parse every record with `parser`, merging sections of the same course.
///
/// Course title and credit come from the first record seen for a code.
pub fn parse_records(
    parser: &dyn TermParser,
    records: &[Value],
    calendar: &TermCalendar,
) -> ParsedBatch {
    let mut batch = ParsedBatch::default();
    let mut by_code: HashMap<String, usize> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let course = match parser.parse(record, calendar) {
            Ok(course) => course,
            Err(error) => {
                warn!(index, parser = parser.id(), %error, "rejecting course record");
                batch.failures.push(RecordFailure { index, error });
                continue;
            }
        };

        match by_code.get(&course.course_code) {
            Some(&slot) => batch.courses[slot].sections.extend(course.sections),
            None => {
                by_code.insert(course.course_code.clone(), batch.courses.len());
                batch.courses.push(course);
            }
        }
    }

    batch
}

impl ParserRegistry {
    /// Resolve the parser for `calendar.label` and parse `records` with it.
    pub fn parse_batch(
        &self,
        records: &[Value],
        calendar: &TermCalendar,
    ) -> Result<ParsedBatch, RegistryError> {
        let parser = self.require(&calendar.label)?;
        Ok(parse_records(parser, records, calendar))
    }
}
