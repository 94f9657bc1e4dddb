//! Normalized course tree produced by term strategies

use crate::{ParsedSlot, WeekSpan};
use serde::{Deserialize, Serialize};

/// Instructor attached to a teaching section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Option<String>,
    pub name: String,
    /// Academic title (讲师, 副教授, ...)
    pub title: Option<String>,
}

/// A group of slots that share one week set and one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    pub slots: Vec<ParsedSlot>,
    pub week_span: WeekSpan,
    pub location: Option<String>,
}

impl ClassSession {
    /// Week set shared by every slot of the session.
    pub fn weeks(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .first()
            .into_iter()
            .flat_map(|slot| slot.weeks().iter().copied())
    }
}

/// One teaching class (教学班) of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_id: String,
    pub teachers: Vec<Teacher>,
    pub capacity: Option<u32>,
    pub enrolled: Option<u32>,
    pub campus: Option<String>,
    pub sessions: Vec<ClassSession>,
}

impl Section {
    /// Every slot of every session, in session order.
    pub fn slots(&self) -> impl Iterator<Item = &ParsedSlot> {
        self.sessions.iter().flat_map(|session| session.slots.iter())
    }

    /// Remaining seats, when both counts are known.
    pub fn remaining(&self) -> Option<u32> {
        match (self.capacity, self.enrolled) {
            (Some(capacity), Some(enrolled)) => Some(capacity.saturating_sub(enrolled)),
            _ => None,
        }
    }
}

/// A course with its sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_code: String,
    pub title: String,
    pub credit: Option<f64>,
    pub term_label: String,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.section_id == section_id)
    }
}
