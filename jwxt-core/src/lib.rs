//! JWXT Core - Timetable Entity Types
//!
//! Data model, error taxonomy and term configuration shared by every crate
//! of the timetable engine. No parsing logic lives here beyond invariant
//! checks on construction.

pub mod breakdown;
pub mod config;
pub mod course;
pub mod enums;
pub mod error;
pub mod selection;
pub mod slot;

pub use breakdown::{BreakdownItem, BreakdownWarning, EnrollmentBreakdown, RankWindow};
pub use config::{TermCalendar, DEFAULT_SECTIONS_PER_DAY, DEFAULT_TOTAL_WEEKS, MAX_TOTAL_WEEKS};
pub use course::{ClassSession, Course, Section, Teacher};
pub use enums::{
    CellStatus, CellStatusParseError, Parity, WeekSpan, Weekday, WeekdayParseError,
};
pub use error::{
    ConfigError, ExtractError, GrammarError, JwxtError, JwxtResult, RecordError, RegistryError,
    SlotError,
};
pub use selection::{RoundMeta, RoundTab, SelectOption, SelectionContext};
pub use slot::ParsedSlot;
