//! JWXT Terms - term parser registry
//!
//! The portal's raw course records change shape between term generations.
//! A [`ParserRegistry`] maps a term label to the [`TermParser`] for that
//! generation, which turns each record into a normalized
//! [`jwxt_core::Course`] tree with parsed meeting slots and week spans.

mod batch;
pub mod record;
mod registry;
pub mod strategies;

pub use batch::{parse_records, ParsedBatch, RecordFailure};
pub use record::{build_sessions, CourseFields, RawRecord};
pub use registry::{ParserRegistry, Resolution, TermParser};
pub use strategies::{LegacyListParser, Snapshot2025Parser};
