//! Error types for timetable parsing and extraction

use thiserror::Error;

/// Time-encoding grammar errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Malformed time token '{token}' at column {column}: {reason}")]
    MalformedTimeToken {
        token: String,
        column: usize,
        reason: String,
    },
}

impl GrammarError {
    /// The raw token that failed to parse.
    pub fn token(&self) -> &str {
        match self {
            GrammarError::MalformedTimeToken { token, .. } => token,
        }
    }

    /// 1-based character column where parsing stopped.
    pub fn column(&self) -> usize {
        match self {
            GrammarError::MalformedTimeToken { column, .. } => *column,
        }
    }
}

/// Slot construction errors (invariants of [`crate::ParsedSlot`]).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Section range {start}-{end} is invalid")]
    InvalidSectionRange { start: u8, end: u8 },

    #[error("Week numbers must be >= 1")]
    ZeroWeek,

    #[error("Slot has no weeks")]
    EmptyWeeks,
}

/// Markup extraction errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Selection page is missing required field: {field}")]
    MissingSelectionField { field: String },

    #[error("Enrollment breakdown table has no data rows")]
    EmptyBreakdownTable,

    #[error("Selection context lacks {field}, required for {purpose}")]
    MissingContextValue { field: String, purpose: String },
}

/// Term parser registry errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("No parser registered for term '{label}'")]
    UnsupportedTerm { label: String },

    #[error("Parser id already registered: {id}")]
    DuplicateParser { id: String },
}

/// Raw course record errors. A failing record is skipped as a whole.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record is missing required field: {field}")]
    MissingField { field: String },

    #[error("Record is not an object")]
    NotAnObject,

    #[error("Time pattern rejected: {0}")]
    Grammar(#[from] GrammarError),
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse term configuration: {reason}")]
    Parse { reason: String },
}

/// Master error type for the timetable engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwxtError {
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for timetable operations.
pub type JwxtResult<T> = Result<T, JwxtError>;

// =============================================================================
// TESTS
// =============================================================================
