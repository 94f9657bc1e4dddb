//! Term configuration

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Default week count of a regular term.
pub const DEFAULT_TOTAL_WEEKS: u32 = 16;

/// Default number of teaching periods per day.
pub const DEFAULT_SECTIONS_PER_DAY: u8 = 13;

/// Upper bound on term length. Week numbers above it are rejected outright.
pub const MAX_TOTAL_WEEKS: u32 = 60;
const MAX_SECTIONS_PER_DAY: u8 = 30;

/// Calendar metadata of one academic term.
///
/// `total_weeks` is the N used by week-span classification and by the
/// occupancy grid's week axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermCalendar {
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_total_weeks")]
    pub total_weeks: u32,
    #[serde(default = "default_sections_per_day")]
    pub sections_per_day: u8,
}

fn default_total_weeks() -> u32 {
    DEFAULT_TOTAL_WEEKS
}

fn default_sections_per_day() -> u8 {
    DEFAULT_SECTIONS_PER_DAY
}

impl Default for TermCalendar {
    fn default() -> Self {
        Self {
            label: String::new(),
            total_weeks: DEFAULT_TOTAL_WEEKS,
            sections_per_day: DEFAULT_SECTIONS_PER_DAY,
        }
    }
}

impl TermCalendar {
    pub fn new(label: impl Into<String>, total_weeks: u32, sections_per_day: u8) -> Self {
        Self {
            label: label.into(),
            total_weeks,
            sections_per_day,
        }
    }

    /// Parse and validate a `[term]`-less TOML document:
    ///
    /// ```toml
    /// label = "2025-2026 春"
    /// total_weeks = 16
    /// sections_per_day = 13
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let calendar: TermCalendar = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        calendar.validate()?;
        Ok(calendar)
    }

    /// Create from environment variables, then validate.
    ///
    /// Environment variables:
    /// - `JWXT_TERM_LABEL`: term label (default: empty)
    /// - `JWXT_TERM_WEEKS`: total week count (default: 16)
    /// - `JWXT_TERM_SECTIONS`: periods per day (default: 13)
    ///
    /// Unset variables take their default. A set but unparseable or
    /// out-of-range value is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let calendar = Self {
            label: lookup("JWXT_TERM_LABEL").unwrap_or(defaults.label),
            total_weeks: parse_var(&lookup, "JWXT_TERM_WEEKS", "total_weeks")?
                .unwrap_or(defaults.total_weeks),
            sections_per_day: parse_var(&lookup, "JWXT_TERM_SECTIONS", "sections_per_day")?
                .unwrap_or(defaults.sections_per_day),
        };
        calendar.validate()?;
        Ok(calendar)
    }

    /// Validate the calendar.
    ///
    /// Validates:
    /// - 1 <= total_weeks <= 60
    /// - 1 <= sections_per_day <= 30
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_weeks == 0 || self.total_weeks > MAX_TOTAL_WEEKS {
            return Err(ConfigError::InvalidValue {
                field: "total_weeks".to_string(),
                value: self.total_weeks.to_string(),
                reason: format!("total_weeks must be between 1 and {}", MAX_TOTAL_WEEKS),
            });
        }

        if self.sections_per_day == 0 || self.sections_per_day > MAX_SECTIONS_PER_DAY {
            return Err(ConfigError::InvalidValue {
                field: "sections_per_day".to_string(),
                value: self.sections_per_day.to_string(),
                reason: format!(
                    "sections_per_day must be between 1 and {}",
                    MAX_SECTIONS_PER_DAY
                ),
            });
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    field: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: field.to_string(),
                value: raw.clone(),
                reason: format!("{} is not a number", key),
            }),
    }
}
