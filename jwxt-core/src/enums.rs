//! Enum types for timetable entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// WEEKDAY
// ============================================================================

/// Canonical weekday, Monday = 1 … Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    /// All weekdays in calendar order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 1-based index (Monday = 1).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Weekday::index`].
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Map a portal weekday glyph (the character after `星期`).
    ///
    /// `天` is the colloquial spelling of Sunday and maps to the same day as `日`.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '一' => Some(Weekday::Monday),
            '二' => Some(Weekday::Tuesday),
            '三' => Some(Weekday::Wednesday),
            '四' => Some(Weekday::Thursday),
            '五' => Some(Weekday::Friday),
            '六' => Some(Weekday::Saturday),
            '日' | '天' => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Canonical glyph for this weekday.
    pub fn glyph(self) -> char {
        match self {
            Weekday::Monday => '一',
            Weekday::Tuesday => '二',
            Weekday::Wednesday => '三',
            Weekday::Thursday => '四',
            Weekday::Friday => '五',
            Weekday::Saturday => '六',
            Weekday::Sunday => '日',
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "星期{}", self.glyph())
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.index()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = WeekdayParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::from_index(value).ok_or_else(|| WeekdayParseError(value.to_string()))
    }
}

/// Error when a weekday index or glyph is not one of the seven canonical days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayParseError(pub String);

impl fmt::Display for WeekdayParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid weekday: {}", self.0)
    }
}

impl std::error::Error for WeekdayParseError {}

// ============================================================================
// PARITY
// ============================================================================

/// Odd/even week qualifier of a continuous run (`单` / `双`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '单' => Some(Parity::Odd),
            '双' => Some(Parity::Even),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Parity::Odd => '单',
            Parity::Even => '双',
        }
    }

    /// Whether `week` survives this parity filter.
    pub fn admits(self, week: u32) -> bool {
        match self {
            Parity::Odd => week % 2 == 1,
            Parity::Even => week % 2 == 0,
        }
    }
}

// ============================================================================
// CELL STATUS
// ============================================================================

/// Occupancy status of one (weekday, section, week) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    #[default]
    Free,
    /// Enrollment confirmed
    Selected,
    /// Awaiting the portal's lottery/screening
    Pending,
    /// Transient hover preview
    Preview,
}

impl CellStatus {
    pub fn is_free(self) -> bool {
        matches!(self, CellStatus::Free)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CellStatus::Free => "free",
            CellStatus::Selected => "selected",
            CellStatus::Pending => "pending",
            CellStatus::Preview => "preview",
        }
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CellStatus {
    type Err = CellStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(CellStatus::Free),
            "selected" => Ok(CellStatus::Selected),
            "pending" => Ok(CellStatus::Pending),
            "preview" => Ok(CellStatus::Preview),
            _ => Err(CellStatusParseError(s.to_string())),
        }
    }
}

/// Error when parsing an invalid cell status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStatusParseError(pub String);

impl fmt::Display for CellStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid cell status: {}", self.0)
    }
}

impl std::error::Error for CellStatusParseError {}

// ============================================================================
// WEEK SPAN
// ============================================================================

/// Semantic classification of a week set relative to the term length.
///
/// Display-only metadata; conflict detection always works on raw weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekSpan {
    FullTerm,
    FirstHalf,
    SecondHalf,
    Custom,
}

impl WeekSpan {
    /// Label as rendered by the portal UI.
    pub fn label(self) -> &'static str {
        match self {
            WeekSpan::FullTerm => "全学期",
            WeekSpan::FirstHalf => "上半学期",
            WeekSpan::SecondHalf => "下半学期",
            WeekSpan::Custom => "自定义",
        }
    }
}

impl fmt::Display for WeekSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
