//! Core record types for rollcall.
//!
//! This module defines the attendance record and the calendar month label
//! attached to each entry.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The month label an attendance entry is filed under.
///
/// This is a user-chosen label, selected at entry time. It is never
/// cross-checked against the calendar month of the class date, so the two
/// may diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

/// All twelve months in calendar order.
pub const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// The month's position in the calendar year (1-12).
    #[must_use]
    pub fn number(self) -> u32 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    /// The month label matching the calendar month of the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // NaiveDate::month() is always 1-12
        ALL_MONTHS[(date.month() - 1) as usize]
    }

    /// The full English month name, as stored in the record list.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MONTHS
            .iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::invalid_month(s))
    }
}

/// A single attendance entry.
///
/// Records are immutable once created: they are appended by the store and
/// only ever removed, never edited. The serialized field names match the
/// persisted store layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Stable unique identifier, assigned by the store at append time.
    ///
    /// Legacy record lists persisted without ids are backfilled on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The student this entry belongs to, trimmed of surrounding whitespace.
    pub student_name: String,

    /// The month label this entry is filed under.
    pub month: Month,

    /// Display text for the class date, e.g. `"Wed, May 1, 2024"`.
    pub date: String,

    /// Epoch milliseconds of the class date at UTC midnight; used only
    /// for ordering.
    pub timestamp: i64,
}

impl AttendanceRecord {
    /// Create a new record for the given student, month label, and class date.
    ///
    /// The display date and ordering timestamp are derived from `class_date`
    /// here; the id is left unset until the store appends the record.
    #[must_use]
    pub fn new(student_name: impl Into<String>, month: Month, class_date: NaiveDate) -> Self {
        Self {
            id: None,
            student_name: student_name.into().trim().to_string(),
            month,
            date: format_class_date(class_date),
            timestamp: class_date
                .and_time(NaiveTime::MIN)
                .and_utc()
                .timestamp_millis(),
        }
    }

    /// The class date as a UTC instant, reconstructed from the timestamp.
    #[must_use]
    pub fn class_instant(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Format a class date for display: abbreviated weekday and month, unpadded
/// day, full year.
#[must_use]
pub fn format_class_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
