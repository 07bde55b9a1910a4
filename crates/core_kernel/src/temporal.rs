//! Calendar date handling for coverage windows
//!
//! Coverage is tracked in whole calendar days. This module provides:
//! - `DateRange`: an inclusive `[start, end]` window of dates
//! - `Timezone`: the jurisdiction used to decide what "today" is
//! - Parsing of request dates restricted to the supported range

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Earliest date accepted from callers
pub const MIN_SUPPORTED_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("invalid minimum supported date"),
};

/// Latest date accepted from callers
pub const MAX_SUPPORTED_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2100, 12, 31) {
    Some(date) => date,
    None => panic!("invalid maximum supported date"),
};

/// Timezone wrapper used to compute the local calendar date
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl FromStr for Timezone {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tz::from_str(s)
            .map(Timezone)
            .map_err(|_| TemporalError::UnknownTimezone(s.to_string()))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// Returns the calendar date of a UTC instant in this timezone
    pub fn date_of(&self, utc: DateTime<Utc>) -> NaiveDate {
        utc.with_timezone(&self.0).date_naive()
    }

    /// Returns the current calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::UTC)
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid date format '{0}', expected YYYY-MM-DD")]
    Unparseable(String),

    #[error("Date {0} is out of supported range (1900-01-01 to 2100-12-31)")]
    OutOfSupportedRange(NaiveDate),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// An inclusive range of calendar dates
///
/// Both `start` and `end` belong to the range, so a policy running
/// 2024-06-01..2025-06-01 covers both of those days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The range of dates callers may ask about
pub fn supported_range() -> DateRange {
    DateRange {
        start: MIN_SUPPORTED_DATE,
        end: MAX_SUPPORTED_DATE,
    }
}

/// Parses an ISO-8601 calendar date and checks it lies in the supported range
///
/// # Errors
///
/// * `TemporalError::Unparseable` if the input is not exactly `YYYY-MM-DD`
///   or names a day that does not exist
/// * `TemporalError::OutOfSupportedRange` if the date is before 1900-01-01
///   or after 2100-12-31
pub fn parse_supported_date(input: &str) -> Result<NaiveDate, TemporalError> {
    if !is_iso_date_shape(input) {
        return Err(TemporalError::Unparseable(input.to_string()));
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| TemporalError::Unparseable(input.to_string()))?;

    if !supported_range().contains(date) {
        return Err(TemporalError::OutOfSupportedRange(date));
    }
    Ok(date)
}

/// Four-digit year, two-digit month and day, no sign or padding.
/// chrono's `%Y-%m-%d` alone also takes `2025-1-5` and `+2025-01-01`.
fn is_iso_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
