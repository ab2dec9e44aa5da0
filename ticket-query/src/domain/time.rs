//! Date and time handling for ticket queries.
//!
//! The query endpoint takes dates as `YYYY-MM-DD`, while trip records carry
//! the departure date in compact `YYYYMMDD` form and times as `HH:MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid date or time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date/time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// The travel date of a query, rendered as `YYYY-MM-DD` on the wire.
///
/// # Examples
///
/// ```
/// use ticket_query::domain::TravelDate;
///
/// let date: TravelDate = "2019-01-09".parse().unwrap();
/// assert_eq!(date.to_string(), "2019-01-09");
///
/// assert!("20190109".parse::<TravelDate>().is_err());
/// assert!("2019-02-30".parse::<TravelDate>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TravelDate(NaiveDate);

impl TravelDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for TravelDate {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 {
            return Err(TimeError::new("expected YYYY-MM-DD format"));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TimeError::new("expected a valid YYYY-MM-DD date"))
    }
}

impl fmt::Display for TravelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for TravelDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TravelDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a time from "HH:MM" format.
///
/// # Examples
///
/// ```
/// use ticket_query::domain::parse_hhmm;
///
/// assert!(parse_hhmm("00:00").is_ok());
/// assert!(parse_hhmm("23:59").is_ok());
///
/// assert!(parse_hhmm("1430").is_err());
/// assert!(parse_hhmm("14:3").is_err());
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 {
        return Err(TimeError::new("expected HH:MM format"));
    }

    if bytes[2] != b':' {
        return Err(TimeError::new("expected colon at position 2"));
    }

    let hour =
        parse_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
    if hour > 23 {
        return Err(TimeError::new("hour must be 0-23"));
    }

    let minute =
        parse_digits(&bytes[3..5]).ok_or_else(|| TimeError::new("invalid minute digits"))?;
    if minute > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::new("invalid time"))
}

/// Parse a compact `YYYYMMDD` date, as carried in trip records.
pub fn parse_compact_date(s: &str) -> Result<NaiveDate, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 {
        return Err(TimeError::new("expected YYYYMMDD format"));
    }

    let year = parse_digits(&bytes[0..4]).ok_or_else(|| TimeError::new("invalid year digits"))?;
    let month =
        parse_digits(&bytes[4..6]).ok_or_else(|| TimeError::new("invalid month digits"))?;
    let day = parse_digits(&bytes[6..8]).ok_or_else(|| TimeError::new("invalid day digits"))?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| TimeError::new("date does not exist"))
}

/// Parse a run of ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let d = (b as char).to_digit(10)?;
        Some(acc * 10 + d)
    })
}
