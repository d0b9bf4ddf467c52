//! Clock-time parsing and elapsed-minute resolution.
//!
//! Timebook entries carry a start and end time of day (`H:MM` or `HH:MM`).
//! The format has no way to express a day boundary, so elapsed time is the
//! absolute difference between the two clock readings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from parsing a clock reading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// The value did not split into exactly `hours:minutes`.
    #[error("expected H:MM or HH:MM, got {value:?}")]
    Malformed { value: String },

    /// One of the two fields is not a non-negative integer.
    #[error("invalid {field} in {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// The reading does not fit into a minute count.
    #[error("clock reading {value:?} is out of range")]
    OutOfRange { value: String },
}

/// A clock reading, stored as minutes since 0:00.
///
/// Hours are not bounded to a day: `25:00` is accepted and reads as 1500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u64);

impl ClockTime {
    /// Minutes since 0:00.
    pub const fn total_minutes(self) -> u64 {
        self.0
    }

    /// Absolute number of minutes between two readings.
    pub const fn minutes_between(self, other: Self) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ClockError::Malformed {
                value: s.to_string(),
            });
        };

        let hours = parse_field(hours, "hours", s)?;
        let minutes = parse_field(minutes, "minutes", s)?;

        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .map(Self)
            .ok_or_else(|| ClockError::OutOfRange {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Parses a signed decimal integer and rejects negative values, so `-0`
/// and `+5` are accepted as 0 and 5.
pub(crate) fn parse_non_negative(s: &str) -> Option<u64> {
    s.parse::<i64>().ok().and_then(|n| u64::try_from(n).ok())
}

fn parse_field(field: &str, name: &'static str, value: &str) -> Result<u64, ClockError> {
    parse_non_negative(field).ok_or_else(|| ClockError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}

/// Resolves a start/end pair into elapsed minutes.
///
/// An end before the start yields the same magnitude as the reversed pair.
pub fn elapsed_minutes(start: &str, end: &str) -> Result<u64, ClockError> {
    let start: ClockTime = start.parse()?;
    let end: ClockTime = end.parse()?;
    Ok(start.minutes_between(end))
}
