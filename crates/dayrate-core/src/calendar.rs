//! Calendar used for the one-rating-per-day rule
//!
//! Timestamps are stored in UTC. Which calendar day a timestamp falls on
//! depends on the calendar the store is given, so the same-day check does not
//! depend on process-wide locale or clock state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Day boundary for same-day comparisons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Calendar {
    /// The system's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl Calendar {
    /// UTC calendar
    pub fn utc() -> Self {
        Calendar::Fixed(Utc.fix())
    }

    /// Calendar date of `instant` on this calendar
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Calendar::Local => instant.with_timezone(&Local).date_naive(),
            Calendar::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    /// Whether two instants fall on the same calendar day
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calendar::Local => write!(f, "local"),
            Calendar::Fixed(offset) => write!(f, "UTC{}", offset),
        }
    }
}

/// Error parsing a UTC offset string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid UTC offset '{0}'. Expected a value like +02:00 or -05:30")]
pub struct InvalidOffset(pub String);

impl FromStr for Calendar {
    type Err = InvalidOffset;

    /// Parses `local`, `utc`/`Z`, or a `+HH:MM` / `-HH:MM` offset
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Calendar::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s == "Z" {
            return Ok(Calendar::utc());
        }
        s.parse::<FixedOffset>()
            .map(Calendar::Fixed)
            .map_err(|_| InvalidOffset(s.to_string()))
    }
}
