//! Instant handling for train API data.
//!
//! The API sends instants as ISO 8601 strings. Some carry a UTC offset and
//! some are bare local wall-clock times; both are accepted here. Formatting
//! always uses the wall clock the instant was recorded in, so a call planned
//! at "10:15+01:00" displays as "10:15".

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Error returned when parsing an invalid instant string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Datetime layouts accepted when no UTC offset is present.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Datetime layouts with an offset that RFC 3339 parsing rejects.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// An instant reported by the train API.
///
/// Bare datetimes (no offset) are treated as wall-clock times at offset
/// zero. Two bare datetimes therefore subtract exactly as their wall clocks
/// do, which is what delay computation needs.
///
/// # Examples
///
/// ```
/// use train_stats::domain::Timestamp;
///
/// let t = Timestamp::parse("2024-03-15T09:05:00+00:00").unwrap();
/// assert_eq!(t.short_date(), "2024-03-15");
/// assert_eq!(t.time_string(), "09:05");
///
/// let bare = Timestamp::parse("2024-03-15T09:05:00").unwrap();
/// assert_eq!(bare, t);
/// ```
///
/// Equality and ordering compare instants, not wall clocks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Wrap an offset-aware datetime.
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self(datetime)
    }

    /// Build from a wall-clock datetime with no offset information.
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime.and_utc().fixed_offset())
    }

    /// Parse an ISO 8601 instant.
    ///
    /// Accepts RFC 3339 datetimes, bare datetimes (with or without seconds
    /// and fractional seconds) and plain `YYYY-MM-DD` dates, which are taken
    /// as midnight.
    ///
    /// # Examples
    ///
    /// ```
    /// use train_stats::domain::Timestamp;
    ///
    /// assert!(Timestamp::parse("2024-03-15T10:00:00Z").is_ok());
    /// assert!(Timestamp::parse("2024-03-15T10:00:00.250").is_ok());
    /// assert!(Timestamp::parse("2024-03-15 10:00").is_ok());
    /// assert!(Timestamp::parse("2024-03-15").is_ok());
    ///
    /// assert!(Timestamp::parse("").is_err());
    /// assert!(Timestamp::parse("15/03/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("empty string"));
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(datetime));
        }

        for format in OFFSET_FORMATS {
            if let Ok(datetime) = DateTime::parse_from_str(s, format) {
                return Ok(Self(datetime));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self::from_naive(datetime));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_naive(date.and_time(NaiveTime::MIN)));
        }

        Err(TimeError::new("expected an ISO 8601 date or datetime"))
    }

    /// Returns the underlying offset-aware datetime.
    pub fn datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Returns the wall-clock datetime at the recorded offset.
    pub fn local(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    /// Returns the calendar year of the wall-clock date.
    pub fn year(&self) -> i32 {
        self.local().year()
    }

    /// Returns the duration from `other` to `self`.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// "YYYY-MM-DD", zero padded.
    pub fn short_date(&self) -> String {
        self.local().format("%Y-%m-%d").to_string()
    }

    /// Weekday, day, month and year in British English, e.g.
    /// "Friday 15 March 2024".
    pub fn long_date(&self) -> String {
        self.local().format("%A %d %B %Y").to_string()
    }

    /// "HH:MM" on a 24-hour clock, zero padded.
    pub fn time_string(&self) -> String {
        self.local().format("%H:%M").to_string()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

/// Short date of an optional instant; empty when absent.
pub fn format_short_date(timestamp: Option<Timestamp>) -> String {
    timestamp.map(|t| t.short_date()).unwrap_or_default()
}

/// Long date of an optional instant; empty when absent.
pub fn format_long_date(timestamp: Option<Timestamp>) -> String {
    timestamp.map(|t| t.long_date()).unwrap_or_default()
}

/// "HH:MM" of an optional instant; empty when absent.
pub fn format_time(timestamp: Option<Timestamp>) -> String {
    timestamp.map(|t| t.time_string()).unwrap_or_default()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    prop_compose! {
        fn wall_clock()(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            hour in 0u32..24,
            minute in 0u32..60,
        ) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(year, month, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap()
        }
    }

    proptest! {
        /// Formatting then parsing the bare form recovers the instant
        #[test]
        fn bare_roundtrip(naive in wall_clock()) {
            let s = naive.format("%Y-%m-%dT%H:%M:%S").to_string();
            let parsed = Timestamp::parse(&s).unwrap();
            prop_assert_eq!(parsed.local(), naive);
        }

        /// Short date and time agree with the wall clock
        #[test]
        fn display_matches_wall_clock(naive in wall_clock(), offset_hours in -12i32..=12) {
            let offset = FixedOffset::east_opt(offset_hours * 3600).unwrap();
            let datetime = naive.and_local_timezone(offset).unwrap();
            let t = Timestamp::new(datetime);
            prop_assert_eq!(t.short_date(), naive.format("%Y-%m-%d").to_string());
            prop_assert_eq!(t.time_string(), naive.format("%H:%M").to_string());
        }

        /// Ordering is consistent with signed duration
        #[test]
        fn ordering_matches_duration(a in wall_clock(), b in wall_clock()) {
            let ta = Timestamp::from_naive(a);
            let tb = Timestamp::from_naive(b);
            let d = tb.signed_duration_since(ta);
            match ta.cmp(&tb) {
                Ordering::Less => prop_assert!(d > Duration::zero()),
                Ordering::Greater => prop_assert!(d < Duration::zero()),
                Ordering::Equal => prop_assert!(d == Duration::zero()),
            }
        }
    }
}
