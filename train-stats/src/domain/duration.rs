//! Journey durations.
//!
//! The API reports durations either as ISO 8601 strings ("PT2H5M",
//! "P1DT3H") or as a days/hours/minutes/seconds structure. Both normalize to
//! whole seconds before they are compared or displayed.

use std::fmt;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// Error returned when parsing an invalid duration string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("duration must start with 'P': {0:?}")]
    MissingDesignator(String),
    #[error("duration has no components: {0:?}")]
    Empty(String),
    #[error("unsupported or misplaced duration component '{unit}' in {input:?}")]
    BadComponent { unit: char, input: String },
    #[error("invalid number in duration {0:?}")]
    BadNumber(String),
    #[error("duration {0:?} is too large")]
    Overflow(String),
}

/// A non-negative span of time, held as whole seconds.
///
/// # Examples
///
/// ```
/// use train_stats::domain::LegDuration;
///
/// let d = LegDuration::from_minutes(125);
/// assert_eq!(d.to_string(), "2h 5m");
///
/// let iso = LegDuration::parse_iso8601("PT2H5M").unwrap();
/// assert_eq!(iso, d);
///
/// let long = LegDuration::parse_iso8601("P1DT3H20M").unwrap();
/// assert_eq!(long.to_string(), "1d 3h 20m");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LegDuration {
    seconds: u64,
}

impl LegDuration {
    pub const ZERO: LegDuration = LegDuration { seconds: 0 };

    pub fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    pub fn from_minutes(minutes: u64) -> Self {
        Self::from_seconds(minutes.saturating_mul(SECONDS_PER_MINUTE))
    }

    /// Build from a days/hours/minutes/seconds structure. Components need not
    /// be normalized, so 90 minutes is accepted.
    pub fn from_parts(days: u64, hours: u64, minutes: u64, seconds: u64) -> Self {
        let total = days
            .saturating_mul(SECONDS_PER_DAY)
            .saturating_add(hours.saturating_mul(SECONDS_PER_HOUR))
            .saturating_add(minutes.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(seconds);
        Self::from_seconds(total)
    }

    /// Parse an ISO 8601 duration of the form `P[nW][nD][T[nH][nM][nS]]`.
    ///
    /// Years and months have no fixed length and are rejected. Only the
    /// seconds component may be fractional; the fraction is dropped.
    pub fn parse_iso8601(s: &str) -> Result<Self, DurationError> {
        let input = s.trim();
        let body = input
            .strip_prefix('P')
            .ok_or_else(|| DurationError::MissingDesignator(input.to_string()))?;

        let (date_part, time_part) = match body.split_once('T') {
            Some((date, time)) => {
                if time.is_empty() {
                    return Err(DurationError::Empty(input.to_string()));
                }
                (date, Some(time))
            }
            None => (body, None),
        };

        let mut total: u64 = 0;
        let mut components = 0;

        for (value, unit) in components_of(date_part, input)? {
            let scale = match unit {
                'W' => SECONDS_PER_WEEK,
                'D' => SECONDS_PER_DAY,
                other => {
                    return Err(DurationError::BadComponent {
                        unit: other,
                        input: input.to_string(),
                    });
                }
            };
            total = accumulate(total, whole(value, input)?, scale, input)?;
            components += 1;
        }

        if let Some(time_part) = time_part {
            for (value, unit) in components_of(time_part, input)? {
                let amount = match unit {
                    'H' => accumulate(0, whole(value, input)?, SECONDS_PER_HOUR, input)?,
                    'M' => accumulate(0, whole(value, input)?, SECONDS_PER_MINUTE, input)?,
                    'S' => whole_seconds(value, input)?,
                    other => {
                        return Err(DurationError::BadComponent {
                            unit: other,
                            input: input.to_string(),
                        });
                    }
                };
                total = total
                    .checked_add(amount)
                    .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
                components += 1;
            }
        }

        if components == 0 {
            return Err(DurationError::Empty(input.to_string()));
        }
        Ok(Self::from_seconds(total))
    }

    pub fn as_seconds(&self) -> u64 {
        self.seconds
    }

    /// Whole minutes, dropping leftover seconds.
    pub fn as_minutes(&self) -> u64 {
        self.seconds / SECONDS_PER_MINUTE
    }

    pub fn days(&self) -> u64 {
        self.seconds / SECONDS_PER_DAY
    }

    pub fn hours(&self) -> u64 {
        (self.seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR
    }

    pub fn minutes(&self) -> u64 {
        (self.seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE
    }
}

impl fmt::Display for LegDuration {
    /// Days come from the total, not from how the source was written, so
    /// "PT26H" and "P1DT2H" both show as "1d 2h 0m".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.days();
        if days > 0 {
            write!(f, "{}d ", days)?;
        }
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

impl std::str::FromStr for LegDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso8601(s)
    }
}

impl std::iter::Sum for LegDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::from_seconds(iter.fold(0u64, |acc, d| acc.saturating_add(d.seconds)))
    }
}

/// Display text for an optional duration; empty when absent.
pub fn format_duration(duration: Option<LegDuration>) -> String {
    duration.map(|d| d.to_string()).unwrap_or_default()
}

/// Split "3H20M" into `[("3", 'H'), ("20", 'M')]`.
fn components_of<'a>(part: &'a str, input: &str) -> Result<Vec<(&'a str, char)>, DurationError> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in part.char_indices() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            continue;
        }
        let value = &part[start..i];
        if value.is_empty() {
            return Err(DurationError::BadNumber(input.to_string()));
        }
        out.push((value, c));
        start = i + c.len_utf8();
    }
    if start != part.len() {
        // trailing number without a unit
        return Err(DurationError::BadNumber(input.to_string()));
    }
    Ok(out)
}

fn whole(value: &str, input: &str) -> Result<u64, DurationError> {
    value
        .parse::<u64>()
        .map_err(|_| DurationError::BadNumber(input.to_string()))
}

fn whole_seconds(value: &str, input: &str) -> Result<u64, DurationError> {
    let integral = match value.split_once(['.', ',']) {
        Some((integral, fraction)) => {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DurationError::BadNumber(input.to_string()));
            }
            integral
        }
        None => value,
    };
    whole(integral, input)
}

fn accumulate(total: u64, value: u64, scale: u64, input: &str) -> Result<u64, DurationError> {
    value
        .checked_mul(scale)
        .and_then(|v| total.checked_add(v))
        .ok_or_else(|| DurationError::Overflow(input.to_string()))
}
