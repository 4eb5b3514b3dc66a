//! Lateness of a call relative to its timetable.

use super::time::Timestamp;
use std::fmt;

/// Signed lateness in whole minutes. Negative means early.
///
/// # Examples
///
/// ```
/// use train_stats::domain::{Delay, DelayBand, Timestamp};
///
/// let plan = Timestamp::parse("2024-03-15T10:00:00").unwrap();
/// let actual = Timestamp::parse("2024-03-15T10:04:00").unwrap();
/// let delay = Delay::between(plan, actual);
///
/// assert_eq!(delay.to_string(), "+4");
/// assert_eq!(delay.band(), DelayBand::Late);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delay(i64);

impl Delay {
    pub const ON_TIME: Delay = Delay(0);

    pub fn from_minutes(minutes: i64) -> Self {
        Self(minutes)
    }

    /// Minutes from `plan` to `actual`, truncated toward zero.
    pub fn between(plan: Timestamp, actual: Timestamp) -> Self {
        Self(actual.signed_duration_since(plan).num_minutes())
    }

    /// Delay when both instants are known.
    pub fn between_optional(plan: Option<Timestamp>, actual: Option<Timestamp>) -> Option<Self> {
        Some(Self::between(plan?, actual?))
    }

    pub fn minutes(&self) -> i64 {
        self.0
    }

    pub fn band(&self) -> DelayBand {
        DelayBand::of(*self)
    }
}

impl fmt::Display for Delay {
    /// Early delays keep their minus sign, late ones gain a plus and an
    /// on-time call shows a middle dot.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("\u{b7}"),
            n if n > 0 => write!(f, "+{}", n),
            n => write!(f, "{}", n),
        }
    }
}

/// Colour band for a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayBand {
    /// Five or more minutes early.
    VeryEarly,
    Early,
    OnTime,
    Late,
    /// Five or more minutes late.
    VeryLate,
}

impl DelayBand {
    pub fn of(delay: Delay) -> Self {
        match delay.minutes() {
            m if m <= -5 => DelayBand::VeryEarly,
            m if m < 0 => DelayBand::Early,
            0 => DelayBand::OnTime,
            m if m < 5 => DelayBand::Late,
            _ => DelayBand::VeryLate,
        }
    }

    /// Stylesheet class for text in this band.
    pub fn css_class(&self) -> &'static str {
        match self {
            DelayBand::VeryEarly => "delay-very-early",
            DelayBand::Early => "delay-early",
            DelayBand::OnTime => "delay-on-time",
            DelayBand::Late => "delay-late",
            DelayBand::VeryLate => "delay-very-late",
        }
    }
}

/// Display text for an optional delay; empty when unknown.
pub fn delay_text(delay: Option<Delay>) -> String {
    delay.map(|d| d.to_string()).unwrap_or_default()
}

/// Stylesheet class for an optional delay; empty when unknown.
pub fn delay_class(delay: Option<Delay>) -> &'static str {
    delay.map(|d| d.band().css_class()).unwrap_or("")
}
