//! Station identity.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code {input:?}: {reason}")]
pub struct InvalidCrs {
    input: String,
    reason: &'static str,
}

/// A 3-letter CRS station code, e.g. `KGX`.
///
/// Valid by construction: always three uppercase ASCII letters. Station
/// pages and station statistics are keyed by this code.
///
/// # Examples
///
/// ```
/// use train_stats::domain::Crs;
///
/// let kgx = Crs::parse("KGX").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
/// assert!(Crs::parse("kgx").is_err());
///
/// // URLs and API payloads are more forgiving
/// assert_eq!(Crs::parse_normalized(" kgx ").unwrap(), kgx);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a code that must already be exactly 3 uppercase letters.
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let invalid = |reason| InvalidCrs {
            input: s.to_string(),
            reason,
        };

        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| invalid("must be exactly 3 characters"))?;

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(invalid("must be uppercase ASCII letters A-Z"));
        }

        Ok(Crs(bytes))
    }

    /// Parse after trimming whitespace and uppercasing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCrs> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Crs {
    type Err = InvalidCrs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_normalized(s)
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
