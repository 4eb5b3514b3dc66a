//! Railway distances in miles and chains (80 chains to the mile).

use std::fmt;
use std::str::FromStr;

pub const CHAINS_PER_MILE: u64 = 80;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MileageError {
    #[error("distance must be a finite, non-negative number of miles, got {0}")]
    InvalidMiles(f64),
    #[error("invalid miles-and-chains string {0:?}")]
    Malformed(String),
    #[error("chain count {0} is out of range")]
    ChainsOutOfRange(u64),
}

/// A distance rounded to the nearest chain.
///
/// Stored as a total chain count, so the chains component is always in
/// `0..80` and a distance just under a whole mile rolls over cleanly.
///
/// # Examples
///
/// ```
/// use train_stats::domain::Mileage;
///
/// let m = Mileage::from_miles(3.5).unwrap();
/// assert_eq!(m.to_string(), "3m 40ch");
/// assert_eq!((m.miles(), m.chains()), (3, 40));
///
/// // 0.9999 miles is 79.992 chains, which rounds up to a whole mile
/// assert_eq!(Mileage::from_miles(0.9999).unwrap().to_string(), "1m 0ch");
///
/// assert_eq!("12m 7ch".parse::<Mileage>().unwrap().chains(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Mileage {
    total_chains: u64,
}

impl Mileage {
    /// Convert decimal miles, rounding half away from zero to the nearest
    /// chain.
    pub fn from_miles(miles: f64) -> Result<Self, MileageError> {
        if !miles.is_finite() || miles < 0.0 {
            return Err(MileageError::InvalidMiles(miles));
        }
        let chains = (miles * CHAINS_PER_MILE as f64).round();
        if chains > u64::MAX as f64 {
            return Err(MileageError::InvalidMiles(miles));
        }
        Ok(Self {
            total_chains: chains as u64,
        })
    }

    pub fn from_parts(miles: u64, chains: u64) -> Result<Self, MileageError> {
        if chains >= CHAINS_PER_MILE {
            return Err(MileageError::ChainsOutOfRange(chains));
        }
        miles
            .checked_mul(CHAINS_PER_MILE)
            .and_then(|c| c.checked_add(chains))
            .map(|total_chains| Self { total_chains })
            .ok_or(MileageError::ChainsOutOfRange(chains))
    }

    /// Whole miles.
    pub fn miles(&self) -> u64 {
        self.total_chains / CHAINS_PER_MILE
    }

    /// Chains beyond the whole miles, in `0..80`.
    pub fn chains(&self) -> u64 {
        self.total_chains % CHAINS_PER_MILE
    }

    pub fn total_chains(&self) -> u64 {
        self.total_chains
    }

    pub fn as_miles(&self) -> f64 {
        self.total_chains as f64 / CHAINS_PER_MILE as f64
    }
}

impl fmt::Display for Mileage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}ch", self.miles(), self.chains())
    }
}

impl FromStr for Mileage {
    type Err = MileageError;

    /// Parse the `"{M}m {C}ch"` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MileageError::Malformed(s.to_string());
        let (miles, chains) = s.trim().split_once(' ').ok_or_else(malformed)?;
        let miles = miles
            .strip_suffix('m')
            .and_then(|m| m.parse::<u64>().ok())
            .ok_or_else(malformed)?;
        let chains = chains
            .trim_start()
            .strip_suffix("ch")
            .and_then(|c| c.parse::<u64>().ok())
            .ok_or_else(malformed)?;
        Self::from_parts(miles, chains)
    }
}

/// Display text for an optional distance in decimal miles; empty when the
/// distance is absent or not a valid mileage.
pub fn format_mileage(miles: Option<f64>) -> String {
    miles
        .and_then(|m| Mileage::from_miles(m).ok())
        .map(|m| m.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_mile() {
        assert_eq!(Mileage::from_miles(3.5).unwrap().to_string(), "3m 40ch");
    }

    #[test]
    fn whole_and_zero() {
        assert_eq!(Mileage::from_miles(0.0).unwrap().to_string(), "0m 0ch");
        assert_eq!(Mileage::from_miles(12.0).unwrap().to_string(), "12m 0ch");
        assert_eq!(Mileage::from_miles(0.0125).unwrap().to_string(), "0m 1ch");
    }

    #[test]
    fn never_eighty_chains() {
        for miles in [0.995, 0.9999, 4.99999, 79.9951] {
            let m = Mileage::from_miles(miles).unwrap();
            assert!(m.chains() < 80, "{miles} gave {m}");
        }
        assert_eq!(Mileage::from_miles(4.9999).unwrap().to_string(), "5m 0ch");
    }

    #[test]
    fn rejects_invalid_miles() {
        assert!(Mileage::from_miles(-0.5).is_err());
        assert!(Mileage::from_miles(f64::NAN).is_err());
        assert!(Mileage::from_miles(f64::INFINITY).is_err());
    }

    #[test]
    fn parse_display_form() {
        let m: Mileage = "3m 40ch".parse().unwrap();
        assert_eq!((m.miles(), m.chains()), (3, 40));
        assert_eq!(" 0m 0ch ".parse::<Mileage>().unwrap(), Mileage::default());
    }

    #[test]
    fn parse_rejects() {
        for s in ["", "3m", "3 40", "3m 80ch", "m 4ch", "3m -1ch", "3.5m 0ch"] {
            assert!(s.parse::<Mileage>().is_err(), "{s:?} should be rejected");
        }
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(format_mileage(None), "");
        assert_eq!(format_mileage(Some(-1.0)), "");
        assert_eq!(format_mileage(Some(0.0)), "0m 0ch");
        assert_eq!(format_mileage(Some(101.25)), "101m 20ch");
    }
}
