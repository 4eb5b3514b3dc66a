//! Domain types for recorded train travel.
//!
//! Values here are already normalized: identities are validated, and
//! anything the API may leave out is an `Option`. The formatters that turn
//! them into display text live next to the types they format.

mod delay;
mod duration;
mod leg;
mod mileage;
mod operator;
mod station;
mod stats;
mod time;

pub use delay::{Delay, DelayBand, delay_class, delay_text};
pub use duration::{DurationError, LegDuration, format_duration};
pub use leg::{
    AssociatedService, AssociationType, Leg, LegCall, LegSegment, Service, ServiceCall,
    StationData, StationLeg, StationSummary, StockReport, endpoint_names,
};
pub use mileage::{CHAINS_PER_MILE, Mileage, MileageError, format_mileage};
pub use operator::{Operator, OperatorKey, branded};
pub use station::{Crs, InvalidCrs};
pub use stats::{ClassStat, LegStat, OperatorStat, StationStat, Stats, UnitStat};
pub use time::{TimeError, Timestamp, format_long_date, format_short_date, format_time};
