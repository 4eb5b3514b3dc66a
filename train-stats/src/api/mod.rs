//! Train API access.
//!
//! The remote API serves recorded legs, per-year statistics and station
//! details as loosely typed JSON. This module decodes a whole response into
//! raw DTOs, then converts it to domain types in one step:
//!
//! - absent or `null` optional fields become `None`
//! - numbers may arrive quoted and are read either way
//! - durations arrive as ISO 8601 text (`"PT2H5M"`)
//! - coordinates arrive as `[longitude, latitude]` string pairs

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{ApiClient, ApiConfig};
pub use convert::{
    ConversionError, convert_leg, convert_legs, convert_station_data, convert_stations,
    convert_stats,
};
pub use error::ApiError;
pub use mock::MockSource;
pub use source::DataSource;
pub use types::{LooseNumber, RawLeg, RawStationData, RawStats};
