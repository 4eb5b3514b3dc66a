//! Fixture-backed data source for running without the train API.
//!
//! Loads JSON files from a directory and serves them as if they were live
//! responses. Bodies go through the same DTOs and conversion as the
//! HTTP client.
//!
//! Expected file names:
//!
//! | file | stands in for |
//! | --- | --- |
//! | `legs.json` | `GET /api/train/legs/` |
//! | `legs-YYYY.json` | `GET /api/train/legs/years/YYYY` |
//! | `stats-YYYY.json` | `GET /api/train/stats/years/YYYY` |
//! | `leg-{id}.json` | `GET /api/train/legs/{id}` |
//! | `station-{CRS}.json` | `GET /api/train/stations/{CRS}` |
//! | `stations.json` | `GET /api/train/stations` |

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::domain::{Crs, Leg, StationData, Stats};

use super::convert::{convert_leg, convert_legs, convert_station_data, convert_stations, convert_stats};
use super::error::ApiError;
use super::types::{RawLeg, RawStationData, RawStats};

/// Data source that serves JSON fixtures, keyed by file stem.
#[derive(Clone)]
pub struct MockSource {
    fixtures: Arc<HashMap<String, String>>,
}

impl MockSource {
    /// Load every `.json` file in `data_dir`.
    pub async fn load(data_dir: impl AsRef<Path>) -> Result<Self, ApiError> {
        let data_dir = data_dir.as_ref();
        let mut fixtures = HashMap::new();

        let mut entries = tokio::fs::read_dir(data_dir).await.map_err(ApiError::Io)?;
        while let Some(entry) = entries.next_entry().await.map_err(ApiError::Io)? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let body = tokio::fs::read_to_string(&path).await.map_err(ApiError::Io)?;
            fixtures.insert(stem.to_string(), body);
        }

        if fixtures.is_empty() {
            return Err(ApiError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no fixture files found in {}", data_dir.display()),
            )));
        }

        info!(count = fixtures.len(), dir = %data_dir.display(), "loaded fixtures");

        Ok(Self {
            fixtures: Arc::new(fixtures),
        })
    }

    fn decode<R: DeserializeOwned>(&self, name: &str) -> Result<R, ApiError> {
        let body = self.fixtures.get(name).ok_or(ApiError::NotFound)?;
        serde_json::from_str(body).map_err(|e| ApiError::json(e, body))
    }

    pub async fn all_legs(&self) -> Result<Vec<Leg>, ApiError> {
        let raw: Vec<RawLeg> = self.decode("legs")?;
        Ok(convert_legs(raw))
    }

    pub async fn legs_for_year(&self, year: i32) -> Result<Vec<Leg>, ApiError> {
        let raw: Vec<RawLeg> = self.decode(&format!("legs-{:04}", year))?;
        Ok(convert_legs(raw))
    }

    pub async fn stats_for_year(&self, year: i32) -> Result<Stats, ApiError> {
        let raw: RawStats = self.decode(&format!("stats-{:04}", year))?;
        Ok(convert_stats(raw)?)
    }

    pub async fn leg(&self, id: i64) -> Result<Leg, ApiError> {
        let raw: RawLeg = self.decode(&format!("leg-{}", id))?;
        Ok(convert_leg(raw)?)
    }

    pub async fn station(&self, crs: &Crs) -> Result<StationData, ApiError> {
        let raw: RawStationData = self.decode(&format!("station-{}", crs.as_str()))?;
        Ok(convert_station_data(raw)?)
    }

    pub async fn stations(&self) -> Result<Vec<StationData>, ApiError> {
        let raw: Vec<RawStationData> = self.decode("stations")?;
        Ok(convert_stations(raw))
    }
}
