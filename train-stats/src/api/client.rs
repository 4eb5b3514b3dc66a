//! Train API HTTP client.
//!
//! Fetches raw JSON from the train API, decodes the whole body into DTOs and
//! only then hands it to conversion.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Crs, Leg, StationData, Stats};

use super::convert::{convert_leg, convert_legs, convert_station_data, convert_stations, convert_stats};
use super::error::ApiError;
use super::types::{RawLeg, RawStationData, RawStats};

const DEFAULT_MAX_CONCURRENT: usize = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the `/api/train/...` paths are appended to
    pub base_url: String,
    /// In-flight request limit, at least 1
    pub max_concurrent: usize,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Whole seconds before a request is abandoned.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Train API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a path and decode the body as `R`.
    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<R, ApiError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ApiError::Status {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::json(e, &body))
    }

    /// Every recorded leg.
    pub async fn all_legs(&self) -> Result<Vec<Leg>, ApiError> {
        let raw: Vec<RawLeg> = self.get_json(&legs_path(), &[]).await?;
        Ok(convert_legs(raw))
    }

    /// Legs of one calendar year, with geometries.
    pub async fn legs_for_year(&self, year: i32) -> Result<Vec<Leg>, ApiError> {
        let raw: Vec<RawLeg> = self
            .get_json(&legs_year_path(year), &[("fetch_geometries", "true")])
            .await?;
        Ok(convert_legs(raw))
    }

    /// Statistics for one calendar year.
    pub async fn stats_for_year(&self, year: i32) -> Result<Stats, ApiError> {
        let raw: RawStats = self
            .get_json(&stats_year_path(year), &[("fetch_geometries", "false")])
            .await?;
        Ok(convert_stats(raw)?)
    }

    /// One leg, with its geometry.
    pub async fn leg(&self, id: i64) -> Result<Leg, ApiError> {
        let raw: RawLeg = self
            .get_json(&leg_path(id), &[("fetch_geometries", "true")])
            .await?;
        Ok(convert_leg(raw)?)
    }

    pub async fn station(&self, crs: &Crs) -> Result<StationData, ApiError> {
        let raw: RawStationData = self.get_json(&station_path(crs), &[]).await?;
        Ok(convert_station_data(raw)?)
    }

    pub async fn stations(&self) -> Result<Vec<StationData>, ApiError> {
        let raw: Vec<RawStationData> = self.get_json("/api/train/stations", &[]).await?;
        Ok(convert_stations(raw))
    }
}

fn legs_path() -> String {
    "/api/train/legs/".to_string()
}

fn legs_year_path(year: i32) -> String {
    format!("/api/train/legs/years/{:04}", year)
}

fn stats_year_path(year: i32) -> String {
    format!("/api/train/stats/years/{:04}", year)
}

fn leg_path(id: i64) -> String {
    format!("/api/train/legs/{}", id)
}

fn station_path(crs: &Crs) -> String {
    format!("/api/train/stations/{}", crs.as_str())
}
