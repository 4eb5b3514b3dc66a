use crate::domain::{Crs, Leg, StationData, Stats};

use super::client::ApiClient;
use super::error::ApiError;
use super::mock::MockSource;

/// Where train data comes from: the live API or a fixture directory.
#[derive(Clone)]
pub enum DataSource {
    Live(ApiClient),
    Mock(MockSource),
}

impl DataSource {
    pub fn describe(&self) -> String {
        match self {
            DataSource::Live(client) => format!("train API at {}", client.base_url()),
            DataSource::Mock(_) => "fixtures".to_string(),
        }
    }

    pub async fn all_legs(&self) -> Result<Vec<Leg>, ApiError> {
        match self {
            DataSource::Live(client) => client.all_legs().await,
            DataSource::Mock(mock) => mock.all_legs().await,
        }
    }

    pub async fn legs_for_year(&self, year: i32) -> Result<Vec<Leg>, ApiError> {
        match self {
            DataSource::Live(client) => client.legs_for_year(year).await,
            DataSource::Mock(mock) => mock.legs_for_year(year).await,
        }
    }

    pub async fn stats_for_year(&self, year: i32) -> Result<Stats, ApiError> {
        match self {
            DataSource::Live(client) => client.stats_for_year(year).await,
            DataSource::Mock(mock) => mock.stats_for_year(year).await,
        }
    }

    pub async fn leg(&self, id: i64) -> Result<Leg, ApiError> {
        match self {
            DataSource::Live(client) => client.leg(id).await,
            DataSource::Mock(mock) => mock.leg(id).await,
        }
    }

    pub async fn station(&self, crs: &Crs) -> Result<StationData, ApiError> {
        match self {
            DataSource::Live(client) => client.station(crs).await,
            DataSource::Mock(mock) => mock.station(crs).await,
        }
    }

    pub async fn stations(&self) -> Result<Vec<StationData>, ApiError> {
        match self {
            DataSource::Live(client) => client.stations().await,
            DataSource::Mock(mock) => mock.stations().await,
        }
    }
}
