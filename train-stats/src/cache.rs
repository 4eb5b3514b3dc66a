//! Caching layer for train API responses.
//!
//! Recorded travel changes rarely, but a year page needs two fetches and
//! every table header click reloads it. One moka cache per entity kind keeps
//! those reloads off the API. Failed fetches are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::api::{ApiError, DataSource};
use crate::domain::{Crs, Leg, StationData, Stats};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per entity kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

fn build<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

/// Data source with caching.
///
/// Wraps a [`DataSource`] and caches converted responses as `Arc`s so
/// handlers can share them without cloning.
pub struct CachedSource {
    source: DataSource,
    stats: MokaCache<i32, Arc<Stats>>,
    year_legs: MokaCache<i32, Arc<Vec<Leg>>>,
    legs: MokaCache<i64, Arc<Leg>>,
    stations: MokaCache<Crs, Arc<StationData>>,
    // The unkeyed listings each hold at most one entry
    all_legs: MokaCache<(), Arc<Vec<Leg>>>,
    all_stations: MokaCache<(), Arc<Vec<StationData>>>,
}

impl CachedSource {
    pub fn new(source: DataSource, config: &CacheConfig) -> Self {
        Self {
            source,
            stats: build(config),
            year_legs: build(config),
            legs: build(config),
            stations: build(config),
            all_legs: build(config),
            all_stations: build(config),
        }
    }

    pub async fn stats_for_year(&self, year: i32) -> Result<Arc<Stats>, ApiError> {
        if let Some(cached) = self.stats.get(&year).await {
            return Ok(cached);
        }
        debug!(year, "stats cache miss");
        let entry = Arc::new(self.source.stats_for_year(year).await?);
        self.stats.insert(year, entry.clone()).await;
        Ok(entry)
    }

    pub async fn legs_for_year(&self, year: i32) -> Result<Arc<Vec<Leg>>, ApiError> {
        if let Some(cached) = self.year_legs.get(&year).await {
            return Ok(cached);
        }
        debug!(year, "legs cache miss");
        let entry = Arc::new(self.source.legs_for_year(year).await?);
        self.year_legs.insert(year, entry.clone()).await;
        Ok(entry)
    }

    pub async fn leg(&self, id: i64) -> Result<Arc<Leg>, ApiError> {
        if let Some(cached) = self.legs.get(&id).await {
            return Ok(cached);
        }
        debug!(id, "leg cache miss");
        let entry = Arc::new(self.source.leg(id).await?);
        self.legs.insert(id, entry.clone()).await;
        Ok(entry)
    }

    pub async fn station(&self, crs: &Crs) -> Result<Arc<StationData>, ApiError> {
        if let Some(cached) = self.stations.get(crs).await {
            return Ok(cached);
        }
        debug!(crs = crs.as_str(), "station cache miss");
        let entry = Arc::new(self.source.station(crs).await?);
        self.stations.insert(*crs, entry.clone()).await;
        Ok(entry)
    }

    /// Every recorded leg, across all years.
    pub async fn all_legs(&self) -> Result<Arc<Vec<Leg>>, ApiError> {
        if let Some(cached) = self.all_legs.get(&()).await {
            return Ok(cached);
        }
        debug!("all legs cache miss");
        let entry = Arc::new(self.source.all_legs().await?);
        self.all_legs.insert((), entry.clone()).await;
        Ok(entry)
    }

    /// Every station with recorded calls.
    pub async fn stations(&self) -> Result<Arc<Vec<StationData>>, ApiError> {
        if let Some(cached) = self.all_stations.get(&()).await {
            return Ok(cached);
        }
        debug!("stations cache miss");
        let entry = Arc::new(self.source.stations().await?);
        self.all_stations.insert((), entry.clone()).await;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockSource;
    use std::fs;

    const STATS: &str = r#"{"journeys": 4, "leg_stats": [], "station_stats": []}"#;

    async fn cached(dir: &tempfile::TempDir) -> CachedSource {
        let mock = MockSource::load(dir.path()).await.unwrap();
        CachedSource::new(DataSource::Mock(mock), &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);

        let config = config
            .with_ttl(Duration::from_secs(5))
            .with_max_capacity(10);
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert_eq!(config.max_capacity, 10);
    }

    #[tokio::test]
    async fn hit_returns_shared_entry() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stats-2022.json"), STATS).unwrap();
        let source = cached(&dir).await;

        let first = source.stats_for_year(2022).await.unwrap();
        let second = source.stats_for_year(2022).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.journeys, 4);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("stats-2022.json"), STATS).unwrap();
        let source = cached(&dir).await;

        assert!(source.stats_for_year(2021).await.unwrap_err().is_not_found());
        assert!(source.stations().await.unwrap_err().is_not_found());
        source.stats.run_pending_tasks().await;
        source.all_stations.run_pending_tasks().await;
        assert_eq!(source.stats.entry_count(), 0);
        assert_eq!(source.all_stations.entry_count(), 0);
    }

    #[tokio::test]
    async fn listings_are_cached() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("legs.json"), "[]").unwrap();
        fs::write(dir.path().join("stations.json"), "[]").unwrap();
        let source = cached(&dir).await;

        let legs = source.all_legs().await.unwrap();
        assert!(legs.is_empty());
        assert!(Arc::ptr_eq(&legs, &source.all_legs().await.unwrap()));

        let stations = source.stations().await.unwrap();
        assert!(Arc::ptr_eq(&stations, &source.stations().await.unwrap()));
    }
}
