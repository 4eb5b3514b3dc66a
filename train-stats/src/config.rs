//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_FIRST_YEAR: i32 = 2000;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} must be a socket address, got {value:?}")]
    BadAddress { var: &'static str, value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the train API
    pub api_url: String,
    /// Address the web server binds to
    pub listen: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Serve fixtures from this directory instead of the live API
    pub mock_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    /// Entries kept per cached entity kind
    pub cache_capacity: u64,
    pub request_timeout: Duration,
    /// Requests in flight to the train API at once
    pub max_concurrent: usize,
    /// Earliest year linked from the index page
    pub first_year: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            mock_dir: None,
            cache_ttl: Duration::from_secs(60),
            cache_capacity: 1000,
            request_timeout: Duration::from_secs(30),
            max_concurrent: 5,
            first_year: DEFAULT_FIRST_YEAR,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("TRAIN_STATS_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(listen) = lookup("TRAIN_STATS_LISTEN") {
            let addr = listen.parse().map_err(|_| ConfigError::BadAddress {
                var: "TRAIN_STATS_LISTEN",
                value: listen.clone(),
            })?;
            config = config.with_listen(addr);
        }
        if let Some(dir) = lookup("TRAIN_STATS_STATIC_DIR") {
            config = config.with_static_dir(dir);
        }
        if let Some(dir) = lookup("TRAIN_STATS_MOCK_DIR").filter(|d| !d.is_empty()) {
            config = config.with_mock_dir(dir);
        }
        if let Some(secs) = number(&lookup, "TRAIN_STATS_CACHE_TTL_SECS")? {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }
        if let Some(capacity) = number(&lookup, "TRAIN_STATS_CACHE_CAPACITY")? {
            config = config.with_cache_capacity(capacity);
        }
        if let Some(secs) = number(&lookup, "TRAIN_STATS_TIMEOUT_SECS")? {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(n) = number(&lookup, "TRAIN_STATS_MAX_CONCURRENT")? {
            config = config.with_max_concurrent(n);
        }
        if let Some(year) = number(&lookup, "TRAIN_STATS_FIRST_YEAR")? {
            config = config.with_first_year(year);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_listen(mut self, addr: SocketAddr) -> Self {
        self.listen = addr;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_first_year(mut self, year: i32) -> Self {
        self.first_year = year;
        self
    }
}

fn number<N: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<N>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.listen.to_string(), DEFAULT_LISTEN);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.mock_dir, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_capacity, 1000);
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.first_year, 2000);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TRAIN_STATS_API_URL", "https://trains.example"),
            ("TRAIN_STATS_LISTEN", "0.0.0.0:8080"),
            ("TRAIN_STATS_MOCK_DIR", "fixtures"),
            ("TRAIN_STATS_CACHE_TTL_SECS", " 0 "),
            ("TRAIN_STATS_FIRST_YEAR", "2016"),
            ("TRAIN_STATS_CACHE_CAPACITY", "50"),
            ("TRAIN_STATS_MAX_CONCURRENT", "2"),
        ]))
        .unwrap();
        assert_eq!(config.cache_capacity, 50);
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.api_url, "https://trains.example");
        assert_eq!(config.listen.port(), 8080);
        assert_eq!(config.mock_dir, Some(PathBuf::from("fixtures")));
        assert_eq!(config.cache_ttl, Duration::ZERO);
        assert_eq!(config.first_year, 2016);
    }

    #[test]
    fn empty_mock_dir_means_live() {
        let config = AppConfig::from_lookup(lookup(&[("TRAIN_STATS_MOCK_DIR", "")])).unwrap();
        assert_eq!(config.mock_dir, None);
    }

    #[test]
    fn rejects_bad_values() {
        let err = AppConfig::from_lookup(lookup(&[("TRAIN_STATS_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotANumber {
                var: "TRAIN_STATS_TIMEOUT_SECS",
                value: "soon".into()
            }
        );
        assert_eq!(err.to_string(), "TRAIN_STATS_TIMEOUT_SECS must be a number, got \"soon\"");

        let err = AppConfig::from_lookup(lookup(&[("TRAIN_STATS_LISTEN", "localhost")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::BadAddress { .. }));
    }
}
