//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedSource;
use crate::config::AppConfig;
use crate::ranking::TableConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached train data source
    pub source: Arc<CachedSource>,

    /// Process configuration
    pub config: Arc<AppConfig>,

    /// How many rows a collapsed table shows
    pub tables: TableConfig,
}

impl AppState {
    pub fn new(source: CachedSource, config: AppConfig, tables: TableConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
            tables,
        }
    }
}
