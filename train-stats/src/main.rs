use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use train_stats::api::{ApiClient, ApiConfig, DataSource, MockSource};
use train_stats::cache::{CacheConfig, CachedSource};
use train_stats::config::AppConfig;
use train_stats::ranking::TableConfig;
use train_stats::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("train_stats=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let source = match &config.mock_dir {
        Some(dir) => DataSource::Mock(MockSource::load(dir).await?),
        None => {
            let api_config = ApiConfig::new(&config.api_url)
                .with_max_concurrent(config.max_concurrent)
                .with_timeout(config.request_timeout.as_secs());
            DataSource::Live(ApiClient::new(api_config)?)
        }
    };
    info!(source = %source.describe(), "data source ready");

    let cache_config = CacheConfig::default()
        .with_ttl(config.cache_ttl)
        .with_max_capacity(config.cache_capacity);
    let cached = CachedSource::new(source, &cache_config);

    let addr = config.listen;
    let state = AppState::new(cached, config, TableConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Train stats listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
