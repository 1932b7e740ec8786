//! Application state shared across request handlers.

use std::sync::Arc;

use crate::clients::{AnalyticsStore, ClickHouseStore, EventPublisher, RedisStreamPublisher};
use crate::config::Config;

/// Shared application state available to all request handlers.
///
/// The two client handles are created once at startup and reused by every
/// request; both are safe for concurrent use. The gateway itself keeps no
/// state between requests.
#[derive(Clone)]
pub struct AppState {
    /// Queue publisher for the write path.
    pub publisher: Arc<dyn EventPublisher>,

    /// Analytical store client for the read path.
    pub store: Arc<dyn AnalyticsStore>,

    /// Application configuration.
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state with the concrete Redis and ClickHouse
    /// clients built from configuration.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let publisher =
            RedisStreamPublisher::new(&config.redis_url, &config.topic, config.request_timeout)
                .map_err(|e| anyhow::anyhow!("failed to create queue publisher: {e}"))?;

        let store = ClickHouseStore::new(
            &config.clickhouse_url,
            &config.clickhouse_database,
            &config.clickhouse_table,
            config.request_timeout,
        );

        Ok(Self {
            publisher: Arc::new(publisher),
            store: Arc::new(store),
            config: Arc::new(config),
        })
    }

    /// Assemble state from explicit client handles.
    ///
    /// This is the seam tests use to substitute in-memory fakes for the
    /// queue and the store.
    pub fn with_clients(
        config: Config,
        publisher: Arc<dyn EventPublisher>,
        store: Arc<dyn AnalyticsStore>,
    ) -> Self {
        Self {
            publisher,
            store,
            config: Arc::new(config),
        }
    }
}
