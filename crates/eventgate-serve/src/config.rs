//! Application configuration loaded from environment.

use std::time::Duration;

use eventgate_core::DEFAULT_TOPIC;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:8080").
    pub bind_addr: String,

    /// Project/namespace identifier reported by the health endpoint.
    pub project_id: String,

    /// Queue topic events are published to.
    pub topic: String,

    /// Redis connection URL for the queue.
    pub redis_url: String,

    /// ClickHouse connection URL.
    pub clickhouse_url: String,

    /// ClickHouse database name.
    pub clickhouse_database: String,

    /// ClickHouse table events are read from.
    pub clickhouse_table: String,

    /// Upper bound applied to every queue and store round trip.
    pub request_timeout: Duration,

    /// Prometheus metrics port (0 disables the metrics server).
    pub metrics_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional and default to local development values:
    /// - `EVENTGATE_BIND_ADDR`: server bind address (default: "0.0.0.0:8080")
    /// - `EVENTGATE_PROJECT_ID`: project identifier (default: "local-dev")
    /// - `EVENTGATE_TOPIC`: queue topic (default: "data-ingestion-topic")
    /// - `REDIS_URL`: queue URL (default: "redis://127.0.0.1:6379")
    /// - `CLICKHOUSE_URL`: store URL (default: "http://localhost:8123")
    /// - `CLICKHOUSE_DATABASE`: database name (default: "analytics")
    /// - `CLICKHOUSE_TABLE`: events table (default: "events")
    /// - `EVENTGATE_REQUEST_TIMEOUT_SECS`: dependency call bound (default: 10)
    /// - `EVENTGATE_METRICS_PORT`: metrics port, 0 disables (default: 0)
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr =
            std::env::var("EVENTGATE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let project_id =
            std::env::var("EVENTGATE_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());

        let topic = std::env::var("EVENTGATE_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.to_string());

        let redis_url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let clickhouse_url =
            std::env::var("CLICKHOUSE_URL").unwrap_or_else(|_| "http://localhost:8123".to_string());

        let clickhouse_database =
            std::env::var("CLICKHOUSE_DATABASE").unwrap_or_else(|_| "analytics".to_string());

        let clickhouse_table =
            std::env::var("CLICKHOUSE_TABLE").unwrap_or_else(|_| "events".to_string());

        let timeout_secs: u64 = std::env::var("EVENTGATE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("EVENTGATE_REQUEST_TIMEOUT_SECS must be an integer"))?;

        let metrics_port: u16 = std::env::var("EVENTGATE_METRICS_PORT")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("EVENTGATE_METRICS_PORT must be a port number"))?;

        tracing::info!(
            bind_addr = %bind_addr,
            project_id = %project_id,
            topic = %topic,
            redis_url = %redis_url,
            clickhouse_url = %clickhouse_url,
            clickhouse_database = %clickhouse_database,
            timeout_secs,
            metrics_port,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            project_id,
            topic,
            redis_url,
            clickhouse_url,
            clickhouse_database,
            clickhouse_table,
            request_timeout: Duration::from_secs(timeout_secs),
            metrics_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize config tests that manipulate env vars.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_KEYS: &[&str] = &[
        "EVENTGATE_BIND_ADDR",
        "EVENTGATE_PROJECT_ID",
        "EVENTGATE_TOPIC",
        "REDIS_URL",
        "CLICKHOUSE_URL",
        "CLICKHOUSE_DATABASE",
        "CLICKHOUSE_TABLE",
        "EVENTGATE_REQUEST_TIMEOUT_SECS",
        "EVENTGATE_METRICS_PORT",
    ];

    /// Helper to run config tests with isolated env vars.
    /// Uses a mutex to prevent concurrent env var races.
    fn with_env_vars<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_MUTEX.lock().unwrap();

        let saved: Vec<_> = ENV_KEYS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: Serialized by mutex; only test code touches these vars.
        unsafe {
            for k in ENV_KEYS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        // SAFETY: Restoring original env state.
        unsafe {
            for (k, v) in &saved {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn config_defaults() {
        with_env_vars(&[], || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.bind_addr, "0.0.0.0:8080");
            assert_eq!(config.project_id, "local-dev");
            assert_eq!(config.topic, "data-ingestion-topic");
            assert_eq!(config.redis_url, "redis://127.0.0.1:6379");
            assert_eq!(config.clickhouse_url, "http://localhost:8123");
            assert_eq!(config.clickhouse_database, "analytics");
            assert_eq!(config.clickhouse_table, "events");
            assert_eq!(config.request_timeout, Duration::from_secs(10));
            assert_eq!(config.metrics_port, 0);
        });
    }

    #[test]
    fn config_custom_values() {
        with_env_vars(
            &[
                ("EVENTGATE_BIND_ADDR", "127.0.0.1:9999"),
                ("EVENTGATE_PROJECT_ID", "analytics-prod"),
                ("EVENTGATE_TOPIC", "clickstream"),
                ("REDIS_URL", "redis://queue:6379"),
                ("CLICKHOUSE_URL", "http://ch:8123"),
                ("CLICKHOUSE_DATABASE", "warehouse"),
                ("CLICKHOUSE_TABLE", "raw_events"),
                ("EVENTGATE_REQUEST_TIMEOUT_SECS", "3"),
                ("EVENTGATE_METRICS_PORT", "9191"),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.bind_addr, "127.0.0.1:9999");
                assert_eq!(config.project_id, "analytics-prod");
                assert_eq!(config.topic, "clickstream");
                assert_eq!(config.redis_url, "redis://queue:6379");
                assert_eq!(config.clickhouse_url, "http://ch:8123");
                assert_eq!(config.clickhouse_database, "warehouse");
                assert_eq!(config.clickhouse_table, "raw_events");
                assert_eq!(config.request_timeout, Duration::from_secs(3));
                assert_eq!(config.metrics_port, 9191);
            },
        );
    }

    #[test]
    fn config_rejects_non_numeric_timeout() {
        with_env_vars(&[("EVENTGATE_REQUEST_TIMEOUT_SECS", "soon")], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn config_rejects_non_numeric_metrics_port() {
        with_env_vars(&[("EVENTGATE_METRICS_PORT", "http")], || {
            assert!(Config::from_env().is_err());
        });
    }
}
