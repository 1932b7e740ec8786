//! ClickHouse implementation of [`AnalyticsStore`].
//!
//! The events table is written by the external pipeline; this client only
//! reads from it. `LIMIT` values are clamped integers interpolated after
//! validation; everything else goes through parameter binding.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use clickhouse::{Client, Row};
use serde::Deserialize;

use eventgate_core::MAX_EVENT_LIMIT;

use super::{AnalyticsStore, ClientError, StoredEvent};

/// Row shape for the events table read path.
///
/// `timestamp` travels as Unix seconds; ClickHouse `DateTime` columns are
/// u32 on the wire.
#[derive(Debug, Clone, Row, Deserialize)]
struct EventRow {
    event_id: String,
    event_data: String,
    timestamp: u32,
}

/// Query client for the analytical events table.
#[derive(Clone)]
pub struct ClickHouseStore {
    client: Client,
    table: String,
    timeout: Duration,
}

impl ClickHouseStore {
    /// Create a store client for `table` in `database` at `url`.
    pub fn new(url: &str, database: &str, table: &str, timeout: Duration) -> Self {
        let client = Client::default().with_url(url).with_database(database);

        Self {
            client,
            table: table.to_string(),
            timeout,
        }
    }

    /// Run a query future under the configured time bound.
    async fn bounded<T>(
        &self,
        query: impl Future<Output = Result<T, clickhouse::error::Error>>,
    ) -> Result<T, ClientError> {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
            .map_err(map_store_error)
    }
}

fn map_store_error(err: clickhouse::error::Error) -> ClientError {
    let msg = err.to_string();
    match err {
        clickhouse::error::Error::RowNotFound => ClientError::NotFound(msg),
        _ if msg.contains("UNKNOWN_TABLE") || msg.contains("UNKNOWN_DATABASE") => {
            ClientError::NotFound(msg)
        }
        _ if msg.contains("ACCESS_DENIED") || msg.contains("AUTHENTICATION_FAILED") => {
            ClientError::PermissionDenied(msg)
        }
        _ => ClientError::Transport(msg),
    }
}

#[async_trait]
impl AnalyticsStore for ClickHouseStore {
    async fn recent_events(&self, limit: u32) -> Result<Vec<StoredEvent>, ClientError> {
        let limit = limit.min(MAX_EVENT_LIMIT);

        let rows: Vec<EventRow> = self
            .bounded(
                self.client
                    .query(&format!(
                        "SELECT
                            event_id,
                            event_data,
                            toUInt32(timestamp) AS timestamp
                        FROM {}
                        ORDER BY timestamp DESC
                        LIMIT {}",
                        self.table, limit
                    ))
                    .fetch_all(),
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                let timestamp = DateTime::from_timestamp(i64::from(row.timestamp), 0)
                    .ok_or_else(|| {
                        ClientError::Decode(format!("invalid timestamp {}", row.timestamp))
                    })?;

                Ok(StoredEvent {
                    event_id: row.event_id,
                    event_data: row.event_data,
                    timestamp,
                })
            })
            .collect()
    }

    async fn count_events(&self) -> Result<u64, ClientError> {
        let count: u64 = self
            .bounded(
                self.client
                    .query(&format!("SELECT count() FROM {}", self.table))
                    .fetch_one(),
            )
            .await?;

        Ok(count)
    }

    async fn probe(&self) -> Result<(), ClientError> {
        let _one: u8 = self.bounded(self.client.query("SELECT 1").fetch_one()).await?;
        Ok(())
    }
}
