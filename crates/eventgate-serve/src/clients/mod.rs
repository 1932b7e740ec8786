//! Client abstractions for the gateway's two external collaborators.
//!
//! The gateway composes a queue publisher (write path) and an analytical
//! store (read path). Both are consumed through capability traits so that
//! request handlers never name a concrete backend and tests can substitute
//! in-memory fakes.

mod clickhouse;
mod redis;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use self::clickhouse::ClickHouseStore;
pub use self::redis::RedisStreamPublisher;

/// Failure kinds surfaced by the queue and store clients.
///
/// The gateway performs no retries; every kind maps to an HTTP 500 carrying
/// the underlying message. The enum keeps the failure modes enumerable in
/// tests instead of collapsing them into one opaque string.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The dependency did not answer within the configured bound.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The dependency rejected our credentials.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The topic or table we were asked to use does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The dependency answered with data we could not decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// Transport-level failure (connection refused, reset, protocol error).
    #[error("{0}")]
    Transport(String),
}

/// Write-side collaborator: a durable publish/subscribe queue.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Durably enqueue one message and return the queue's delivery id.
    ///
    /// Resolves only after the queue has acknowledged the message.
    async fn publish(&self, payload: &[u8]) -> Result<String, ClientError>;
}

/// Read-side collaborator: the analytical store the pipeline lands events in.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// The most recent `limit` events, newest first.
    async fn recent_events(&self, limit: u32) -> Result<Vec<StoredEvent>, ClientError>;

    /// Total number of events in the store.
    async fn count_events(&self) -> Result<u64, ClientError>;

    /// One trivial round trip to confirm the store is reachable.
    async fn probe(&self) -> Result<(), ClientError>;
}

/// An event row as the analytical store returns it.
///
/// `event_data` is still the raw stored string; decoding back to structured
/// JSON happens at the response edge.
#[derive(Debug, Clone)]
pub struct StoredEvent {
    pub event_id: String,
    pub event_data: String,
    pub timestamp: DateTime<Utc>,
}
