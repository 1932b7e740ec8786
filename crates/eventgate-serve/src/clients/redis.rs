//! Redis Streams implementation of [`EventPublisher`].
//!
//! Messages are appended to a stream with `XADD`; the auto-generated stream
//! entry id doubles as the delivery id returned to callers.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Pool, Runtime};
use redis::cmd;

use super::{ClientError, EventPublisher};

/// Publishes envelopes onto a Redis stream.
///
/// Holds a connection pool created once at startup; the pool is safe for
/// concurrent use, so a single publisher is shared across all requests.
pub struct RedisStreamPublisher {
    pool: Pool,
    topic: String,
    timeout: Duration,
}

impl RedisStreamPublisher {
    /// Create a publisher appending to `topic` on the Redis at `redis_url`.
    ///
    /// Connections are established lazily on first publish.
    pub fn new(redis_url: &str, topic: &str, timeout: Duration) -> Result<Self, ClientError> {
        let pool = deadpool_redis::Config::from_url(redis_url)
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            pool,
            topic: topic.to_string(),
            timeout,
        })
    }

    fn map_queue_error(err: redis::RedisError) -> ClientError {
        match err.kind() {
            redis::ErrorKind::AuthenticationFailed => {
                ClientError::PermissionDenied(err.to_string())
            }
            redis::ErrorKind::TypeError => ClientError::Decode(err.to_string()),
            _ => ClientError::Transport(err.to_string()),
        }
    }
}

#[async_trait]
impl EventPublisher for RedisStreamPublisher {
    async fn publish(&self, payload: &[u8]) -> Result<String, ClientError> {
        let append = async {
            let mut conn = self
                .pool
                .get()
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;

            cmd("XADD")
                .arg(&self.topic)
                .arg("*")
                .arg("payload")
                .arg(payload)
                .query_async::<String>(&mut conn)
                .await
                .map_err(Self::map_queue_error)
        };

        tokio::time::timeout(self.timeout, append)
            .await
            .map_err(|_| ClientError::Timeout(self.timeout))?
    }
}
