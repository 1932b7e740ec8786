//! Publish randomized sample events through the ingestion queue.
//!
//! Useful for smoke-testing a deployed pipeline end to end: each event gets
//! a fresh envelope, exactly as the gateway would assemble it.
//!
//! # Usage
//!
//! ```bash
//! # Ten events, one per second, to the default topic
//! publish-events
//!
//! # A burst against a specific queue
//! publish-events --redis-url redis://queue:6379 --topic clickstream \
//!     --count 100 --delay-ms 0
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use redis::cmd;
use tracing_subscriber::EnvFilter;

use eventgate_core::{DEFAULT_TOPIC, EventEnvelope};
use eventgate_datagen::sample_event_data;

/// Publish sample events to the ingestion queue.
#[derive(Parser, Debug)]
#[command(name = "publish-events")]
#[command(about = "Publish randomized sample events to the ingestion queue")]
#[command(version)]
struct Args {
    /// Redis connection URL
    #[arg(long, default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// Queue topic (stream key) to publish to
    #[arg(long, default_value = DEFAULT_TOPIC)]
    topic: String,

    /// Number of events to publish
    #[arg(long, short, default_value = "10")]
    count: usize,

    /// Delay between messages in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let client = redis::Client::open(args.redis_url.as_str()).context("invalid Redis URL")?;
    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .context("failed to connect to Redis")?;

    tracing::info!(topic = %args.topic, count = args.count, "publishing sample events");

    let mut rng = rand::thread_rng();
    for i in 0..args.count {
        let envelope = EventEnvelope::new(sample_event_data(&mut rng))?;
        let payload = envelope.to_bytes()?;

        let message_id: String = cmd("XADD")
            .arg(&args.topic)
            .arg("*")
            .arg("payload")
            .arg(payload.as_slice())
            .query_async(&mut conn)
            .await
            .context("XADD failed")?;

        tracing::info!(
            event_id = %envelope.event_id,
            message_id = %message_id,
            "published {}/{}",
            i + 1,
            args.count
        );

        if i + 1 < args.count {
            tokio::time::sleep(std::time::Duration::from_millis(args.delay_ms)).await;
        }
    }

    tracing::info!(count = args.count, topic = %args.topic, "done");

    Ok(())
}
