//! Insert envelope rows directly into the analytical store.
//!
//! Bypasses the queue so the read path can be exercised without the
//! external pipeline in between. `event_data` is stored as a JSON string,
//! matching what the pipeline lands.
//!
//! # Usage
//!
//! ```bash
//! seed-store --clickhouse-url http://localhost:8123 --database analytics \
//!     --table events --count 5
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use clickhouse::{Client, Row};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use eventgate_core::EventEnvelope;
use eventgate_datagen::sample_event_data;

/// Row shape for direct inserts into the events table.
#[derive(Debug, Row, Serialize)]
struct SeedRow {
    event_id: String,
    event_data: String,
    timestamp: u32,
}

/// Seed the analytical events table with sample rows.
#[derive(Parser, Debug)]
#[command(name = "seed-store")]
#[command(about = "Insert sample event rows directly into the analytical store")]
#[command(version)]
struct Args {
    /// ClickHouse URL
    #[arg(long, default_value = "http://localhost:8123")]
    clickhouse_url: String,

    /// ClickHouse database name
    #[arg(long, default_value = "analytics")]
    database: String,

    /// Events table name
    #[arg(long, default_value = "events")]
    table: String,

    /// Number of rows to insert
    #[arg(long, short, default_value = "5")]
    count: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let client = Client::default()
        .with_url(&args.clickhouse_url)
        .with_database(&args.database);

    // Generate rows up front, then batch insert
    let mut rows = Vec::with_capacity(args.count);
    {
        let mut rng = rand::thread_rng();
        for _ in 0..args.count {
            let envelope = EventEnvelope::new(sample_event_data(&mut rng))?;
            rows.push(SeedRow {
                event_id: envelope.event_id,
                event_data: envelope.event_data.to_string(),
                timestamp: chrono::Utc::now().timestamp() as u32,
            });
        }
    }

    let mut inserter = client.insert(&args.table).context("failed to start insert")?;
    for row in &rows {
        inserter.write(row).await.context("insert write failed")?;
        tracing::info!(event_id = %row.event_id, "row queued");
    }
    inserter.end().await.context("insert commit failed")?;

    tracing::info!(count = rows.len(), table = %args.table, "seeded analytical store");

    Ok(())
}
