//! Prometheus metrics helpers for the eventgate system.
//!
//! This module provides centralized metrics initialization and the metric
//! definitions used by the gateway.
//!
//! # Usage
//!
//! ```rust,ignore
//! use eventgate_core::metrics::{init_metrics, start_metrics_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let handle = init_metrics();
//!     start_metrics_server(9090, handle).await.unwrap();
//!
//!     use metrics::counter;
//!     counter!("gateway_publish_total").increment(1);
//! }
//! ```
//!
//! # Metric Naming Conventions
//!
//! - Prefix: component name (`gateway_`)
//! - Suffix: unit or type (`_total`, `_bytes`)

use axum::{Router, routing::get};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded.
/// Returns a handle for [`start_metrics_server`].
///
/// # Panics
///
/// Panics if called more than once (the recorder can only be installed once).
pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder");

    register_gateway_metrics();

    handle
}

/// Try to initialize the Prometheus metrics recorder.
///
/// Like [`init_metrics`] but returns `None` if the recorder is already
/// installed, instead of panicking. Useful for tests.
pub fn try_init_metrics() -> Option<PrometheusHandle> {
    PrometheusBuilder::new().install_recorder().ok()
}

/// Start the Prometheus metrics HTTP server.
///
/// Serves the `/metrics` endpoint on the specified port. Spawns a
/// background task and returns immediately.
pub async fn start_metrics_server(
    port: u16,
    handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Metrics server exited: {}", e);
        }
    });

    Ok(())
}

/// Register descriptions for the gateway's metrics.
///
/// Called automatically by [`init_metrics`].
fn register_gateway_metrics() {
    describe_counter!(
        "gateway_publish_total",
        "Events accepted on the publish path and acknowledged by the queue"
    );
    describe_counter!(
        "gateway_publish_errors_total",
        "Publish attempts that failed at the queue"
    );
    describe_counter!(
        "gateway_publish_bytes_total",
        "Envelope bytes handed to the queue"
    );
    describe_counter!(
        "gateway_rejected_payloads_total",
        "Publish requests rejected for a missing or undecodable body"
    );
    describe_counter!(
        "gateway_events_served_total",
        "Events returned by the read path"
    );
    describe_counter!(
        "gateway_query_errors_total",
        "Analytical store queries that failed"
    );
}
