//! eventgate-serve - HTTP ingestion and query gateway.
//!
//! This crate provides the REST facade in front of the event pipeline: it
//! accepts arbitrary JSON event payloads, wraps them in envelopes, and
//! forwards them to the durable queue; and it answers read queries against
//! the analytical store where the pipeline lands events.
//!
//! The gateway is stateless: every request is an independent round trip
//! through one of two long-lived client handles, so arbitrarily many
//! instances can run side by side.
//!
//! # Architecture
//!
//! - **AppState**: shared application state (client handles, configuration)
//! - **Clients**: capability traits for the queue publisher and the
//!   analytical store, with Redis Streams and ClickHouse implementations
//! - **Routes**: endpoint handlers for the publish and query surface

pub mod clients;
mod config;
mod error;
mod routes;
mod state;

pub use self::clients::{AnalyticsStore, ClientError, EventPublisher, StoredEvent};
pub use self::config::Config;
pub use self::error::ApiError;
pub use self::routes::router;
pub use self::state::AppState;
