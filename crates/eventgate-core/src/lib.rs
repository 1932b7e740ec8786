//! Core types and shared utilities for the eventgate ingestion pipeline.
//!
//! This crate provides:
//! - The event envelope transported from ingestion to storage
//! - Timestamp formatting and the read-side `event_data` decoding rule
//! - Prometheus metrics helpers
//! - Shared error types

mod envelope;
mod error;
pub mod metrics;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

/// Default queue topic events are published to.
pub const DEFAULT_TOPIC: &str = "data-ingestion-topic";

/// Number of events the read path returns when the caller does not ask for
/// a specific limit.
pub const DEFAULT_EVENT_LIMIT: u32 = 100;

/// Hard ceiling on the number of events a single read may return,
/// regardless of what the caller requested.
pub const MAX_EVENT_LIMIT: u32 = 1000;

pub use envelope::{EventEnvelope, decode_event_data, format_timestamp};
pub use error::{Error, Result};
