//! # shopdesk-observability
//!
//! Subscriber setup with `SHOPDESK_LOG` filtering, the fixed event and span
//! names used across the pipeline, and a bounded log of recent queries.

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry, QueryOutcome};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
