//! Structured log events emitted by the runtime and the CLI.
//!
//! Lower crates emit their own events inline with the same `event` field;
//! every name in use is listed in [`names`].

use std::fmt::Display;

/// Log a successfully answered question.
pub fn query_answered(session_id: &str, strategy: &str, rule: &str, found: bool, latency_ms: u64) {
    tracing::info!(
        event = names::QUERY_ANSWERED,
        session_id = %session_id,
        strategy = %strategy,
        rule = %rule,
        found = found,
        latency_ms = latency_ms,
        "query answered"
    );
}

/// Log a question that ended in an error reply.
pub fn query_failed(session_id: &str, error: &dyn Display, latency_ms: u64) {
    tracing::error!(
        event = names::QUERY_FAILED,
        session_id = %session_id,
        error = %error,
        latency_ms = latency_ms,
        "query failed"
    );
}

/// Log a completed feed load.
pub fn catalog_loaded(kind: &str, loaded: usize, skipped: usize) {
    tracing::info!(
        event = names::CATALOG_LOADED,
        kind = %kind,
        loaded = loaded,
        skipped = skipped,
        "catalog feed loaded"
    );
}

/// Log a completed catalog reindex.
pub fn catalog_indexed(collection: &str, entries: usize) {
    tracing::info!(
        event = names::CATALOG_INDEXED,
        collection = %collection,
        entries = entries,
        "catalog reindexed"
    );
}

pub mod names {
    pub const QUERY_CLASSIFIED: &str = "query_classified";
    pub const STRATEGY_SELECTED: &str = "strategy_selected";
    pub const RECORD_SKIPPED: &str = "record_skipped";
    pub const SEMANTIC_HIT_DROPPED: &str = "semantic_hit_dropped";
    pub const ANSWER_RENDERED: &str = "answer_rendered";
    pub const PROVIDER_FALLBACK: &str = "provider_fallback";
    pub const QUERY_ANSWERED: &str = "query_answered";
    pub const QUERY_FAILED: &str = "query_failed";
    pub const CATALOG_LOADED: &str = "catalog_loaded";
    pub const CATALOG_INDEXED: &str = "catalog_indexed";
}
