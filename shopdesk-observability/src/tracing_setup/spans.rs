//! Span names for the query pipeline.
//!
//! `shopdesk.classify` and `shopdesk.retrieve` are opened inside the
//! retrieval crate, `shopdesk.assemble` inside the response crate.

/// Create the top-level span for one inbound question.
#[macro_export]
macro_rules! query_span {
    ($session_id:expr, $channel:expr) => {
        tracing::info_span!("shopdesk.query", session_id = %$session_id, channel = %$channel)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const QUERY: &str = "shopdesk.query";
    pub const CLASSIFY: &str = "shopdesk.classify";
    pub const RETRIEVE: &str = "shopdesk.retrieve";
    pub const ASSEMBLE: &str = "shopdesk.assemble";
}
