use std::time::Duration;

use shopdesk_core::config::ObservabilityConfig;
use shopdesk_observability::tracing_setup::{events, spans};
use shopdesk_observability::{init_tracing, QueryLog, QueryLogEntry, QueryOutcome};

#[test]
fn init_is_idempotent_and_events_emit_under_the_query_span() {
    let config = ObservabilityConfig {
        log_level: "debug".into(),
        json: true,
        ..ObservabilityConfig::default()
    };
    init_tracing(&config);
    init_tracing(&config);

    let span = shopdesk_observability::query_span!("s-1", "C042");
    let _guard = span.enter();
    events::query_answered("s-1", "order", "by_identifier", false, 12);
    events::query_failed("s-1", &"backend unavailable", 3);
    events::catalog_loaded("orders", 5, 0);
    events::catalog_indexed("catalog", 9);
}

#[test]
fn span_and_event_names_follow_the_dotted_and_snake_conventions() {
    for name in [spans::names::QUERY, spans::names::CLASSIFY, spans::names::RETRIEVE, spans::names::ASSEMBLE] {
        assert!(name.starts_with("shopdesk."));
    }
    for name in [
        events::names::QUERY_CLASSIFIED,
        events::names::STRATEGY_SELECTED,
        events::names::RECORD_SKIPPED,
        events::names::SEMANTIC_HIT_DROPPED,
        events::names::ANSWER_RENDERED,
        events::names::PROVIDER_FALLBACK,
    ] {
        assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
    }
}

#[test]
fn entries_serialize_with_snake_case_outcomes() {
    let mut log = QueryLog::with_capacity(4);
    log.record(QueryLogEntry::new(
        "s-1",
        "where is order 30257",
        Some("order".into()),
        Some("by_identifier".into()),
        Duration::from_millis(8),
        QueryOutcome::NotFound,
    ));
    let json = serde_json::to_value(log.latest().unwrap()).unwrap();
    assert_eq!(json["outcome"], "not_found");
    assert_eq!(json["strategy"], "order");
}
