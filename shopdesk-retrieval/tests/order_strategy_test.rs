//! Order strategy against the seeded catalog, with every store read recorded.

use chrono::NaiveDate;

use shopdesk_core::constants::{NOT_AVAILABLE, NO_INFO_AVAILABLE, NO_ORDERS_FOUND};
use shopdesk_core::models::{RetrievalResult, StructuredCount};
use shopdesk_retrieval::strategies::resolve_order_on;
use shopdesk_storage::StorageEngine;
use test_fixtures::{seed_catalog, RecordingStore, StoreCall};

fn seeded() -> RecordingStore<StorageEngine> {
    let store = RecordingStore::new(StorageEngine::open_in_memory().unwrap());
    seed_catalog(&store);
    store.clear();
    store
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 20).unwrap()
}

fn counts(result: &RetrievalResult) -> &[StructuredCount] {
    match result {
        RetrievalResult::Counts(c) => c,
        other => panic!("expected counts, got {}", other.shape()),
    }
}

#[test]
fn status_and_date_queries_the_store_once() {
    let store = seeded();
    let fired = resolve_order_on(&store, "How many confirmed orders on 11/08/2024?", today()).unwrap();

    assert_eq!(fired.rule, "status_on_date");
    assert_eq!(
        store.calls(),
        vec![StoreCall::StatusAndDate {
            status: "confirmed".into(),
            date: "2024-11-08".into()
        }]
    );
    let entries = counts(&fired.value.result);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, "Confirmed");
    assert_eq!(entries[0].count, 2);
    assert_eq!(entries[0].date, "2024-11-08");
    assert_eq!(
        entries[0].references,
        vec![
            "Order Id: 30101 - Date: 2024-11-08 - 14:05:09".to_string(),
            "Order Id: 30102 - Date: No date time available".to_string(),
        ]
    );
    assert!(fired.value.found);
    assert!(!fired.value.is_identifier_lookup);
}

#[test]
fn date_without_status_summarises_each_default_status_once() {
    let store = seeded();
    let fired = resolve_order_on(&store, "how many orders on 2024-11-08", today()).unwrap();

    assert_eq!(fired.rule, "default_statuses_on_date");
    let queried: Vec<String> = store
        .calls()
        .into_iter()
        .map(|call| match call {
            StoreCall::StatusAndDate { status, date } => {
                assert_eq!(date, "2024-11-08");
                status
            }
            other => panic!("unexpected store call {other:?}"),
        })
        .collect();
    assert_eq!(queried, vec!["new", "confirmed", "at_wms", "shipped"]);

    let entries = counts(&fired.value.result);
    let summary: Vec<(&str, usize)> = entries.iter().map(|e| (e.status.as_str(), e.count)).collect();
    assert_eq!(summary, vec![("New", 0), ("Confirmed", 2), ("AT_WMS", 0), ("Shipped", 1)]);
    assert_eq!(entries[0].references, vec![NO_ORDERS_FOUND.to_string()]);
    assert_eq!(
        entries[3].references,
        vec!["Order Id: 30103 - Date: 2024-11-09 - 08:00:00".to_string()]
    );
}

#[test]
fn today_is_a_date() {
    let store = seeded();
    let fired = resolve_order_on(&store, "new orders today", today()).unwrap();
    assert_eq!(fired.rule, "status_on_date");
    assert_eq!(
        store.calls(),
        vec![StoreCall::StatusAndDate {
            status: "new".into(),
            date: "2024-11-20".into()
        }]
    );
    assert!(!fired.value.found);
}

#[test]
fn date_without_status_ignores_the_source() {
    let store = seeded();
    let fired = resolve_order_on(&store, "costco orders on 2024-11-08", today()).unwrap();

    assert_eq!(fired.rule, "default_statuses_on_date");
    let calls = store.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| matches!(
        c,
        StoreCall::StatusAndDate { date, .. } if date == "2024-11-08"
    )));
    // Counts span every source, including the BigCommerce order 30101.
    let summary: Vec<(&str, usize)> = counts(&fired.value.result)
        .iter()
        .map(|e| (e.status.as_str(), e.count))
        .collect();
    assert_eq!(summary, vec![("New", 0), ("Confirmed", 2), ("AT_WMS", 0), ("Shipped", 1)]);
}

#[test]
fn bare_source_lists_every_order_of_that_source() {
    let store = seeded();
    let fired = resolve_order_on(&store, "show me the Costco orders", today()).unwrap();

    assert_eq!(fired.rule, "by_source");
    assert_eq!(
        store.calls(),
        vec![StoreCall::SourceOnly {
            source: "Costco".into()
        }]
    );
    let entries = counts(&fired.value.result);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].status, "All");
    assert_eq!(entries[0].count, 3);
    assert_eq!(entries[0].date, NOT_AVAILABLE);
}

#[test]
fn source_with_status_matches_status_per_default_status() {
    let store = seeded();
    let fired = resolve_order_on(&store, "shipped costco orders", today()).unwrap();

    assert_eq!(fired.rule, "by_source");
    let calls = store.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| matches!(
        c,
        StoreCall::Source { source, date: None, .. } if source == "Costco"
    )));
    let summary: Vec<(&str, usize)> = counts(&fired.value.result)
        .iter()
        .map(|e| (e.status.as_str(), e.count))
        .collect();
    assert_eq!(summary, vec![("New", 0), ("Confirmed", 1), ("AT_WMS", 1), ("Shipped", 1)]);
}

#[test]
fn source_takes_precedence_over_status_and_date() {
    let store = seeded();
    let fired = resolve_order_on(&store, "confirmed bigcommerce orders on 2024-11-08", today()).unwrap();

    assert_eq!(fired.rule, "by_source");
    let calls = store.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| matches!(
        c,
        StoreCall::Source { source, date: Some(d), .. } if source == "BigCommerce" && d == "2024-11-08"
    )));
    for entry in counts(&fired.value.result) {
        assert_eq!(entry.date, "2024-11-08");
    }
}

#[test]
fn unknown_order_number_is_an_identifier_miss() {
    let store = seeded();
    let fired = resolve_order_on(&store, "What is the status of order 30257?", today()).unwrap();

    assert_eq!(fired.rule, "by_identifier");
    assert_eq!(
        store.calls(),
        vec![StoreCall::Identifier {
            identifier: "30257".into()
        }]
    );
    assert!(fired.value.is_identifier_lookup);
    assert!(!fired.value.found);
    let entries = counts(&fired.value.result);
    assert_eq!(entries[0].status, NO_INFO_AVAILABLE);
    assert_eq!(entries[0].references, vec![NOT_AVAILABLE.to_string()]);
}

#[test]
fn known_order_number_returns_its_record() {
    let store = seeded();
    let fired = resolve_order_on(&store, "where is order 30103", today()).unwrap();

    assert!(fired.value.is_identifier_lookup);
    assert!(fired.value.found);
    match &fired.value.result {
        RetrievalResult::Documents(docs) => {
            assert_eq!(docs.len(), 1);
            assert!(docs[0].content.contains("PO-5003"));
            assert_eq!(docs[0].metadata["order number"], serde_json::json!(["30103"]));
        }
        other => panic!("expected documents, got {}", other.shape()),
    }
}

#[test]
fn nothing_recognisable_reads_nothing() {
    let store = seeded();
    let fired = resolve_order_on(&store, "tell me about my orders", today()).unwrap();
    assert_eq!(fired.rule, "no_match");
    assert!(store.calls().is_empty());
    assert!(!fired.value.found);
}
