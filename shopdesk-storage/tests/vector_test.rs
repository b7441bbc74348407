use serde_json::json;
use shopdesk_core::traits::IVectorStorage;
use shopdesk_storage::StorageEngine;

fn meta(id: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut m = serde_json::Map::new();
    m.insert("id".into(), json!(id));
    m
}

#[test]
fn search_orders_by_descending_similarity() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_vector("catalog", "a", &[1.0, 0.0], "A", &meta("a")).unwrap();
    engine.upsert_vector("catalog", "b", &[0.7, 0.7], "B", &meta("b")).unwrap();
    engine.upsert_vector("catalog", "c", &[0.0, 1.0], "C", &meta("c")).unwrap();

    let hits = engine.search_vectors("catalog", &[1.0, 0.1], 2).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "a");
    assert_eq!(hits[1].id, "b");
    assert!(hits[0].score >= hits[1].score);
    assert_eq!(hits[0].metadata["id"], json!("a"));
    assert_eq!(hits[0].content, "A");
}

#[test]
fn collections_are_isolated_and_dimensions_checked() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_vector("catalog", "a", &[1.0, 0.0], "A", &meta("a")).unwrap();
    engine.upsert_vector("other", "b", &[1.0, 0.0], "B", &meta("b")).unwrap();
    engine.upsert_vector("catalog", "c", &[1.0, 0.0, 0.0], "C", &meta("c")).unwrap();

    let hits = engine.search_vectors("catalog", &[1.0, 0.0], 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a");
}

#[test]
fn upsert_overwrites_content() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_vector("catalog", "a", &[1.0, 0.0], "old", &meta("a")).unwrap();
    engine.upsert_vector("catalog", "a", &[1.0, 0.0], "new", &meta("a")).unwrap();
    assert_eq!(engine.vector_count("catalog").unwrap(), 1);
    assert_eq!(engine.search_vectors("catalog", &[1.0, 0.0], 1).unwrap()[0].content, "new");
}

#[test]
fn zero_query_returns_nothing() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_vector("catalog", "a", &[1.0, 0.0], "A", &meta("a")).unwrap();
    assert!(engine.search_vectors("catalog", &[0.0, 0.0], 5).unwrap().is_empty());
}
