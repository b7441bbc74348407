//! Semantic strategy: hit resolution against snapshots, with a fixed-hit index
//! and with the real TF-IDF index over the seeded catalog.

use std::sync::{Arc, Mutex};

use serde_json::json;

use shopdesk_core::config::{EmbeddingConfig, VectorConfig};
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::models::{Category, Document, InventoryRow, RetrievalResult, VectorHit};
use shopdesk_core::traits::{IRelationalStore, IVectorIndex};
use shopdesk_embeddings::{index_catalog, EmbeddingEngine, VectorIndex};
use shopdesk_retrieval::strategies::SemanticSearch;
use shopdesk_storage::StorageEngine;
use test_fixtures::{seed_catalog, RecordingStore};

/// Returns `hits` for every query, and `lookups` for `product:<id>` queries.
#[derive(Default)]
struct FixedIndex {
    hits: Vec<VectorHit>,
    lookups: Vec<VectorHit>,
    queries: Mutex<Vec<String>>,
}

impl FixedIndex {
    fn with_hits(ids: &[&str]) -> Self {
        Self {
            hits: ids.iter().map(|id| hit(id, "indexed text")).collect(),
            ..Self::default()
        }
    }
}

impl IVectorIndex for FixedIndex {
    fn upsert(
        &self,
        _collection: &str,
        _id: &str,
        _embedding: &[f32],
        _content: &str,
        _metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()> {
        Ok(())
    }

    fn search(
        &self,
        _collection: &str,
        query_text: &str,
        _score_threshold: f64,
        k: usize,
    ) -> ShopdeskResult<Vec<VectorHit>> {
        self.queries.lock().unwrap().push(query_text.to_string());
        let source = if query_text.starts_with("product:") {
            &self.lookups
        } else {
            &self.hits
        };
        Ok(source.iter().take(k).cloned().collect())
    }
}

fn hit(id: &str, content: &str) -> VectorHit {
    let mut metadata = serde_json::Map::new();
    metadata.insert("id".into(), json!(id));
    VectorHit {
        id: format!("entry:{id}"),
        score: 0.9,
        content: content.into(),
        metadata,
    }
}

fn seeded() -> RecordingStore<StorageEngine> {
    let store = RecordingStore::new(StorageEngine::open_in_memory().unwrap());
    seed_catalog(&store);
    store.clear();
    store
}

fn documents(result: RetrievalResult) -> Vec<Document> {
    match result {
        RetrievalResult::Documents(d) => d,
        other => panic!("expected documents, got {}", other.shape()),
    }
}

#[test]
fn inventory_snapshot_wins_when_the_question_mentions_inventory() {
    let store = seeded();
    // Same key in both tables.
    store
        .upsert_inventory(&InventoryRow {
            sku: "4410".into(),
            category: "Wood".into(),
            inventory_json: r#"{"sku":"4410","warehouses":{}}"#.into(),
        })
        .unwrap();
    let index = FixedIndex::with_hits(&["4410"]);
    let config = VectorConfig::default();
    let search = SemanticSearch::new(&index, &store, &config);

    let docs = documents(
        search
            .resolve_semantic("Is product 4410 in inventory?", &[Category::Product, Category::Inventory])
            .unwrap(),
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, r#"{"sku":"4410","warehouses":{}}"#);
    assert_eq!(docs[0].metadata["id"], json!("4410"));
}

#[test]
fn product_hits_resolve_from_the_products_snapshot() {
    let store = seeded();
    let index = FixedIndex::with_hits(&["4411"]);
    let config = VectorConfig::default();
    let search = SemanticSearch::new(&index, &store, &config);

    let docs = documents(
        search
            .resolve_semantic("describe the silver casket (product-query)", &[Category::Product])
            .unwrap(),
    );
    assert_eq!(docs.len(), 1);
    assert!(docs[0].content.contains("Veterans Silver Finish Casket"));
}

#[test]
fn product_missing_from_snapshot_is_looked_up_in_the_index() {
    let store = seeded();
    let index = FixedIndex {
        hits: vec![hit("9999", "stale text")],
        lookups: vec![hit("9999", "archived product text")],
        ..FixedIndex::default()
    };
    let config = VectorConfig::default();
    let search = SemanticSearch::new(&index, &store, &config);

    let docs = documents(search.resolve_semantic("old urn (product-query)", &[Category::Product]).unwrap());
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, "archived product text");
    let queries = index.queries.lock().unwrap().clone();
    assert_eq!(queries, vec!["old urn (product-query)".to_string(), "product:9999".to_string()]);
}

#[test]
fn page_hits_need_a_page_question() {
    let store = seeded();
    let index = FixedIndex::with_hits(&["9"]);
    let config = VectorConfig::default();
    let search = SemanticSearch::new(&index, &store, &config);

    let docs = documents(
        search
            .resolve_semantic("what do the pages say about shipping?", &[Category::Page])
            .unwrap(),
    );
    assert_eq!(docs.len(), 1);
    assert!(docs[0].content.contains("three business days"));

    let dropped = documents(search.resolve_semantic("shipping times?", &[Category::Misc]).unwrap());
    assert!(dropped.is_empty());
}

#[test]
fn no_hits_skips_the_snapshot_reads() {
    let store = seeded();
    let index = FixedIndex::default();
    let config = VectorConfig::default();
    let search = SemanticSearch::new(&index, &store, &config);

    let result = search.resolve_semantic("anything", &[Category::Misc]).unwrap();
    assert!(result.is_empty());
    assert!(store.calls().is_empty());
}

#[test]
fn indexed_catalog_resolves_page_questions() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    seed_catalog(storage.as_ref());
    let config = VectorConfig {
        score_threshold: -1.0,
        ..VectorConfig::default()
    };
    let index = VectorIndex::new(Arc::clone(&storage), EmbeddingEngine::new(&EmbeddingConfig::default()));
    let report = index_catalog(storage.as_ref(), &index, &config.collection).unwrap();
    assert_eq!(report.total(), 9);

    let search = SemanticSearch::new(&index, storage.as_ref(), &config);
    let docs = documents(
        search
            .resolve_semantic("show the pages about the shipping policy", &[Category::Page])
            .unwrap(),
    );
    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|d| d.metadata["kind"] == json!("page")));
}
