//! Property tests: history ordering, vector search bounds.

use proptest::prelude::*;

use shopdesk_core::models::ChatMessage;
use shopdesk_core::traits::{IHistoryStore, IVectorStorage};
use shopdesk_storage::StorageEngine;

proptest! {
    #[test]
    fn prop_history_preserves_append_order(
        contents in prop::collection::vec("[a-zA-Z0-9 ?]{1,40}", 1..15)
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for c in &contents {
            engine.append("session", &ChatMessage::human(c.clone())).unwrap();
        }
        let stored: Vec<String> = engine
            .get("session")
            .unwrap()
            .into_iter()
            .map(|m| m.content)
            .collect();
        prop_assert_eq!(stored, contents);
    }

    #[test]
    fn prop_search_never_exceeds_limit_and_is_sorted(
        vectors in prop::collection::vec(prop::collection::vec(-1.0f32..1.0, 4), 1..20),
        limit in 1usize..10,
    ) {
        let engine = StorageEngine::open_in_memory().unwrap();
        for (i, v) in vectors.iter().enumerate() {
            engine
                .upsert_vector("c", &i.to_string(), v, "x", &serde_json::Map::new())
                .unwrap();
        }
        let hits = engine.search_vectors("c", &[0.5, 0.5, 0.5, 0.5], limit).unwrap();
        prop_assert!(hits.len() <= limit);
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
