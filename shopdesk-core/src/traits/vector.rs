use std::sync::Arc;

use crate::errors::ShopdeskResult;
use crate::models::VectorHit;

/// Raw embedding persistence: stores vectors and ranks them by cosine similarity.
pub trait IVectorStorage: Send + Sync {
    fn upsert_vector(
        &self,
        collection: &str,
        id: &str,
        embedding: &[f32],
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()>;

    /// Top `limit` entries of `collection` ordered by descending similarity.
    fn search_vectors(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> ShopdeskResult<Vec<VectorHit>>;

    fn vector_count(&self, collection: &str) -> ShopdeskResult<usize>;
}

impl<T: IVectorStorage> IVectorStorage for Arc<T> {
    fn upsert_vector(
        &self,
        collection: &str,
        id: &str,
        embedding: &[f32],
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()> {
        (**self).upsert_vector(collection, id, embedding, content, metadata)
    }

    fn search_vectors(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> ShopdeskResult<Vec<VectorHit>> {
        (**self).search_vectors(collection, embedding, limit)
    }

    fn vector_count(&self, collection: &str) -> ShopdeskResult<usize> {
        (**self).vector_count(collection)
    }
}

/// Text-level similarity search: embeds the query, then searches.
pub trait IVectorIndex: Send + Sync {
    fn upsert(
        &self,
        collection: &str,
        id: &str,
        embedding: &[f32],
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()>;

    /// Hits scoring at least `score_threshold`, best first, at most `k`.
    fn search(
        &self,
        collection: &str,
        query_text: &str,
        score_threshold: f64,
        k: usize,
    ) -> ShopdeskResult<Vec<VectorHit>>;
}
