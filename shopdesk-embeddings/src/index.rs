//! `IVectorIndex` over an `IVectorStorage`: embeds query text, ranks, filters.

use tracing::debug;

use shopdesk_core::errors::{EmbeddingError, ShopdeskResult};
use shopdesk_core::models::VectorHit;
use shopdesk_core::traits::{IEmbeddingProvider, IVectorIndex, IVectorStorage};

use crate::engine::EmbeddingEngine;

pub struct VectorIndex<S: IVectorStorage> {
    storage: S,
    engine: EmbeddingEngine,
}

impl<S: IVectorStorage> VectorIndex<S> {
    pub fn new(storage: S, engine: EmbeddingEngine) -> Self {
        Self { storage, engine }
    }

    pub fn engine(&self) -> &EmbeddingEngine {
        &self.engine
    }

    /// Embed `text` and store it under `id`. Used by the catalog indexer.
    pub fn index_text(
        &self,
        collection: &str,
        id: &str,
        text: &str,
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()> {
        let embedding = self.engine.embed(text)?;
        self.upsert(collection, id, &embedding, content, metadata)
    }
}

impl<S: IVectorStorage> IVectorIndex for VectorIndex<S> {
    fn upsert(
        &self,
        collection: &str,
        id: &str,
        embedding: &[f32],
        content: &str,
        metadata: &serde_json::Map<String, serde_json::Value>,
    ) -> ShopdeskResult<()> {
        let expected = self.engine.dimensions();
        if embedding.len() != expected {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: embedding.len(),
            }
            .into());
        }
        self.storage
            .upsert_vector(collection, id, embedding, content, metadata)
    }

    fn search(
        &self,
        collection: &str,
        query_text: &str,
        score_threshold: f64,
        k: usize,
    ) -> ShopdeskResult<Vec<VectorHit>> {
        let query = self.engine.embed_query(query_text)?;
        let mut hits = self.storage.search_vectors(collection, &query, k)?;
        hits.retain(|h| h.score >= score_threshold);
        debug!(collection, hits = hits.len(), score_threshold, "vector search");
        Ok(hits)
    }
}
