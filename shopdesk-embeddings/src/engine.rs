//! EmbeddingEngine: provider fallback chain plus the query cache.

use tracing::{debug, info};

use shopdesk_core::config::EmbeddingConfig;
use shopdesk_core::errors::ShopdeskResult;
use shopdesk_core::traits::IEmbeddingProvider;

use crate::cache::QueryEmbeddingCache;
use crate::degradation::DegradationChain;
use crate::providers::{self, TfIdfFallback};

pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: QueryEmbeddingCache,
}

impl EmbeddingEngine {
    /// Configured provider first, TF-IDF last.
    pub fn new(config: &EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();
        chain.push(providers::create_provider(config));
        chain.push(Box::new(TfIdfFallback::new(config.dimensions)));
        Self::with_chain(chain, config.cache_capacity)
    }

    pub fn with_chain(chain: DegradationChain, cache_capacity: u64) -> Self {
        info!(
            provider = chain.active_provider_name(),
            dims = chain.dimensions(),
            "embedding engine initialized"
        );
        Self {
            chain,
            cache: QueryEmbeddingCache::new(cache_capacity),
        }
    }

    /// Embed a search query, serving repeats from the cache.
    pub fn embed_query(&self, query: &str) -> ShopdeskResult<Vec<f32>> {
        let key = QueryEmbeddingCache::key(query);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "query embedding cache hit");
            return Ok(hit);
        }
        let (embedding, _) = self.chain.embed(query)?;
        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    pub fn chain(&self) -> &DegradationChain {
        &self.chain
    }

    pub fn cached_queries(&self) -> u64 {
        self.cache.len()
    }
}

impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> ShopdeskResult<Vec<f32>> {
        self.chain.embed(text).map(|(v, _)| v)
    }

    fn embed_batch(&self, texts: &[String]) -> ShopdeskResult<Vec<Vec<f32>>> {
        self.chain.embed_batch(texts).map(|(v, _)| v)
    }

    fn dimensions(&self) -> usize {
        self.chain.dimensions()
    }

    fn name(&self) -> &str {
        self.chain.active_provider_name()
    }

    fn is_available(&self) -> bool {
        self.chain.active_provider_name() != "none"
    }
}
