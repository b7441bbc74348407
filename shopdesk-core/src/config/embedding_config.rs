use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "api" or "tfidf".
    pub provider: String,
    /// Embedding dimensions stored in the vector index.
    pub dimensions: usize,
    /// Embeddings endpoint for the "api" provider.
    pub api_endpoint: String,
    /// Model name sent to the embeddings endpoint.
    pub api_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// HTTP timeout per request.
    pub timeout_secs: u64,
    /// Retries before the provider marks itself unavailable.
    pub max_retries: u32,
    /// Query embedding cache max entries.
    pub cache_capacity: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            api_endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            api_model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: defaults::DEFAULT_EMBEDDING_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_EMBEDDING_MAX_RETRIES,
            cache_capacity: defaults::DEFAULT_L1_CACHE_SIZE,
        }
    }
}
