use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity search parameters for the semantic path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Collection holding the embedded catalog.
    pub collection: String,
    /// Minimum cosine score for a hit to be kept.
    pub score_threshold: f64,
    /// Maximum hits per search.
    pub top_k: usize,
    /// Score threshold for the `product:<id>` lookup.
    pub fallback_score_threshold: f64,
    /// Maximum hits for the `product:<id>` lookup.
    pub fallback_top_k: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            collection: defaults::DEFAULT_COLLECTION.to_string(),
            score_threshold: defaults::DEFAULT_SCORE_THRESHOLD,
            top_k: defaults::DEFAULT_TOP_K,
            fallback_score_threshold: defaults::DEFAULT_FALLBACK_SCORE_THRESHOLD,
            fallback_top_k: defaults::DEFAULT_FALLBACK_TOP_K,
        }
    }
}
