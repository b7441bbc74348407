pub mod completion_config;
pub mod defaults;
pub mod embedding_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod session_config;
pub mod storage_config;
pub mod vector_config;

pub use completion_config::CompletionConfig;
pub use embedding_config::EmbeddingConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use session_config::SessionConfig;
pub use storage_config::StorageConfig;
pub use vector_config::VectorConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration aggregating every subsystem.
///
/// Each section falls back to its defaults when omitted, so an empty
/// TOML document is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopdeskConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub vector: VectorConfig,
    pub completion: CompletionConfig,
    pub session: SessionConfig,
    pub retrieval: RetrievalConfig,
    pub observability: ObservabilityConfig,
}

impl ShopdeskConfig {
    /// Parse a TOML document, filling missing fields with defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load from a file path.
    pub fn from_file(path: &std::path::Path) -> crate::errors::ShopdeskResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            crate::errors::ShopdeskError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml(&raw).map_err(|e| crate::errors::ShopdeskError::ConfigError(e.to_string()))
    }
}
