//! Provider registry.
//!
//! "api" needs its key in the environment; without it, or for any unknown
//! provider name, the hashed TF-IDF provider is used.

pub mod api_provider;
pub mod tfidf_fallback;

pub use api_provider::ApiProvider;
pub use tfidf_fallback::TfIdfFallback;

use tracing::{info, warn};

use shopdesk_core::config::EmbeddingConfig;
use shopdesk_core::traits::IEmbeddingProvider;

pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "api" => match std::env::var(&config.api_key_env) {
            Ok(key) if !key.is_empty() => match ApiProvider::new(config, key) {
                Ok(p) => {
                    info!(provider = "api", model = %config.api_model, "embedding provider ready");
                    Box::new(p)
                }
                Err(e) => {
                    warn!(error = %e, "API provider failed to initialize, falling back");
                    Box::new(TfIdfFallback::new(config.dimensions))
                }
            },
            _ => {
                warn!(
                    env_var = %config.api_key_env,
                    "API provider configured but key is not set, using TF-IDF fallback"
                );
                Box::new(TfIdfFallback::new(config.dimensions))
            }
        },
        "tfidf" => {
            info!(provider = "tfidf", "using TF-IDF embedding provider");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
        other => {
            warn!(provider = other, "unknown provider, using TF-IDF fallback");
            Box::new(TfIdfFallback::new(config.dimensions))
        }
    }
}
