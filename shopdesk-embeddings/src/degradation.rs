//! Fallback chain for embedding generation.
//!
//! Providers are tried in order; each fallback is logged and counted.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use shopdesk_core::errors::{EmbeddingError, ShopdeskResult};
use shopdesk_core::traits::IEmbeddingProvider;

#[derive(Default)]
pub struct DegradationChain {
    chain: Vec<Box<dyn IEmbeddingProvider>>,
    fallbacks: AtomicU64,
}

impl DegradationChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.chain.push(provider);
    }

    /// Embed with the first provider that succeeds. Returns the vector and the provider name.
    pub fn embed(&self, text: &str) -> ShopdeskResult<(Vec<f32>, &str)> {
        self.run(|p| p.embed(text))
    }

    pub fn embed_batch(&self, texts: &[String]) -> ShopdeskResult<(Vec<Vec<f32>>, &str)> {
        self.run(|p| p.embed_batch(texts))
    }

    fn run<T>(
        &self,
        op: impl Fn(&dyn IEmbeddingProvider) -> ShopdeskResult<T>,
    ) -> ShopdeskResult<(T, &str)> {
        let mut last_error = None;
        for (i, provider) in self.chain.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match op(provider.as_ref()) {
                Ok(out) => {
                    if i > 0 {
                        self.fallbacks.fetch_add(1, Ordering::Relaxed);
                        tracing::info!(
                            event = "provider_fallback",
                            component = "embeddings",
                            fallback = provider.name(),
                        );
                    }
                    return Ok((out, provider.name()));
                }
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, trying next in chain");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::ProviderUnavailable {
                provider: "all providers exhausted".to_string(),
            }
            .into()
        }))
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.chain
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Dimensions of the first provider. Every provider in a chain must agree.
    pub fn dimensions(&self) -> usize {
        self.chain.first().map(|p| p.dimensions()).unwrap_or(0)
    }

    /// How many embeddings were served by a non-primary provider.
    pub fn fallback_count(&self) -> u64 {
        self.fallbacks.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}
