//! # shopdesk-embeddings
//!
//! Turns text into vectors and vectors into search hits.
//!
//! - `providers`: hashed TF-IDF (always available) and an HTTP embeddings API.
//! - `DegradationChain`: tries providers in order, falling back on failure.
//! - `EmbeddingEngine`: chain plus an in-memory query embedding cache.
//! - `VectorIndex`: `IVectorIndex` over any `IVectorStorage`.
//! - `indexer`: embeds the catalog tables into a collection.

pub mod cache;
pub mod degradation;
pub mod engine;
pub mod index;
pub mod indexer;
pub mod providers;

pub use degradation::DegradationChain;
pub use engine::EmbeddingEngine;
pub use index::VectorIndex;
pub use indexer::{index_catalog, IndexReport};
