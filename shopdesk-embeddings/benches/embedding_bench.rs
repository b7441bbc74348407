use criterion::{criterion_group, criterion_main, Criterion};
use shopdesk_core::config::EmbeddingConfig;
use shopdesk_core::traits::IEmbeddingProvider;
use shopdesk_embeddings::EmbeddingEngine;

fn tfidf_engine() -> EmbeddingEngine {
    EmbeddingEngine::new(&EmbeddingConfig {
        provider: "tfidf".to_string(),
        dimensions: 384,
        ..Default::default()
    })
}

fn bench_tfidf_single(c: &mut Criterion) {
    let engine = tfidf_engine();
    c.bench_function("tfidf_embed_single", |b| {
        b.iter(|| engine.embed("walnut urn available in pennsylvania").unwrap())
    });
}

fn bench_query_cache_hit(c: &mut Criterion) {
    let engine = tfidf_engine();
    engine.embed_query("cached query text").unwrap();
    c.bench_function("query_cache_hit", |b| {
        b.iter(|| engine.embed_query("cached query text").unwrap())
    });
}

criterion_group!(benches, bench_tfidf_single, bench_query_cache_hit);
criterion_main!(benches);
