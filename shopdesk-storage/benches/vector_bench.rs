use criterion::{criterion_group, criterion_main, Criterion};
use shopdesk_core::traits::IVectorStorage;
use shopdesk_storage::StorageEngine;

fn bench_search_1k(c: &mut Criterion) {
    let engine = StorageEngine::open_in_memory().unwrap();
    for i in 0..1_000 {
        let v: Vec<f32> = (0..384).map(|d| ((i * 31 + d) % 97) as f32 / 97.0).collect();
        engine
            .upsert_vector("catalog", &i.to_string(), &v, "passage", &serde_json::Map::new())
            .unwrap();
    }
    let query: Vec<f32> = (0..384).map(|d| (d % 13) as f32 / 13.0).collect();

    c.bench_function("vector_search_1k_384d", |b| {
        b.iter(|| engine.search_vectors("catalog", &query, 30).unwrap())
    });
}

criterion_group!(benches, bench_search_1k);
criterion_main!(benches);
