//! Benchmark tests for hybrid-rec-core operations
//!
//! Run with: cargo bench -p hybrid-rec-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hybrid_rec_core::fuzzy::partial_ratio;
use hybrid_rec_core::types::*;
use hybrid_rec_core::{Catalog, ContentIndex, KnowledgeRecommender, SectorStore};

// ============================================================================
// Helpers
// ============================================================================

const TOPICS: &[&str] = &[
    "python", "programming", "data", "science", "statistics", "finance", "markets", "cooking",
    "recipes", "kitchen", "machine", "learning", "neural", "networks", "design", "history",
];

fn create_test_catalog(size: usize) -> Catalog {
    (0..size)
        .map(|i| {
            let description: Vec<&str> = (0..8).map(|j| TOPICS[(i * 7 + j * 3) % TOPICS.len()]).collect();
            Item::new(
                i as i64,
                format!("{} course {i}", TOPICS[i % TOPICS.len()]),
                description.join(" "),
            )
        })
        .collect()
}

// ============================================================================
// Content Benchmarks
// ============================================================================

fn bench_content_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_index_build");

    for size in [50, 200, 500] {
        let catalog = create_test_catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| ContentIndex::build(black_box(catalog)))
        });
    }

    group.finish();
}

fn bench_content_recommend(c: &mut Criterion) {
    let catalog = create_test_catalog(500);
    let index = ContentIndex::build(&catalog);
    let seed = catalog.items()[250].name.clone();

    c.bench_function("content_recommend_500", |b| {
        b.iter(|| index.recommend(black_box(&catalog), black_box(&seed), 6))
    });
}

// ============================================================================
// Knowledge Benchmarks
// ============================================================================

fn bench_partial_ratio(c: &mut Criterion) {
    c.bench_function("partial_ratio", |b| {
        b.iter(|| partial_ratio(black_box("introduction to data science"), black_box("finance")))
    });
}

fn bench_knowledge_recommend(c: &mut Criterion) {
    let catalog = create_test_catalog(500);
    let sectors = SectorStore::new(vec![SectorAssignment::new(1, "Data Science")]);
    let recommender = KnowledgeRecommender::new();

    c.bench_function("knowledge_recommend_500", |b| {
        b.iter(|| recommender.recommend(black_box(1), &sectors, &catalog, 5))
    });
}

criterion_group!(
    benches,
    bench_content_index_build,
    bench_content_recommend,
    bench_partial_ratio,
    bench_knowledge_recommend,
);
criterion_main!(benches);
