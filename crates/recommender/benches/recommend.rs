//! Benchmarks for top-N recommendation
//!
//! Run with: cargo bench --package recommender
//!
//! Requires the real dataset and model under ../../data/.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::DataIndex;
use recommender::Recommender;
use std::path::Path;
use std::sync::Arc;
use svd_model::SvdModel;

fn load_recommender() -> Recommender {
    let index = DataIndex::load_from_files(
        Path::new("../../data/interactions.csv"),
        Path::new("../../data/games.csv"),
    )
    .expect("Failed to load test data");
    let model =
        SvdModel::load_from_file(Path::new("../../data/svd_model.json")).expect("Failed to load model");
    Recommender::new(Arc::new(index), Arc::new(model))
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = load_recommender();

    c.bench_function("recommend_top_10", |b| {
        b.iter(|| {
            let recs = recommender
                .recommend(black_box(1), black_box(10))
                .expect("recommend failed");
            black_box(recs)
        })
    });

    c.bench_function("recommend_top_20", |b| {
        b.iter(|| {
            let recs = recommender
                .recommend(black_box(1), black_box(20))
                .expect("recommend failed");
            black_box(recs)
        })
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);
