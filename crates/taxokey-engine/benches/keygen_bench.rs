//! Criterion benchmarks for taxokey-engine.
//!
//! Synthetic complete trees, branching 4:
//! - discovery only (85 and 341 entities)
//! - full generation (85 and 341 entities)
//! - hydration of a generated key

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use taxokey_core::models::{GenerationOptions, KeyOptions};
use taxokey_core::types::EntityId;
use taxokey_engine::{discover, KeyGenerator};
use test_fixtures::fixtures::{synthetic, SyntheticSpec};

fn spec(depth: usize) -> SyntheticSpec {
    SyntheticSpec {
        branching: 4,
        depth,
        ..Default::default()
    }
}

fn bench_discovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("discover");
    for depth in [3, 4] {
        let catalog = synthetic(spec(depth));
        let options = KeyOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| discover(&catalog, black_box(EntityId(1)), &options))
        });
    }
    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_key");
    for depth in [3, 4] {
        let generator = KeyGenerator::new(Arc::new(synthetic(spec(depth))));
        let options = GenerationOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| generator.generate_key(black_box(EntityId(1)), &options))
        });
    }
    group.finish();
}

fn bench_hydration(c: &mut Criterion) {
    let generator = KeyGenerator::new(Arc::new(synthetic(spec(4))));
    let Ok(key) = generator.generate_key(EntityId(1), &GenerationOptions::default()) else {
        return;
    };
    c.bench_function("hydrate_depth_4", |b| {
        b.iter(|| generator.hydrate(black_box(&key.root_node)))
    });
}

criterion_group!(benches, bench_discovery, bench_generation, bench_hydration);
criterion_main!(benches);
