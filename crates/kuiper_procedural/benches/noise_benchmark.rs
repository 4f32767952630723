//! Benchmark for noise sampling performance.
//!
//! TARGET: 1,000,000 samples per second
//!
//! Run with: cargo bench --package kuiper_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kuiper_core::GenerationSeed;
use kuiper_procedural::noise::{NoiseField, SimplexNoise3};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise3::new(GenerationSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7), black_box(x * 0.3)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = SimplexNoise3::new(GenerationSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000u32 {
                let x = f64::from(i % 1000) * 0.1;
                let y = f64::from(i / 1000) * 0.1;
                black_box(noise.sample(x, y, x + y));
            }
        });
    });

    group.finish();
}

fn benchmark_shaping_field(c: &mut Criterion) {
    let mut field = NoiseField::new(GenerationSeed::new(42), 14.0, 2);

    c.bench_function("shaping_field_3_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.7;
            black_box(field.shaping_at(black_box(x), black_box(x * 0.5), black_box(x * 0.9)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_shaping_field
);
criterion_main!(benches);
