//! Benchmark for full asteroid generation.
//!
//! Covers one section in isolation and a whole medium asteroid through the
//! coordinator, at 1 and N workers.
//!
//! Run with: cargo bench --package kuiper_procedural --bench generation_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kuiper_core::{ChunkKey, GenerationSeed, GeneratorConfig, SectionPos};
use kuiper_procedural::{AsteroidDescriptor, GenerationCoordinator, SectionVoxelizer};

const CONFIG: &str = r#"
    search-radius = 1.25
    base-density = 0.25

    [limits]
    min-y = -64
    max-y = 320

    [rolling]
    min-size = 5.0
    max-size = 20.0

    [[palette]]
    id = "chondrite"
    weight = 1
    blocks = [{ block = "stone", weight = 3 }, { block = "basalt", weight = 1 }]
    ores = [{ block = "iron-ore", weight = 1 }]
"#;

fn benchmark_single_section(c: &mut Criterion) {
    let config = GeneratorConfig::from_toml_str(CONFIG).expect("valid config");
    let asteroid = AsteroidDescriptor::new((0, 64, 0), 14.0, 2, 0.1, "chondrite", &config)
        .expect("valid descriptor");
    let ores = config.ores().for_palette("chondrite");
    let seed = GenerationSeed::new(42);
    let pos = SectionPos::new(ChunkKey::new(0, 0), 4);

    c.bench_function("voxelize_one_section", |b| {
        b.iter(|| {
            let voxelizer = SectionVoxelizer::new(&asteroid, ores, seed, black_box(pos));
            black_box(voxelizer.voxelize())
        });
    });
}

fn benchmark_full_asteroid(c: &mut Criterion) {
    let config = GeneratorConfig::from_toml_str(CONFIG).expect("valid config");
    let asteroid = AsteroidDescriptor::new((0, 64, 0), 14.0, 2, 0.1, "chondrite", &config)
        .expect("valid descriptor");
    let seed = GenerationSeed::new(42);

    let mut group = c.benchmark_group("full_asteroid");
    group.sample_size(10);

    group.bench_function("serial", |b| {
        let coordinator = GenerationCoordinator::new(&config, seed).with_workers(1);
        b.iter(|| black_box(coordinator.generate(&asteroid).expect("generation")));
    });

    group.bench_function("parallel", |b| {
        let coordinator = GenerationCoordinator::new(&config, seed);
        b.iter(|| black_box(coordinator.generate(&asteroid).expect("generation")));
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_section, benchmark_full_asteroid);
criterion_main!(benches);
