//! Criterion benchmarks for candidate evaluation and event generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dalitz_engine::generator::{generate, GeneratorConfig};
use dalitz_engine::kinematics::DalitzKinematics;
use dalitz_engine::rng::DecayRng;
use dalitz_engine::sink::MemorySink;

fn bench_evaluate(c: &mut Criterion) {
    let kinematics = DalitzKinematics::reference();
    let mut rng = DecayRng::from_seed(42);

    c.bench_function("evaluate_candidate", |b| {
        b.iter(|| {
            let u1 = rng.gen_uniform();
            let u2 = rng.gen_uniform();
            black_box(kinematics.evaluate(black_box(u1), black_box(u2)))
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let n_events = 100_000u64;
    group.throughput(Throughput::Elements(n_events));

    for n_workers in [1usize, 4] {
        let config = GeneratorConfig::builder()
            .n_events(n_events)
            .n_workers(n_workers)
            .seed(42)
            .build()
            .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(n_workers),
            &config,
            |b, config| {
                b.iter(|| {
                    let sink = MemorySink::with_capacity(n_events as usize);
                    black_box(generate(config, sink).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_generate);
criterion_main!(benches);
