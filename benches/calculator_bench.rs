//! Calculator throughput: single reports per second.
//!
//! Run with: `cargo bench --bench calculator`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use impactor::impact::{apply_surface, compute, ImpactParameters, Surface};

fn bench_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator");
    group.throughput(Throughput::Elements(1));

    group.bench_function("compute_iron_50m", |b| {
        b.iter(|| black_box(compute(black_box(7800.0), black_box(17_000.0), black_box(50.0))));
    });

    group.bench_function("compute_with_water_surface", |b| {
        let params = ImpactParameters::new(3000.0, 20_000.0, 1000.0);
        b.iter(|| {
            black_box(
                black_box(params)
                    .compute()
                    .map(|report| apply_surface(report, Surface::Water)),
            )
        });
    });

    group.bench_function("from_text", |b| {
        b.iter(|| black_box(ImpactParameters::from_text(black_box("7800"), "17000", "50")));
    });

    group.finish();
}

criterion_group!(benches, bench_calculator);
criterion_main!(benches);
