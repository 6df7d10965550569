//! Compare single-thread and all-core sweep run times.
//!
//! Run with: `cargo bench --bench sweep_parallel`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use impactor::impact::Surface;
use impactor::sweep::{run_sweep, SweepGrid, WorkerPool};

fn grid(points_per_axis: usize) -> SweepGrid {
    let axis = |start: f64, step: f64| -> Vec<f64> {
        (0..points_per_axis).map(|i| start + step * i as f64).collect()
    };
    SweepGrid {
        densities: axis(1000.0, 100.0),
        speeds: axis(11_000.0, 500.0),
        diameters: axis(10.0, 25.0),
        surface: Surface::Land,
        workers: None,
    }
}

fn bench_sweep_single_vs_parallel(c: &mut Criterion) {
    let grid = grid(40);

    let mut group = c.benchmark_group("sweep");
    group.sample_size(20);

    group.bench_function("single_thread", |b| {
        let pool = WorkerPool::with_workers(1);
        b.iter(|| black_box(run_sweep(&grid, &pool)));
    });

    group.bench_function("parallel", |b| {
        let pool = WorkerPool::default();
        b.iter(|| black_box(run_sweep(&grid, &pool)));
    });

    group.finish();
}

criterion_group!(benches, bench_sweep_single_vs_parallel);
criterion_main!(benches);
