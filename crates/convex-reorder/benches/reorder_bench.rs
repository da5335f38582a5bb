//! Criterion benchmarks for the reorder sweep.
//! Focus sizes: lower-curve segment counts in {10, 100, 1000, 10000}.
//! Results: by default under target/criterion.

use convex_reorder::rand::{draw_convex_curve, draw_upper_steps, RandomCurveCfg};
use convex_reorder::{render_all, reorder, reorder_all, ReorderCfg};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder");
    for &n in &[10usize, 100, 1000, 10000] {
        let cfg = RandomCurveCfg {
            segments: n,
            upper_steps: 8,
            ..Default::default()
        };
        let lower = draw_convex_curve(&cfg, 41);
        let steps = draw_upper_steps(&lower, &cfg, 41);

        group.bench_with_input(BenchmarkId::new("single_step", n), &n, |b, _| {
            let (x, y) = steps[0];
            b.iter_batched(
                || lower.clone(),
                |curve| {
                    let _res = reorder(x, y, curve);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("all_steps", n), &n, |b, _| {
            b.iter_batched(
                || lower.clone(),
                |curve| {
                    let _pieces = reorder_all(&steps, curve, ReorderCfg::default());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let cfg = RandomCurveCfg {
        segments: 64,
        ..Default::default()
    };
    let lower = draw_convex_curve(&cfg, 5);
    c.bench_function("render_all_precision_0.005", |b| {
        b.iter(|| render_all(&lower, 0.005))
    });
}

criterion_group!(benches, bench_reorder, bench_render);
criterion_main!(benches);
