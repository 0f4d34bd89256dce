//! Criterion benchmarks for the finite-difference kernel.
//!
//! Measures gradient estimation cost per scheme across point sizes, with a
//! cheap function so the kernel's own overhead dominates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::{Array, ArrayD, IxDyn};
use numdiff_core::{estimate_gradient, DiffMode, Epsilon};

/// Generate a 2D point of roughly `n` coordinates.
fn generate_point(n: usize) -> ArrayD<f64> {
    let rows = (n as f64).sqrt().ceil() as usize;
    let cols = n.div_ceil(rows);
    let data: Vec<f64> = (0..rows * cols).map(|i| (i as f64 * 0.01).sin()).collect();
    Array::from_shape_vec(IxDyn(&[rows, cols]), data).unwrap()
}

fn sum_of_squares(x: &ArrayD<f64>) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// Benchmark each scheme with a uniform step.
fn bench_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_gradient");

    for size in [16, 256, 1024] {
        let point = generate_point(size);
        let epsilon = Epsilon::from(1e-6);

        for mode in DiffMode::ALL {
            group.bench_with_input(
                BenchmarkId::new(mode.name(), size),
                &point,
                |b, point| {
                    b.iter(|| {
                        estimate_gradient(black_box(point), sum_of_squares, &epsilon, mode)
                            .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark per-coordinate steps against the uniform step.
fn bench_per_coordinate_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("per_coordinate_epsilon");

    for size in [256, 1024] {
        let point = generate_point(size);
        let steps = Epsilon::from(point.mapv(|x| 1e-6 * (1.0 + x.abs())));

        group.bench_with_input(BenchmarkId::new("central", size), &point, |b, point| {
            b.iter(|| {
                estimate_gradient(black_box(point), sum_of_squares, &steps, DiffMode::Central)
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schemes, bench_per_coordinate_steps);
criterion_main!(benches);
