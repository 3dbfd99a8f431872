use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use planar_optim::NelderMead;

// extended rosenbrock: sum over consecutive pairs
fn rosenbrock(p: &[f64]) -> f64 {
    p.windows(2)
        .map(|w| (1.0 - w[0]).powi(2) + 100.0 * (w[1] - w[0] * w[0]).powi(2))
        .sum()
}

fn sphere(p: &[f64]) -> f64 {
    p.iter().enumerate().map(|(i, v)| (v - i as f64).powi(2)).sum()
}

fn bench_nelder_mead(c: &mut Criterion) {
    let mut group = c.benchmark_group("NelderMead");

    let optimizer = NelderMead {
        max_iterations: 50_000,
        ..Default::default()
    };

    for dim in [2, 4, 8].iter() {
        let initial_guess = vec![0.0; *dim];

        group.bench_with_input(BenchmarkId::new("sphere", dim), dim, |b, _| {
            b.iter(|| {
                let result = optimizer.optimize(&sphere, black_box(&initial_guess));
                black_box(result)
            })
        });

        group.bench_with_input(BenchmarkId::new("rosenbrock", dim), dim, |b, _| {
            b.iter(|| {
                let result = optimizer.optimize(&rosenbrock, black_box(&initial_guess));
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nelder_mead);
criterion_main!(benches);
