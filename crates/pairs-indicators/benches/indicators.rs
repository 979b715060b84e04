//! Benchmarks for rolling statistics and the hedge-ratio fit.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pairs_core::traits::Indicator;
use pairs_indicators::{HedgeRatioEstimator, Sma, StdDev};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn benchmark_rolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rolling");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("sma", size), &data, |b, data| {
            let sma = Sma::new(20);
            b.iter(|| sma.calculate(black_box(data)))
        });

        group.bench_with_input(BenchmarkId::new("std_dev", size), &data, |b, data| {
            let sd = StdDev::new(20);
            b.iter(|| sd.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_hedge_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("HedgeRatio");

    for size in [500, 5000, 50000].iter() {
        let x = generate_test_data(*size);
        let y: Vec<f64> = x.iter().enumerate().map(|(i, v)| 1.2 * v + (i as f64).cos()).collect();

        group.bench_with_input(BenchmarkId::new("ols", size), &(y, x), |b, (y, x)| {
            let estimator = HedgeRatioEstimator::new();
            b.iter(|| estimator.fit(black_box(y), black_box(x)))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rolling, benchmark_hedge_ratio);
criterion_main!(benches);
