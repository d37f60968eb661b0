//! Benchmarks for the seasonal ESD detection pipeline.

use anofox_anomaly::decompose::median_filter;
use anofox_anomaly::detection::{PeriodEstimator, SeasonalEsdDetector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn spiked_sine(n: usize, period: usize) -> Vec<f64> {
    let mut series: Vec<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
        .collect();
    series[n / 2] += 100.0;
    series
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("seasonal_esd_detect");

    for size in [512, 1024, 2048, 4096].iter() {
        let series = spiked_sine(*size, 20);
        let detector = SeasonalEsdDetector::default();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| detector.detect(black_box(&series)))
        });
    }

    group.finish();
}

fn bench_period_estimation(c: &mut Criterion) {
    let series = spiked_sine(4096, 20);
    let estimator = PeriodEstimator::default();

    c.bench_function("period_estimate_4096", |b| {
        b.iter(|| estimator.estimate(black_box(&series)))
    });
}

fn bench_median_filter(c: &mut Criterion) {
    let series = spiked_sine(4096, 20);

    c.bench_function("median_filter_301_4096", |b| {
        b.iter(|| median_filter(black_box(&series), 301))
    });
}

criterion_group!(
    benches,
    bench_detect,
    bench_period_estimation,
    bench_median_filter
);
criterion_main!(benches);
