use scaling_core::{fit_series, Sample, Series};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_series(n: usize) -> Series {
    let samples = (0..n)
        .map(|i| {
            let x = 1990.0 + i as f64 * 30.0 / n as f64;
            // roughly 1.4x per year with some wobble; every 7th value missing
            let y = 10f64.powf(0.15 * (x - 2000.0)) * (1.0 + 0.2 * (i as f64 * 0.37).sin());
            Sample::new(Some(x), (i % 7 != 0).then_some(y))
        })
        .collect();
    Series::new("bench", samples)
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_series");
    for &n in &[100usize, 10_000usize] {
        let s = build_series(n);
        group.bench_function(format!("n_{n}"), |b| {
            b.iter(|| black_box(fit_series(black_box(&s))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
