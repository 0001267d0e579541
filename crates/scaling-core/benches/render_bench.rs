use anyhow::Result;
use scaling_core::{build_chart_spec, ChartSettings, ChartConfig, PgfExporter, RasterRenderer, Record, RecordTable, RenderOptions};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn build_table(n: usize) -> RecordTable {
    let records = (0..n)
        .map(|i| {
            let year = 2000 + (i * 24 / n.max(1)) as i32;
            let month = 1 + (i % 12) as u32;
            let x = year as f64 + (month - 1) as f64 / 12.0;
            Record::new(format!("01.{month:02}.{year}"), Some(x))
                .with_name(format!("chip {i}"))
                .with_metric("bw", Some(50.0 * 1.25f64.powf(x - 2000.0)))
                .with_metric("flops", Some(1e3 * 1.6f64.powf(x - 2000.0)))
        })
        .collect();
    RecordTable::new(records, vec!["bw".into(), "flops".into()])
}

fn bench_render(c: &mut Criterion) {
    let settings = ChartSettings::new("bench.png")
        .with_metric("bw", "Bandwidth", "D", "firebrick")
        .with_metric("flops", "Compute", "o", "royalblue");
    let config = ChartConfig::try_from(settings).expect("config");

    let mut group = c.benchmark_group("render");
    for &n in &[50usize, 1_000usize] {
        let (spec, _) = build_chart_spec(&build_table(n), &config).expect("spec");
        group.bench_function(format!("png_{n}"), |b| {
            let renderer = RasterRenderer::new(RenderOptions { width: 800, height: 500, draw_labels: false, ..RenderOptions::default() });
            b.iter(|| -> Result<()> {
                let bytes = renderer.render_to_png_bytes(&spec)?;
                black_box(bytes);
                Ok(())
            });
        });
        group.bench_function(format!("tex_{n}"), |b| {
            let exporter = PgfExporter::default();
            b.iter(|| black_box(exporter.export_to_string(&spec)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
