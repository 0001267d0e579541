// File: crates/scaling-core/tests/pipeline.rs
// Purpose: End-to-end chart runs: both outputs, isolated fit failures, and fatal errors writing nothing.

mod common;

use common::{chip_table, out_dir, two_series, BW};
use scaling_core::{run_chart, ChartSettings, ConfigError, Error, FitError, InputError, Record, RecordTable, RenderOptions};

fn quick_opts() -> RenderOptions {
    RenderOptions { width: 480, height: 240, draw_labels: false, ..RenderOptions::default() }
}

#[test]
fn writes_png_and_tex() {
    let dir = out_dir("pipeline_both");
    let report = run_chart(&chip_table(), &two_series("memory_wall.png"), &dir, &quick_opts()).expect("run");
    assert!(report.is_complete());
    assert!(report.fit_failures.is_empty());
    assert_eq!(report.name, "memory_wall.png");

    let png = report.raster.as_ref().expect("png");
    let tex = report.vector.as_ref().expect("tex");
    assert_eq!(png, &dir.join("memory_wall.png"));
    assert_eq!(tex, &dir.join("memory_wall.tex"));
    let img = image::open(png).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (480, 240));
    assert!(std::fs::read_to_string(tex).expect("tex").contains("\\begin{axis}["));
}

#[test]
fn degenerate_series_fails_alone() {
    // Only one chip reports TDP: that series cannot be fitted, bandwidth still is.
    let base = chip_table();
    let records = base
        .records()
        .iter()
        .cloned()
        .map(|r| {
            let tdp = (r.year == Some(2012.0)).then_some(250.0);
            r.with_metric("tdp_watts", tdp)
        })
        .collect();
    let table = RecordTable::new(records, vec![BW.to_string(), "tdp_watts".to_string()]);
    let settings = ChartSettings::new("partial.png")
        .with_metric(BW, "Memory Bandwidth (GB/s)", "D", "firebrick")
        .with_metric("tdp_watts", "TDP (W)", "s", "darkorange");

    let dir = out_dir("pipeline_partial");
    let report = run_chart(&table, &settings, &dir, &quick_opts()).expect("run");
    assert!(report.is_complete());
    assert_eq!(
        report.fit_failures,
        [FitError::InsufficientPoints { series: "norm_tdp_watts".into(), required: 2, found: 1 }]
    );

    let tex = std::fs::read_to_string(dir.join("partial.tex")).expect("tex");
    assert_eq!(tex.matches("% Regression line").count(), 1);
    assert!(tex.contains("\\addlegendentry{TDP (W)}"));
    assert!(tex.contains("(2012, 1)"));
}

#[test]
fn configuration_error_writes_nothing() {
    let mut settings = two_series("broken.png");
    settings.marker.push("v".into());
    let dir = out_dir("pipeline_config_error");

    let err = run_chart(&chip_table(), &settings, &dir, &quick_opts()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::LengthMismatch { .. })), "{err}");
    assert!(!dir.exists(), "no output may be created");
}

#[test]
fn malformed_input_writes_nothing() {
    let table = RecordTable::new(
        vec![Record::new("31.02.2019", Some(2019.1)).with_metric(BW, Some(1.0))],
        vec![BW.to_string()],
    );
    let dir = out_dir("pipeline_input_error");
    let err = run_chart(&table, &two_series("bad.png"), &dir, &quick_opts()).unwrap_err();
    assert!(matches!(err, Error::Input(InputError::MalformedDate { row: 1, .. })), "{err}");
    assert!(!dir.exists());
}

#[test]
fn failed_png_leaves_tex_intact() {
    // A directory where the PNG should go makes only the raster write fail.
    let dir = out_dir("pipeline_blocked_png");
    std::fs::create_dir_all(dir.join("blocked.png")).expect("blocker");

    let report = run_chart(&chip_table(), &two_series("blocked.png"), &dir, &quick_opts()).expect("validation passes");
    assert!(!report.is_complete());
    assert!(matches!(report.raster, Err(scaling_core::RenderError::Write { .. })));
    let tex = report.vector.as_ref().expect("tex still written");
    assert_eq!(tex, &dir.join("blocked.tex"));
    assert!(std::fs::read_to_string(tex).expect("tex").contains("\\end{figure}"));
}

#[test]
fn unwritable_directory_fails_both_outputs() {
    let root = out_dir("pipeline_blocked");
    std::fs::create_dir_all(&root).expect("mkdir");
    let blocker = root.join("not_a_dir");
    std::fs::write(&blocker, b"file").expect("blocker");

    let report = run_chart(&chip_table(), &two_series("blocked.png"), blocker.join("out"), &quick_opts())
        .expect("validation passes");
    assert!(report.raster.is_err());
    assert!(report.vector.is_err());
}
