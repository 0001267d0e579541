// File: crates/scaling-core/tests/assemble.rs
// Purpose: Configuration validation and ChartSpec assembly (order, trends, annotations, legend).

mod common;

use common::{chip_table, two_series, BW};
use scaling_core::axis::ScaleKind;
use scaling_core::{
    build_chart_spec, ChartConfig, ChartSettings, Color, ConfigError, DashStyle, Error, LabelPlacement, LegendItem,
    Marker,
};

fn config(settings: ChartSettings) -> ChartConfig {
    ChartConfig::try_from(settings).expect("valid settings")
}

#[test]
fn mismatched_presentation_lists_are_rejected() {
    let mut s = two_series("mismatch.png");
    s.marker.push("v".into());
    match ChartConfig::try_from(s) {
        Err(ConfigError::LengthMismatch { chart, lengths }) => {
            assert_eq!(chart, "mismatch.png");
            assert!(lengths.contains(&("marker", 3)));
            assert!(lengths.contains(&("marker_color", 2)));
        }
        other => panic!("expected length mismatch, got {other:?}"),
    }
}

#[test]
fn invalid_settings_are_rejected() {
    assert!(matches!(ChartConfig::try_from(ChartSettings::new("none.png")), Err(ConfigError::Empty { .. })));

    let mut s = two_series("m.png");
    s.marker[1] = "?".into();
    assert!(matches!(ChartConfig::try_from(s), Err(ConfigError::UnknownMarker { code, .. }) if code == "?"));

    let mut s = two_series("c.png");
    s.marker_color[0] = "chartreuse-ish".into();
    assert!(matches!(ChartConfig::try_from(s), Err(ConfigError::UnknownColor { .. })));

    let mut s = two_series("o.png");
    s.text_offsets = 1.5;
    assert!(matches!(ChartConfig::try_from(s), Err(ConfigError::TextOffset { .. })));
}

#[test]
fn entries_follow_configuration_order() {
    let (spec, failures) = build_chart_spec(&chip_table(), &config(two_series("order.png"))).expect("spec");
    assert!(failures.is_empty());
    let columns: Vec<_> = spec.entries.iter().map(|e| e.series.name.as_str()).collect();
    assert_eq!(columns, ["norm_mem_bw_GBs", "norm_fp32_peak_compute_Gflops"]);

    let bw = &spec.entries[0];
    assert_eq!(bw.marker, Marker::Diamond);
    assert_eq!(bw.color, Color::Firebrick);
    assert_eq!(bw.dash, DashStyle::Dotted);
    assert_eq!(spec.entries[1].dash, DashStyle::DenselyDotted);
    assert_eq!(bw.points(), [(2010.0, 1.0), (2012.0, 2.0), (2015.0, 8.0)]);

    assert_eq!(spec.output_stem, "order");
    assert_eq!(spec.y_axis.kind, ScaleKind::Log10);
    assert_eq!(spec.x_axis.label, "Year");
}

#[test]
fn trend_spans_the_observed_years() {
    let (spec, _) = build_chart_spec(&chip_table(), &config(two_series("domain.png"))).expect("spec");
    let trend = spec.entries[0].trend.expect("fitted");
    assert_eq!((trend.x_min, trend.x_max), (2010.0, 2015.0));
    let samples = trend.sample(200);
    assert_eq!(samples.len(), 200);
    assert_eq!(samples[0].0, 2010.0);
    assert!((samples[199].0 - 2015.0).abs() < 1e-9);

    // The view covers every point and the curve ends.
    for e in &spec.entries {
        for (x, y) in e.points() {
            assert!(spec.x_axis.min < x && x < spec.x_axis.max);
            assert!(spec.y_axis.min < y && y < spec.y_axis.max);
        }
    }
}

#[test]
fn annotations_use_hints_and_configured_text() {
    let mut s = two_series("notes.png");
    s.text_offsets = 0.1;
    let (spec, _) = build_chart_spec(&chip_table(), &config(s)).expect("spec");

    let bw = &spec.entries[0];
    assert_eq!(bw.source, BW);
    let notes: Vec<_> = bw.annotations.iter().map(|a| (a.text.as_str(), a.placement)).collect();
    assert_eq!(notes, [("GDDR5", LabelPlacement::Below), ("HBM2e", LabelPlacement::Above)]);
    assert!((bw.annotations[0].text_y - 0.9).abs() < 1e-12);
    assert!((bw.annotations[1].text_y - 8.8).abs() < 1e-12);

    // Compute annotations default to the chip name; only Chip C carries a hint.
    let flops = &spec.entries[1];
    assert_eq!(flops.annotations.len(), 1);
    assert_eq!(flops.annotations[0].text, "Chip C");
}

#[test]
fn legend_pairs_points_with_their_trend() {
    let (spec, _) = build_chart_spec(&chip_table(), &config(two_series("legend.png"))).expect("spec");
    let legend = spec.legend();
    assert_eq!(legend.len(), 4);
    assert!(matches!(legend[0], LegendItem::Points { entry: 0 }));
    assert!(matches!(legend[1], LegendItem::Trend { entry: 0, .. }));
    assert!(matches!(legend[2], LegendItem::Points { entry: 1 }));
    assert!(matches!(legend[3], LegendItem::Trend { entry: 1, .. }));
}

#[test]
fn configured_limits_override_the_view() {
    let mut s = two_series("limits.png");
    s.x_limits = Some([2008.0, 2020.0]);
    s.y_limits = Some([0.5, 1e4]);
    let (spec, _) = build_chart_spec(&chip_table(), &config(s)).expect("spec");
    assert_eq!((spec.x_axis.min, spec.x_axis.max), (2008.0, 2020.0));
    assert_eq!((spec.y_axis.min, spec.y_axis.max), (0.5, 1e4));
}

#[test]
fn unknown_series_is_a_configuration_error() {
    let mut s = two_series("unknown.png");
    s.y_col[1] = "norm_tdp_watts".into();
    match build_chart_spec(&chip_table(), &config(s)) {
        Err(Error::Config(ConfigError::UnknownSeries { series, .. })) => assert_eq!(series, "norm_tdp_watts"),
        other => panic!("expected unknown series, got {other:?}"),
    }
}

#[test]
fn axis_limits_must_fit_a_log_chart() {
    let cases: [(Option<[f64; 2]>, Option<[f64; 2]>, &str, &str); 5] = [
        (None, Some([0.0, 10.0]), "y", "must be positive on a log axis"),
        (None, Some([100.0, 1.0]), "y", "must be increasing"),
        (None, Some([f64::NAN, 1.0]), "y", "must be finite"),
        (Some([2020.0, 2010.0]), None, "x", "must be increasing"),
        (Some([2010.0, f64::INFINITY]), None, "x", "must be finite"),
    ];
    for (x, y, want_axis, want_reason) in cases {
        let mut s = two_series("limits.png");
        s.x_limits = x;
        s.y_limits = y;
        match ChartConfig::try_from(s) {
            Err(ConfigError::AxisLimits { axis, reason, .. }) => {
                assert_eq!((axis, reason), (want_axis, want_reason));
            }
            other => panic!("expected axis limit error for {x:?}/{y:?}, got {other:?}"),
        }
    }

    // Negative years are fine on the linear x axis.
    let mut s = two_series("bc.png");
    s.x_limits = Some([-10.0, 10.0]);
    assert_eq!(config(s).x_limits, Some((-10.0, 10.0)));
}

#[test]
fn theme_names_are_validated() {
    let mut s = two_series("dark.png");
    s.theme = "Dark".into();
    let (spec, _) = build_chart_spec(&chip_table(), &config(s)).expect("spec");
    assert_eq!(spec.theme, scaling_core::ThemeKind::Dark);

    let mut s = two_series("solarized.png");
    s.theme = "solarized".into();
    assert!(matches!(ChartConfig::try_from(s), Err(ConfigError::UnknownTheme { name, .. }) if name == "solarized"));
}
