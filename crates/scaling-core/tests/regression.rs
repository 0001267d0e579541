// File: crates/scaling-core/tests/regression.rs
// Purpose: Log-linear fits on known data, growth-factor algebra, and per-series failure isolation.

mod common;

use common::{chip_table, BW};
use scaling_core::regression::{least_squares, EPOCH};
use scaling_core::{fit_all, fit_series, preprocess, FitError, RegressionLine, Sample, Series};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

fn series(points: &[(f64, f64)]) -> Series {
    Series::new("s", points.iter().map(|&(x, y)| Sample::new(Some(x), Some(y))).collect())
}

#[test]
fn fits_normalized_bandwidth() {
    let t = preprocess(&chip_table(), &[BW.to_string()]).expect("preprocess");
    let fit = fit_series(t.series("norm_mem_bw_GBs").expect("series")).expect("fit");
    let line = fit.line;

    // Least squares over x = {10, 12, 15}, log10 y = {0, log10 2, log10 8}.
    assert!(close(line.b(), 0.182_202_365_796_620_2, 1e-12), "b = {}", line.b());
    assert!(close(line.log10_a(), -1.845_789_183_939_674, 1e-12), "log10A = {}", line.log10_a());
    assert!(close(line.a(), 0.014_262_997_827_627_08, 1e-10), "A = {}", line.a());
    assert!(close(line.factor_2y(), 2.314_220_474_565_439_6, 1e-10));
    assert!(close(line.factor_20y(), 4_406.028_641_157_866, 1e-9));
    assert_eq!(fit.points, 3);
    assert!(fit.r_squared > 0.95 && fit.r_squared <= 1.0);
}

#[test]
fn exact_exponential_is_recovered() {
    // y = 3 * 10^(0.25 (x - 2000))
    let pts: Vec<_> = [1998.0, 2003.5, 2011.0, 2019.25]
        .iter()
        .map(|&x| (x, 3.0 * 10f64.powf(0.25 * (x - EPOCH))))
        .collect();
    let fit = fit_series(&series(&pts)).expect("fit");
    assert!(close(fit.line.b(), 0.25, 1e-12));
    assert!(close(fit.line.a(), 3.0, 1e-12));
    assert!(close(fit.r_squared, 1.0, 1e-12));
    assert!(close(fit.line.predict(2004.0), 30.0, 1e-12));
}

#[test]
fn growth_factors_compose() {
    let line = RegressionLine::new(-1.2, 0.137).expect("finite");
    assert!(close(line.factor(2.0) * line.factor(18.0), line.factor_20y(), 1e-12));
    assert!(close(line.factor_2y().powi(10), line.factor_20y(), 1e-12));
    assert!(close(line.predict(EPOCH), line.a(), 1e-15));
    assert!(RegressionLine::new(f64::NAN, 0.1).is_none());
    assert!(RegressionLine::new(0.0, f64::INFINITY).is_none());
}

#[test]
fn growth_label_rounds_like_the_legend() {
    // doubling every two years
    let line = RegressionLine::new(0.0, 2f64.log10() / 2.0).expect("finite");
    assert_eq!(line.growth_label("×"), "1024× per 20 years (2.0× per 2 years)");
}

#[test]
fn non_positive_and_undefined_values_are_masked() {
    let s = Series::new(
        "masked",
        vec![
            Sample::new(Some(2001.0), Some(10.0)),
            Sample::new(Some(2002.0), Some(0.0)),
            Sample::new(Some(2003.0), Some(-4.0)),
            Sample::new(Some(2004.0), None),
            Sample::new(None, Some(50.0)),
            Sample::new(Some(2005.0), Some(1000.0)),
        ],
    );
    let fit = fit_series(&s).expect("two usable points");
    assert_eq!(fit.points, 2);
    assert!(close(fit.line.b(), 0.5, 1e-12));
}

#[test]
fn single_point_is_insufficient() {
    let err = fit_series(&series(&[(2010.0, 5.0)])).unwrap_err();
    assert_eq!(err, FitError::InsufficientPoints { series: "s".into(), required: 2, found: 1 });
}

#[test]
fn identical_dates_are_degenerate() {
    let err = fit_series(&series(&[(2010.5, 5.0), (2010.5, 7.0), (2010.5, 9.0)])).unwrap_err();
    assert_eq!(err, FitError::DegenerateDates { series: "s".into() });
    assert_eq!(err.series(), "s");
}

#[test]
fn least_squares_matches_hand_computation() {
    let (slope, intercept) = least_squares(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.1, 5.9, 8.0]).expect("fit");
    assert!(close(slope, 1.98, 1e-12));
    assert!(close(intercept, 0.05, 1e-12));
    assert!(least_squares(&[1.0], &[1.0]).is_none());
}

#[test]
fn failures_stay_with_their_series() {
    let base = chip_table();
    let records = base
        .records()
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, r)| r.with_metric("sparse", (i == 0).then_some(3.0)))
        .collect();
    let table = scaling_core::RecordTable::new(records, vec![BW.to_string(), "sparse".to_string()]);

    let t = preprocess(&table, &[BW.to_string(), "sparse".to_string()]).expect("preprocess");
    let names = ["norm_sparse", "norm_mem_bw_GBs", "norm_missing"].map(String::from);
    let fits = fit_all(&t, &names);

    assert!(fits.line("norm_mem_bw_GBs").is_some());
    assert!(fits.line("norm_sparse").is_none());
    let failed: Vec<_> = fits.failures.iter().map(FitError::series).collect();
    assert_eq!(failed, ["norm_sparse", "norm_missing"]);
    assert!(matches!(fits.failures[1], FitError::UnknownSeries { .. }));
}

#[test]
fn input_order_does_not_change_results() {
    let forward = chip_table();
    let mut reversed_records = forward.records().to_vec();
    reversed_records.reverse();
    let reversed = scaling_core::RecordTable::new(reversed_records, forward.metrics().to_vec());

    let metrics = [BW.to_string(), common::FLOPS.to_string()];
    let names = metrics.clone().map(|m| format!("norm_{m}"));
    let a = preprocess(&forward, &metrics).expect("forward");
    let b = preprocess(&reversed, &metrics).expect("reversed");
    let (fa, fb) = (fit_all(&a, &names), fit_all(&b, &names));

    for (metric, name) in metrics.iter().zip(&names) {
        assert_eq!(a.series(name), b.series(name), "{name}");
        assert_eq!(a.divisor(metric), b.divisor(metric), "{metric}");
        let (la, lb) = (fa.line(name).expect("fit"), fb.line(name).expect("fit"));
        assert_eq!((la.log10_a(), la.b()), (lb.log10_a(), lb.b()), "{name}");
    }
}
