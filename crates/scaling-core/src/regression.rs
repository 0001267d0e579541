// File: crates/scaling-core/src/regression.rs
// Summary: Log-linear (exponential) trend fitting and growth-factor derivation.
//
// Model:
//   log10(y) = log10(A) + b * (x - EPOCH)
//   y        = A * 10^(b * (x - EPOCH))
// with x a fractional year. EPOCH only conditions the fit numerically.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::FitError;
use crate::preprocess::PreparedTable;
use crate::series::Series;

/// Reference year subtracted from x before fitting.
pub const EPOCH: f64 = 2000.0;
/// Points needed to determine a line.
pub const MIN_POINTS: usize = 2;

/// Fitted trend in log10 space. `A` and growth factors derive from `(log10_a, b)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegressionLine {
    log10_a: f64,
    b: f64,
}

impl RegressionLine {
    /// `None` when either coefficient is not finite.
    pub fn new(log10_a: f64, b: f64) -> Option<Self> {
        (log10_a.is_finite() && b.is_finite()).then_some(Self { log10_a, b })
    }

    pub fn log10_a(&self) -> f64 { self.log10_a }
    pub fn b(&self) -> f64 { self.b }

    /// Linear-space value at the epoch.
    pub fn a(&self) -> f64 { 10f64.powf(self.log10_a) }

    /// Growth over `years`: `10^(b * years)`.
    pub fn factor(&self, years: f64) -> f64 { 10f64.powf(self.b * years) }
    pub fn factor_2y(&self) -> f64 { self.factor(2.0) }
    pub fn factor_20y(&self) -> f64 { self.factor(20.0) }

    /// Trend value at fractional year `year`.
    pub fn predict(&self, year: f64) -> f64 {
        self.a() * 10f64.powf(self.b * (year - EPOCH))
    }

    /// Legend text, e.g. `4406× per 20 years (2.3× per 2 years)`.
    pub fn growth_label(&self, times: &str) -> String {
        format!(
            "{:.0}{times} per 20 years ({:.1}{times} per 2 years)",
            self.factor_20y(),
            self.factor_2y()
        )
    }
}

/// A successful fit plus diagnostics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedTrend {
    pub line: RegressionLine,
    pub points: usize,
    pub r_squared: f64,
}

/// Ordinary least squares `y = slope * x + intercept`.
/// Returns `None` with fewer than [`MIN_POINTS`] pairs or zero variance in x.
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < MIN_POINTS {
        return None;
    }
    let nf = n as f64;
    let mx = xs[..n].iter().sum::<f64>() / nf;
    let my = ys[..n].iter().sum::<f64>() / nf;
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        sxx += (x - mx) * (x - mx);
        sxy += (x - mx) * (y - my);
    }
    if sxx <= f64::EPSILON * nf * mx.abs().max(1.0) {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Fit one series. Rows with undefined year/value or a non-positive value are masked out.
pub fn fit_series(series: &Series) -> Result<FittedTrend, FitError> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = series
        .points()
        .filter(|&(_, (_, y))| y > 0.0)
        .map(|(_, (x, y))| (x - EPOCH, y.log10()))
        .unzip();

    if xs.len() < MIN_POINTS {
        return Err(FitError::InsufficientPoints {
            series: series.name.clone(),
            required: MIN_POINTS,
            found: xs.len(),
        });
    }
    let (b, log10_a) = least_squares(&xs, &ys)
        .ok_or_else(|| FitError::DegenerateDates { series: series.name.clone() })?;
    let line = RegressionLine::new(log10_a, b)
        .ok_or_else(|| FitError::NonFinite { series: series.name.clone() })?;

    Ok(FittedTrend { line, points: xs.len(), r_squared: r_squared(&xs, &ys, &line) })
}

fn r_squared(xs: &[f64], ys: &[f64], line: &RegressionLine) -> f64 {
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    let ss_tot = ys.iter().map(|y| (y - mean).powi(2)).sum::<f64>();
    let ss_res = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (line.log10_a() + line.b() * x)).powi(2))
        .sum::<f64>();
    if ss_tot > 1e-12 { 1.0 - ss_res / ss_tot } else { 1.0 }
}

/// Outcome of fitting several series: successes by name, failures in request order.
#[derive(Clone, Debug, Default)]
pub struct Fits {
    pub trends: BTreeMap<String, FittedTrend>,
    pub failures: Vec<FitError>,
}

impl Fits {
    pub fn line(&self, series: &str) -> Option<RegressionLine> {
        self.trends.get(series).map(|t| t.line)
    }
}

/// Fit every named series; a failure never stops the others.
pub fn fit_all(table: &PreparedTable, names: &[String]) -> Fits {
    let mut fits = Fits::default();
    for name in names {
        let result = match table.series(name) {
            Some(series) => fit_series(series),
            None => Err(FitError::UnknownSeries { series: name.clone() }),
        };
        match result {
            Ok(trend) => {
                debug!(
                    series = %name,
                    points = trend.points,
                    b = trend.line.b(),
                    r_squared = trend.r_squared,
                    "fitted trend"
                );
                fits.trends.insert(name.clone(), trend);
            }
            Err(err) => {
                warn!(series = %name, "{err}");
                fits.failures.push(err);
            }
        }
    }
    fits
}
