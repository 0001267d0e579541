// File: crates/scaling-core/src/grid.rs
// Summary: Sampling and tick layout helpers (even steps, year steps, log decades).

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Smallest "nice" step (1, 2, 5 × 10^k, at least 1) giving at most `max_ticks` ticks over `span`.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let max_ticks = max_ticks.max(2) as f64;
    let raw = (span / (max_ticks - 1.0)).max(1.0);
    let mag = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * mag)
}

/// Multiples of `step` inside [min, max].
pub fn step_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(max >= min) { return Vec::new(); }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Decade exponents k with 10^k inside [min, max] (both positive).
pub fn log_decades(min: f64, max: f64) -> Vec<i32> {
    if !(min > 0.0) || !(max >= min) { return Vec::new(); }
    let lo = (min.log10() - 1e-9).ceil() as i32;
    let hi = (max.log10() + 1e-9).floor() as i32;
    (lo..=hi).collect()
}
