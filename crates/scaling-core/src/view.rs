// File: crates/scaling-core/src/view.rs
// Summary: Visible ranges derived from plotted points and trend curves, with configured overrides.

/// Data-space bounds of a chart. Y bounds are positive (log axis).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Bounds covering `points`: x padded by 3 % of the span (at least half a year),
    /// y padded by 5 % of the span in log10 space. Non-positive y values are ignored.
    pub fn covering(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut ly_min = f64::INFINITY;
        let mut ly_max = f64::NEG_INFINITY;
        for (x, y) in points {
            if !x.is_finite() { continue; }
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            if y > 0.0 && y.is_finite() {
                ly_min = ly_min.min(y.log10());
                ly_max = ly_max.max(y.log10());
            }
        }
        if !x_min.is_finite() {
            x_min = 0.0;
            x_max = 1.0;
        }
        if !ly_min.is_finite() {
            ly_min = 0.0;
            ly_max = 1.0;
        }
        let xm = ((x_max - x_min) * 0.03).max(0.5);
        if (ly_max - ly_min).abs() < 1e-9 {
            ly_min -= 0.5;
            ly_max += 0.5;
        }
        let ym = (ly_max - ly_min) * 0.05;
        Self {
            x_min: x_min - xm,
            x_max: x_max + xm,
            y_min: 10f64.powf(ly_min - ym),
            y_max: 10f64.powf(ly_max + ym),
        }
    }

    /// Replace either axis range with a configured one.
    pub fn with_limits(mut self, x: Option<(f64, f64)>, y: Option<(f64, f64)>) -> Self {
        if let Some((lo, hi)) = x {
            self.x_min = lo;
            self.x_max = hi;
        }
        if let Some((lo, hi)) = y {
            self.y_min = lo;
            self.y_max = hi;
        }
        self
    }
}
