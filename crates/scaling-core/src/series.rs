// File: crates/scaling-core/src/series.rs
// Summary: Named (year, value) series aligned with table rows; values may be undefined.

/// One row's contribution to a series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub x: Option<f64>, // fractional year
    pub y: Option<f64>,
}

impl Sample {
    pub const fn new(x: Option<f64>, y: Option<f64>) -> Self { Self { x, y } }

    /// The point, when both coordinates are defined and finite.
    pub fn point(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

/// Series with one sample per table row (same order as the table).
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self { name: name.into(), samples }
    }

    pub fn len(&self) -> usize { self.samples.len() }
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Defined points with their row index. This is the plotting mask.
    pub fn points(&self) -> impl Iterator<Item = (usize, (f64, f64))> + '_ {
        self.samples.iter().enumerate().filter_map(|(i, s)| s.point().map(|p| (i, p)))
    }

    /// Observed year range of the defined points.
    pub fn x_domain(&self) -> Option<(f64, f64)> {
        self.points().fold(None, |acc, (_, (x, _))| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((f64::min(lo, x), f64::max(hi, x))),
        })
    }

    /// Derive a new series by mapping every defined value; x stays untouched.
    pub fn map_values(&self, name: impl Into<String>, f: impl Fn(f64) -> Option<f64>) -> Series {
        let samples = self.samples.iter().map(|s| Sample::new(s.x, s.y.and_then(&f))).collect();
        Series::new(name, samples)
    }
}
