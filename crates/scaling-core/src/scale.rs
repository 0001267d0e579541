// File: crates/scaling-core/src/scale.rs
// Summary: Year (X, linear) and value (Y, log10) transforms from data to pixels.

/// Year coordinate (fractional year).
pub type Year = f64;
/// Value Y coordinate (normalized metric).
pub type Value = f64;

/// Horizontal linear scale mapping [min, max] to [left, right] pixels.
#[derive(Clone, Copy, Debug)]
pub struct YearScale {
    pub left_px: f32,
    pub right_px: f32,
    pub min: Year,
    pub max: Year,
}

impl YearScale {
    pub fn new(left_px: f32, right_px: f32, min: Year, mut max: Year) -> Self {
        if (max - min).abs() < 1e-12 { max = min + 1.0; }
        Self { left_px, right_px, min, max }
    }
    #[inline]
    pub fn to_px(&self, x: Year) -> f32 {
        self.left_px + ((x - self.min) / (self.max - self.min)) as f32 * (self.right_px - self.left_px)
    }
}

/// Vertical log10 value scale mapping [vmin, vmax] to [bottom, top] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: Value,
    pub vmax: Value,
    // cached log endpoints
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn new_log10(top_px: f32, bottom_px: f32, mut vmin: Value, mut vmax: Value) -> Self {
        // Ensure strictly positive range for log scale
        let eps = 1e-12;
        vmin = if vmin <= eps { eps } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        let log_min = vmin.log10();
        let log_max = vmax.log10();
        Self { top_px, bottom_px, vmin, vmax, log_min, log_max }
    }
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let yy = y.max(1e-12).log10();
        let span = (self.log_max - self.log_min).max(1e-12);
        self.bottom_px - ((yy - self.log_min) / span) as f32 * (self.bottom_px - self.top_px)
    }
}
