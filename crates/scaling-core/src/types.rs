// File: crates/scaling-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, point-to-pixel scale).

/// Default surface width in pixels (12 in at 100 dpi).
pub const WIDTH: i32 = 1200;
/// Default surface height in pixels (6 in at 100 dpi).
pub const HEIGHT: i32 = 600;
/// Pixels per typographic point at 100 dpi.
pub const PX_PER_PT: f32 = 100.0 / 72.0;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(96, 32, 56, 72)
    }
}
