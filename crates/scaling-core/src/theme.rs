// File: crates/scaling-core/src/theme.rs
// Summary: Light/Dark theming for the raster renderer's frame colors (series colors come from styles).

use skia_safe as skia;

use crate::style::Color;

/// Built-in theme presets, selectable by name in a chart configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Light,
    Dark,
}

impl ThemeKind {
    pub const ALL: [ThemeKind; 2] = [ThemeKind::Light, ThemeKind::Dark];

    /// Case-insensitive preset name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name().eq_ignore_ascii_case(name.trim()))
    }

    pub const fn name(self) -> &'static str {
        match self {
            ThemeKind::Light => "light",
            ThemeKind::Dark => "dark",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeKind::Light => Theme::light(),
            ThemeKind::Dark => Theme::dark(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub legend_fill: skia::Color,
    pub legend_border: skia::Color,
}

impl Theme {
    /// White paper look, suited to print.
    pub fn light() -> Self {
        Self {
            name: ThemeKind::Light.name(),
            background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 222, 222, 226),
            axis_line: skia::Color::from_argb(255, 40, 40, 48),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 60, 60, 70),
            legend_fill: skia::Color::from_argb(230, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 200, 200, 205),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: ThemeKind::Dark.name(),
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            legend_fill: skia::Color::from_argb(230, 28, 28, 32),
            legend_border: skia::Color::from_argb(255, 70, 70, 78),
        }
    }
}

/// Skia color for a series color.
pub fn series_color(color: Color) -> skia::Color {
    let (r, g, b) = color.rgb();
    skia::Color::from_rgb(r, g, b)
}
