// File: crates/scaling-core/src/chart.rs
// Summary: Raster renderer: lays out a ChartSpec in pixel space, then draws it on a Skia CPU raster surface.

use std::io::Cursor;
use std::path::Path;

use skia_safe as skia;

use crate::assemble::{ChartSpec, LegendItem, TREND_SAMPLES};
use crate::geometry::RectI32;
use crate::record::LabelPlacement;
use crate::scale::{ValueScale, YearScale};
use crate::style::{DashStyle, Marker};
use crate::text::TextShaper;
use crate::theme::{self, Theme};
use crate::types::{Insets, HEIGHT, PX_PER_PT, WIDTH};
use crate::error::RenderError;

/// Marker radius in pixels.
const MARKER_RADIUS: f32 = 5.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    /// Overrides the theme named by the chart.
    pub theme: Option<Theme>,
    /// Draw title, ticks labels, legend text, and annotations.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: None,
            draw_labels: true,
        }
    }
}

/// A point marker in data and pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedMarker {
    pub entry: usize,
    pub data: (f64, f64),
    pub px: (f32, f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedCurve {
    pub entry: usize,
    pub px: Vec<(f32, f32)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    pub entry: usize,
    pub text: String,
    /// Anchor position; text sits above it for `Above`, below it for `Below`.
    pub px: (f32, f32),
    pub placement: LabelPlacement,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    pub item: LegendItem,
    pub text: String,
}

/// Pixel layout of one chart, computed before any drawing.
#[derive(Clone, Debug)]
pub struct Frame {
    pub plot: RectI32,
    pub x_ticks: Vec<(f32, String)>,
    pub y_ticks: Vec<(f32, String)>,
    pub markers: Vec<PlacedMarker>,
    pub curves: Vec<PlacedCurve>,
    pub labels: Vec<PlacedLabel>,
    pub legend: Vec<LegendRow>,
}

pub struct RasterRenderer {
    pub opts: RenderOptions,
}

impl RasterRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Map every drawable element of `spec` to pixel space.
    pub fn layout(&self, spec: &ChartSpec) -> Frame {
        let o = &self.opts;
        let plot = RectI32::from_ltrb(
            o.insets.left as i32,
            o.insets.top as i32,
            o.width - o.insets.right as i32,
            o.height - o.insets.bottom as i32,
        );
        let sx = YearScale::new(plot.left as f32, plot.right as f32, spec.x_axis.min, spec.x_axis.max);
        let sy = ValueScale::new_log10(plot.top as f32, plot.bottom as f32, spec.y_axis.min, spec.y_axis.max);

        let x_ticks = spec.x_axis.ticks().into_iter().map(|t| (sx.to_px(t.value), t.label)).collect();
        let y_ticks = spec.y_axis.ticks().into_iter().map(|t| (sy.to_px(t.value), t.label)).collect();

        let mut markers = Vec::new();
        let mut curves = Vec::new();
        let mut labels = Vec::new();
        for (entry, e) in spec.entries.iter().enumerate() {
            for (x, y) in e.points() {
                markers.push(PlacedMarker { entry, data: (x, y), px: (sx.to_px(x), sy.to_px(y)) });
            }
            if let Some(t) = e.trend {
                let px = t.sample(TREND_SAMPLES).into_iter().map(|(x, y)| (sx.to_px(x), sy.to_px(y))).collect();
                curves.push(PlacedCurve { entry, px });
            }
            for a in &e.annotations {
                labels.push(PlacedLabel {
                    entry,
                    text: a.text.clone(),
                    px: (sx.to_px(a.x), sy.to_px(a.text_y)),
                    placement: a.placement,
                });
            }
        }

        let legend = spec
            .legend()
            .into_iter()
            .map(|item| {
                let text = match item {
                    LegendItem::Points { entry } => spec.entries[entry].label.clone(),
                    LegendItem::Trend { line, .. } => line.growth_label("×"),
                };
                LegendRow { item, text }
            })
            .collect();

        Frame { plot, x_ticks, y_ticks, markers, curves, labels, legend }
    }

    /// Render to an RGBA8 buffer. Returns (pixels, width, height, row stride).
    pub fn render_to_rgba8(&self, spec: &ChartSpec) -> Result<(Vec<u8>, i32, i32, usize), RenderError> {
        let (w, h) = (self.opts.width, self.opts.height);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or(RenderError::Surface { width: w, height: h })?;

        let frame = self.layout(spec);
        let theme = self.opts.theme.unwrap_or_else(|| spec.theme.theme());
        let shaper = self.opts.draw_labels.then(|| TextShaper::new(&spec.font_family));
        draw_frame(surface.canvas(), spec, &frame, &theme, shaper.as_ref(), w, h);

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(RenderError::ReadPixels);
        }
        Ok((px, w, h, stride))
    }

    /// Render and encode as PNG.
    pub fn render_to_png_bytes(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError> {
        let (px, w, h, _) = self.render_to_rgba8(spec)?;
        let img = image::RgbaImage::from_raw(w as u32, h as u32, px).ok_or(RenderError::ReadPixels)?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, spec: &ChartSpec, output_png_path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(spec)?;
        let write_err = |source: std::io::Error| RenderError::Write { path: path.to_path_buf(), source };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, bytes).map_err(write_err)?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

fn draw_frame(
    canvas: &skia::Canvas,
    spec: &ChartSpec,
    frame: &Frame,
    theme: &Theme,
    shaper: Option<&TextShaper>,
    width: i32,
    height: i32,
) {
    canvas.clear(theme.background);
    let p = frame.plot;
    let clip = skia::Rect::from_ltrb(p.left as f32, p.top as f32, p.right as f32, p.bottom as f32);

    draw_grid(canvas, frame, theme);

    canvas.save();
    canvas.clip_rect(clip, skia::ClipOp::Intersect, true);
    for c in &frame.curves {
        let e = &spec.entries[c.entry];
        draw_curve(canvas, &c.px, theme::series_color(e.color), e.dash, spec.line_width * PX_PER_PT);
    }
    for m in &frame.markers {
        let e = &spec.entries[m.entry];
        draw_marker(canvas, e.marker, m.px, MARKER_RADIUS, theme::series_color(e.color));
    }
    canvas.restore();

    draw_axes(canvas, p, theme);

    if let Some(shaper) = shaper {
        draw_tick_labels(canvas, shaper, spec, frame, theme);
        draw_axis_titles(canvas, shaper, spec, frame, theme, width, height);
        draw_annotations(canvas, shaper, spec, frame, theme);
    }
    draw_legend(canvas, shaper, spec, frame, theme);
}

fn draw_grid(canvas: &skia::Canvas, frame: &Frame, theme: &Theme) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let p = frame.plot;
    let (l, t, r, b) = (p.left as f32, p.top as f32, p.right as f32, p.bottom as f32);
    // verticals
    for &(x, _) in &frame.x_ticks {
        canvas.draw_line((x, t), (x, b), &paint);
    }
    // horizontals
    for &(y, _) in &frame.y_ticks {
        canvas.draw_line((l, y), (r, y), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, p: RectI32, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(1.2);

    let rect = skia::Rect::from_ltrb(p.left as f32, p.top as f32, p.right as f32, p.bottom as f32);
    canvas.draw_rect(rect, &axis_paint);
}

fn draw_tick_labels(canvas: &skia::Canvas, shaper: &TextShaper, spec: &ChartSpec, frame: &Frame, theme: &Theme) {
    let size = spec.fonts.tick * PX_PER_PT;
    let p = frame.plot;
    let mut tick = skia::Paint::default();
    tick.set_color(theme.tick);
    tick.set_stroke_width(1.0);

    for (x, label) in &frame.x_ticks {
        canvas.draw_line((*x, p.bottom as f32), (*x, p.bottom as f32 + 4.0), &tick);
        shaper.draw_centered(canvas, label, *x, p.bottom as f32 + 6.0 + size, size, theme.tick);
    }
    for (y, label) in &frame.y_ticks {
        canvas.draw_line((p.left as f32 - 4.0, *y), (p.left as f32, *y), &tick);
        shaper.draw_right(canvas, label, p.left as f32 - 6.0, *y + size * 0.35, size, theme.tick);
    }
}

fn draw_axis_titles(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    spec: &ChartSpec,
    frame: &Frame,
    theme: &Theme,
    width: i32,
    height: i32,
) {
    let p = frame.plot;
    let label = spec.fonts.label * PX_PER_PT;
    let cx = (p.left + p.right) as f32 * 0.5;
    shaper.draw_centered(canvas, &spec.x_axis.label, cx, height as f32 - label * 0.6, label, theme.axis_label);
    shaper.draw_vertical(canvas, &spec.y_axis.label, label * 0.9, (p.top + p.bottom) as f32 * 0.5, label, theme.axis_label);

    if let Some(title) = &spec.title {
        let size = spec.fonts.title * PX_PER_PT;
        let cx = width as f32 * 0.5;
        shaper.draw_centered(canvas, title, cx, p.top as f32 - size * 0.6, size, theme.axis_label);
    }
}

fn draw_annotations(canvas: &skia::Canvas, shaper: &TextShaper, spec: &ChartSpec, frame: &Frame, theme: &Theme) {
    let size = spec.fonts.annotation * PX_PER_PT;
    for l in &frame.labels {
        if !frame.plot.contains(l.px) { continue; }
        let baseline = match l.placement {
            LabelPlacement::Above => l.px.1,
            LabelPlacement::Below => l.px.1 + size,
        };
        shaper.draw_centered(canvas, &l.text, l.px.0, baseline, size, theme.axis_label);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: Option<&TextShaper>, spec: &ChartSpec, frame: &Frame, theme: &Theme) {
    if frame.legend.is_empty() { return; }
    let size = spec.fonts.legend * PX_PER_PT;
    let row_h = size * 1.5;
    let glyph_w = 32.0;
    let text_w = shaper
        .map(|s| frame.legend.iter().map(|r| s.measure_width(&r.text, size)).fold(0.0, f32::max))
        .unwrap_or(0.0);

    // north west, inset from the plot corner
    let left = frame.plot.left as f32 + 10.0;
    let top = frame.plot.top as f32 + 10.0;
    let rect = skia::Rect::from_xywh(left, top, glyph_w + text_w + 20.0, row_h * frame.legend.len() as f32 + 8.0);

    let mut fill = skia::Paint::default();
    fill.set_color(theme.legend_fill);
    canvas.draw_rect(rect, &fill);
    let mut border = skia::Paint::default();
    border.set_color(theme.legend_border);
    border.set_style(skia::paint::Style::Stroke);
    border.set_anti_alias(true);
    canvas.draw_rect(rect, &border);

    for (i, row) in frame.legend.iter().enumerate() {
        let cy = top + 4.0 + row_h * (i as f32 + 0.5);
        let gx = left + 6.0;
        match row.item {
            LegendItem::Points { entry } => {
                let e = &spec.entries[entry];
                draw_marker(canvas, e.marker, (gx + glyph_w * 0.5, cy), MARKER_RADIUS, theme::series_color(e.color));
            }
            LegendItem::Trend { entry, .. } => {
                let e = &spec.entries[entry];
                let seg = [(gx, cy), (gx + glyph_w, cy)];
                draw_curve(canvas, &seg, theme::series_color(e.color), e.dash, spec.line_width * PX_PER_PT);
            }
        }
        if let Some(s) = shaper {
            s.draw_left(canvas, &row.text, gx + glyph_w + 8.0, cy + size * 0.35, size, theme.axis_label);
        }
    }
}

fn draw_curve(canvas: &skia::Canvas, px: &[(f32, f32)], color: skia::Color, dash: DashStyle, width: f32) {
    if px.len() < 2 {
        return;
    }
    let mut path = skia::Path::new();
    path.move_to(px[0]);
    for &p in &px[1..] {
        path.line_to(p);
    }

    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(width.max(1.0));
    stroke.set_color(color);
    if let Some([on, off]) = dash.intervals() {
        let w = width.max(1.0);
        stroke.set_path_effect(skia::PathEffect::dash(&[on * w, off * w], 0.0));
    }
    canvas.draw_path(&path, &stroke);
}

/// Hollow marker outlined in `color`, centered at `c`.
fn draw_marker(canvas: &skia::Canvas, marker: Marker, c: (f32, f32), r: f32, color: skia::Color) {
    let mut stroke = skia::Paint::default();
    stroke.set_anti_alias(true);
    stroke.set_style(skia::paint::Style::Stroke);
    stroke.set_stroke_width(1.3);
    stroke.set_color(color);

    let (x, y) = c;
    if marker == Marker::Circle {
        canvas.draw_circle((x, y), r, &stroke);
        return;
    }
    let mut path = skia::Path::new();
    match marker {
        Marker::Plus => {
            path.move_to((x - r, y)).line_to((x + r, y));
            path.move_to((x, y - r)).line_to((x, y + r));
        }
        Marker::Cross => {
            let d = r * 0.8;
            path.move_to((x - d, y - d)).line_to((x + d, y + d));
            path.move_to((x - d, y + d)).line_to((x + d, y - d));
        }
        _ => {
            let pts = outline(marker, x, y, r);
            path.move_to(pts[0]);
            for &p in &pts[1..] {
                path.line_to(p);
            }
            path.close();
        }
    }
    canvas.draw_path(&path, &stroke);
}

/// Closed outline vertices for area markers.
fn outline(marker: Marker, x: f32, y: f32, r: f32) -> Vec<(f32, f32)> {
    let polygon = |n: usize, rot: f32, rad: f32| -> Vec<(f32, f32)> {
        (0..n)
            .map(|i| {
                let a = rot + i as f32 * std::f32::consts::TAU / n as f32;
                (x + rad * a.cos(), y + rad * a.sin())
            })
            .collect()
    };
    let up = -std::f32::consts::FRAC_PI_2;
    match marker {
        Marker::Diamond => vec![(x, y - r), (x + r * 0.7, y), (x, y + r), (x - r * 0.7, y)],
        Marker::Square => {
            let h = r * 0.85;
            vec![(x - h, y - h), (x + h, y - h), (x + h, y + h), (x - h, y + h)]
        }
        Marker::TriangleUp => polygon(3, up, r),
        Marker::TriangleDown => polygon(3, -up, r),
        Marker::Pentagon => polygon(5, up, r),
        Marker::Hexagon => polygon(6, up, r),
        Marker::Star => {
            let outer = polygon(5, up, r);
            let inner = polygon(5, up + std::f32::consts::PI / 5.0, r * 0.45);
            outer.into_iter().zip(inner).flat_map(|(o, i)| [o, i]).collect()
        }
        Marker::Circle | Marker::Plus | Marker::Cross => polygon(16, 0.0, r),
    }
}
