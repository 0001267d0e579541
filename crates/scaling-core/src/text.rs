// File: crates/scaling-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout with a configurable primary font family.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

const FALLBACK_FAMILIES: [&str; 6] = ["DejaVu Sans Mono", "Menlo", "Consolas", "DejaVu Sans", "Arial", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
    families: Vec<String>,
}

impl TextShaper {
    /// Shaper preferring `family` (e.g. `monospace`), then platform fallbacks.
    pub fn new(family: &str) -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        let mut families = vec![family.to_string()];
        families.extend(FALLBACK_FAMILIES.iter().map(|f| f.to_string()));
        Self { fonts: fc, families }
    }

    fn make_style(&self, size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&self.families);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = self.make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    pub fn measure_width(&self, text: &str, size: f32) -> f32 {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        // width of the longest line
        p.longest_line()
    }

    /// Draw with the baseline at `y`, starting at `x`.
    pub fn draw_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        // Paragraph draws from top-left; adjust baseline by glyph height approximation
        p.paint(canvas, (x, y - size * 0.8));
    }

    /// Draw horizontally centered on `cx`, baseline at `y`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        p.paint(canvas, (cx - w * 0.5, y - size * 0.8));
    }

    /// Draw right-aligned at `rx`, baseline at `y`.
    pub fn draw_right(&self, canvas: &skia::Canvas, text: &str, rx: f32, y: f32, size: f32, color: skia::Color) {
        let mut p = self.layout(text, size, color);
        let w = p.longest_line();
        p.paint(canvas, (rx - w, y - size * 0.8));
    }

    /// Draw centered on (cx, cy), rotated 90° counter-clockwise (vertical axis titles).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color) {
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        self.draw_centered(canvas, text, 0.0, size * 0.4, size, color);
        canvas.restore();
    }
}
