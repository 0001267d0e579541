// File: crates/scaling-core/src/pgfplot.rs
// Summary: Vector exporter: writes a ChartSpec as a pgfplots/TikZ figure for LaTeX inclusion.
// Notes:
// - Numbers are written with `{}` (shortest round-trip form), so coordinates and
//   curve coefficients parse back to exactly the values the raster renderer uses.

use std::path::{Path, PathBuf};

use crate::assemble::{ChartSpec, SeriesEntry, Trend, TREND_SAMPLES};
use crate::error::RenderError;
use crate::record::LabelPlacement;
use crate::regression::EPOCH;
use crate::style::{DashStyle, Marker};

/// pgfplots mark used when a marker has no native symbol.
pub const DEFAULT_MARK: PgfMark = PgfMark { symbol: "diamond*", rotate: 0 };

/// A pgfplots mark symbol, optionally rotated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgfMark {
    pub symbol: &'static str,
    pub rotate: u16,
}

/// Native pgfplots symbol for `marker`, if there is one.
pub const fn pgf_mark(marker: Marker) -> Option<PgfMark> {
    let symbol = match marker {
        Marker::Diamond => "diamond*",
        Marker::Circle => "*",
        Marker::TriangleUp => "triangle*",
        Marker::TriangleDown => return Some(PgfMark { symbol: "triangle*", rotate: 180 }),
        Marker::Square => "square*",
        Marker::Pentagon => "pentagon*",
        Marker::Star => "star",
        Marker::Plus => "+",
        Marker::Cross => "x",
        Marker::Hexagon => return None,
    };
    Some(PgfMark { symbol, rotate: 0 })
}

pub const fn pgf_dash(dash: DashStyle) -> &'static str {
    match dash {
        DashStyle::Solid => "solid",
        DashStyle::Dashed => "dashed",
        DashStyle::DenselyDashed => "densely dashed",
        DashStyle::Dotted => "dotted",
        DashStyle::DenselyDotted => "densely dotted",
    }
}

/// Anchor of a data label node: text above the point hangs from its south edge.
pub const fn pgf_anchor(placement: LabelPlacement) -> &'static str {
    match placement {
        LabelPlacement::Above => "south",
        LabelPlacement::Below => "north",
    }
}

/// Escape characters that break TeX outside math mode. `$` is kept for inline math.
pub fn escape_tex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '%' | '&' | '#' | '_' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Clone, Debug)]
pub struct PgfOptions {
    pub width: String,
    pub height: String,
    pub legend_pos: String,
    pub samples: usize,
}

impl Default for PgfOptions {
    fn default() -> Self {
        Self {
            width: "15.4cm".into(),
            height: "7cm".into(),
            legend_pos: "north west".into(),
            samples: TREND_SAMPLES,
        }
    }
}

/// Indented line buffer (4 spaces per level).
struct TexWriter {
    lines: Vec<(usize, String)>,
    indent: usize,
}

impl TexWriter {
    fn new() -> Self { Self { lines: Vec::new(), indent: 0 } }

    fn line(&mut self, s: impl Into<String>) { self.lines.push((self.indent, s.into())); }
    fn blank(&mut self) { self.lines.push((0, String::new())); }
    fn open(&mut self, s: impl Into<String>) { self.line(s); self.indent += 1; }
    fn close(&mut self, s: impl Into<String>) { self.indent = self.indent.saturating_sub(1); self.line(s); }

    /// `key=value,` per property; a bare key when the value is `None`.
    fn properties(&mut self, props: &[(&str, Option<String>)]) {
        for (k, v) in props {
            match v {
                Some(v) => self.line(format!("{k}={v},")),
                None => self.line(format!("{k},")),
            }
        }
    }

    fn finish(self) -> String {
        let mut out = String::new();
        for (indent, line) in self.lines {
            if !line.is_empty() {
                out.push_str(&"    ".repeat(indent));
                out.push_str(&line);
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Clone, Debug, Default)]
pub struct PgfExporter {
    pub opts: PgfOptions,
}

impl PgfExporter {
    pub fn new(opts: PgfOptions) -> Self {
        Self { opts }
    }

    /// The complete `figure` environment.
    pub fn export_to_string(&self, spec: &ChartSpec) -> String {
        let mut w = TexWriter::new();
        w.line(r"% \usepackage{tikz}");
        w.line(r"% \usepackage{pgfplots}");
        w.line(r"% \pgfplotsset{compat=1.14}");
        w.blank();

        w.open(r"\begin{figure}");
        w.line(r"\centering");
        w.open(r"\begin{tikzpicture}");
        for (i, e) in spec.entries.iter().enumerate() {
            let (r, g, b) = e.color.rgb();
            w.line(format!(r"\definecolor{{{}}}{{RGB}}{{{r},{g},{b}}}", color_name(i)));
        }

        w.open(r"\begin{axis}[");
        let x = &spec.x_axis;
        let y = &spec.y_axis;
        w.properties(&[
            ("width", Some(self.opts.width.clone())),
            ("height", Some(self.opts.height.clone())),
            ("xlabel", Some(format!("{{{}}}", escape_tex(&x.label)))),
            ("ylabel", Some(format!("{{{}}}", escape_tex(&y.label)))),
            ("xmin", Some(x.min.to_string())),
            ("xmax", Some(x.max.to_string())),
            ("ymin", Some(y.min.to_string())),
            ("ymax", Some(y.max.to_string())),
            ("ymode", Some("log".into())),
            ("log basis y", Some("10".into())),
            ("grid", Some("major".into())),
            ("minor grid style", Some("dotted".into())),
            ("scaled x ticks", Some("false".into())),
            (
                "xticklabel style",
                Some("{/pgf/number format/fixed, /pgf/number format/precision=0, /pgf/number format/1000 sep={}}".into()),
            ),
            ("legend pos", Some(self.opts.legend_pos.clone())),
            ("legend cell align", Some("left".into())),
            ("legend style", Some(r"{font=\scriptsize}".into())),
        ]);
        w.close("]");
        w.indent += 1;

        // Same order as ChartSpec::legend: points, then the entry's trend.
        for (i, e) in spec.entries.iter().enumerate() {
            self.write_points(&mut w, i, e);
            if let Some(t) = e.trend {
                self.write_trend(&mut w, i, e.dash, &t, spec.line_width);
            }
            write_labels(&mut w, e);
        }

        w.close(r"\end{axis}");
        w.close(r"\end{tikzpicture}");
        w.blank();
        if let Some(title) = &spec.title {
            w.line(format!(r"\caption{{{}}}", escape_tex(title)));
        }
        w.line(format!(r"\label{{fig:{}}}", spec.output_stem));
        w.close(r"\end{figure}");
        w.finish()
    }

    /// Write `<output_stem>.tex` into `dir`; returns the written path.
    pub fn export_to_file(&self, spec: &ChartSpec, dir: impl AsRef<Path>) -> Result<PathBuf, RenderError> {
        let path = dir.as_ref().join(format!("{}.tex", spec.output_stem));
        let write_err = |source: std::io::Error| RenderError::Write { path: path.clone(), source };
        std::fs::create_dir_all(dir.as_ref()).map_err(write_err)?;
        std::fs::write(&path, self.export_to_string(spec)).map_err(write_err)?;
        Ok(path)
    }

    fn write_points(&self, w: &mut TexWriter, i: usize, e: &SeriesEntry) {
        w.line(format!("% {} {}", "-".repeat(10), e.label));
        w.open(r"\addplot [");
        let mark = pgf_mark(e.marker).unwrap_or(DEFAULT_MARK);
        let c = color_name(i);
        let mut options = format!("solid, draw={c}, fill=none");
        if mark.rotate != 0 {
            options.push_str(&format!(", rotate={}", mark.rotate));
        }
        w.properties(&[
            ("only marks", None),
            ("mark", Some(mark.symbol.to_string())),
            ("mark options", Some(format!("{{{options}}}"))),
            ("draw", Some("none".into())),
        ]);
        w.close("] coordinates {");
        w.indent += 1;
        for (x, y) in e.points() {
            w.line(format!("({x}, {y})"));
        }
        w.close("};");
        w.line(format!(r"\addlegendentry{{{}}}", escape_tex(&e.label)));
        w.blank();
    }

    fn write_trend(&self, w: &mut TexWriter, i: usize, dash: DashStyle, t: &Trend, line_width: f32) {
        w.line("% Regression line");
        w.open(r"\addplot [");
        w.properties(&[
            (pgf_dash(dash), None),
            ("color", Some(color_name(i))),
            ("line width", Some(format!("{line_width}pt"))),
            ("domain", Some(format!("{}:{}", t.x_min, t.x_max))),
            ("samples", Some(self.opts.samples.to_string())),
        ]);
        w.close(format!("] {{ {} * 10^({} * (x - {EPOCH})) }};", t.line.a(), t.line.b()));
        w.line(format!(r"\addlegendentry{{{}}}", t.line.growth_label(r"\,$\times$")));
        w.blank();
    }
}

fn write_labels(w: &mut TexWriter, e: &SeriesEntry) {
    if e.annotations.is_empty() {
        return;
    }
    w.line("% Data labels");
    for a in &e.annotations {
        w.line(format!(
            r"\node[anchor={}, font=\tiny] at (axis cs:{}, {}) {{{}}};",
            pgf_anchor(a.placement),
            a.x,
            a.text_y,
            escape_tex(&a.text)
        ));
    }
    w.blank();
}

fn color_name(i: usize) -> String {
    format!("series{i}color")
}
