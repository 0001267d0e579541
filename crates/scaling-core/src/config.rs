// File: crates/scaling-core/src/config.rs
// Summary: Chart and run configuration: serialized settings (parallel lists) and validated form.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::loader::TableSchema;
use crate::preprocess::normalized_name;
use crate::style::{Color, Marker};
use crate::theme::ThemeKind;

/// Font sizes in points.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontSizes {
    pub label: f32,
    pub tick: f32,
    pub title: f32,
    pub legend: f32,
    pub annotation: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self { label: 12.0, tick: 10.0, title: 14.0, legend: 12.0, annotation: 8.0 }
    }
}

/// One chart as written in a config file. Presentation lists are parallel, keyed by position.
#[derive(Clone, Debug, Deserialize)]
pub struct ChartSettings {
    pub output_name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Metric columns to normalize.
    pub raw_data_col: Vec<String>,
    /// Series to plot and fit (usually `norm_<metric>`).
    pub y_col: Vec<String>,
    pub y_label: Vec<String>,
    pub marker: Vec<String>,
    pub marker_color: Vec<String>,
    /// Text column used for point annotations, per series. Defaults to `name`.
    #[serde(default)]
    pub annotation_text: HashMap<String, String>,
    #[serde(default)]
    pub fonts: FontSizes,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_line_width")]
    pub regression_line_width: f32,
    /// Annotation offset as a fraction of the point's value.
    #[serde(default = "default_text_offsets")]
    pub text_offsets: f64,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_axis_label")]
    pub y_axis_label: String,
    #[serde(default)]
    pub x_limits: Option<[f64; 2]>,
    #[serde(default)]
    pub y_limits: Option<[f64; 2]>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_font_family() -> String { "monospace".into() }
fn default_line_width() -> f32 { 1.0 }
fn default_text_offsets() -> f64 { 0.15 }
fn default_x_label() -> String { "Year".into() }
fn default_y_axis_label() -> String { "Normalized Scaling".into() }
fn default_theme() -> String { "light".into() }

impl ChartSettings {
    /// Settings with defaults and no series.
    pub fn new(output_name: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            title: None,
            raw_data_col: Vec::new(),
            y_col: Vec::new(),
            y_label: Vec::new(),
            marker: Vec::new(),
            marker_color: Vec::new(),
            annotation_text: HashMap::new(),
            fonts: FontSizes::default(),
            font_family: default_font_family(),
            regression_line_width: default_line_width(),
            text_offsets: default_text_offsets(),
            x_label: default_x_label(),
            y_axis_label: default_y_axis_label(),
            x_limits: None,
            y_limits: None,
            theme: default_theme(),
        }
    }

    /// Append one normalized series for `metric`.
    pub fn with_metric(mut self, metric: &str, label: &str, marker: &str, color: &str) -> Self {
        self.raw_data_col.push(metric.to_string());
        self.y_col.push(normalized_name(metric));
        self.y_label.push(label.to_string());
        self.marker.push(marker.to_string());
        self.marker_color.push(color.to_string());
        self
    }
}

/// One plotted series after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    /// Metric column the series derives from (placement hints are keyed by it).
    pub source: String,
    /// Series name in the prepared table.
    pub column: String,
    pub label: String,
    pub marker: Marker,
    pub color: Color,
    pub annotation_text: String,
}

/// Validated chart configuration. Presentation is one list of styles, so lengths cannot disagree.
#[derive(Clone, Debug)]
pub struct ChartConfig {
    pub output_name: String,
    pub title: Option<String>,
    pub series: Vec<SeriesStyle>,
    pub fonts: FontSizes,
    pub font_family: String,
    pub line_width: f32,
    pub text_offset: f64,
    pub x_label: String,
    pub y_label: String,
    pub x_limits: Option<(f64, f64)>,
    pub y_limits: Option<(f64, f64)>,
    pub theme: ThemeKind,
}

impl TryFrom<ChartSettings> for ChartConfig {
    type Error = ConfigError;

    fn try_from(s: ChartSettings) -> Result<Self, ConfigError> {
        let chart = s.output_name.clone();
        let lengths = vec![
            ("raw_data_col", s.raw_data_col.len()),
            ("y_col", s.y_col.len()),
            ("y_label", s.y_label.len()),
            ("marker", s.marker.len()),
            ("marker_color", s.marker_color.len()),
        ];
        if lengths.iter().any(|&(_, n)| n != lengths[0].1) {
            return Err(ConfigError::LengthMismatch { chart, lengths });
        }
        if s.y_col.is_empty() {
            return Err(ConfigError::Empty { chart });
        }
        if !(0.0..1.0).contains(&s.text_offsets) {
            return Err(ConfigError::TextOffset { chart, offset: s.text_offsets });
        }
        let x_limits = s.x_limits.map(|l| check_limits(&chart, "x", l, false)).transpose()?;
        let y_limits = s.y_limits.map(|l| check_limits(&chart, "y", l, true)).transpose()?;
        let theme = ThemeKind::parse(&s.theme)
            .ok_or_else(|| ConfigError::UnknownTheme { chart: chart.clone(), name: s.theme.clone() })?;

        let mut series = Vec::with_capacity(s.y_col.len());
        for i in 0..s.y_col.len() {
            let marker = Marker::from_code(&s.marker[i])
                .ok_or_else(|| ConfigError::UnknownMarker { chart: chart.clone(), code: s.marker[i].clone() })?;
            let color = Color::parse(&s.marker_color[i])
                .ok_or_else(|| ConfigError::UnknownColor { chart: chart.clone(), name: s.marker_color[i].clone() })?;
            let column = s.y_col[i].clone();
            let annotation_text = s.annotation_text.get(&column).cloned().unwrap_or_else(|| "name".into());
            series.push(SeriesStyle {
                source: s.raw_data_col[i].clone(),
                column,
                label: s.y_label[i].clone(),
                marker,
                color,
                annotation_text,
            });
        }

        Ok(Self {
            output_name: s.output_name,
            title: s.title,
            series,
            fonts: s.fonts,
            font_family: s.font_family,
            line_width: s.regression_line_width,
            text_offset: s.text_offsets,
            x_label: s.x_label,
            y_label: s.y_axis_label,
            x_limits,
            y_limits,
            theme,
        })
    }
}

/// Finite, increasing, and positive on a log axis.
fn check_limits(chart: &str, axis: &'static str, [lo, hi]: [f64; 2], log: bool) -> Result<(f64, f64), ConfigError> {
    let reason = if !(lo.is_finite() && hi.is_finite()) {
        "must be finite"
    } else if lo >= hi {
        "must be increasing"
    } else if log && lo <= 0.0 {
        "must be positive on a log axis"
    } else {
        return Ok((lo, hi));
    };
    Err(ConfigError::AxisLimits { chart: chart.to_string(), axis, lo, hi, reason })
}

impl ChartConfig {
    /// Output file name without extension; shared by the PNG and the `.tex`.
    pub fn output_stem(&self) -> String {
        Path::new(&self.output_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_name.clone())
    }

    pub fn source_columns(&self) -> Vec<String> {
        self.series.iter().map(|s| s.source.clone()).collect()
    }

    pub fn series_columns(&self) -> Vec<String> {
        self.series.iter().map(|s| s.column.clone()).collect()
    }
}

/// A whole run: input table, output directory, and charts.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub data_path: PathBuf,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub schema: TableSchema,
    #[serde(default, rename = "chart")]
    pub charts: Vec<ChartSettings>,
}

fn default_delimiter() -> String { ",".into() }
fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl RunConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: RunConfig = toml::from_str(s)?;
        cfg.delimiter_byte()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(ConfigError::Delimiter(self.delimiter.clone())),
        }
    }

    /// Ordered union of every chart's raw metric columns.
    pub fn metric_columns(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for col in self.charts.iter().flat_map(|c| &c.raw_data_col) {
            if !out.contains(col) { out.push(col.clone()); }
        }
        out
    }

    /// The two memory-wall charts: FP32 and AI-dtype peak compute against memory bandwidth.
    pub fn builtin() -> Self {
        let base = |name: &str, title: &str| {
            let mut s = ChartSettings::new(name);
            s.title = Some(title.to_string());
            s.fonts = FontSizes { label: 14.0, tick: 12.0, title: 14.0, legend: 14.0, annotation: 10.0 };
            s.text_offsets = 0.1;
            s.annotation_text.insert(normalized_name("mem_bw_GBs"), "mem_type".into());
            s
        };
        let fp32 = base("memory_wall_problem_fp32.png", "Development of Peak Compute (only FP32) vs. Memory Bandwidth")
            .with_metric("mem_bw_GBs", "Memory Bandwidth (GB/s)", "D", "firebrick")
            .with_metric("fp32_peak_compute_Gflops", "FP32 Peak Compute (GFLOPS)", "o", "royalblue");
        let ai = base("memory_wall_problem.png", "Development of Peak Compute vs. Memory Bandwidth")
            .with_metric("mem_bw_GBs", "Memory Bandwidth (GB/s)", "D", "firebrick")
            .with_metric("ai_dtype_peak_compute_Gflops", "Peak Compute (GFLOPS)", "v", "mediumseagreen");

        Self {
            data_path: PathBuf::from("data/datacenter_chips.csv"),
            delimiter: default_delimiter(),
            output_dir: default_output_dir(),
            schema: TableSchema::default(),
            charts: vec![fp32, ai],
        }
    }
}
