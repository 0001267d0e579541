// File: crates/scaling-core/src/error.rs
// Summary: Error taxonomy for the pipeline: input, configuration, per-series fit, and output errors.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the input table. Always fatal for the whole run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: malformed date '{value}' (expected DD.MM.YYYY)")]
    MalformedDate { row: usize, value: String },
    #[error("line {line}: cannot parse '{value}' in column '{column}' as a number")]
    InvalidNumber { line: u64, column: String, value: String },
    #[error("line {line}: unknown label placement '{value}' in column '{column}'")]
    InvalidLabelHint { line: u64, column: String, value: String },
}

/// Problems with a chart configuration, detected before anything is rendered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chart '{chart}': presentation lists differ in length ({})", render_lengths(.lengths))]
    LengthMismatch { chart: String, lengths: Vec<(&'static str, usize)> },
    #[error("chart '{chart}': no series configured")]
    Empty { chart: String },
    #[error("chart '{chart}': unknown series '{series}'")]
    UnknownSeries { chart: String, series: String },
    #[error("chart '{chart}': unknown marker code '{code}'")]
    UnknownMarker { chart: String, code: String },
    #[error("chart '{chart}': unknown color '{name}'")]
    UnknownColor { chart: String, name: String },
    #[error("chart '{chart}': text offset {offset} outside [0, 1)")]
    TextOffset { chart: String, offset: f64 },
    #[error("chart '{chart}': {axis} limits [{lo}, {hi}] {reason}")]
    AxisLimits { chart: String, axis: &'static str, lo: f64, hi: f64, reason: &'static str },
    #[error("chart '{chart}': unknown theme '{name}'")]
    UnknownTheme { chart: String, name: String },
    #[error("delimiter must be a single ASCII character, got '{0}'")]
    Delimiter(String),
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

fn render_lengths(lengths: &[(&'static str, usize)]) -> String {
    lengths
        .iter()
        .map(|(name, len)| format!("{name}={len}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A trend that could not be fitted. Isolated to its series.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FitError {
    #[error("series '{series}': not present in the table")]
    UnknownSeries { series: String },
    #[error("series '{series}': need at least {required} usable points, found {found}")]
    InsufficientPoints { series: String, required: usize, found: usize },
    #[error("series '{series}': all usable points share the same date")]
    DegenerateDates { series: String },
    #[error("series '{series}': fit produced non-finite coefficients")]
    NonFinite { series: String },
}

impl FitError {
    pub fn series(&self) -> &str {
        match self {
            FitError::UnknownSeries { series }
            | FitError::InsufficientPoints { series, .. }
            | FitError::DegenerateDates { series }
            | FitError::NonFinite { series } => series,
        }
    }
}

/// Failure to produce one output file. Does not affect the other renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create raster surface {width}x{height}")]
    Surface { width: i32, height: i32 },
    #[error("failed to read back rendered pixels")]
    ReadPixels,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors of a chart run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
