// File: crates/scaling-core/src/lib.rs
// Summary: Core library entry point; exports the normalization, trend fitting, and rendering API.

pub mod error;
pub mod record;
pub mod loader;
pub mod series;
pub mod preprocess;
pub mod regression;
pub mod style;
pub mod config;
pub mod assemble;
pub mod chart;
pub mod pgfplot;
pub mod pipeline;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod text;

pub use error::{ConfigError, Error, FitError, InputError, RenderError};
pub use record::{LabelPlacement, Record, RecordTable};
pub use loader::{load_table, load_table_from_path, TableSchema};
pub use series::{Sample, Series};
pub use preprocess::{normalized_name, preprocess, PreparedTable};
pub use regression::{fit_all, fit_series, FittedTrend, Fits, RegressionLine};
pub use style::{Color, DashStyle, Marker};
pub use config::{ChartConfig, ChartSettings, FontSizes, RunConfig};
pub use assemble::{ChartSpec, LegendItem, SeriesEntry};
pub use chart::{Frame, RasterRenderer, RenderOptions};
pub use pgfplot::{PgfExporter, PgfOptions};
pub use pipeline::{build_chart_spec, run_chart, ChartReport};
pub use axis::Axis;
pub use view::ViewState;
pub use theme::{Theme, ThemeKind};
pub use text::TextShaper;
