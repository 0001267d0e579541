// File: crates/scaling-core/src/pipeline.rs
// Summary: One chart end to end: validate, preprocess, fit, assemble, then write PNG and .tex.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::assemble::ChartSpec;
use crate::chart::{RasterRenderer, RenderOptions};
use crate::config::{ChartConfig, ChartSettings};
use crate::error::{Error, FitError, RenderError};
use crate::pgfplot::PgfExporter;
use crate::preprocess::preprocess;
use crate::record::RecordTable;
use crate::regression::fit_all;

/// Outcome of one chart run. Fit failures are isolated; each output succeeds or fails on its own.
#[derive(Debug)]
pub struct ChartReport {
    pub name: String,
    pub fit_failures: Vec<FitError>,
    pub raster: Result<PathBuf, RenderError>,
    pub vector: Result<PathBuf, RenderError>,
}

impl ChartReport {
    /// Both files were written.
    pub fn is_complete(&self) -> bool {
        self.raster.is_ok() && self.vector.is_ok()
    }
}

/// Preprocess `table` for `config`, fit each configured series, and assemble the chart.
pub fn build_chart_spec(table: &RecordTable, config: &ChartConfig) -> Result<(ChartSpec, Vec<FitError>), Error> {
    let prepared = preprocess(table, &config.source_columns())?;
    let fits = fit_all(&prepared, &config.series_columns());
    let spec = ChartSpec::assemble(&prepared, &fits, config)?;
    Ok((spec, fits.failures))
}

/// Validate `settings`, build the chart, and write `<stem>.png` and `<stem>.tex` into `output_dir`.
///
/// Nothing is written when validation or assembly fails.
pub fn run_chart(
    table: &RecordTable,
    settings: &ChartSettings,
    output_dir: impl AsRef<Path>,
    opts: &RenderOptions,
) -> Result<ChartReport, Error> {
    let config = ChartConfig::try_from(settings.clone())?;
    let (spec, fit_failures) = build_chart_spec(table, &config)?;
    let dir = output_dir.as_ref();

    let png_path = dir.join(format!("{}.png", spec.output_stem));
    let raster = RasterRenderer::new(opts.clone())
        .render_to_png(&spec, &png_path)
        .map(|()| png_path);
    let vector = PgfExporter::default().export_to_file(&spec, dir);

    for (kind, result) in [("raster", &raster), ("vector", &vector)] {
        match result {
            Ok(path) => info!(chart = %config.output_name, kind, path = %path.display(), "wrote output"),
            Err(err) => warn!(chart = %config.output_name, kind, "{err}"),
        }
    }
    info!(
        chart = %config.output_name,
        series = spec.entries.len(),
        trends = spec.entries.iter().filter(|e| e.trend.is_some()).count(),
        fit_failures = fit_failures.len(),
        "chart done"
    );

    Ok(ChartReport { name: config.output_name, fit_failures, raster, vector })
}
