// File: crates/scaling-cli/src/main.rs
// Summary: Loads the chip table once, then writes a PNG and a pgfplots figure for every configured chart.

use anyhow::{Context, Result};
use scaling_core::{load_table_from_path, run_chart, RenderOptions, RunConfig};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Config path from CLI, else the two built-in memory-wall charts
    let (run, base) = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            let run = RunConfig::from_path(&path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?;
            let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
            (run, base)
        }
        None => {
            info!("no config given; using built-in charts");
            (RunConfig::builtin(), PathBuf::new())
        }
    };

    // Relative paths in a config file are relative to that file
    let data_path = base.join(&run.data_path);
    let output_dir = base.join(&run.output_dir);
    let metrics = run.metric_columns();
    let table = load_table_from_path(&data_path, run.delimiter_byte()?, &run.schema, &metrics)
        .with_context(|| format!("failed to load table '{}'", data_path.display()))?;
    info!(path = %data_path.display(), rows = table.len(), metrics = metrics.len(), "loaded table");

    let opts = RenderOptions::default();
    let mut failed = Vec::new();
    for settings in &run.charts {
        match run_chart(&table, settings, &output_dir, &opts) {
            Ok(report) => {
                for err in &report.fit_failures {
                    warn!(chart = %report.name, "no trend: {err}");
                }
                if !report.is_complete() {
                    failed.push(report.name.clone());
                }
            }
            // Input problems are shared by every chart
            Err(scaling_core::Error::Input(err)) => {
                return Err(err).with_context(|| format!("chart '{}'", settings.output_name));
            }
            Err(err) => {
                error!(chart = %settings.output_name, "{err}");
                failed.push(settings.output_name.clone());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("{} of {} charts failed: {}", failed.len(), run.charts.len(), failed.join(", "));
    }
    info!(charts = run.charts.len(), dir = %output_dir.display(), "done");
    Ok(())
}
