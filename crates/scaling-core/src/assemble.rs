// File: crates/scaling-core/src/assemble.rs
// Summary: Renderer-agnostic chart description (ChartSpec) built from series, trends, and styles.
// Notes:
// - Both renderers read only this description; anything they must agree on
//   (points, curve domain, annotation anchors, legend order) is decided here.

use crate::axis::Axis;
use crate::config::{ChartConfig, FontSizes};
use crate::error::ConfigError;
use crate::grid::linspace;
use crate::preprocess::PreparedTable;
use crate::record::LabelPlacement;
use crate::regression::{Fits, RegressionLine};
use crate::series::Series;
use crate::style::{Color, DashStyle, Marker};
use crate::theme::ThemeKind;
use crate::view::ViewState;

/// Samples per trend curve, in both renderers.
pub const TREND_SAMPLES: usize = 200;

/// Text attached to one plotted point.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Table row of the annotated point.
    pub row: usize,
    pub x: f64,
    /// Value of the point itself.
    pub y: f64,
    /// Value at which the text is anchored (offset by a fraction of `y`).
    pub text_y: f64,
    pub text: String,
    pub placement: LabelPlacement,
}

/// A fitted curve and the year range it is drawn over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trend {
    pub line: RegressionLine,
    pub x_min: f64,
    pub x_max: f64,
}

impl Trend {
    /// `n` evenly spaced (year, value) samples over the domain.
    pub fn sample(&self, n: usize) -> Vec<(f64, f64)> {
        linspace(self.x_min, self.x_max, n)
            .into_iter()
            .map(|x| (x, self.line.predict(x)))
            .collect()
    }
}

/// One plotted series with everything needed to draw it.
#[derive(Clone, Debug)]
pub struct SeriesEntry {
    pub series: Series,
    /// Metric column the series derives from.
    pub source: String,
    pub label: String,
    pub marker: Marker,
    pub color: Color,
    pub dash: DashStyle,
    /// `None` when the fit failed; points are still drawn.
    pub trend: Option<Trend>,
    pub annotations: Vec<Annotation>,
}

impl SeriesEntry {
    /// Points to plot, in row order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.series.points().map(|(_, p)| p).collect()
    }
}

/// What a legend row stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LegendItem {
    Points { entry: usize },
    Trend { entry: usize, line: RegressionLine },
}

/// Everything both renderers need. Built once, read-only afterwards.
#[derive(Clone, Debug)]
pub struct ChartSpec {
    pub title: Option<String>,
    pub output_stem: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub entries: Vec<SeriesEntry>,
    pub fonts: FontSizes,
    pub font_family: String,
    pub line_width: f32,
    pub theme: ThemeKind,
}

impl ChartSpec {
    /// Combine the prepared table, fitted trends, and validated presentation.
    ///
    /// Entry order follows the configuration. A series missing from the table is a
    /// configuration error; a series without a trend is kept without its curve.
    pub fn assemble(table: &PreparedTable, fits: &Fits, config: &ChartConfig) -> Result<Self, ConfigError> {
        let mut entries = Vec::with_capacity(config.series.len());
        for style in &config.series {
            let series = table.series(&style.column).ok_or_else(|| ConfigError::UnknownSeries {
                chart: config.output_name.clone(),
                series: style.column.clone(),
            })?;

            let trend = match (fits.line(&style.column), series.x_domain()) {
                (Some(line), Some((x_min, x_max))) => Some(Trend { line, x_min, x_max }),
                _ => None,
            };

            let annotations = series
                .points()
                .filter_map(|(row, (x, y))| {
                    let rec = &table.records()[row];
                    let placement = rec.label(&style.source)?;
                    let text = rec.text(&style.annotation_text).filter(|t| !t.is_empty())?;
                    let text_y = match placement {
                        LabelPlacement::Above => y * (1.0 + config.text_offset),
                        LabelPlacement::Below => y * (1.0 - config.text_offset),
                    };
                    Some(Annotation { row, x, y, text_y, text: text.to_string(), placement })
                })
                .collect();

            entries.push(SeriesEntry {
                series: series.clone(),
                source: style.source.clone(),
                label: style.label.clone(),
                marker: style.marker,
                color: style.color,
                dash: DashStyle::for_color(style.color),
                trend,
                annotations,
            });
        }

        let view = ViewState::covering(entries.iter().flat_map(|e| {
            let ends = e.trend.map(|t| [(t.x_min, t.line.predict(t.x_min)), (t.x_max, t.line.predict(t.x_max))]);
            e.points().into_iter().chain(ends.into_iter().flatten())
        }))
        .with_limits(config.x_limits, config.y_limits);

        Ok(Self {
            title: config.title.clone(),
            output_stem: config.output_stem(),
            x_axis: Axis::new(config.x_label.as_str(), view.x_min, view.x_max),
            y_axis: Axis::log10(config.y_label.as_str(), view.y_min, view.y_max),
            entries,
            fonts: config.fonts,
            font_family: config.font_family.clone(),
            line_width: config.line_width,
            theme: config.theme,
        })
    }

    /// Legend rows: each series' points, then its trend when one was fitted.
    pub fn legend(&self) -> Vec<LegendItem> {
        let mut items = Vec::with_capacity(self.entries.len() * 2);
        for (entry, e) in self.entries.iter().enumerate() {
            items.push(LegendItem::Points { entry });
            if let Some(t) = e.trend {
                items.push(LegendItem::Trend { entry, line: t.line });
            }
        }
        items
    }
}
