// File: crates/scaling-core/src/record.rs
// Summary: Input row model (one chip per record) and the loaded, unsorted record table.

use std::collections::HashMap;

/// Where a point annotation sits relative to its point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPlacement {
    Above,
    Below,
}

impl LabelPlacement {
    /// Parse a placement hint cell (`t`/`top`/`above`, `b`/`bottom`/`below`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "t" | "top" | "above" => Some(Self::Above),
            "b" | "bottom" | "below" => Some(Self::Below),
            _ => None,
        }
    }
}

/// One input row. Immutable once loaded; later stages derive from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Release date as written in the table (day.month.year).
    pub date: String,
    /// Release date as a fractional year, if the table provides one.
    pub year: Option<f64>,
    pub name: Option<String>,
    metrics: HashMap<String, f64>,
    text: HashMap<String, String>,
    labels: HashMap<String, LabelPlacement>,
}

impl Record {
    pub fn new(date: impl Into<String>, year: Option<f64>) -> Self {
        Self {
            date: date.into(),
            year,
            name: None,
            metrics: HashMap::new(),
            text: HashMap::new(),
            labels: HashMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a metric value. `None` and non-finite values leave the metric undefined.
    pub fn with_metric(mut self, metric: impl Into<String>, value: Option<f64>) -> Self {
        let metric = metric.into();
        match value.filter(|v| v.is_finite()) {
            Some(v) => { self.metrics.insert(metric, v); }
            None => { self.metrics.remove(&metric); }
        }
        self
    }

    pub fn with_text(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.text.insert(column.into(), value.into());
        self
    }

    pub fn with_label(mut self, metric: impl Into<String>, placement: LabelPlacement) -> Self {
        self.labels.insert(metric.into(), placement);
        self
    }

    pub fn metric(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    /// Free-text column value; `name` resolves to the display name.
    pub fn text(&self, column: &str) -> Option<&str> {
        match self.text.get(column) {
            Some(v) => Some(v.as_str()),
            None if column == "name" => self.name.as_deref(),
            None => None,
        }
    }

    /// Placement hint for annotations of `metric`'s series.
    pub fn label(&self, metric: &str) -> Option<LabelPlacement> {
        self.labels.get(metric).copied()
    }
}

/// Records in input order, plus the metric columns that were loaded.
#[derive(Clone, Debug, Default)]
pub struct RecordTable {
    records: Vec<Record>,
    metrics: Vec<String>,
}

impl RecordTable {
    pub fn new(records: Vec<Record>, metrics: Vec<String>) -> Self {
        Self { records, metrics }
    }

    pub fn records(&self) -> &[Record] { &self.records }
    pub fn metrics(&self) -> &[String] { &self.metrics }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
