// File: crates/scaling-core/src/preprocess.rs
// Summary: Sort records by release date, parse dates, derive raw and normalized series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::InputError;
use crate::record::{Record, RecordTable};
use crate::series::{Sample, Series};

/// Day.month.year, e.g. `14.05.2020`.
pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const NORMALIZED_PREFIX: &str = "norm_";

/// Name of the normalized counterpart of `metric`.
pub fn normalized_name(metric: &str) -> String {
    format!("{NORMALIZED_PREFIX}{metric}")
}

/// Sorted records plus every series derived from them.
#[derive(Clone, Debug)]
pub struct PreparedTable {
    records: Vec<Record>,
    dates: Vec<NaiveDate>,
    series: BTreeMap<String, Series>,
    divisors: BTreeMap<String, Option<f64>>,
}

impl PreparedTable {
    pub fn records(&self) -> &[Record] { &self.records }
    pub fn dates(&self) -> &[NaiveDate] { &self.dates }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.get(name)
    }

    /// Normalization divisor used for `metric` (`None` when normalization is undefined).
    pub fn divisor(&self, metric: &str) -> Option<f64> {
        self.divisors.get(metric).copied().flatten()
    }
}

/// Sort by date (stable), parse dates, and add `norm_<metric>` for each of `normalize`.
///
/// A date that does not match [`DATE_FORMAT`] is fatal. Rows are never dropped.
pub fn preprocess(table: &RecordTable, normalize: &[String]) -> Result<PreparedTable, InputError> {
    let mut rows = table
        .records()
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<_, InputError> {
            let date = NaiveDate::parse_from_str(rec.date.trim(), DATE_FORMAT).map_err(|_| {
                InputError::MalformedDate { row: i + 1, value: rec.date.clone() }
            })?;
            Ok((date, rec))
        })
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort_by_key(|&(date, _)| date);

    let dates = rows.iter().map(|&(d, _)| d).collect::<Vec<_>>();
    let records = rows.into_iter().map(|(_, r)| r.clone()).collect::<Vec<_>>();

    let mut series = BTreeMap::new();
    let mut divisors = BTreeMap::new();
    let mut metrics = table.metrics().to_vec();
    for m in normalize {
        if !metrics.contains(m) { metrics.push(m.clone()); }
    }

    for metric in &metrics {
        let samples = records.iter().map(|r| Sample::new(r.year, r.metric(metric))).collect();
        let raw = Series::new(metric.as_str(), samples);

        if normalize.contains(metric) {
            let divisor = first_defined(&records, metric);
            if divisor == Some(0.0) {
                warn!(metric = %metric, "earliest value is zero; normalization undefined");
            }
            let divisor = divisor.filter(|&v| v != 0.0);
            let norm = raw.map_values(normalized_name(metric), |v| divisor.map(|d| v / d));
            series.insert(norm.name.clone(), norm);
            divisors.insert(metric.clone(), divisor);
        }
        series.insert(raw.name.clone(), raw);
    }

    Ok(PreparedTable { records, dates, series, divisors })
}

/// Value on the earliest row (post-sort) where `metric` is defined.
fn first_defined(records: &[Record], metric: &str) -> Option<f64> {
    records.iter().find_map(|r| r.metric(metric))
}
