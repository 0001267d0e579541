// File: crates/scaling-core/src/loader.rs
// Summary: CSV loading of the chip table into records (date text, fractional year, metrics, hints).

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::InputError;
use crate::record::{LabelPlacement, Record, RecordTable};

/// Column names the loader looks for.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableSchema {
    pub date_column: String,
    pub year_column: String,
    pub name_column: String,
    /// Suffix of the per-metric placement hint columns (`<metric><suffix>`).
    pub label_suffix: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            date_column: "date_de".into(),
            year_column: "date_num".into(),
            name_column: "name".into(),
            label_suffix: "_labels".into(),
        }
    }
}

/// Load a delimited table with a header row.
///
/// The date and year columns and every column in `metrics` are required.
/// Empty numeric cells are undefined; anything else that does not parse is an error.
pub fn load_table<R: Read>(
    reader: R,
    delimiter: u8,
    schema: &TableSchema,
    metrics: &[String],
) -> Result<RecordTable, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();
    let idx = |name: &str| headers.iter().position(|h| h == name);
    let require = |name: &str| idx(name).ok_or_else(|| InputError::MissingColumn(name.to_string()));

    let i_date = require(&schema.date_column)?;
    let i_year = require(&schema.year_column)?;
    let i_name = idx(&schema.name_column);
    let metric_cols = metrics
        .iter()
        .map(|m| -> Result<_, InputError> {
            Ok((m.as_str(), require(m)?, idx(&format!("{m}{}", schema.label_suffix))))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Everything not consumed above is carried as free text (e.g. `mem_type`).
    let mut consumed = vec![i_date, i_year];
    consumed.extend(i_name);
    for &(_, i, hint) in &metric_cols {
        consumed.push(i);
        consumed.extend(hint);
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| row.get(i).unwrap_or("");

        let year = parse_number(cell(i_year), line, &schema.year_column)?;
        let mut rec = Record::new(cell(i_date), year);
        if let Some(name) = i_name.map(cell).filter(|s| !s.is_empty()) {
            rec = rec.with_name(name);
        }
        for &(metric, i, hint) in &metric_cols {
            rec = rec.with_metric(metric, parse_number(cell(i), line, metric)?);
            if let Some(h) = hint {
                let raw = cell(h);
                if raw.is_empty() { continue; }
                let placement = LabelPlacement::parse(raw).ok_or_else(|| InputError::InvalidLabelHint {
                    line,
                    column: headers[h].clone(),
                    value: raw.to_string(),
                })?;
                rec = rec.with_label(metric, placement);
            }
        }
        for (i, header) in headers.iter().enumerate() {
            if consumed.contains(&i) || cell(i).is_empty() { continue; }
            rec = rec.with_text(header.as_str(), cell(i));
        }
        records.push(rec);
    }

    Ok(RecordTable::new(records, metrics.to_vec()))
}

/// Open `path` and load it with [`load_table`].
pub fn load_table_from_path(
    path: impl AsRef<Path>,
    delimiter: u8,
    schema: &TableSchema,
    metrics: &[String],
) -> Result<RecordTable, InputError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| InputError::Open { path: path.to_path_buf(), source })?;
    load_table(file, delimiter, schema, metrics)
}

fn parse_number(raw: &str, line: u64, column: &str) -> Result<Option<f64>, InputError> {
    if raw.is_empty() {
        return Ok(None);
    }
    let v = raw.parse::<f64>().map_err(|_| InputError::InvalidNumber {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })?;
    // NaN cells count as missing.
    Ok(v.is_finite().then_some(v))
}
