//! Per-column classification and descriptive statistics.

use std::{collections::HashSet, fmt};

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

/// Closed classification of a column's content.
///
/// Decided once per column during summarization and cached in
/// [`ColumnSummary`]; consumers never re-infer types ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numbers, including text columns where every present value parses as one.
    Numeric,
    /// Free text, labels, and booleans.
    Categorical,
    /// Dates and timestamps, native or textual.
    Datetime,
    /// Anything else (nested, binary, ...).
    Other,
}

impl ColumnType {
    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
            Self::Datetime => "datetime",
            Self::Other => "other",
        }
    }

    /// Classify a column from its Arrow type and its normalized cells.
    ///
    /// Native Arrow types decide directly. Text columns are inspected: if
    /// every present value parses as a number the column is numeric, if
    /// every present value parses as a timestamp it is datetime, otherwise
    /// it is categorical. A text column with no present values is
    /// categorical.
    pub(crate) fn classify(data_type: &DataType, cells: &[Option<String>]) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => Self::Numeric,
            DataType::Date32
            | DataType::Date64
            | DataType::Timestamp(_, _)
            | DataType::Time32(_)
            | DataType::Time64(_) => Self::Datetime,
            DataType::Boolean => Self::Categorical,
            DataType::Utf8 | DataType::LargeUtf8 => classify_text(cells),
            _ => Self::Other,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn classify_text(cells: &[Option<String>]) -> ColumnType {
    if cells.iter().flatten().next().is_none() {
        return ColumnType::Categorical;
    }
    if cells
        .iter()
        .flatten()
        .all(|v| v.trim().parse::<f64>().is_ok())
    {
        return ColumnType::Numeric;
    }
    if cells.iter().flatten().all(|v| parses_as_datetime(v)) {
        return ColumnType::Datetime;
    }
    ColumnType::Categorical
}

/// Timestamp formats accepted for textual datetime columns.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

fn parses_as_datetime(value: &str) -> bool {
    let value = value.trim();
    if chrono::DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|fmt| chrono::NaiveDateTime::parse_from_str(value, fmt).is_ok())
}

/// Descriptive statistics for a numeric column.
///
/// Computed over present, finite values only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Summary of a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Column name, unique within the table.
    pub name: String,
    /// Cached column classification.
    pub dtype: ColumnType,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Missing cells as a share of the row count, 0.0 for zero-row tables.
    pub missing_share: f64,
    /// Number of distinct present values.
    pub distinct_count: usize,
    /// Descriptive statistics, present for numeric columns with at least
    /// one present value.
    pub stats: Option<NumericSummary>,
}

impl ColumnSummary {
    /// Number of present (non-missing) cells, given the table row count.
    pub fn present_count(&self, n_rows: usize) -> usize {
        n_rows.saturating_sub(self.missing_count)
    }
}

/// Build the summary for one column from its normalized cells.
pub(crate) fn summarize_column(
    name: &str,
    dtype: ColumnType,
    text: &[Option<String>],
    numeric: Option<Vec<Option<f64>>>,
    n_rows: usize,
) -> ColumnSummary {
    let missing_count = text.iter().filter(|c| c.is_none()).count();
    let missing_share = if n_rows == 0 {
        0.0
    } else {
        missing_count as f64 / n_rows as f64
    };

    let distinct: HashSet<&str> = text.iter().flatten().map(String::as_str).collect();

    let stats = numeric.as_deref().and_then(numeric_summary);

    ColumnSummary {
        name: name.to_string(),
        dtype,
        missing_count,
        missing_share,
        distinct_count: distinct.len(),
        stats,
    }
}

/// Min/max/mean/std over the present finite values, `None` when there are none.
pub(crate) fn numeric_summary(cells: &[Option<f64>]) -> Option<NumericSummary> {
    let values: Vec<f64> = cells.iter().flatten().copied().filter(|v| v.is_finite()).collect();
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(NumericSummary {
        min,
        max,
        mean,
        std: variance.sqrt(),
    })
}
