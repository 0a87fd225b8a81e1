//! Flat, display-oriented view of a [`DatasetSummary`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{column::ColumnType, dataset::DatasetSummary};

/// One row of the flattened summary: everything about a column in flat
/// fields, numeric stats unpacked into optional cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Column name.
    pub name: String,
    /// Column classification.
    pub dtype: ColumnType,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Missing cells as a share of the row count.
    pub missing_share: f64,
    /// Number of distinct present values.
    pub distinct_count: usize,
    /// Minimum, for numeric columns.
    pub min: Option<f64>,
    /// Maximum, for numeric columns.
    pub max: Option<f64>,
    /// Mean, for numeric columns.
    pub mean: Option<f64>,
    /// Population standard deviation, for numeric columns.
    pub std: Option<f64>,
}

/// Flattened dataset summary, one row per column in table order.
///
/// Built for display and export only; no other computation in this crate
/// consumes it. `Display` renders an aligned text table, serde renders
/// JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    /// Rows in table column order.
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Number of rows (= summarized columns).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the source table had no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten a [`DatasetSummary`] into one row per column for printing.
pub fn flatten_summary_for_print(summary: &DatasetSummary) -> SummaryTable {
    let rows = summary
        .columns
        .iter()
        .map(|col| SummaryRow {
            name: col.name.clone(),
            dtype: col.dtype,
            missing_count: col.missing_count,
            missing_share: col.missing_share,
            distinct_count: col.distinct_count,
            min: col.stats.map(|s| s.min),
            max: col.stats.map(|s| s.max),
            mean: col.stats.map(|s| s.mean),
            std: col.stats.map(|s| s.std),
        })
        .collect();

    SummaryTable { rows }
}

fn opt_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20} {:<12} {:>8} {:>14} {:>9} {:>12} {:>12} {:>12} {:>12}",
            "name",
            "dtype",
            "missing",
            "missing_share",
            "distinct",
            "min",
            "max",
            "mean",
            "std"
        )?;
        writeln!(f, "{}", "-".repeat(118))?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} {:<12} {:>8} {:>14.4} {:>9} {:>12} {:>12} {:>12} {:>12}",
                row.name,
                row.dtype.name(),
                row.missing_count,
                row.missing_share,
                row.distinct_count,
                opt_cell(row.min),
                opt_cell(row.max),
                opt_cell(row.mean),
                opt_cell(row.std),
            )?;
        }
        Ok(())
    }
}
