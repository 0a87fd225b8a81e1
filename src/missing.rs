//! Per-column missingness report.
//!
//! [`missing_table`] makes its own pass over the table, independent of the
//! summarizer, but counts the same way: a cell is missing when it is an
//! Arrow null or a float `NaN`. For one table its counts always agree with
//! the corresponding [`ColumnSummary`](crate::ColumnSummary) values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// Missingness of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingEntry {
    /// Column name.
    pub column: String,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Missing cells as a share of the row count, 0.0 for zero-row tables.
    pub missing_share: f64,
}

/// Missingness report, one entry per column in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Look up an entry by column name.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    /// Entries in table column order.
    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.column.as_str())
    }

    /// Number of entries (= table columns).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the source table had no columns.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for MissingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<20} {:>13} {:>14}", "column", "missing_count", "missing_share")?;
        writeln!(f, "{}", "-".repeat(49))?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<20} {:>13} {:>14.4}",
                entry.column, entry.missing_count, entry.missing_share
            )?;
        }
        Ok(())
    }
}

/// Count missing cells per column.
///
/// Row order matches the table's column order. Shares are 0.0 when the
/// table has no rows; nothing here divides by zero.
#[allow(clippy::cast_precision_loss)]
pub fn missing_table(table: &Table) -> MissingTable {
    let schema = table.schema();
    let n_rows = table.num_rows();

    let entries = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let missing_count = table
                .column_text(index)
                .iter()
                .filter(|cell| cell.is_none())
                .count();
            let missing_share = if n_rows == 0 {
                0.0
            } else {
                missing_count as f64 / n_rows as f64
            };
            MissingEntry {
                column: field.name().clone(),
                missing_count,
                missing_share,
            }
        })
        .collect();

    MissingTable { entries }
}
