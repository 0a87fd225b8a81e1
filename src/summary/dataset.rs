//! Dataset-level summary.

use serde::{Deserialize, Serialize};

use super::column::{summarize_column, ColumnSummary, ColumnType};
use crate::table::Table;

/// Summary of a whole table: counts plus one [`ColumnSummary`] per column.
///
/// Column order matches the table's column order, and `n_cols` always
/// equals `columns.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of rows in the table.
    pub n_rows: usize,
    /// Number of columns in the table.
    pub n_cols: usize,
    /// Per-column summaries in table order.
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Names of the summarized columns, in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Summarize every column of a table.
///
/// Each column is classified once (numeric / categorical / datetime /
/// other), its missing cells counted, its distinct present values counted,
/// and, for numeric columns with at least one present value, min/max/mean/
/// std computed. Zero-row and zero-column tables produce a summary with the
/// respective count at zero; missing shares are defined as 0.0 when there
/// are no rows.
pub fn summarize_dataset(table: &Table) -> DatasetSummary {
    let schema = table.schema();
    let n_rows = table.num_rows();

    let columns: Vec<ColumnSummary> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let text = table.column_text(index);
            let dtype = ColumnType::classify(field.data_type(), &text);
            let numeric = if dtype == ColumnType::Numeric {
                Some(table.column_numeric(index))
            } else {
                None
            };
            summarize_column(field.name(), dtype, &text, numeric, n_rows)
        })
        .collect();

    DatasetSummary {
        n_rows,
        n_cols: columns.len(),
        columns,
    }
}
