//! Pairwise correlation among numeric columns.
//!
//! Pearson correlation with a pairwise-complete-observations policy: each
//! pair of columns is correlated over exactly the rows where both cells are
//! present. Columns are selected with the same classification rule the
//! summarizer uses, so a text column whose values all parse as numbers
//! participates too.

// Statistical computation
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{summary::ColumnType, table::Table};

/// Square correlation matrix over the table's numeric columns.
///
/// Entries are `None` when the coefficient is undefined: fewer than two
/// overlapping present observations, or no variance on the overlap. The
/// diagonal is `Some(1.0)` for columns with variance and `None` for
/// constant columns. The matrix is symmetric by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    fn empty() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Names of the correlated columns, on both axes.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns on each axis.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no correlations could be computed.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Entry by axis indices.
    ///
    /// Returns `None` for out-of-range indices as well as for undefined
    /// coefficients; use [`CorrelationMatrix::len`] to distinguish.
    pub fn entry(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Entry by column names.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.column_position(a)?;
        let j = self.column_position(b)?;
        self.entry(i, j)
    }

    fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(no correlations: fewer than two numeric columns with variance)");
        }
        write!(f, "{:<16}", "")?;
        for name in &self.columns {
            write!(f, " {:>12}", name)?;
        }
        writeln!(f)?;
        for (i, name) in self.columns.iter().enumerate() {
            write!(f, "{:<16}", name)?;
            for j in 0..self.columns.len() {
                match self.entry(i, j) {
                    Some(r) => write!(f, " {:>12.4}", r)?,
                    None => write!(f, " {:>12}", "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Compute the pairwise-complete Pearson correlation matrix.
///
/// Only numeric-classified columns participate. The result is empty when
/// fewer than two numeric columns exist, or when fewer than two of them
/// have any variance; a constant column inside a larger matrix keeps its
/// axis but all of its entries are undefined.
pub fn correlation_matrix(table: &Table) -> CorrelationMatrix {
    let schema = table.schema();

    let mut columns = Vec::new();
    let mut data: Vec<Vec<Option<f64>>> = Vec::new();
    for (index, field) in schema.fields().iter().enumerate() {
        let dtype = match field.data_type() {
            arrow::datatypes::DataType::Utf8 | arrow::datatypes::DataType::LargeUtf8 => {
                ColumnType::classify(field.data_type(), &table.column_text(index))
            }
            other => ColumnType::classify(other, &[]),
        };
        if dtype == ColumnType::Numeric {
            columns.push(field.name().clone());
            data.push(table.column_numeric(index));
        }
    }

    if columns.len() < 2 {
        return CorrelationMatrix::empty();
    }

    let with_variance = data.iter().filter(|col| has_variance(col)).count();
    if with_variance < 2 {
        return CorrelationMatrix::empty();
    }

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = if has_variance(&data[i]) { Some(1.0) } else { None };
        for j in (i + 1)..n {
            let r = pearson(&data[i], &data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix { columns, values }
}

/// True when the column has at least two distinct present finite values.
fn has_variance(cells: &[Option<f64>]) -> bool {
    let mut first: Option<f64> = None;
    for value in cells.iter().flatten().filter(|v| v.is_finite()) {
        match first {
            None => first = Some(*value),
            Some(seen) if (seen - *value).abs() > f64::EPSILON => return true,
            Some(_) => {}
        }
    }
    false
}

/// Pearson correlation over rows where both cells are present and finite.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::{
        array::{Float64Array, RecordBatch, StringArray},
        datatypes::{DataType, Field, Schema},
    };

    use super::*;

    fn numeric_table(columns: Vec<(&str, Vec<Option<f64>>)>) -> Table {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, true))
            .collect();
        let arrays: Vec<arrow::array::ArrayRef> = columns
            .into_iter()
            .map(|(_, values)| Arc::new(Float64Array::from(values)) as arrow::array::ArrayRef)
            .collect();
        let batch =
            RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).expect("batch");
        Table::from_batch(batch).expect("table")
    }

    #[test]
    fn test_perfect_linear_correlation() {
        let table = numeric_table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]),
            ("y", vec![Some(2.0), Some(4.0), Some(6.0), Some(8.0)]),
        ]);
        let corr = correlation_matrix(&table);

        assert_eq!(corr.len(), 2);
        assert!((corr.get("x", "y").expect("xy") - 1.0).abs() < 1e-9);
        assert!((corr.entry(0, 0).expect("diag") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_correlation() {
        let table = numeric_table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("y", vec![Some(-1.0), Some(-2.0), Some(-3.0)]),
        ]);
        let corr = correlation_matrix(&table);
        assert!((corr.get("x", "y").expect("xy") + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let table = numeric_table(vec![
            ("a", vec![Some(1.0), Some(5.0), Some(2.0), Some(9.0)]),
            ("b", vec![Some(3.0), Some(1.0), Some(8.0), Some(4.0)]),
            ("c", vec![Some(2.0), Some(2.5), Some(1.0), Some(7.0)]),
        ]);
        let corr = correlation_matrix(&table);

        for i in 0..corr.len() {
            for j in 0..corr.len() {
                assert_eq!(corr.entry(i, j), corr.entry(j, i));
            }
        }
    }

    #[test]
    fn test_fewer_than_two_numeric_columns_is_empty() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Float64, true),
            Field::new("label", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(1.0), Some(2.0)])),
                Arc::new(StringArray::from(vec![Some("a"), Some("b")])),
            ],
        )
        .expect("batch");
        let table = Table::from_batch(batch).expect("table");

        assert!(correlation_matrix(&table).is_empty());
    }

    #[test]
    fn test_fewer_than_two_columns_with_variance_is_empty() {
        let table = numeric_table(vec![
            ("flat", vec![Some(5.0), Some(5.0), Some(5.0)]),
            ("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
        ]);
        assert!(correlation_matrix(&table).is_empty());
    }

    #[test]
    fn test_constant_column_keeps_axis_with_undefined_entries() {
        let table = numeric_table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("y", vec![Some(4.0), Some(1.0), Some(2.0)]),
            ("flat", vec![Some(7.0), Some(7.0), Some(7.0)]),
        ]);
        let corr = correlation_matrix(&table);

        assert_eq!(corr.len(), 3);
        assert_eq!(corr.get("flat", "x"), None);
        assert_eq!(corr.entry(2, 2), None);
        assert!(corr.get("x", "y").is_some());
    }

    #[test]
    fn test_pairwise_complete_ignores_rows_with_missing() {
        // Last row of x is missing; y's wild value there must not matter.
        let table = numeric_table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0), None]),
            ("y", vec![Some(2.0), Some(4.0), Some(6.0), Some(-500.0)]),
        ]);
        let corr = correlation_matrix(&table);
        assert!((corr.get("x", "y").expect("xy") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_column_of_numbers_participates() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("x", DataType::Float64, true),
            Field::new("as_text", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![Some(1.0), Some(2.0), Some(3.0)])),
                Arc::new(StringArray::from(vec![Some("10"), Some("20"), Some("30")])),
            ],
        )
        .expect("batch");
        let table = Table::from_batch(batch).expect("table");

        let corr = correlation_matrix(&table);
        assert_eq!(corr.columns(), &["x".to_string(), "as_text".to_string()]);
        assert!((corr.get("x", "as_text").expect("r") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_marks_undefined_entries() {
        let table = numeric_table(vec![
            ("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
            ("y", vec![Some(4.0), Some(1.0), Some(2.0)]),
            ("flat", vec![Some(7.0), Some(7.0), Some(7.0)]),
        ]);
        let rendered = correlation_matrix(&table).to_string();
        assert!(rendered.contains("flat"));
        assert!(rendered.contains('-'));
    }
}
