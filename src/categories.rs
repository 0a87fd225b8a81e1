//! Most-frequent-value tables for categorical columns.

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{summary::ColumnType, table::Table};

/// One distinct value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The value, in its canonical text form.
    pub value: String,
    /// Number of occurrences.
    pub count: usize,
}

/// Frequency table for one categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCategories {
    /// Column name.
    pub column: String,
    /// Most frequent values, descending by count, at most `top_k` rows.
    pub categories: Vec<CategoryCount>,
}

/// Top-category tables, one per analyzed column in table column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategories {
    tables: Vec<ColumnCategories>,
}

impl TopCategories {
    /// Frequency rows for a column, if it was analyzed.
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.tables
            .iter()
            .find(|t| t.column == column)
            .map(|t| t.categories.as_slice())
    }

    /// Per-column tables in table column order.
    pub fn tables(&self) -> &[ColumnCategories] {
        &self.tables
    }

    /// Number of analyzed columns.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no column qualified.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl fmt::Display for TopCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            writeln!(f, "{}", table.column)?;
            for row in &table.categories {
                writeln!(f, "  {:<24} {:>8}", row.value, row.count)?;
            }
        }
        Ok(())
    }
}

/// Build frequency tables for the table's categorical columns.
///
/// The first `max_columns` categorical columns in table order are analyzed;
/// each table holds at most `top_k` rows, descending by count, ties broken
/// by first appearance in the table. Missing cells are never counted as a
/// category. A `top_k` of zero yields an empty result.
pub fn top_categories(table: &Table, max_columns: usize, top_k: usize) -> TopCategories {
    let mut tables = Vec::new();
    if top_k == 0 || max_columns == 0 {
        return TopCategories { tables };
    }

    let schema = table.schema();
    for (index, field) in schema.fields().iter().enumerate() {
        if tables.len() == max_columns {
            break;
        }
        let text = table.column_text(index);
        if ColumnType::classify(field.data_type(), &text) != ColumnType::Categorical {
            continue;
        }
        tables.push(ColumnCategories {
            column: field.name().clone(),
            categories: count_values(&text, top_k),
        });
    }

    TopCategories { tables }
}

/// Count present values, order by descending count then first appearance.
fn count_values(cells: &[Option<String>], top_k: usize) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, cell) in cells.iter().enumerate() {
        if let Some(value) = cell {
            let entry = counts.entry(value.as_str()).or_insert((0, row));
            entry.0 += 1;
        }
    }

    let mut rows: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    rows.truncate(top_k);

    rows.into_iter()
        .map(|(value, (count, _))| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}
