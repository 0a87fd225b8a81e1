//! explorar - Exploratory Data Analysis in Pure Rust
//!
//! A small EDA toolkit for Arrow tables: descriptive summaries,
//! missingness, correlations, category frequencies, and data-quality
//! flags. Meant for the first look at a dataset, before deeper analysis.
//!
//! # Design Principles
//!
//! 1. **One pass, pure functions** - every analysis takes the table (or a
//!    prior report) and returns a fresh derived structure
//! 2. **Pure Rust** - no Python, no FFI
//! 3. **Ecosystem aligned** - Arrow `RecordBatch` in, Arrow 53 / Parquet 53
//! 4. **One definition of missing** - nulls and `NaN` normalize to a single
//!    missing marker before any statistic is computed
//!
//! # Quick Start
//!
//! ```no_run
//! use explorar::{flatten_summary_for_print, summarize_dataset, Table};
//!
//! let table = Table::from_csv("events.csv").unwrap();
//! let summary = summarize_dataset(&table);
//! println!("{}", flatten_summary_for_print(&summary));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::map_unwrap_or)]

pub mod categories;
/// CLI module for command-line interface
#[cfg(feature = "cli")]
pub mod cli;
pub mod correlation;
pub mod error;
pub mod missing;
pub mod quality;
pub mod summary;
pub mod table;

// Re-exports for convenience
// Re-export arrow types commonly needed
pub use arrow::{
    array::RecordBatch,
    datatypes::{Schema, SchemaRef},
};
pub use categories::{top_categories, CategoryCount, ColumnCategories, TopCategories};
pub use correlation::{correlation_matrix, CorrelationMatrix};
pub use error::{Error, Result};
pub use missing::{missing_table, MissingEntry, MissingTable};
pub use quality::{
    compute_quality_flags, has_suspicious_id_duplicates, QualityEvaluator, QualityFlags,
};
pub use summary::{
    flatten_summary_for_print, summarize_dataset, ColumnSummary, ColumnType, DatasetSummary,
    NumericSummary, SummaryRow, SummaryTable,
};
pub use table::{CsvOptions, JsonOptions, Table};
