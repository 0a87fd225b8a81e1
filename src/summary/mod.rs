//! Dataset and column summarization.
//!
//! [`summarize_dataset`] walks a [`Table`](crate::Table) once and produces a
//! [`DatasetSummary`]: row/column counts plus one [`ColumnSummary`] per
//! column in table order. Column types are decided here, once, and cached in
//! the summary so every downstream consumer (correlation, categories,
//! quality flags) shares the same classification.
//!
//! # Example
//!
//! ```ignore
//! use explorar::{summarize_dataset, flatten_summary_for_print};
//!
//! let summary = summarize_dataset(&table);
//! println!("{}", flatten_summary_for_print(&summary));
//! ```

// Statistical computation and internal methods
#![allow(clippy::cast_precision_loss)]

mod column;
mod dataset;
mod flatten;


pub use column::{ColumnSummary, ColumnType, NumericSummary};
pub use dataset::{summarize_dataset, DatasetSummary};
pub use flatten::{flatten_summary_for_print, SummaryRow, SummaryTable};
