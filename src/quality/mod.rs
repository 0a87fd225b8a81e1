//! Data-quality signals derived from summaries.
//!
//! Turns a [`DatasetSummary`](crate::DatasetSummary) and a
//! [`MissingTable`](crate::MissingTable) into a composite quality score and
//! boolean diagnostic flags. Everything here operates on the derived
//! reports only; the raw table is never re-scanned.
//!
//! # Example
//!
//! ```ignore
//! use explorar::{compute_quality_flags, missing_table, summarize_dataset};
//!
//! let summary = summarize_dataset(&table);
//! let missing = missing_table(&table);
//! let flags = compute_quality_flags(&summary, &missing)?;
//! println!("score: {:.2}", flags.quality_score);
//! ```

mod evaluator;


pub use evaluator::{
    compute_quality_flags, has_suspicious_id_duplicates, QualityEvaluator, QualityFlags,
};
