//! Quality flags and the evaluator that derives them.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    missing::MissingTable,
    summary::DatasetSummary,
};

/// Composite quality verdict for one table.
///
/// `quality_score` is 1.0 for a table with nothing missing and decreases
/// with the average missing share; it reaches 0.0 only when every column is
/// entirely missing. The boolean flags call out specific defects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFlags {
    /// Normalized completeness score in [0, 1], higher is better.
    pub quality_score: f64,
    /// An identifier-like column contains duplicate values.
    pub suspicious_id_duplicates: bool,
    /// Some column's missing share is at or above the configured threshold.
    pub has_mostly_missing_columns: bool,
    /// Some column holds a single distinct value across multiple rows.
    pub has_constant_columns: bool,
}

impl QualityFlags {
    /// True when no diagnostic flag fired.
    pub fn is_clean(&self) -> bool {
        !self.suspicious_id_duplicates
            && !self.has_mostly_missing_columns
            && !self.has_constant_columns
    }
}

impl fmt::Display for QualityFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "quality_score:            {:.4}", self.quality_score)?;
        writeln!(f, "suspicious_id_duplicates: {}", self.suspicious_id_duplicates)?;
        writeln!(f, "mostly_missing_columns:   {}", self.has_mostly_missing_columns)?;
        writeln!(f, "constant_columns:         {}", self.has_constant_columns)?;
        Ok(())
    }
}

/// Derives [`QualityFlags`] from summary reports.
///
/// Carries the thresholds and naming patterns behind
/// [`compute_quality_flags`] and [`has_suspicious_id_duplicates`]; build
/// one directly to customize them.
#[derive(Debug, Clone)]
pub struct QualityEvaluator {
    mostly_missing_threshold: f64,
    id_names: Vec<String>,
    id_suffixes: Vec<String>,
}

impl Default for QualityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl QualityEvaluator {
    /// Create an evaluator with default thresholds.
    pub fn new() -> Self {
        Self {
            mostly_missing_threshold: 0.5,
            id_names: vec!["id".to_string()],
            id_suffixes: vec!["_id".to_string()],
        }
    }

    /// Set the missing-share threshold above which a column counts as
    /// mostly missing.
    #[must_use]
    pub fn mostly_missing_threshold(mut self, threshold: f64) -> Self {
        self.mostly_missing_threshold = threshold;
        self
    }

    /// Add an exact column name treated as an identifier.
    #[must_use]
    pub fn id_name(mut self, name: impl Into<String>) -> Self {
        self.id_names.push(name.into().to_ascii_lowercase());
        self
    }

    /// Add a column-name suffix treated as marking an identifier.
    #[must_use]
    pub fn id_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.id_suffixes.push(suffix.into().to_ascii_lowercase());
        self
    }

    /// True when a column name looks like an identifier.
    ///
    /// Matching is ASCII case-insensitive: the name equals one of the
    /// configured identifier names or ends with one of the suffixes.
    pub fn is_identifier_like(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.id_names.iter().any(|n| *n == name)
            || self.id_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    /// True when at least one identifier-like column has duplicates among
    /// its present values.
    ///
    /// Works entirely from the summary's cached counts; the raw table is
    /// not consulted. Missing cells do not count as duplicates.
    pub fn has_suspicious_id_duplicates(&self, summary: &DatasetSummary) -> bool {
        summary.columns.iter().any(|col| {
            self.is_identifier_like(&col.name)
                && col.distinct_count < col.present_count(summary.n_rows)
        })
    }

    /// Derive quality flags from a summary and a missing table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when the mostly-missing threshold
    /// is outside [0, 1], and [`Error::ReportMismatch`] when the missing
    /// table's columns are not exactly the summary's columns.
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(
        &self,
        summary: &DatasetSummary,
        missing: &MissingTable,
    ) -> Result<QualityFlags> {
        if !(0.0..=1.0).contains(&self.mostly_missing_threshold) {
            return Err(Error::invalid_config(format!(
                "mostly_missing_threshold must be within [0, 1], got {}",
                self.mostly_missing_threshold
            )));
        }
        check_same_columns(summary, missing)?;

        let quality_score = if summary.columns.is_empty() {
            1.0
        } else {
            let mean_missing = summary
                .columns
                .iter()
                .map(|c| c.missing_share)
                .sum::<f64>()
                / summary.columns.len() as f64;
            (1.0 - mean_missing).clamp(0.0, 1.0)
        };

        let has_mostly_missing_columns = summary
            .columns
            .iter()
            .any(|c| summary.n_rows > 0 && c.missing_share >= self.mostly_missing_threshold);

        let has_constant_columns = summary
            .columns
            .iter()
            .any(|c| c.distinct_count == 1 && c.present_count(summary.n_rows) > 1);

        Ok(QualityFlags {
            quality_score,
            suspicious_id_duplicates: self.has_suspicious_id_duplicates(summary),
            has_mostly_missing_columns,
            has_constant_columns,
        })
    }
}

/// The missing table must describe exactly the summarized columns.
fn check_same_columns(summary: &DatasetSummary, missing: &MissingTable) -> Result<()> {
    let summary_names: HashSet<&str> = summary.column_names().collect();
    let missing_names: HashSet<&str> = missing.column_names().collect();

    if summary_names == missing_names && summary.columns.len() == missing.len() {
        return Ok(());
    }

    let mut absent: Vec<&str> = summary_names.difference(&missing_names).copied().collect();
    let mut unexpected: Vec<&str> = missing_names.difference(&summary_names).copied().collect();
    absent.sort_unstable();
    unexpected.sort_unstable();

    Err(Error::report_mismatch(format!(
        "missing table disagrees with summary (absent: [{}], unexpected: [{}])",
        absent.join(", "),
        unexpected.join(", ")
    )))
}

/// Derive quality flags with default thresholds.
///
/// # Errors
///
/// Returns [`Error::ReportMismatch`] when the missing table's columns are
/// not exactly the summary's columns.
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
) -> Result<QualityFlags> {
    QualityEvaluator::new().evaluate(summary, missing)
}

/// True when an identifier-like column (named `id` or `*_id`) has duplicate
/// present values.
pub fn has_suspicious_id_duplicates(summary: &DatasetSummary) -> bool {
    QualityEvaluator::new().has_suspicious_id_duplicates(summary)
}
