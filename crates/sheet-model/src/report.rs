//! Results of the three import gates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Category, Diagnostic};
use crate::row::Row;
use crate::schema::{ColumnHandling, ColumnSchema};

/// Outcome of comparing a file's header row with the schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderReconciliation {
    /// True when no required column is missing. Unrecognized headers never
    /// affect this.
    pub valid: bool,
    pub expected_columns: Vec<ColumnSchema>,
    /// Schema column names found in the file, in schema order.
    pub present: Vec<String>,
    pub missing_required: Vec<String>,
    /// File headers that match no schema column, in file order.
    pub unrecognized: Vec<String>,
    /// File headers that occur more than once.
    pub duplicates: Vec<String>,
}

impl HeaderReconciliation {
    pub fn has_unrecognized(&self) -> bool {
        !self.unrecognized.is_empty()
    }
}

/// User-facing explanation of schema drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftReport {
    pub message: String,
    pub details: Vec<String>,
}

/// Outcome of resolving undeclared columns under a [`ColumnHandling`] policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDriftResult {
    /// False only when extra columns exist and the policy rejects them.
    pub valid: bool,
    pub policy: ColumnHandling,
    pub extra_columns: Vec<String>,
    pub cleaned_rows: Vec<Row>,
    /// Present whenever extra columns were found, whatever the policy.
    pub report: Option<DriftReport>,
}

impl SchemaDriftResult {
    pub fn has_drift(&self) -> bool {
        !self.extra_columns.is_empty()
    }

    /// Whether the user should be shown a notice about stripped columns.
    pub fn needs_notice(&self) -> bool {
        self.has_drift() && self.policy != ColumnHandling::Ignore
    }
}

/// Outcome of validating every cell of every row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when there are no diagnostics.
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics bucketed by category. Every category has an entry.
    pub by_category: BTreeMap<Category, Vec<Diagnostic>>,
}

impl ValidationResult {
    /// Build a result from a diagnostic list, bucketing by category.
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let mut by_category: BTreeMap<Category, Vec<Diagnostic>> = Category::all()
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();
        for diagnostic in &diagnostics {
            by_category
                .entry(diagnostic.category)
                .or_default()
                .push(diagnostic.clone());
        }
        Self {
            valid: diagnostics.is_empty(),
            diagnostics,
            by_category,
        }
    }

    /// Diagnostics in one category.
    pub fn category(&self, category: Category) -> &[Diagnostic] {
        self.by_category
            .get(&category)
            .map_or(&[], Vec::as_slice)
    }

    pub fn count(&self, category: Category) -> usize {
        self.category(category).len()
    }

    /// Diagnostics for a display row number.
    pub fn for_row(&self, row: usize) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.row == row)
    }

    pub fn for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.column == column)
    }

    /// Number of distinct rows with at least one diagnostic.
    pub fn affected_rows(&self) -> usize {
        let mut rows: Vec<usize> = self.diagnostics.iter().map(|d| d.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::CellIssue;
    use crate::value::CellValue;

    #[test]
    fn test_empty_result_is_valid_with_all_buckets() {
        let result = ValidationResult::from_diagnostics(Vec::new());
        assert!(result.valid);
        assert_eq!(result.by_category.len(), Category::all().len());
        assert_eq!(result.count(Category::Missing), 0);
    }

    #[test]
    fn test_bucketing_and_filters() {
        let diagnostics = vec![
            CellIssue::format("a", "").at(0, "x", CellValue::Empty),
            CellIssue::invalid("b", "").at(0, "y", CellValue::Empty),
            CellIssue::invalid("c", "").at(2, "y", CellValue::Empty),
        ];
        let result = ValidationResult::from_diagnostics(diagnostics);
        assert!(!result.valid);
        assert_eq!(result.count(Category::Format), 1);
        assert_eq!(result.count(Category::Invalid), 2);
        assert_eq!(result.for_row(2).count(), 2);
        assert_eq!(result.for_column("y").count(), 2);
        assert_eq!(result.affected_rows(), 2);
    }
}
