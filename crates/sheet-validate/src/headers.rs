//! Header row reconciliation.

use std::collections::HashSet;

use sheet_model::{ColumnSchema, HeaderReconciliation};
use tracing::debug;

/// Compare a file's header row with the expected columns.
///
/// Names match exactly and case-sensitively. Only missing required columns
/// make the result invalid; unrecognized and duplicated headers are
/// informational.
pub fn reconcile_headers<S: AsRef<str>>(
    file_headers: &[S],
    schema: &[ColumnSchema],
) -> HeaderReconciliation {
    let headers: Vec<&str> = file_headers.iter().map(AsRef::as_ref).collect();
    let header_set: HashSet<&str> = headers.iter().copied().collect();
    let schema_names: HashSet<&str> = schema.iter().map(|column| column.name.as_str()).collect();

    let mut present = Vec::new();
    let mut missing_required = Vec::new();
    for column in schema {
        if header_set.contains(column.name.as_str()) {
            present.push(column.name.clone());
        } else if column.required {
            missing_required.push(column.name.clone());
        }
    }

    let mut seen = HashSet::new();
    let mut unrecognized = Vec::new();
    let mut duplicates = Vec::new();
    for header in &headers {
        if !seen.insert(*header) {
            if !duplicates.iter().any(|d: &String| d.as_str() == *header) {
                duplicates.push((*header).to_string());
            }
            continue;
        }
        if !schema_names.contains(header) {
            unrecognized.push((*header).to_string());
        }
    }

    debug!(
        present = present.len(),
        missing = missing_required.len(),
        unrecognized = unrecognized.len(),
        "reconciled headers"
    );

    HeaderReconciliation {
        valid: missing_required.is_empty(),
        expected_columns: schema.to_vec(),
        present,
        missing_required,
        unrecognized,
        duplicates,
    }
}
