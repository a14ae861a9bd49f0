//! Schema drift: columns in the data that the schema does not declare.

use std::collections::HashSet;

use sheet_model::{ColumnHandling, ColumnSchema, DriftReport, Row, SchemaDriftResult};
use tracing::{debug, info, warn};

/// Resolve columns outside the schema according to `policy`.
///
/// Extra columns are the keys of the first row that no schema column
/// declares. Rows are never dropped. Under [`ColumnHandling::Ignore`] and
/// [`ColumnHandling::Warn`] every undeclared key is pruned from every row,
/// including keys that only appear after the first row; those are logged
/// but not listed in `extra_columns`.
pub fn resolve_schema(
    rows: &[Row],
    schema: &[ColumnSchema],
    policy: ColumnHandling,
) -> SchemaDriftResult {
    let schema_names: HashSet<&str> = schema.iter().map(|column| column.name.as_str()).collect();
    let extra_columns: Vec<String> = rows
        .first()
        .map(|row| {
            row.keys()
                .filter(|key| !schema_names.contains(key))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let cleaned_rows: Vec<Row> = if policy.strips_extras() {
        rows.iter()
            .map(|row| {
                let mut row = row.clone();
                row.retain_keys(|key| schema_names.contains(key));
                row
            })
            .collect()
    } else {
        rows.to_vec()
    };

    let late_columns = later_extras(rows, &schema_names, &extra_columns);
    if !late_columns.is_empty() {
        if policy.strips_extras() {
            warn!(
                columns = ?late_columns,
                "removing undeclared columns that first appear after the first row"
            );
        } else {
            debug!(
                columns = ?late_columns,
                policy = policy.label(),
                "undeclared columns first appear after the first row"
            );
        }
    }

    if extra_columns.is_empty() {
        return SchemaDriftResult {
            valid: true,
            policy,
            extra_columns,
            cleaned_rows,
            report: None,
        };
    }

    match policy {
        ColumnHandling::Reject => warn!(extra = ?extra_columns, "rejecting undeclared columns"),
        ColumnHandling::Warn => warn!(extra = ?extra_columns, "removing undeclared columns"),
        ColumnHandling::Ignore | ColumnHandling::Include => {
            info!(extra = ?extra_columns, policy = policy.label(), "undeclared columns found");
        }
    }

    SchemaDriftResult {
        valid: policy != ColumnHandling::Reject,
        policy,
        report: Some(drift_report(&extra_columns, policy)),
        extra_columns,
        cleaned_rows,
    }
}

/// Undeclared keys of rows after the first that the first row lacks, in
/// order of first appearance.
fn later_extras(
    rows: &[Row],
    schema_names: &HashSet<&str>,
    extra_columns: &[String],
) -> Vec<String> {
    let mut late: Vec<String> = Vec::new();
    for row in rows.iter().skip(1) {
        for key in row.keys() {
            if schema_names.contains(key)
                || extra_columns.iter().any(|extra| extra == key)
                || late.iter().any(|seen| seen == key)
            {
                continue;
            }
            late.push(key.to_string());
        }
    }
    late
}

fn drift_report(extra_columns: &[String], policy: ColumnHandling) -> DriftReport {
    let count = extra_columns.len();
    let noun = if count == 1 { "column" } else { "columns" };
    let message = match policy {
        ColumnHandling::Reject => {
            format!("The file has {count} {noun} not in the schema; import is blocked")
        }
        ColumnHandling::Ignore | ColumnHandling::Warn => {
            format!("The file has {count} {noun} not in the schema; they were removed")
        }
        ColumnHandling::Include => {
            format!("The file has {count} {noun} not in the schema; they were kept")
        }
    };
    let action = match policy {
        ColumnHandling::Reject => "blocks the import",
        ColumnHandling::Ignore | ColumnHandling::Warn => "will be removed",
        ColumnHandling::Include => "will be kept as-is",
    };
    let details = extra_columns
        .iter()
        .map(|column| format!("Column \"{column}\" {action}"))
        .collect();
    DriftReport { message, details }
}
