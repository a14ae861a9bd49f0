//! Row and cell validation.

use std::collections::HashMap;

use sheet_model::{
    Category, CellIssue, CellValue, ColumnSchema, Row, TypeConfig, TypeTag, ValidationResult,
};
use tracing::{debug, debug_span};

use crate::checks::{check_type_with, quoted};
use crate::pattern::PatternSet;
use crate::rules::evaluate_rule_with;

/// Validate every cell of every row against the schema.
///
/// Never fails on data: each problem becomes a
/// [`Diagnostic`](sheet_model::Diagnostic) and every row
/// and column is evaluated. Keys with no schema column are skipped; drift is
/// resolved before this runs.
pub fn validate(rows: &[Row], schema: &[ColumnSchema], config: &TypeConfig) -> ValidationResult {
    let span = debug_span!("validate", rows = rows.len(), columns = schema.len());
    let _enter = span.enter();

    let columns = column_index(schema);
    let patterns = PatternSet::new();
    let mut diagnostics = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        for column in schema.iter().filter(|column| column.required) {
            let value = row.value(&column.name);
            if value.is_empty() {
                diagnostics.push(missing(column).at(index, &column.name, value.clone()));
            }
        }

        for (key, value) in row.iter() {
            let Some(column) = columns.get(key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            for issue in check_cell(&patterns, value, column, config) {
                diagnostics.push(issue.at(index, key, value.clone()));
            }
        }
    }

    let result = ValidationResult::from_diagnostics(diagnostics);
    debug!(
        diagnostics = result.diagnostics.len(),
        affected_rows = result.affected_rows(),
        "validation complete"
    );
    result
}

/// Type check, column format, then every rule. All failures are kept.
fn check_cell(
    patterns: &PatternSet,
    value: &CellValue,
    column: &ColumnSchema,
    config: &TypeConfig,
) -> Vec<CellIssue> {
    let mut issues = Vec::new();
    issues.extend(check_type_with(patterns, value, column.type_tag, config));
    issues.extend(check_format(patterns, value, column));
    issues.extend(column.validation_rules.iter().filter_map(|rule| {
        evaluate_rule_with(patterns, value, rule, column.type_tag, config)
    }));
    issues
}

/// Column-level format pattern. Only text columns are checked.
fn check_format(
    patterns: &PatternSet,
    value: &CellValue,
    column: &ColumnSchema,
) -> Option<CellIssue> {
    let format = column.format.as_deref().filter(|f| !f.trim().is_empty())?;
    if column.type_tag != TypeTag::Text {
        return None;
    }
    let text = value.as_str()?;
    let context = format!("format of column {}", column.name);
    (!patterns.is_match(format, text, &context)).then(|| {
        CellIssue::format(
            format!(
                "{} {} does not match the expected format",
                column.label(),
                quoted(value)
            ),
            format!("Enter a value matching {format}"),
        )
    })
}

fn missing(column: &ColumnSchema) -> CellIssue {
    let label = column.label();
    CellIssue::new(
        Category::Missing,
        format!("{label} is required"),
        format!("Add a value for {label}"),
    )
}

/// First declaration wins when a name is repeated.
fn column_index(schema: &[ColumnSchema]) -> HashMap<&str, &ColumnSchema> {
    let mut index = HashMap::with_capacity(schema.len());
    for column in schema {
        index.entry(column.name.as_str()).or_insert(column);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::Rule;

    #[test]
    fn test_required_and_type_failures_accumulate() {
        let schema = vec![
            ColumnSchema::new("name", TypeTag::Text).required(),
            ColumnSchema::new("age", TypeTag::Number).with_rule(Rule::min(18.0)),
        ];
        let rows = vec![
            Row::from_iter([("name", ""), ("age", "abc")]),
            Row::from_iter([("name", "Ada"), ("age", "12")]),
        ];
        let result = validate(&rows, &schema, &TypeConfig::default());

        assert!(!result.valid);
        assert_eq!(result.diagnostics.len(), 3);
        assert_eq!(result.count(Category::Missing), 1);
        assert_eq!(result.count(Category::Format), 1);
        assert_eq!(result.count(Category::Invalid), 1);
        assert_eq!(result.for_row(3).count(), 1);
    }

    #[test]
    fn test_absent_required_column_is_missing() {
        let schema = vec![ColumnSchema::new("email", TypeTag::Email).required()];
        let rows = vec![Row::from_iter([("other", "x")])];
        let result = validate(&rows, &schema, &TypeConfig::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].value, CellValue::Empty);
    }

    #[test]
    fn test_format_pattern_applies_to_text_only() {
        let schema = vec![
            ColumnSchema::new("code", TypeTag::Text).with_format(r"^[A-Z]{3}$"),
            ColumnSchema::new("count", TypeTag::Number).with_format(r"^[A-Z]{3}$"),
        ];
        let rows = vec![Row::from_iter([("code", "ab"), ("count", "4")])];
        let result = validate(&rows, &schema, &TypeConfig::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].column, "code");
        assert_eq!(result.diagnostics[0].category, Category::Format);
    }

    #[test]
    fn test_missing_uses_display_name() {
        let schema = vec![
            ColumnSchema::new("dob", TypeTag::Date)
                .required()
                .with_display_name("Date of Birth"),
        ];
        let rows = vec![Row::from_iter([("dob", "  ")])];
        let result = validate(&rows, &schema, &TypeConfig::default());
        assert_eq!(result.diagnostics[0].message, "Date of Birth is required");
        assert_eq!(result.diagnostics[0].suggestion, "Add a value for Date of Birth");
    }
}
