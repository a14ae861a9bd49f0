//! Tests for the header, drift and handling gates.

use sheet_model::{
    CellValue, ColumnHandling, ColumnSchema, InvalidDataHandling, Row, Rule, TypeConfig, TypeTag,
};
use sheet_validate::{
    Gate, apply_invalid_handling, lint_schema, reconcile_headers, resolve_schema, run_import,
    validate,
};

fn schema() -> Vec<ColumnSchema> {
    vec![
        ColumnSchema::new("name", TypeTag::Text).required(),
        ColumnSchema::new("email", TypeTag::Email).required(),
    ]
}

#[test]
fn missing_required_header_blocks() {
    let result = reconcile_headers(&["name", "extra1"], &schema());
    assert_eq!(result.missing_required, vec!["email"]);
    assert_eq!(result.unrecognized, vec!["extra1"]);
    assert!(!result.valid);
}

#[test]
fn ignore_policy_strips_extras() {
    let rows = vec![Row::from_iter([
        ("a", CellValue::Number(1.0)),
        ("b", CellValue::Number(2.0)),
    ])];
    let schema = vec![ColumnSchema::new("a", TypeTag::Number)];

    let result = resolve_schema(&rows, &schema, ColumnHandling::Ignore);

    assert_eq!(result.extra_columns, vec!["b"]);
    assert_eq!(
        result.cleaned_rows,
        vec![Row::from_iter([("a", CellValue::Number(1.0))])]
    );
    assert!(result.valid);
}

#[test]
fn reject_policy_keeps_rows_and_blocks() {
    let rows = vec![Row::from_iter([
        ("a", CellValue::Number(1.0)),
        ("b", CellValue::Number(2.0)),
    ])];
    let schema = vec![ColumnSchema::new("a", TypeTag::Number)];

    let result = resolve_schema(&rows, &schema, ColumnHandling::Reject);

    assert_eq!(result.extra_columns, vec!["b"]);
    assert_eq!(result.cleaned_rows, rows);
    assert!(!result.valid);
    assert!(result.report.is_some());
}

#[test]
fn warn_policy_reports_and_cleans() {
    let rows = vec![
        Row::from_iter([("name", "Ada"), ("email", "ada@example.com"), ("notes", "x")]),
        Row::from_iter([("name", "Bob"), ("email", "bob@example.com"), ("notes", "y")]),
    ];
    let result = resolve_schema(&rows, &schema(), ColumnHandling::Warn);
    assert!(result.valid);
    assert!(result.needs_notice());
    assert!(result.cleaned_rows.iter().all(|row| !row.contains_key("notes")));
    let report = result.report.expect("drift report");
    assert_eq!(report.details, vec!["Column \"notes\" will be removed"]);
}

#[test]
fn extras_after_first_row_are_pruned_consistently() {
    let schema = vec![ColumnSchema::new("a", TypeTag::Number)];
    let clean_first = vec![
        Row::from_iter([("a", CellValue::Number(1.0))]),
        Row::from_iter([("a", CellValue::Number(2.0)), ("c", CellValue::Number(3.0))]),
    ];
    let extra_first = vec![
        Row::from_iter([("a", CellValue::Number(1.0)), ("b", CellValue::Number(2.0))]),
        Row::from_iter([("a", CellValue::Number(3.0)), ("c", CellValue::Number(4.0))]),
    ];

    let result = resolve_schema(&clean_first, &schema, ColumnHandling::Ignore);
    assert!(result.extra_columns.is_empty());
    assert!(!result.cleaned_rows[1].contains_key("c"));

    let result = resolve_schema(&extra_first, &schema, ColumnHandling::Ignore);
    assert_eq!(result.extra_columns, vec!["b"]);
    assert!(result.cleaned_rows.iter().all(|row| row.keys().eq(["a"])));

    let result = resolve_schema(&extra_first, &schema, ColumnHandling::Include);
    assert!(result.cleaned_rows[1].contains_key("c"));
}

#[test]
fn import_stops_at_first_failing_gate() {
    let config = TypeConfig::default();
    let rows = vec![Row::from_iter([("name", "Ada"), ("extra", "1")])];

    let report = run_import(&["name", "extra"], &rows, &schema(), &config, ColumnHandling::Warn);
    assert_eq!(report.blocked_at(), Some(Gate::Headers));
    assert!(report.drift.is_none());

    let rows = vec![Row::from_iter([("name", "Ada"), ("email", "ada@example.com"), ("x", "1")])];
    let headers = ["name", "email", "x"];
    let report = run_import(&headers, &rows, &schema(), &config, ColumnHandling::Reject);
    assert_eq!(report.blocked_at(), Some(Gate::SchemaDrift));
    assert!(report.validation.is_none());

    let report = run_import(&headers, &rows, &schema(), &config, ColumnHandling::Include);
    assert!(report.is_importable());
    assert_eq!(report.cleaned_rows().map(<[Row]>::len), Some(1));

    let rows = vec![Row::from_iter([("name", "Ada"), ("email", "nope")])];
    let report = run_import(&["name", "email"], &rows, &schema(), &config, ColumnHandling::Warn);
    assert_eq!(report.blocked_at(), Some(Gate::Validation));
}

#[test]
fn handling_follows_validation() {
    let schema = vec![
        ColumnSchema::new("qty", TypeTag::Number)
            .with_rule(Rule::min(1.0))
            .with_invalid_handling(InvalidDataHandling::Default)
            .with_default_value("1"),
        ColumnSchema::new("email", TypeTag::Email)
            .with_invalid_handling(InvalidDataHandling::Remove),
    ];
    let rows = vec![
        Row::from_iter([("qty", "0"), ("email", "bad")]),
        Row::from_iter([("qty", "5"), ("email", "ok@example.com")]),
    ];
    let validation = validate(&rows, &schema, &TypeConfig::default());
    let handled = apply_invalid_handling(&rows, &schema, &validation);

    assert_eq!(handled.rows.len(), 2);
    assert_eq!(handled.rows[0].value("qty"), &CellValue::Number(1.0));
    assert_eq!(handled.rows[0].value("email"), &CellValue::Empty);
    assert_eq!(handled.rows[1], rows[1]);
    assert!(!handled.is_blocked());

    let revalidated = validate(&handled.rows, &schema, &TypeConfig::default());
    assert!(revalidated.valid);
}

#[test]
fn lint_finds_invalid_pattern_that_validation_tolerates() {
    let schema = vec![ColumnSchema::new("code", TypeTag::Text).with_rule(Rule::pattern("(["))];
    let rows = vec![Row::from_iter([("code", "anything")])];

    assert!(validate(&rows, &schema, &TypeConfig::default()).valid);
    let issues = lint_schema(&schema, &TypeConfig::default());
    assert_eq!(issues.len(), 1);
    assert!(!issues[0].is_fatal());
}
