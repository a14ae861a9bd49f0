//! Tests for sheet-model types.

use sheet_model::{
    Category, CellIssue, CellValue, ColumnSchema, InvalidDataHandling, Row, RuleKind,
    RuleType, TypeTag, ValidationResult,
};

#[test]
fn column_schema_parses_full_configuration() {
    let json = r#"{
        "name": "age",
        "displayName": "Age in Years",
        "required": true,
        "type": "number",
        "validationRules": [
            {"kind": "min", "value": 18, "message": "too young"},
            {"kind": "range", "value": "18-99"},
            {"kind": "custom", "value": "even"}
        ],
        "invalidHandling": "default",
        "defaultValue": "18"
    }"#;
    let column: ColumnSchema = serde_json::from_str(json).expect("parse column");

    assert_eq!(column.label(), "Age in Years");
    assert_eq!(column.type_tag, TypeTag::Number);
    assert_eq!(column.invalid_handling, InvalidDataHandling::Default);
    assert_eq!(column.default_value.as_deref(), Some("18"));

    let types: Vec<RuleType> = column
        .validation_rules
        .iter()
        .map(sheet_model::Rule::rule_type)
        .collect();
    assert_eq!(types, vec![RuleType::Min, RuleType::Range, RuleType::Custom]);
    assert!(matches!(
        &column.validation_rules[1].kind,
        RuleKind::Range(bounds) if bounds == "18-99"
    ));
}

#[test]
fn column_schema_rejects_malformed_rule() {
    let json = r#"{"name": "age", "validationRules": [{"kind": "max", "value": [1]}]}"#;
    let err = serde_json::from_str::<ColumnSchema>(json).expect_err("bad rule value");
    assert!(err.to_string().contains("invalid max rule"));
}

#[test]
fn validation_result_serializes_with_category_keys() {
    let result = ValidationResult::from_diagnostics(vec![
        CellIssue::new(Category::Missing, "Email is required", "Add a value for Email").at(
            0,
            "email",
            CellValue::Empty,
        ),
    ]);
    let json = serde_json::to_value(&result).expect("serialize result");

    assert_eq!(json["valid"], false);
    assert_eq!(json["diagnostics"][0]["row"], 2);
    assert_eq!(json["diagnostics"][0]["value"], serde_json::Value::Null);
    assert_eq!(json["byCategory"]["missing"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["byCategory"]["other"].as_array().map(Vec::len), Some(0));
}

#[test]
fn row_round_trips_through_json() {
    let row = Row::from_iter([
        ("name", CellValue::text("Ada")),
        ("age", CellValue::Number(36.0)),
        ("active", CellValue::Bool(true)),
        ("notes", CellValue::Empty),
    ]);
    let json = serde_json::to_string(&row).expect("serialize row");
    let back: Row = serde_json::from_str(&json).expect("deserialize row");
    assert_eq!(back, row);
}
