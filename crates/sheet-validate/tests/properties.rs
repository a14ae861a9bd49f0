//! Property tests for the validation engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use sheet_model::{
    Category, CellValue, ColumnHandling, ColumnSchema, Diagnostic, Row, Rule, TypeConfig, TypeTag,
};
use sheet_validate::{reconcile_headers, resolve_schema, validate};

fn cell_value() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Empty),
        any::<bool>().prop_map(CellValue::Bool),
        (-1.0e6..1.0e6f64).prop_map(CellValue::Number),
        "[ a-zA-Z0-9@.+()-]{0,12}".prop_map(CellValue::Text),
        (1900i32..2100, 1u32..=12, 1u32..=28).prop_map(|(year, month, day)| {
            CellValue::Date(NaiveDate::from_ymd_opt(year, month, day).unwrap())
        }),
    ]
}

fn type_tag() -> impl Strategy<Value = TypeTag> {
    prop::sample::select(TypeTag::all().to_vec())
}

const KEYS: &[&str] = &["a", "b", "c", "d"];

fn schema() -> impl Strategy<Value = Vec<ColumnSchema>> {
    prop::collection::vec((type_tag(), any::<bool>()), KEYS.len()).prop_map(|columns| {
        columns
            .into_iter()
            .zip(KEYS)
            .map(|((tag, required), name)| {
                let column = ColumnSchema::new(*name, tag)
                    .with_rule(Rule::min(0.0))
                    .with_rule(Rule::pattern("^[^@]*$"));
                if required { column.required() } else { column }
            })
            .collect()
    })
}

fn rows() -> impl Strategy<Value = Vec<Row>> {
    let keys = prop::sample::select(vec!["a", "b", "c", "d", "e"]);
    let row = prop::collection::vec((keys, cell_value()), 0..6).prop_map(|cells| {
        let mut row = Row::new();
        for (key, value) in cells {
            row.insert(key, value);
        }
        row
    });
    prop::collection::vec(row, 0..8)
}

fn sorted(mut diagnostics: Vec<Diagnostic>) -> Vec<String> {
    let mut rendered: Vec<String> = diagnostics
        .drain(..)
        .map(|d| format!("{}|{}|{:?}|{}", d.row, d.column, d.category, d.message))
        .collect();
    rendered.sort();
    rendered
}

proptest! {
    #[test]
    fn diagnostics_use_display_rows(rows in rows(), schema in schema()) {
        let result = validate(&rows, &schema, &TypeConfig::default());
        for diagnostic in &result.diagnostics {
            let index = diagnostic.row_index().expect("row at or after offset");
            prop_assert!(index < rows.len());
            prop_assert_eq!(diagnostic.row, index + 2);
        }
    }

    #[test]
    fn validation_is_repeatable(rows in rows(), schema in schema()) {
        let config = TypeConfig::default();
        let first = validate(&rows, &schema, &config);
        let second = validate(&rows, &schema, &config);
        prop_assert_eq!(first.diagnostics, second.diagnostics);
        prop_assert_eq!(first.valid, second.valid);
    }

    #[test]
    fn buckets_partition_diagnostics(rows in rows(), schema in schema()) {
        let result = validate(&rows, &schema, &TypeConfig::default());
        let bucketed: Vec<Diagnostic> = Category::all()
            .iter()
            .flat_map(|category| result.category(*category).to_vec())
            .collect();
        for category in Category::all() {
            prop_assert!(result.category(*category).iter().all(|d| d.category == *category));
        }
        prop_assert_eq!(sorted(bucketed), sorted(result.diagnostics.clone()));
        prop_assert_eq!(result.valid, result.diagnostics.is_empty());
    }

    #[test]
    fn unrecognized_headers_never_invalidate(
        extras in prop::collection::vec("[x-z]{1,4}", 0..5),
        required in any::<bool>(),
    ) {
        let mut schema = vec![ColumnSchema::new("id", TypeTag::Text)];
        if required {
            schema[0] = schema[0].clone().required();
        }
        let mut headers = vec!["id".to_string()];
        headers.extend(extras.iter().cloned());

        let result = reconcile_headers(&headers, &schema);
        prop_assert!(result.valid);
        prop_assert!(result.missing_required.is_empty());

        let without_id = reconcile_headers(&extras, &schema);
        prop_assert_eq!(without_id.valid, !required);
    }

    #[test]
    fn stripping_policies_leave_only_schema_keys(
        rows in rows(),
        schema in schema(),
        ignore in any::<bool>(),
    ) {
        let policy = if ignore { ColumnHandling::Ignore } else { ColumnHandling::Warn };
        let result = resolve_schema(&rows, &schema, policy);
        prop_assert!(result.valid);
        prop_assert_eq!(result.cleaned_rows.len(), rows.len());
        for row in &result.cleaned_rows {
            prop_assert!(row.keys().all(|key| schema.iter().any(|column| column.name == key)));
        }
    }
}
