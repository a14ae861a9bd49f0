//! Load-time checks of a schema and its type defaults.
//!
//! Validation never fails on configuration: an invalid pattern matches
//! everything and an unparseable range is skipped. This module reports those
//! problems up front so they can be fixed before any data is checked.

use std::collections::HashSet;

use serde::Serialize;
use sheet_model::{ColumnSchema, InvalidDataHandling, RuleKind, TypeConfig, TypeTag};
use thiserror::Error;

use crate::coerce::{parse_date_bounds, parse_length_spec, parse_number_bounds};
use crate::pattern::compile_pattern;

/// A problem with the schema or type configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaIssue {
    #[error("column '{column}' is declared more than once")]
    DuplicateColumn { column: String },

    /// A pattern does not compile; it matches every value at validation time.
    #[error("invalid pattern in {context}: {message}")]
    InvalidPattern {
        column: Option<String>,
        context: String,
        pattern: String,
        message: String,
    },

    /// A rule parameter cannot be parsed; the rule is skipped.
    #[error("column '{column}': {rule} rule value '{value}' cannot be parsed")]
    InvalidRuleValue {
        column: String,
        rule: String,
        value: String,
    },

    #[error("{context}: lower bound {lower} is greater than upper bound {upper}")]
    InvertedBounds {
        context: String,
        lower: String,
        upper: String,
    },

    #[error("column '{column}' replaces invalid values with a default but has none")]
    MissingDefault { column: String },

    #[error("column '{column}' has a custom rule with no validator bound")]
    UnboundCustomRule { column: String, name: Option<String> },
}

impl SchemaIssue {
    /// Fatal issues make the configuration unusable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DuplicateColumn { .. })
    }
}

/// Check a schema and type configuration for problems that validation
/// would otherwise tolerate silently.
pub fn lint_schema(schema: &[ColumnSchema], config: &TypeConfig) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for column in schema {
        if !seen.insert(column.name.as_str()) {
            issues.push(SchemaIssue::DuplicateColumn {
                column: column.name.clone(),
            });
        }
    }

    check_pattern(&mut issues, None, "email type", &config.email.pattern);
    check_pattern(&mut issues, None, "phone type", &config.phone.pattern);
    if let (Some(min), Some(max)) = (config.number.min, config.number.max) {
        check_order(&mut issues, "number type bounds", min, max);
    }
    if let (Some(min), Some(max)) = (config.date.min_date, config.date.max_date) {
        check_order(&mut issues, "date type bounds", min, max);
    }

    for column in schema {
        lint_column(&mut issues, column, config);
    }
    issues
}

fn lint_column(issues: &mut Vec<SchemaIssue>, column: &ColumnSchema, config: &TypeConfig) {
    let name = column.name.as_str();
    if let Some(format) = column.format.as_deref().filter(|f| !f.trim().is_empty()) {
        check_pattern(issues, Some(name), "column format", format);
    }
    if column.invalid_handling == InvalidDataHandling::Default && column.default_value.is_none() {
        issues.push(SchemaIssue::MissingDefault {
            column: name.to_string(),
        });
    }

    for rule in &column.validation_rules {
        match &rule.kind {
            RuleKind::Pattern(pattern) => {
                check_pattern(issues, Some(name), "pattern rule", pattern);
            }
            RuleKind::Range(spec) => match column.type_tag {
                TypeTag::Number => match parse_number_bounds(spec) {
                    Some((min, max)) => check_order(issues, &range_context(name), min, max),
                    None => issues.push(bad_value(name, "range", spec)),
                },
                TypeTag::Date => match parse_date_bounds(spec, config.date.format.as_deref()) {
                    Some((min, max)) => check_order(issues, &range_context(name), min, max),
                    None => issues.push(bad_value(name, "range", spec)),
                },
                _ => {}
            },
            RuleKind::Length(spec) if parse_length_spec(spec).is_none() => {
                issues.push(bad_value(name, "length", spec));
            }
            RuleKind::Custom {
                name: rule_name,
                validator: None,
            } => issues.push(SchemaIssue::UnboundCustomRule {
                column: name.to_string(),
                name: rule_name.clone(),
            }),
            _ => {}
        }
    }
}

fn check_pattern(
    issues: &mut Vec<SchemaIssue>,
    column: Option<&str>,
    context: &str,
    pattern: &str,
) {
    if let Err(error) = compile_pattern(pattern) {
        let context = match column {
            Some(column) => format!("{context} of column '{column}'"),
            None => context.to_string(),
        };
        issues.push(SchemaIssue::InvalidPattern {
            column: column.map(str::to_string),
            context,
            pattern: pattern.to_string(),
            message: error.to_string(),
        });
    }
}

fn check_order<T: PartialOrd + ToString>(
    issues: &mut Vec<SchemaIssue>,
    context: &str,
    lower: T,
    upper: T,
) {
    if lower > upper {
        issues.push(SchemaIssue::InvertedBounds {
            context: context.to_string(),
            lower: lower.to_string(),
            upper: upper.to_string(),
        });
    }
}

fn range_context(column: &str) -> String {
    format!("range rule of column '{column}'")
}

fn bad_value(column: &str, rule: &str, value: &str) -> SchemaIssue {
    SchemaIssue::InvalidRuleValue {
        column: column.to_string(),
        rule: rule.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::Rule;

    #[test]
    fn test_clean_schema_has_no_issues() {
        let schema = vec![
            ColumnSchema::new("age", TypeTag::Number).with_rule(Rule::range("0-120")),
            ColumnSchema::new("code", TypeTag::Text).with_format("^[A-Z]+$"),
        ];
        assert!(lint_schema(&schema, &TypeConfig::default()).is_empty());
    }

    #[test]
    fn test_reports_each_problem() {
        let schema = vec![
            ColumnSchema::new("a", TypeTag::Text).with_format("[unclosed"),
            ColumnSchema::new("a", TypeTag::Number).with_rule(Rule::range("10-1")),
            ColumnSchema::new("b", TypeTag::Text)
                .with_rule(Rule::length("short"))
                .with_invalid_handling(InvalidDataHandling::Default),
        ];
        let issues = lint_schema(&schema, &TypeConfig::default());

        assert!(issues.iter().any(SchemaIssue::is_fatal));
        assert!(issues.iter().any(|issue| matches!(
            issue,
            SchemaIssue::InvalidPattern { column: Some(column), .. } if column == "a"
        )));
        assert!(issues.contains(&SchemaIssue::InvertedBounds {
            context: "range rule of column 'a'".to_string(),
            lower: "10".to_string(),
            upper: "1".to_string(),
        }));
        assert!(issues.contains(&bad_value("b", "length", "short")));
        assert!(issues.contains(&SchemaIssue::MissingDefault {
            column: "b".to_string()
        }));
        assert_eq!(issues.len(), 5);
    }

    #[test]
    fn test_issue_display() {
        let issue = SchemaIssue::UnboundCustomRule {
            column: "score".to_string(),
            name: Some("even".to_string()),
        };
        assert_eq!(
            issue.to_string(),
            "column 'score' has a custom rule with no validator bound"
        );
    }
}
