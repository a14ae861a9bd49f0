//! Declarative validation rules attached to a column.
//!
//! Rules are configured as `{ "kind": ..., "value": ..., "message": ... }`
//! objects. The raw JSON shape is checked once at deserialization time and
//! converted into a typed [`RuleKind`], so evaluation never has to inspect
//! untyped configuration values.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ModelError;
use crate::value::{CellValue, format_number};

/// Predicate backing a `custom` rule.
#[derive(Clone)]
pub struct CustomValidator(Arc<dyn Fn(&CellValue) -> bool + Send + Sync>);

impl CustomValidator {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Returns true when the value passes.
    pub fn check(&self, value: &CellValue) -> bool {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomValidator(..)")
    }
}

/// Rule kind without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Required,
    Min,
    Max,
    Pattern,
    Enum,
    Range,
    Precision,
    Domain,
    Length,
    Custom,
}

impl RuleType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pattern => "pattern",
            Self::Enum => "enum",
            Self::Range => "range",
            Self::Precision => "precision",
            Self::Domain => "domain",
            Self::Length => "length",
            Self::Custom => "custom",
        }
    }
}

/// A rule kind together with its typed parameter.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Presence is checked by the validator, so the rule itself always passes
    /// for present values.
    Required,
    /// Minimum numeric value, or minimum length for text columns.
    Min(f64),
    /// Maximum numeric value, or maximum length for text columns.
    Max(f64),
    /// Regular expression the stringified value must match.
    Pattern(String),
    /// Allowed literal values.
    Enum(Vec<String>),
    /// Inclusive bounds written as `"min-max"` (numbers or dates).
    Range(String),
    /// Maximum number of fractional digits.
    Precision(u32),
    /// Allowed email domains.
    Domain(Vec<String>),
    /// Exact length `"N"` or bounded length `"min-max"`.
    Length(String),
    /// Injected predicate. A rule loaded from configuration carries only a
    /// name until a validator is bound to it.
    Custom {
        name: Option<String>,
        validator: Option<CustomValidator>,
    },
}

impl RuleKind {
    pub fn rule_type(&self) -> RuleType {
        match self {
            Self::Required => RuleType::Required,
            Self::Min(_) => RuleType::Min,
            Self::Max(_) => RuleType::Max,
            Self::Pattern(_) => RuleType::Pattern,
            Self::Enum(_) => RuleType::Enum,
            Self::Range(_) => RuleType::Range,
            Self::Precision(_) => RuleType::Precision,
            Self::Domain(_) => RuleType::Domain,
            Self::Length(_) => RuleType::Length,
            Self::Custom { .. } => RuleType::Custom,
        }
    }
}

/// A validation rule with an optional user-facing message that replaces the
/// generated one on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RuleSpec", into = "RuleSpec")]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl Rule {
    pub fn new(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn min(value: f64) -> Self {
        Self::new(RuleKind::Min(value))
    }

    pub fn max(value: f64) -> Self {
        Self::new(RuleKind::Max(value))
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::new(RuleKind::Pattern(pattern.into()))
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleKind::Enum(values.into_iter().map(Into::into).collect()))
    }

    pub fn range(bounds: impl Into<String>) -> Self {
        Self::new(RuleKind::Range(bounds.into()))
    }

    pub fn precision(digits: u32) -> Self {
        Self::new(RuleKind::Precision(digits))
    }

    pub fn domain<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RuleKind::Domain(domains.into_iter().map(Into::into).collect()))
    }

    pub fn length(spec: impl Into<String>) -> Self {
        Self::new(RuleKind::Length(spec.into()))
    }

    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        Self::new(RuleKind::Custom {
            name: None,
            validator: Some(CustomValidator::new(predicate)),
        })
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn rule_type(&self) -> RuleType {
        self.kind.rule_type()
    }

    /// The configured message, ignoring blank strings.
    pub fn custom_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }

    /// Name of a custom rule, if this is one.
    pub fn custom_name(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Custom { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Attach a predicate to a custom rule. Returns false for other kinds.
    pub fn bind_validator(&mut self, predicate: CustomValidator) -> bool {
        match &mut self.kind {
            RuleKind::Custom { validator, .. } => {
                *validator = Some(predicate);
                true
            }
            _ => false,
        }
    }
}

/// Serialized form of a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RuleSpec {
    kind: RuleType,
    #[serde(default, skip_serializing_if = "JsonValue::is_null")]
    value: JsonValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl TryFrom<RuleSpec> for Rule {
    type Error = ModelError;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        let label = spec.kind.label();
        let kind = match spec.kind {
            RuleType::Required => RuleKind::Required,
            RuleType::Min => RuleKind::Min(json_number(label, &spec.value)?),
            RuleType::Max => RuleKind::Max(json_number(label, &spec.value)?),
            RuleType::Pattern => RuleKind::Pattern(json_string(label, &spec.value)?),
            RuleType::Enum => RuleKind::Enum(json_list(label, &spec.value)?),
            RuleType::Range => RuleKind::Range(json_string(label, &spec.value)?),
            RuleType::Precision => {
                let digits = json_number(label, &spec.value)?;
                if digits < 0.0 || digits.fract() != 0.0 || digits > f64::from(u32::MAX) {
                    return Err(ModelError::invalid_rule(
                        label,
                        "expected a non-negative whole number",
                    ));
                }
                RuleKind::Precision(digits as u32)
            }
            RuleType::Domain => RuleKind::Domain(json_list(label, &spec.value)?),
            RuleType::Length => RuleKind::Length(json_string(label, &spec.value)?),
            RuleType::Custom => RuleKind::Custom {
                name: match &spec.value {
                    JsonValue::Null => None,
                    other => Some(json_string(label, other)?),
                },
                validator: None,
            },
        };
        Ok(Rule {
            kind,
            message: spec.message,
        })
    }
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        let value = match &rule.kind {
            RuleKind::Required => JsonValue::Null,
            RuleKind::Min(value) | RuleKind::Max(value) => JsonValue::from(*value),
            RuleKind::Pattern(text) | RuleKind::Range(text) | RuleKind::Length(text) => {
                JsonValue::from(text.clone())
            }
            RuleKind::Enum(values) | RuleKind::Domain(values) => JsonValue::from(values.clone()),
            RuleKind::Precision(digits) => JsonValue::from(*digits),
            RuleKind::Custom { name, .. } => name.clone().map_or(JsonValue::Null, JsonValue::from),
        };
        RuleSpec {
            kind: rule.kind.rule_type(),
            value,
            message: rule.message,
        }
    }
}

fn json_number(kind: &str, value: &JsonValue) -> Result<f64, ModelError> {
    let parsed = match value {
        JsonValue::Number(number) => number.as_f64(),
        JsonValue::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| ModelError::invalid_rule(kind, format!("expected a number, got {value}")))
}

/// Strings pass through; numbers are rendered without trailing zeros so a
/// length of `5` and `"5"` are equivalent.
fn json_string(kind: &str, value: &JsonValue) -> Result<String, ModelError> {
    match value {
        JsonValue::String(text) => Ok(text.clone()),
        JsonValue::Number(number) => number
            .as_f64()
            .map(format_number)
            .ok_or_else(|| ModelError::invalid_rule(kind, "number out of range")),
        other => Err(ModelError::invalid_rule(
            kind,
            format!("expected a string, got {other}"),
        )),
    }
}

/// Accepts a JSON array of scalars or a comma-separated string.
fn json_list(kind: &str, value: &JsonValue) -> Result<Vec<String>, ModelError> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(text) => Ok(text.trim().to_string()),
                JsonValue::Number(_) | JsonValue::Bool(_) => Ok(item.to_string()),
                other => Err(ModelError::invalid_rule(
                    kind,
                    format!("unsupported list item {other}"),
                )),
            })
            .collect(),
        JsonValue::String(text) => Ok(split_list(text)),
        other => Err(ModelError::invalid_rule(
            kind,
            format!("expected a list or comma-separated string, got {other}"),
        )),
    }
}

/// Split a comma-separated list, trimming items and dropping blanks.
pub(crate) fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Rule, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_parse_min_with_message() {
        let rule = parse(r#"{"kind": "min", "value": 18, "message": "too young"}"#).unwrap();
        assert!(matches!(rule.kind, RuleKind::Min(v) if v == 18.0));
        assert_eq!(rule.custom_message(), Some("too young"));
    }

    #[test]
    fn test_parse_enum_from_list_and_string() {
        let rule = parse(r#"{"kind": "enum", "value": ["a", "b", 3]}"#).unwrap();
        assert!(matches!(&rule.kind, RuleKind::Enum(values) if values == &["a", "b", "3"]));

        let rule = parse(r#"{"kind": "enum", "value": "red, green ,blue"}"#).unwrap();
        assert!(
            matches!(&rule.kind, RuleKind::Enum(values) if values == &["red", "green", "blue"])
        );
    }

    #[test]
    fn test_parse_length_accepts_number() {
        let rule = parse(r#"{"kind": "length", "value": 5}"#).unwrap();
        assert!(matches!(&rule.kind, RuleKind::Length(spec) if spec == "5"));
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(parse(r#"{"kind": "min", "value": "eighteen"}"#).is_err());
        assert!(parse(r#"{"kind": "precision", "value": -1}"#).is_err());
        assert!(parse(r#"{"kind": "precision", "value": 1.5}"#).is_err());
        assert!(parse(r#"{"kind": "pattern", "value": {"x": 1}}"#).is_err());
        assert!(parse(r#"{"kind": "unknown", "value": 1}"#).is_err());
    }

    #[test]
    fn test_custom_rule_binding() {
        let mut rule = parse(r#"{"kind": "custom", "value": "even"}"#).unwrap();
        assert_eq!(rule.custom_name(), Some("even"));
        assert!(rule.bind_validator(CustomValidator::new(|v| {
            v.as_number().is_some_and(|n| n % 2.0 == 0.0)
        })));
        let RuleKind::Custom { validator, .. } = &rule.kind else {
            panic!("expected custom rule");
        };
        let validator = validator.as_ref().unwrap();
        assert!(validator.check(&CellValue::Number(4.0)));
        assert!(!validator.check(&CellValue::Number(3.0)));

        let mut min = Rule::min(1.0);
        assert!(!min.bind_validator(CustomValidator::new(|_| true)));
    }

    #[test]
    fn test_serialize_round_trips_through_spec() {
        let rule = Rule::one_of(["x", "y"]).with_message("pick one");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "enum", "value": ["x", "y"], "message": "pick one"})
        );
        let required = serde_json::to_value(Rule::new(RuleKind::Required)).unwrap();
        assert_eq!(required, serde_json::json!({"kind": "required"}));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
