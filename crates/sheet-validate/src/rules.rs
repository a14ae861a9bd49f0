//! Per-column validation rules.
//!
//! Every rule is evaluated independently against a present value. A rule
//! that cannot apply to the column's type passes, and so does a rule whose
//! own parameter is unusable (a bad range or an invalid pattern); those are
//! reported by [`lint_schema`](crate::lint_schema) instead.

use sheet_model::{
    CellIssue, CellValue, Rule, RuleKind, TypeConfig, TypeTag, format_number,
};
use tracing::{debug, warn};

use crate::checks::{disallowed_domain, domain_allowed, email_domain, quoted};
use crate::coerce::{
    LengthSpec, as_date, format_date, measured_length, parse_date_bounds, parse_length_spec,
    parse_number_bounds,
};
use crate::pattern::PatternSet;

/// Evaluate one rule against a value in a column of `column_type`.
///
/// Returns `None` when the rule passes. The rule's configured message, when
/// present, replaces the generated one.
pub fn evaluate_rule(
    value: &CellValue,
    rule: &Rule,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    evaluate_rule_with(&PatternSet::new(), value, rule, column_type, config)
}

pub(crate) fn evaluate_rule_with(
    patterns: &PatternSet,
    value: &CellValue,
    rule: &Rule,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    if value.is_empty() {
        return None;
    }
    let issue = match &rule.kind {
        RuleKind::Required => None,
        RuleKind::Min(min) => check_min(value, *min, column_type, config),
        RuleKind::Max(max) => check_max(value, *max, column_type, config),
        RuleKind::Pattern(pattern) => check_pattern(patterns, value, pattern),
        RuleKind::Enum(allowed) => check_enum(value, allowed),
        RuleKind::Range(spec) => check_range(value, spec, column_type, config),
        RuleKind::Precision(digits) => check_precision(value, *digits, column_type),
        RuleKind::Domain(domains) => check_domain(value, domains, column_type),
        RuleKind::Length(spec) => check_length(value, spec, column_type, config),
        RuleKind::Custom { name, validator } => match validator {
            Some(validator) if !validator.check(value) => Some(CellIssue::other(
                format!(
                    "Value {} failed the {} check",
                    quoted(value),
                    name.as_deref().unwrap_or("custom")
                ),
                "Review this value",
            )),
            Some(_) => None,
            None => {
                debug!(
                    rule = name.as_deref().unwrap_or("custom"),
                    "custom rule has no validator bound"
                );
                None
            }
        },
    };
    issue.map(|issue| issue.with_message_override(rule.custom_message()))
}

/// Text length as counted by min/max/length rules on text columns.
fn text_length(value: &CellValue, config: &TypeConfig) -> Option<usize> {
    value
        .as_str()
        .map(|text| measured_length(text, config.text.trim_whitespace))
}

fn check_min(
    value: &CellValue,
    min: f64,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    match column_type {
        TypeTag::Number => {
            let number = value.as_number()?;
            (number < min).then(|| {
                CellIssue::invalid(
                    format!(
                        "Value {} is less than the minimum of {}",
                        format_number(number),
                        format_number(min)
                    ),
                    format!("Enter a value of at least {}", format_number(min)),
                )
            })
        }
        TypeTag::Text => {
            let length = text_length(value, config)?;
            ((length as f64) < min).then(|| {
                CellIssue::invalid(
                    format!(
                        "Text must be at least {} characters (found {length})",
                        format_number(min)
                    ),
                    format!("Enter at least {} characters", format_number(min)),
                )
            })
        }
        _ => None,
    }
}

fn check_max(
    value: &CellValue,
    max: f64,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    match column_type {
        TypeTag::Number => {
            let number = value.as_number()?;
            (number > max).then(|| {
                CellIssue::invalid(
                    format!(
                        "Value {} is greater than the maximum of {}",
                        format_number(number),
                        format_number(max)
                    ),
                    format!("Enter a value of at most {}", format_number(max)),
                )
            })
        }
        TypeTag::Text => {
            let length = text_length(value, config)?;
            ((length as f64) > max).then(|| {
                CellIssue::invalid(
                    format!(
                        "Text must be at most {} characters (found {length})",
                        format_number(max)
                    ),
                    format!(
                        "Shorten the value to {} characters or fewer",
                        format_number(max)
                    ),
                )
            })
        }
        _ => None,
    }
}

fn check_pattern(patterns: &PatternSet, value: &CellValue, pattern: &str) -> Option<CellIssue> {
    let text = value.to_string();
    (!patterns.is_match(pattern, &text, "pattern rule")).then(|| {
        CellIssue::format(
            format!("Value {} does not match the required format", quoted(value)),
            format!("Enter a value matching {pattern}"),
        )
    })
}

fn check_enum(value: &CellValue, allowed: &[String]) -> Option<CellIssue> {
    let text = value.to_string();
    let text = text.trim();
    if allowed.iter().any(|candidate| candidate.trim() == text) {
        return None;
    }
    let allowed = allowed.join(", ");
    Some(CellIssue::invalid(
        format!("Value {} is not one of the allowed values", quoted(value)),
        format!("Use one of: {allowed}"),
    ))
}

fn check_range(
    value: &CellValue,
    spec: &str,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    match column_type {
        TypeTag::Number => {
            let Some((min, max)) = parse_number_bounds(spec) else {
                warn!(range = spec, "range rule is not of the form min-max; skipping");
                return None;
            };
            let number = value.as_number()?;
            (number < min || number > max).then(|| {
                CellIssue::invalid(
                    format!(
                        "Value {} is outside the range {} to {}",
                        format_number(number),
                        format_number(min),
                        format_number(max)
                    ),
                    format!(
                        "Enter a value between {} and {}",
                        format_number(min),
                        format_number(max)
                    ),
                )
            })
        }
        TypeTag::Date => {
            let format = config.date.format.as_deref();
            let Some((min, max)) = parse_date_bounds(spec, format) else {
                warn!(range = spec, "date range rule is not of the form min-max; skipping");
                return None;
            };
            let date = as_date(value, &config.date)?;
            (date < min || date > max).then(|| {
                let (min, max) = (format_date(min, format), format_date(max, format));
                CellIssue::invalid(
                    format!(
                        "Date {} is outside the range {min} to {max}",
                        format_date(date, format)
                    ),
                    format!("Enter a date between {min} and {max}"),
                )
            })
        }
        _ => None,
    }
}

/// Number of digits after the decimal point, as written.
fn fraction_digits(value: &CellValue) -> Option<usize> {
    let literal = match value {
        CellValue::Text(text) => {
            let text = text.trim();
            text.parse::<f64>().ok().filter(|n| n.is_finite())?;
            text.to_string()
        }
        CellValue::Number(number) if number.is_finite() => format_number(*number),
        _ => return None,
    };
    let mantissa = literal.split(['e', 'E']).next().unwrap_or_default();
    Some(
        mantissa
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len()),
    )
}

fn check_precision(value: &CellValue, digits: u32, column_type: TypeTag) -> Option<CellIssue> {
    if column_type != TypeTag::Number {
        return None;
    }
    let found = fraction_digits(value)?;
    (found > digits as usize).then(|| {
        CellIssue::format(
            format!(
                "Value {} has {found} decimal places; at most {digits} allowed",
                quoted(value)
            ),
            format!("Round the value to {digits} decimal places"),
        )
    })
}

fn check_domain(value: &CellValue, domains: &[String], column_type: TypeTag) -> Option<CellIssue> {
    if column_type != TypeTag::Email || domains.is_empty() {
        return None;
    }
    let domain = email_domain(value.as_str()?)?;
    (!domain_allowed(domain, domains)).then(|| disallowed_domain(domain, domains))
}

fn check_length(
    value: &CellValue,
    spec: &str,
    column_type: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    if column_type != TypeTag::Text {
        return None;
    }
    let Some(length_spec) = parse_length_spec(spec) else {
        warn!(length = spec, "length rule is neither N nor min-max; skipping");
        return None;
    };
    let length = text_length(value, config)?;
    match length_spec {
        LengthSpec::Exact(exact) if length != exact => Some(CellIssue::invalid(
            format!("Text must be exactly {exact} characters (found {length})"),
            format!("Enter exactly {exact} characters"),
        )),
        LengthSpec::Between(min, max) if length < min || length > max => {
            Some(CellIssue::invalid(
                format!("Text must be between {min} and {max} characters (found {length})"),
                format!("Enter {min} to {max} characters"),
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::Category;

    fn eval(value: CellValue, rule: Rule, column_type: TypeTag) -> Option<CellIssue> {
        evaluate_rule(&value, &rule, column_type, &TypeConfig::default())
    }

    #[test]
    fn test_empty_value_short_circuits() {
        assert_eq!(eval(CellValue::Empty, Rule::min(5.0), TypeTag::Number), None);
        assert_eq!(eval(CellValue::text(" "), Rule::pattern("^x$"), TypeTag::Text), None);
    }

    #[test]
    fn test_min_max_by_column_type() {
        let issue = eval(CellValue::Number(15.0), Rule::min(18.0), TypeTag::Number).unwrap();
        assert_eq!(issue.category, Category::Invalid);
        assert_eq!(eval(CellValue::text("18"), Rule::min(18.0), TypeTag::Number), None);

        let issue = eval(CellValue::text("abc"), Rule::max(2.0), TypeTag::Text).unwrap();
        assert_eq!(issue.message, "Text must be at most 2 characters (found 3)");
        assert_eq!(eval(CellValue::text("abc"), Rule::min(3.0), TypeTag::Text), None);
        assert_eq!(eval(CellValue::text("abc"), Rule::min(9.0), TypeTag::Date), None);
    }

    #[test]
    fn test_message_override() {
        let rule = Rule::min(18.0).with_message("too young");
        let issue = eval(CellValue::Number(15.0), rule, TypeTag::Number).unwrap();
        assert_eq!(issue.message, "too young");
        assert_eq!(issue.suggestion, "Enter a value of at least 18");
    }

    #[test]
    fn test_pattern_and_invalid_pattern() {
        let code = Rule::pattern(r"^[A-Z]{2}-\d{3}$");
        let issue = eval(CellValue::text("AB-1"), code, TypeTag::Text).unwrap();
        assert_eq!(issue.category, Category::Format);
        let broken = Rule::pattern("(unclosed");
        assert_eq!(eval(CellValue::text("anything"), broken, TypeTag::Text), None);
        assert_eq!(eval(CellValue::Number(123.0), Rule::pattern(r"^\d+$"), TypeTag::Number), None);
    }

    #[test]
    fn test_enum() {
        let rule = Rule::one_of(["red", "green"]);
        assert_eq!(eval(CellValue::text(" red "), rule.clone(), TypeTag::Text), None);
        let issue = eval(CellValue::text("blue"), rule, TypeTag::Text).unwrap();
        assert_eq!(issue.category, Category::Invalid);
        assert_eq!(issue.suggestion, "Use one of: red, green");
        assert_eq!(eval(CellValue::Number(2.0), Rule::one_of(["1", "2"]), TypeTag::Number), None);
    }

    #[test]
    fn test_range_numbers_and_dates() {
        assert_eq!(eval(CellValue::Number(-7.0), Rule::range("-10--5"), TypeTag::Number), None);
        assert!(eval(CellValue::Number(0.0), Rule::range("-10--5"), TypeTag::Number).is_some());
        let rule = Rule::range("2020-01-01-2020-12-31");
        assert_eq!(eval(CellValue::text("2020-06-15"), rule.clone(), TypeTag::Date), None);
        let issue = eval(CellValue::text("2021-01-01"), rule, TypeTag::Date).unwrap();
        assert_eq!(issue.category, Category::Invalid);
        assert_eq!(eval(CellValue::Number(5.0), Rule::range("lots"), TypeTag::Number), None);
    }

    #[test]
    fn test_precision() {
        assert_eq!(eval(CellValue::text("1.25"), Rule::precision(2), TypeTag::Number), None);
        let issue = eval(CellValue::text("1.250"), Rule::precision(2), TypeTag::Number).unwrap();
        assert_eq!(issue.category, Category::Format);
        assert!(eval(CellValue::Number(0.125), Rule::precision(2), TypeTag::Number).is_some());
        assert_eq!(eval(CellValue::Number(10.0), Rule::precision(0), TypeTag::Number), None);
    }

    #[test]
    fn test_domain_and_length() {
        let rule = Rule::domain(["corp.example"]);
        assert_eq!(eval(CellValue::text("a@corp.example"), rule.clone(), TypeTag::Email), None);
        assert!(eval(CellValue::text("a@home.example"), rule.clone(), TypeTag::Email).is_some());
        assert_eq!(eval(CellValue::text("a@home.example"), rule, TypeTag::Text), None);

        assert_eq!(eval(CellValue::text("ABCDE"), Rule::length("5"), TypeTag::Text), None);
        let issue = eval(CellValue::text("ABC"), Rule::length("4-6"), TypeTag::Text).unwrap();
        assert_eq!(issue.message, "Text must be between 4 and 6 characters (found 3)");
    }

    #[test]
    fn test_custom_rule() {
        let even = Rule::custom(|value: &CellValue| {
            value.as_number().is_some_and(|n| n % 2.0 == 0.0)
        });
        assert_eq!(eval(CellValue::Number(4.0), even.clone(), TypeTag::Number), None);
        let issue = eval(CellValue::Number(3.0), even, TypeTag::Number).unwrap();
        assert_eq!(issue.category, Category::Other);

        let unbound: Rule = serde_json::from_str(r#"{"kind": "custom", "value": "even"}"#).unwrap();
        assert_eq!(eval(CellValue::Number(3.0), unbound, TypeTag::Number), None);
    }
}
