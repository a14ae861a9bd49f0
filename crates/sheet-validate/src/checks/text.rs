//! Text checks: value shape and configured length bounds.

use sheet_model::{CellIssue, CellValue, TextConfig};

use super::quoted;
use crate::coerce::measured_length;

pub(super) fn check(value: &CellValue, config: &TextConfig) -> Option<CellIssue> {
    let Some(text) = value.as_str() else {
        return Some(CellIssue::format(
            format!(
                "Expected text but received {} {}",
                value.kind_name(),
                quoted(value)
            ),
            "Enter the value as text",
        ));
    };

    let length = measured_length(text, config.trim_whitespace);
    if config.min_length > 0 && length < config.min_length {
        return Some(CellIssue::invalid(
            format!(
                "Text must be at least {} characters (found {length})",
                config.min_length
            ),
            format!("Enter at least {} characters", config.min_length),
        ));
    }
    if config.max_length > 0 && length > config.max_length {
        return Some(CellIssue::invalid(
            format!(
                "Text must be at most {} characters (found {length})",
                config.max_length
            ),
            format!("Shorten the value to {} characters or fewer", config.max_length),
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::Category;

    #[test]
    fn test_non_text_is_format_error() {
        let issue = check(&CellValue::Number(12.0), &TextConfig::default()).unwrap();
        assert_eq!(issue.category, Category::Format);
        assert_eq!(issue.message, "Expected text but received number \"12\"");
    }

    #[test]
    fn test_zero_bounds_are_unbounded() {
        let long = "x".repeat(10_000);
        assert_eq!(check(&CellValue::text(long), &TextConfig::default()), None);
    }

    #[test]
    fn test_length_bounds() {
        let config = TextConfig {
            min_length: 2,
            max_length: 4,
            trim_whitespace: true,
        };
        let short = check(&CellValue::text(" a "), &config).unwrap();
        assert_eq!(short.category, Category::Invalid);
        assert_eq!(short.message, "Text must be at least 2 characters (found 1)");
        assert_eq!(check(&CellValue::text("abcd"), &config), None);
        assert!(check(&CellValue::text("abcde"), &config).is_some());
    }

    #[test]
    fn test_untrimmed_length_counts_whitespace() {
        let config = TextConfig {
            min_length: 3,
            max_length: 0,
            trim_whitespace: false,
        };
        assert_eq!(check(&CellValue::text(" a "), &config), None);
    }
}
