//! Number checks: numeric coercion, whole-number constraint and bounds.

use sheet_model::{CellIssue, CellValue, NumberConfig, format_number};

use super::quoted;

pub(super) fn check(value: &CellValue, config: &NumberConfig) -> Option<CellIssue> {
    let Some(number) = value.as_number() else {
        return Some(CellIssue::format(
            format!("Expected a number but received {}", quoted(value)),
            "Enter a numeric value such as 42 or 3.14",
        ));
    };

    if config.integer_only && number.fract() != 0.0 {
        return Some(CellIssue::format(
            format!(
                "Expected a whole number but received {}",
                format_number(number)
            ),
            "Remove the decimal part",
        ));
    }
    if let Some(min) = config.min.filter(|min| number < *min) {
        return Some(CellIssue::invalid(
            format!(
                "Value {} is less than the minimum of {}",
                format_number(number),
                format_number(min)
            ),
            format!("Enter a value of at least {}", format_number(min)),
        ));
    }
    if let Some(max) = config.max.filter(|max| number > *max) {
        return Some(CellIssue::invalid(
            format!(
                "Value {} is greater than the maximum of {}",
                format_number(number),
                format_number(max)
            ),
            format!("Enter a value of at most {}", format_number(max)),
        ));
    }
    None
}
