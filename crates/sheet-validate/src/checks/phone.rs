//! Phone checks: pattern and international prefix.

use sheet_model::{CellIssue, CellValue, PhoneConfig};

use super::quoted;
use crate::pattern::PatternSet;

pub(super) fn check(
    patterns: &PatternSet,
    value: &CellValue,
    config: &PhoneConfig,
) -> Option<CellIssue> {
    let text = match value {
        CellValue::Text(text) => text.trim().to_string(),
        CellValue::Number(_) => value.to_string(),
        _ => {
            return Some(not_a_phone(value));
        }
    };
    if !patterns.is_match(&config.pattern, &text, "phone type") {
        return Some(not_a_phone(value));
    }
    if !config.allow_international && text.contains('+') {
        return Some(CellIssue::invalid(
            format!("International numbers are not allowed: {}", quoted(value)),
            "Enter a domestic number without the + prefix",
        ));
    }
    None
}

fn not_a_phone(value: &CellValue) -> CellIssue {
    CellIssue::format(
        format!("Expected a phone number but received {}", quoted(value)),
        "Enter 7 to 20 digits, optionally with spaces, dashes or parentheses",
    )
}
