//! Date checks: parseability and calendar bounds.

use chrono::NaiveDate;
use sheet_model::{CellIssue, CellValue, DateConfig};

use super::quoted;
use crate::coerce::{as_date, format_date};

pub(super) fn check(value: &CellValue, config: &DateConfig) -> Option<CellIssue> {
    let format = config.format.as_deref();
    let Some(date) = as_date(value, config) else {
        return Some(CellIssue::format(
            format!("Expected a date but received {}", quoted(value)),
            format!("Enter a date such as {}", example(format)),
        ));
    };

    if let Some(min) = config.min_date.filter(|min| date < *min) {
        return Some(CellIssue::invalid(
            format!(
                "Date {} is before the earliest allowed date {}",
                format_date(date, format),
                format_date(min, format)
            ),
            format!("Enter a date on or after {}", format_date(min, format)),
        ));
    }
    if let Some(max) = config.max_date.filter(|max| date > *max) {
        return Some(CellIssue::invalid(
            format!(
                "Date {} is after the latest allowed date {}",
                format_date(date, format),
                format_date(max, format)
            ),
            format!("Enter a date on or before {}", format_date(max, format)),
        ));
    }
    None
}

fn example(format: Option<&str>) -> String {
    NaiveDate::from_ymd_opt(2024, 1, 31)
        .map(|date| format_date(date, format))
        .unwrap_or_default()
}
