//! Best-effort coercion of raw cell values to declared types.

use std::fmt::Write;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use sheet_model::{CellValue, DateConfig};

/// Date-only layouts tried after the configured format, in order.
///
/// Slash dates are read month first (`01/02/2024` is January 2nd).
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Date-time layouts whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Largest spreadsheet serial day number (9999-12-31).
const MAX_SERIAL_DAY: f64 = 2_958_465.0;

/// Coerce a cell to a calendar date.
///
/// Date cells pass through, text is parsed, and numbers are read as
/// spreadsheet serial day numbers.
pub fn as_date(value: &CellValue, config: &DateConfig) -> Option<NaiveDate> {
    match value {
        CellValue::Date(date) => Some(*date),
        CellValue::Text(text) => parse_date(text, config.format.as_deref()),
        CellValue::Number(serial) => from_serial_day(*serial),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// Parse date text, trying `format` first and then the built-in layouts.
pub fn parse_date(text: &str, format: Option<&str>) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(format) = format {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|layout| NaiveDate::parse_from_str(trimmed, layout).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|datetime| datetime.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
                .map(|datetime| datetime.date())
        })
}

/// Convert a spreadsheet serial day number (days since 1899-12-30) to a date.
pub fn from_serial_day(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_SERIAL_DAY).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Format a date with a user-supplied layout, falling back to ISO 8601 when
/// the layout is not a valid format string.
pub fn format_date(date: NaiveDate, format: Option<&str>) -> String {
    if let Some(format) = format {
        let mut out = String::new();
        if write!(out, "{}", date.format(format)).is_ok() {
            return out;
        }
    }
    date.format("%Y-%m-%d").to_string()
}

/// Text length as measured by length constraints.
pub(crate) fn measured_length(text: &str, trim: bool) -> usize {
    if trim {
        text.trim().chars().count()
    } else {
        text.chars().count()
    }
}

/// Split a `"min-max"` specification at the first hyphen where both sides
/// parse. Hyphens inside the bounds (negative numbers, ISO dates) are fine.
pub(crate) fn split_bounds<T, F>(spec: &str, parse: F) -> Option<(T, T)>
where
    F: Fn(&str) -> Option<T>,
{
    let spec = spec.trim();
    spec.match_indices('-').find_map(|(idx, _)| {
        let lower = spec[..idx].trim();
        let upper = spec[idx + 1..].trim();
        Some((parse(lower)?, parse(upper)?))
    })
}

/// Parsed `length` rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LengthSpec {
    Exact(usize),
    Between(usize, usize),
}

pub(crate) fn parse_length_spec(spec: &str) -> Option<LengthSpec> {
    let spec = spec.trim();
    if let Ok(exact) = spec.parse::<usize>() {
        return Some(LengthSpec::Exact(exact));
    }
    split_bounds(spec, |part| part.parse::<usize>().ok())
        .map(|(min, max)| LengthSpec::Between(min, max))
}

pub(crate) fn parse_number_bounds(spec: &str) -> Option<(f64, f64)> {
    split_bounds(spec, |part| {
        part.parse::<f64>().ok().filter(|value| value.is_finite())
    })
}

pub(crate) fn parse_date_bounds(
    spec: &str,
    format: Option<&str>,
) -> Option<(NaiveDate, NaiveDate)> {
    split_bounds(spec, |part| parse_date(part, format))
}
