//! Cell values as decoded from a spreadsheet or CSV source.
//!
//! Source files carry untyped cells. `CellValue` keeps whatever shape the
//! parser produced; coercion to a column's declared type happens during
//! validation, never at decode time.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Deserializes untagged from JSON: `null` becomes [`CellValue::Empty`],
/// booleans, numbers and strings map to their variants. `Date` is only
/// produced programmatically (for example by a spreadsheet parser that
/// already recognised a date cell).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for `Empty` and for text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Borrow the text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Best-effort numeric coercion.
    ///
    /// Numbers pass through; text is trimmed and parsed. Non-finite results
    /// (`NaN`, `inf`) are rejected.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if value.is_finite() => Some(*value),
            Self::Text(text) => parse_number(text),
            _ => None,
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Date(_) => "date",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => f.write_str(&format_number(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Parse trimmed text as a finite number.
fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Formats a number without trailing zeros (`15.0` renders as `15`).
///
/// # Examples
///
/// ```
/// use sheet_model::format_number;
///
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(10.0), "10");
/// assert_eq!(format_number(1.25), "1.25");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
