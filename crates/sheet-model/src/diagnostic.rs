//! Row/column addressed validation diagnostics.

use serde::{Deserialize, Serialize};

use crate::value::CellValue;

/// Offset between a row's position in the data and the row number shown to
/// users: the header occupies row 1 and rows are 1-indexed.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Display row number for a zero-based data row index.
pub const fn display_row(index: usize) -> usize {
    index + HEADER_ROW_OFFSET
}

/// Diagnostic category. Each diagnostic belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// A required value is absent or empty.
    Missing,
    /// A value is present but has the wrong shape for its type or pattern.
    Format,
    /// A value has the right shape but violates a bound or constraint.
    Invalid,
    /// A custom rule failed.
    Other,
}

impl Category {
    pub const fn all() -> &'static [Self] {
        &[Self::Missing, Self::Format, Self::Invalid, Self::Other]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "missing" => Some(Self::Missing),
            "format" => Some(Self::Format),
            "invalid" => Some(Self::Invalid),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Missing => "Missing",
            Self::Format => "Format",
            Self::Invalid => "Invalid",
            Self::Other => "Other",
        }
    }

    /// Description for UI.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Missing => "Required values that are absent or empty",
            Self::Format => "Values with the wrong type or shape",
            Self::Invalid => "Values outside allowed bounds or lists",
            Self::Other => "Custom rule failures",
        }
    }
}

/// A single validation failure at a row and column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Display row number (data index + [`HEADER_ROW_OFFSET`]).
    pub row: usize,
    pub column: String,
    pub value: CellValue,
    pub message: String,
    pub category: Category,
    pub suggestion: String,
}

impl Diagnostic {
    /// Zero-based index of the data row this diagnostic refers to.
    pub fn row_index(&self) -> Option<usize> {
        self.row.checked_sub(HEADER_ROW_OFFSET)
    }
}

/// A failure produced by a type check or rule, before it is tied to a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellIssue {
    pub category: Category,
    pub message: String,
    pub suggestion: String,
}

impl CellIssue {
    pub fn new(
        category: Category,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn format(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(Category::Format, message, suggestion)
    }

    pub fn invalid(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(Category::Invalid, message, suggestion)
    }

    pub fn other(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::new(Category::Other, message, suggestion)
    }

    /// Replace the generated message when a configured one is given.
    #[must_use]
    pub fn with_message_override(mut self, message: Option<&str>) -> Self {
        if let Some(message) = message {
            self.message = message.to_string();
        }
        self
    }

    /// Address this issue to a data row index and column.
    pub fn at(self, row_index: usize, column: impl Into<String>, value: CellValue) -> Diagnostic {
        Diagnostic {
            row: display_row(row_index),
            column: column.into(),
            value,
            message: self.message,
            category: self.category,
            suggestion: self.suggestion,
        }
    }
}
