//! Column schema and import policies.

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// Declared type of a column. Selects the coercion and constraint logic
/// applied to its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Email,
    Phone,
}

impl TypeTag {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Text,
            Self::Number,
            Self::Date,
            Self::Boolean,
            Self::Email,
            Self::Phone,
        ]
    }

    /// Parse a type tag from configuration text.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "string" => Some(Self::Text),
            "number" | "numeric" => Some(Self::Number),
            "date" => Some(Self::Date),
            "boolean" | "bool" => Some(Self::Boolean),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
            Self::Email => "Email",
            Self::Phone => "Phone",
        }
    }
}

/// What to do with a cell that failed validation when the data is handed on
/// for submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDataHandling {
    /// Keep the raw value and mark it for manual review.
    #[default]
    Flag,
    /// Clear the value.
    Remove,
    /// Replace the value with the column's default.
    Default,
    /// Block the import.
    Reject,
}

impl InvalidDataHandling {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Flag => "Flag",
            Self::Remove => "Remove",
            Self::Default => "Default",
            Self::Reject => "Reject",
        }
    }
}

/// Policy for columns found in the data that the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnHandling {
    /// Leave the data untouched and block the import.
    Reject,
    /// Strip extra columns silently.
    Ignore,
    /// Strip extra columns and tell the user.
    #[default]
    Warn,
    /// Keep extra columns in every row.
    Include,
}

impl ColumnHandling {
    pub const fn all() -> &'static [Self] {
        &[Self::Reject, Self::Ignore, Self::Warn, Self::Include]
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Some(Self::Reject),
            "ignore" => Some(Self::Ignore),
            "warn" => Some(Self::Warn),
            "include" => Some(Self::Include),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Reject => "Reject",
            Self::Ignore => "Ignore",
            Self::Warn => "Warn",
            Self::Include => "Include",
        }
    }

    /// Whether extra columns are removed from the cleaned rows.
    pub fn strips_extras(&self) -> bool {
        matches!(self, Self::Ignore | Self::Warn)
    }
}

/// One declared column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    /// Column name as it appears in the file header. Unique within a schema.
    pub name: String,
    /// Human-readable name used in messages. Falls back to `name` when blank.
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, rename = "type")]
    pub type_tag: TypeTag,
    /// Evaluated in declaration order, every rule for every present value.
    #[serde(default)]
    pub validation_rules: Vec<Rule>,
    /// Format pattern (regex) for text columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub invalid_handling: InvalidDataHandling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.validation_rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_format(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_invalid_handling(mut self, handling: InvalidDataHandling) -> Self {
        self.invalid_handling = handling;
        self
    }

    #[must_use]
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Name shown to users: the display name, or the column name when unset.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_parse() {
        assert_eq!(TypeTag::parse("Number"), Some(TypeTag::Number));
        assert_eq!(TypeTag::parse(" bool "), Some(TypeTag::Boolean));
        assert_eq!(TypeTag::parse("currency"), None);
        for tag in TypeTag::all() {
            assert_eq!(TypeTag::parse(tag.label()), Some(*tag));
        }
    }

    #[test]
    fn test_column_handling_parse() {
        for policy in ColumnHandling::all() {
            assert_eq!(ColumnHandling::parse(policy.label()), Some(*policy));
        }
        assert!(ColumnHandling::Warn.strips_extras());
        assert!(!ColumnHandling::Include.strips_extras());
        assert!(!ColumnHandling::Reject.strips_extras());
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let column = ColumnSchema::new("email", TypeTag::Email);
        assert_eq!(column.label(), "email");
        let column = column.with_display_name("Email Address");
        assert_eq!(column.label(), "Email Address");
    }

    #[test]
    fn test_deserialize_defaults() {
        let column: ColumnSchema =
            serde_json::from_str(r#"{"name": "age", "type": "number", "required": true}"#)
                .unwrap();
        assert_eq!(column.name, "age");
        assert_eq!(column.type_tag, TypeTag::Number);
        assert!(column.required);
        assert!(column.validation_rules.is_empty());
        assert_eq!(column.invalid_handling, InvalidDataHandling::Flag);
        assert_eq!(column.label(), "age");
    }
}
