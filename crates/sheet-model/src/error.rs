//! Error types for the import data model.

use thiserror::Error;

/// Errors raised while building or deserializing import configuration.
///
/// Malformed data never produces a `ModelError`; it becomes a
/// [`Diagnostic`](crate::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A validation rule carries a value of the wrong shape for its kind.
    #[error("invalid {kind} rule: {message}")]
    InvalidRule { kind: String, message: String },

    /// Two schema columns share the same name.
    #[error("duplicate column '{name}' in schema")]
    DuplicateColumn { name: String },
}

impl ModelError {
    pub(crate) fn invalid_rule(kind: &str, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::DuplicateColumn {
            name: "email".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate column 'email' in schema");

        let err = ModelError::invalid_rule("min", "expected a number");
        assert_eq!(err.to_string(), "invalid min rule: expected a number");
    }
}
