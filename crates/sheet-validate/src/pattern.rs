//! Regex patterns supplied by configuration.
//!
//! A pattern that fails to compile is a configuration error, not a data
//! error: the engine treats it as always matching and logs a warning. Use
//! [`lint_schema`](crate::lint_schema) to surface such patterns at load time.

use std::cell::RefCell;
use std::collections::HashMap;

use regex::Regex;
use tracing::warn;

/// Compile a configured pattern.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(pattern)
}

/// Patterns compiled during a single validation pass.
///
/// Owned by one pass and dropped with it, so nothing is shared between calls.
#[derive(Debug, Default)]
pub(crate) struct PatternSet {
    compiled: RefCell<HashMap<String, Option<Regex>>>,
}

impl PatternSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Match `text` against `pattern`. An invalid pattern always matches.
    ///
    /// `context` names where the pattern came from for the warning log.
    pub(crate) fn is_match(&self, pattern: &str, text: &str, context: &str) -> bool {
        let mut compiled = self.compiled.borrow_mut();
        let regex = compiled
            .entry(pattern.to_string())
            .or_insert_with(|| match compile_pattern(pattern) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    warn!(
                        pattern,
                        context,
                        error = %error,
                        "invalid pattern in configuration; values are not checked against it"
                    );
                    None
                }
            });
        regex.as_ref().is_none_or(|regex| regex.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_valid_pattern() {
        let patterns = PatternSet::new();
        assert!(patterns.is_match(r"^\d{3}$", "123", "test"));
        assert!(!patterns.is_match(r"^\d{3}$", "12a", "test"));
    }

    #[test]
    fn test_invalid_pattern_always_matches() {
        let patterns = PatternSet::new();
        assert!(compile_pattern("[unclosed").is_err());
        assert!(patterns.is_match("[unclosed", "anything", "test"));
        assert!(patterns.is_match("[unclosed", "", "test"));
    }
}
