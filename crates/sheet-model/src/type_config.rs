//! Per-type defaults for an import session.
//!
//! A `TypeConfig` is built once at configuration time and read-only while
//! rows are validated. Every field has a default, so configuration files
//! only need to mention what they change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default email shape: something, `@`, something, `.`, something.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Default phone shape: 7 to 20 digits, spaces, `+`, `-` or parentheses.
pub const DEFAULT_PHONE_PATTERN: &str = r"^[\d+\- ()]{7,20}$";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypeConfig {
    pub text: TextConfig,
    pub number: NumberConfig,
    pub date: DateConfig,
    pub boolean: BooleanConfig,
    pub email: EmailConfig,
    pub phone: PhoneConfig,
}

/// Text constraints. A length bound of 0 means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    pub min_length: usize,
    pub max_length: usize,
    /// Measure length after trimming surrounding whitespace.
    pub trim_whitespace: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 0,
            trim_whitespace: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberConfig {
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Decimal places used when formatting numbers for export.
    pub precision: Option<u32>,
    pub integer_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateConfig {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    /// `strftime`-style format tried before the built-in formats, and used
    /// for export.
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanConfig {
    pub true_tokens: Vec<String>,
    pub false_tokens: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for BooleanConfig {
    fn default() -> Self {
        Self {
            true_tokens: ["true", "yes", "1", "y"].map(String::from).to_vec(),
            false_tokens: ["false", "no", "0", "n"].map(String::from).to_vec(),
            case_sensitive: false,
        }
    }
}

impl BooleanConfig {
    /// Resolve a text token to a boolean, or `None` when it is not accepted.
    pub fn resolve(&self, token: &str) -> Option<bool> {
        let token = token.trim();
        let is_match = |candidate: &String| {
            if self.case_sensitive {
                candidate.trim() == token
            } else {
                candidate.trim().to_lowercase() == token.to_lowercase()
            }
        };
        if self.true_tokens.iter().any(is_match) {
            Some(true)
        } else if self.false_tokens.iter().any(is_match) {
            Some(false)
        } else {
            None
        }
    }

    /// All accepted tokens, true tokens first, as configured.
    pub fn accepted_tokens(&self) -> Vec<&str> {
        self.true_tokens
            .iter()
            .chain(&self.false_tokens)
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailConfig {
    pub pattern: String,
    /// When non-empty, the part after `@` must be one of these.
    pub allowed_domains: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_EMAIL_PATTERN.to_string(),
            allowed_domains: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneConfig {
    pub pattern: String,
    /// Export layout such as `(XXX) XXX-XXXX`; each `X` takes one digit.
    pub display_format: Option<String>,
    pub allow_international: bool,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PHONE_PATTERN.to_string(),
            display_format: None,
            allow_international: true,
        }
    }
}
