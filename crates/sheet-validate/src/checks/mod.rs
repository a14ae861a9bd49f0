//! Per-type coercion and constraint checks.
//!
//! Each module checks one [`TypeTag`] against its section of the
//! [`TypeConfig`]. Checks are total and side-effect free: they return a
//! [`CellIssue`] for a failing value and `None` otherwise. Empty values
//! always pass; required-ness is checked by the validator.

mod boolean;
mod date;
mod email;
mod number;
mod phone;
mod text;

use sheet_model::{CellIssue, CellValue, TypeConfig, TypeTag};

use crate::pattern::PatternSet;

pub(crate) use email::{disallowed_domain, domain_allowed, email_domain};

/// Check a value against its declared type and the session's type defaults.
pub fn check_type(value: &CellValue, type_tag: TypeTag, config: &TypeConfig) -> Option<CellIssue> {
    check_type_with(&PatternSet::new(), value, type_tag, config)
}

pub(crate) fn check_type_with(
    patterns: &PatternSet,
    value: &CellValue,
    type_tag: TypeTag,
    config: &TypeConfig,
) -> Option<CellIssue> {
    if value.is_empty() {
        return None;
    }
    match type_tag {
        TypeTag::Text => text::check(value, &config.text),
        TypeTag::Number => number::check(value, &config.number),
        TypeTag::Date => date::check(value, &config.date),
        TypeTag::Boolean => boolean::check(value, &config.boolean),
        TypeTag::Email => email::check(patterns, value, &config.email),
        TypeTag::Phone => phone::check(patterns, value, &config.phone),
    }
}

/// Render a value in double quotes for messages.
pub(crate) fn quoted(value: &CellValue) -> String {
    format!("\"{value}\"")
}
