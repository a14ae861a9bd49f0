//! Email checks: address pattern and allowed domains.

use sheet_model::{CellIssue, CellValue, EmailConfig};

use super::quoted;
use crate::pattern::PatternSet;

pub(super) fn check(
    patterns: &PatternSet,
    value: &CellValue,
    config: &EmailConfig,
) -> Option<CellIssue> {
    let Some(address) = value.as_str().map(str::trim) else {
        return Some(not_an_address(value));
    };
    if !patterns.is_match(&config.pattern, address, "email type") {
        return Some(not_an_address(value));
    }

    if !config.allowed_domains.is_empty() {
        let domain = email_domain(address).unwrap_or_default();
        if !domain_allowed(domain, &config.allowed_domains) {
            return Some(disallowed_domain(domain, &config.allowed_domains));
        }
    }
    None
}

/// The part after the last `@`.
pub(crate) fn email_domain(address: &str) -> Option<&str> {
    address.rsplit_once('@').map(|(_, domain)| domain.trim())
}

/// Domains compare ASCII case-insensitively.
pub(crate) fn domain_allowed(domain: &str, allowed: &[String]) -> bool {
    allowed
        .iter()
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(domain))
}

pub(crate) fn disallowed_domain(domain: &str, allowed: &[String]) -> CellIssue {
    let allowed = allowed.join(", ");
    CellIssue::invalid(
        format!("Email domain \"{domain}\" is not allowed"),
        format!("Use an address at one of: {allowed}"),
    )
}

fn not_an_address(value: &CellValue) -> CellIssue {
    CellIssue::format(
        format!("Expected an email address but received {}", quoted(value)),
        "Enter an address such as name@example.com",
    )
}
