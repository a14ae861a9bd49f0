//! Boolean checks against the configured true/false tokens.

use sheet_model::{BooleanConfig, CellIssue, CellValue};

use super::quoted;

pub(super) fn check(value: &CellValue, config: &BooleanConfig) -> Option<CellIssue> {
    let accepted = match value {
        CellValue::Bool(_) => true,
        CellValue::Text(text) => config.resolve(text).is_some(),
        CellValue::Number(_) => config.resolve(&value.to_string()).is_some(),
        CellValue::Empty | CellValue::Date(_) => false,
    };
    if accepted {
        return None;
    }
    let tokens = config.accepted_tokens().join(", ");
    Some(CellIssue::format(
        format!("Expected one of {tokens} but received {}", quoted(value)),
        format!("Use one of: {tokens}"),
    ))
}
