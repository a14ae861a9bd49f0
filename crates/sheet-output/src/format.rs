//! Type-specific cell formatting for export.
//!
//! Formatting is applied only when rows leave the engine; validation always
//! sees the values as read.

use sheet_model::{CellValue, ColumnSchema, TypeConfig, TypeTag, format_number};
use sheet_validate::coerce::{as_date, format_date};

/// Format a cell for export according to its column type.
///
/// Values that cannot be coerced to the column type are written as read.
pub fn format_cell(value: &CellValue, column: &ColumnSchema, config: &TypeConfig) -> String {
    if value.is_empty() {
        return String::new();
    }
    let formatted = match column.type_tag {
        TypeTag::Number => value
            .as_number()
            .map(|number| group_thousands(number, config.number.precision)),
        TypeTag::Date => as_date(value, &config.date)
            .map(|date| format_date(date, config.date.format.as_deref())),
        TypeTag::Boolean => boolean(value, config).map(|flag| yes_no(flag).to_string()),
        TypeTag::Phone => config
            .phone
            .display_format
            .as_deref()
            .and_then(|layout| format_phone(&value.to_string(), layout)),
        TypeTag::Email => value.as_str().map(|text| text.trim().to_string()),
        TypeTag::Text if config.text.trim_whitespace => {
            value.as_str().map(|text| text.trim().to_string())
        }
        TypeTag::Text => None,
    };
    formatted.unwrap_or_else(|| value.to_string())
}

/// Format a number with `,` thousands separators, fixed to `precision`
/// decimal places when given.
pub fn group_thousands(value: f64, precision: Option<u32>) -> String {
    // Avoid "-0" for negative zero.
    let value = if value == 0.0 { 0.0 } else { value };
    let text = match precision {
        Some(digits) => format!("{value:.prec$}", prec = digits as usize),
        None => format_number(value),
    };
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Lay the digits of a phone number into the `X` placeholders of `layout`.
///
/// Returns `None` unless the digit count equals the placeholder count.
pub fn format_phone(raw: &str, layout: &str) -> Option<String> {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let slots = layout.chars().filter(|ch| *ch == 'X').count();
    if slots == 0 || digits.len() != slots {
        return None;
    }
    let mut digits = digits.into_iter();
    Some(
        layout
            .chars()
            .map(|ch| match ch {
                'X' => digits.next().unwrap_or(ch),
                other => other,
            })
            .collect(),
    )
}

fn boolean(value: &CellValue, config: &TypeConfig) -> Option<bool> {
    match value {
        CellValue::Bool(flag) => Some(*flag),
        CellValue::Text(text) => config.boolean.resolve(text),
        CellValue::Number(_) => config.boolean.resolve(&value.to_string()),
        CellValue::Empty | CellValue::Date(_) => None,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheet_model::PhoneConfig;

    fn column(tag: TypeTag) -> ColumnSchema {
        ColumnSchema::new("c", tag)
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(1234.5, None), "1,234.5");
        assert_eq!(group_thousands(-1_234_567.0, None), "-1,234,567");
        assert_eq!(group_thousands(999.0, None), "999");
        assert_eq!(group_thousands(1000.0, Some(2)), "1,000.00");
        assert_eq!(group_thousands(-0.0, Some(1)), "0.0");
        assert_eq!(group_thousands(0.5, None), "0.5");
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(
            format_phone("555.123.4567", "(XXX) XXX-XXXX").as_deref(),
            Some("(555) 123-4567")
        );
        assert_eq!(format_phone("12345", "(XXX) XXX-XXXX"), None);
        assert_eq!(format_phone("12345", "none"), None);
    }

    #[test]
    fn test_format_cell_by_type() {
        let mut config = TypeConfig::default();
        config.date.format = Some("%d/%m/%Y".to_string());
        config.phone = PhoneConfig {
            display_format: Some("XXX-XXXX".to_string()),
            ..PhoneConfig::default()
        };

        let number = column(TypeTag::Number);
        assert_eq!(format_cell(&CellValue::text("12345.6"), &number, &config), "12,345.6");
        assert_eq!(format_cell(&CellValue::text("n/a"), &number, &config), "n/a");

        let date = column(TypeTag::Date);
        assert_eq!(format_cell(&CellValue::text("2024-01-31"), &date, &config), "31/01/2024");

        let boolean = column(TypeTag::Boolean);
        assert_eq!(format_cell(&CellValue::text("y"), &boolean, &config), "Yes");
        assert_eq!(format_cell(&CellValue::Bool(false), &boolean, &config), "No");

        let phone = column(TypeTag::Phone);
        assert_eq!(format_cell(&CellValue::text("5551234"), &phone, &config), "555-1234");

        let text = column(TypeTag::Text);
        assert_eq!(format_cell(&CellValue::text("  Ada "), &text, &config), "Ada");
        assert_eq!(format_cell(&CellValue::Empty, &text, &config), "");
    }
}
