//! CSV header normalization.

/// UTF-8 byte order mark as it appears after decoding.
const BOM: char = '\u{feff}';

/// Normalizes a header value by trimming whitespace and a leading BOM.
pub fn normalize_header(value: &str) -> String {
    value.trim_start_matches(BOM).trim().to_string()
}
