//! Narrow CSV line grammar shared by import and export.
//!
//! # Invariants
//! - One record is one physical line; quoted newlines are not supported.
//! - `"` toggles quoted state and is dropped; doubled quotes are NOT collapsed.
//! - The trailing field is always emitted, so `n` separators give `n + 1` fields.
//! - The writer quotes a field only when it contains a comma.
//!
//! Both rules are kept as-is so files exported by earlier releases keep
//! importing the same way.

use std::borrow::Cow;

const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// Splits one line into fields.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            SEPARATOR if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);

    fields
}

/// Encodes one field for export.
pub fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(SEPARATOR) {
        Cow::Owned(format!("\"{}\"", value.replace(QUOTE, "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Encodes and joins fields into one line, without the terminator.
pub fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    fields
        .into_iter()
        .map(csv_field)
        .collect::<Vec<_>>()
        .join(",")
}
