//! Numeric coercion of measurement cells.

use std::sync::OnceLock;

use regex::Regex;

fn leading_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap()
    })
}

/// Parse the decimal number a measurement cell starts with.
///
/// Leading whitespace is skipped and the longest numeric prefix is used,
/// so `"36 cm"` and `"36-38"` both read as `36`. Cells without a numeric
/// prefix, and prefixes that overflow to infinity, give `None`.
pub fn parse_measurement(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let found = leading_number().find(trimmed)?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
