//! Escaping of user-supplied text for interpolation into R source.
//!
//! Every string that reaches the generated app goes through [`r_string`],
//! so quotes, backslashes and line breaks in titles, content blocks or embed
//! markup can never terminate a literal early.

use std::fmt::Write;

/// Escapes `value` for use inside a double-quoted R string literal.
///
/// NUL characters are dropped: R rejects them in string literals even when
/// escaped.
#[must_use]
pub fn escape_r_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => {}
            c if c.is_control() => {
                let _ = write!(escaped, "\\u{{{:04x}}}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }

    escaped
}

/// Quotes and escapes `value` as an R string literal.
#[must_use]
pub fn r_string(value: &str) -> String {
    format!("\"{}\"", escape_r_string(value))
}

/// R literal for an optional column: a string, or `NULL` when unset.
#[must_use]
pub fn r_string_or_null(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), r_string)
}

/// R logical literal.
#[must_use]
pub const fn r_bool(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}
