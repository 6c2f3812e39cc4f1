//! Single-pass `{{TOKEN}}` substitution.
//!
//! Substituted values are copied to the output without being scanned again,
//! so user text containing `{{...}}` is never treated as a placeholder.

use std::collections::HashMap;

/// Errors raised while rendering a fixed template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The template references a token that has no value.
    #[error("Template references unknown token '{0}'")]
    UnknownToken(String),
}

/// Replaces every `{{NAME}}` in `template` with `values[NAME]`.
///
/// Text that is not a well-formed token (e.g. an unclosed `{{`) is copied
/// unchanged.
pub fn render_template(
    template: &str,
    values: &HashMap<&str, String>,
) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len() + 1024);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return Ok(output);
        };

        let name = &after_open[..end];
        if !is_token_name(name) {
            output.push_str("{{");
            rest = after_open;
            continue;
        }

        let value = values
            .get(name)
            .ok_or_else(|| TemplateError::UnknownToken(name.to_string()))?;
        output.push_str(value);
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    Ok(output)
}

/// Token names are upper-case ASCII letters, digits and underscores.
fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_string())).collect()
    }

    #[test]
    fn test_render_basic() {
        let out = render_template(
            "title = {{TITLE}}; again {{TITLE}}",
            &values(&[("TITLE", "\"A\"")]),
        )
        .unwrap();
        assert_eq!(out, "title = \"A\"; again \"A\"");
    }

    #[test]
    fn test_values_not_rescanned() {
        let out = render_template(
            "{{A}}-{{B}}",
            &values(&[("A", "{{B}}"), ("B", "b")]),
        )
        .unwrap();
        assert_eq!(out, "{{B}}-b");
    }

    #[test]
    fn test_unknown_token_is_error() {
        let err = render_template("{{MISSING}}", &values(&[])).unwrap_err();
        assert_eq!(err, TemplateError::UnknownToken("MISSING".to_string()));
    }

    #[test]
    fn test_non_tokens_copied() {
        let out = render_template("f <- function() {{ x }} {{", &values(&[])).unwrap();
        assert_eq!(out, "f <- function() {{ x }} {{");
    }
}
