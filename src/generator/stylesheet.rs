//! Derivation of the app stylesheet from the base template.
//!
//! The base stylesheet uses the default palette as placeholder tokens. Each
//! token is replaced, case-insensitively, by the matching configured colour.
//! Replacement happens in one pass so a configured colour that equals another
//! token is never replaced a second time.

use regex::{Captures, Regex, RegexBuilder};

use crate::models::style::{DEFAULT_ACCENT, DEFAULT_PRIMARY, DEFAULT_SECONDARY, DEFAULT_TEXT};
use crate::models::StyleConfig;

/// Placeholder tokens in the base stylesheet, in `StyleConfig::entries` order.
pub const PLACEHOLDER_TOKENS: [&str; 4] =
    [DEFAULT_PRIMARY, DEFAULT_SECONDARY, DEFAULT_ACCENT, DEFAULT_TEXT];

fn token_pattern() -> Regex {
    let alternation = PLACEHOLDER_TOKENS
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");

    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| unreachable!("placeholder pattern is static: {e}"))
}

/// Replaces every placeholder token in `base` with the colours from `style`.
///
/// Values are inserted verbatim; no other text is changed.
#[must_use]
pub fn render_stylesheet(base: &str, style: &StyleConfig) -> String {
    let entries = style.entries();

    token_pattern()
        .replace_all(base, |caps: &Captures<'_>| {
            let matched = caps[0].to_ascii_lowercase();
            PLACEHOLDER_TOKENS
                .iter()
                .position(|token| *token == matched)
                .map_or_else(|| caps[0].to_string(), |index| entries[index].1.to_string())
        })
        .into_owned()
}
