//! Colour handling for the generated stylesheet.

use serde::{Deserialize, Deserializer, Serialize};

/// Default primary colour, also the stylesheet placeholder token.
pub const DEFAULT_PRIMARY: &str = "#2563eb";
/// Default secondary colour, also the stylesheet placeholder token.
pub const DEFAULT_SECONDARY: &str = "#10b981";
/// Default accent colour, also the stylesheet placeholder token.
pub const DEFAULT_ACCENT: &str = "#f59e0b";
/// Default text colour, also the stylesheet placeholder token.
pub const DEFAULT_TEXT: &str = "#1f2937";

/// Normalizes a colour string to the canonical `#rrggbb` form.
///
/// - Surrounding whitespace is trimmed and `#` is prepended if missing
/// - A 3-digit shorthand (`#abc`) is expanded by doubling each digit
/// - The result is ASCII-lowercased
///
/// Any other length passes through without validation, so the function is
/// total and idempotent.
///
/// # Examples
///
/// ```
/// use rolodexgen::models::normalize_hex;
///
/// assert_eq!(normalize_hex("#abc"), "#aabbcc");
/// assert_eq!(normalize_hex("ABCDEF"), "#abcdef");
/// ```
#[must_use]
pub fn normalize_hex(input: &str) -> String {
    let trimmed = input.trim();
    let mut hex = if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    };

    if hex.chars().count() == 4 {
        let digits: String = hex.chars().skip(1).flat_map(|c| [c, c]).collect();
        hex = format!("#{digits}");
    }

    hex.to_ascii_lowercase()
}

/// Returns true for a well-formed `#rrggbb` colour.
#[must_use]
pub fn is_valid_hex(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|digits| digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
}

fn normalized<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_hex(&raw))
}

/// The four colours applied to the generated stylesheet.
///
/// Values are always stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Navbar, buttons, links
    #[serde(deserialize_with = "normalized")]
    pub primary: String,
    /// Secondary surfaces and badges
    #[serde(deserialize_with = "normalized")]
    pub secondary: String,
    /// Highlights
    #[serde(deserialize_with = "normalized")]
    pub accent: String,
    /// Body text
    #[serde(deserialize_with = "normalized")]
    pub text: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: DEFAULT_SECONDARY.to_string(),
            accent: DEFAULT_ACCENT.to_string(),
            text: DEFAULT_TEXT.to_string(),
        }
    }
}

impl StyleConfig {
    /// Creates a style from four colours, normalizing each.
    #[must_use]
    pub fn new(primary: &str, secondary: &str, accent: &str, text: &str) -> Self {
        Self {
            primary: normalize_hex(primary),
            secondary: normalize_hex(secondary),
            accent: normalize_hex(accent),
            text: normalize_hex(text),
        }
    }

    /// Returns a copy with a new primary colour.
    pub fn with_primary(mut self, color: &str) -> Self {
        self.primary = normalize_hex(color);
        self
    }

    /// Returns a copy with a new secondary colour.
    pub fn with_secondary(mut self, color: &str) -> Self {
        self.secondary = normalize_hex(color);
        self
    }

    /// Returns a copy with a new accent colour.
    pub fn with_accent(mut self, color: &str) -> Self {
        self.accent = normalize_hex(color);
        self
    }

    /// Returns a copy with a new text colour.
    pub fn with_text(mut self, color: &str) -> Self {
        self.text = normalize_hex(color);
        self
    }

    /// `(name, value)` pairs in a fixed order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("text", &self.text),
        ]
    }
}
