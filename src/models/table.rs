//! Parsed tabular data (CSV/TSV) as produced by the upload step.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of rows shown in the mapping-step preview.
pub const PREVIEW_ROWS: usize = 3;

/// Number of columns shown in the mapping-step preview.
pub const PREVIEW_COLUMNS: usize = 4;

/// A single data row, keyed by column name.
pub type Row = BTreeMap<String, String>;

/// Field separator detected for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Comma-separated values
    #[default]
    Comma,
    /// Tab-separated values
    Tab,
}

impl Delimiter {
    /// Returns the separator character.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }

    /// Returns the escape sequence used inside an R string literal.
    #[must_use]
    pub const fn r_literal(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Tab => "\\t",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comma => write!(f, "comma"),
            Self::Tab => write!(f, "tab"),
        }
    }
}

/// Result of parsing an uploaded file.
///
/// Every row carries a value for every column (possibly empty) and rows that
/// were entirely blank have already been dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedTable {
    /// Column names in first-row order, unique
    pub columns: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<Row>,
    /// Separator that was detected
    pub delimiter: Delimiter,
}

impl ParsedTable {
    /// Returns true when no header row was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if `column` is one of the declared columns.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// First `limit` rows, for display only.
    #[must_use]
    pub fn preview(&self, limit: usize) -> &[Row] {
        &self.rows[..self.rows.len().min(limit)]
    }

    /// Value of `column` in row `index`, if both exist.
    #[must_use]
    pub fn value(&self, index: usize, column: &str) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.get(column))
            .map(String::as_str)
    }
}
