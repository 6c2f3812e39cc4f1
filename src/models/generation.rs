//! The aggregate configuration handed to the package generator.
//!
//! `GenerationConfig` is an immutable value: every `with_*` method consumes the
//! config and returns an edited copy, so the wizard replaces its config on each
//! step instead of mutating shared state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::{resize_blocks, ContentBlock, MAX_CONTENT_BLOCKS, MIN_CONTENT_BLOCKS};
use super::mapping::{FieldMapping, FieldRole};
use super::style::StyleConfig;
use super::table::{Delimiter, ParsedTable};

/// Application title used when none is given.
pub const DEFAULT_APP_TITLE: &str = "My Resource Hub";

/// Data file the generated app reads at run time.
pub const DEFAULT_DATA_FILE: &str = "data.csv";

/// Framework7 theme used by the generated shinyMobile app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Follow the device platform
    #[default]
    Auto,
    /// iOS look
    Ios,
    /// Material Design look
    Md,
}

impl Theme {
    /// All themes in display order.
    pub const ALL: [Self; 3] = [Self::Auto, Self::Ios, Self::Md];

    /// Value passed to `f7Page(options = list(theme = ...))`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Ios => "ios",
            Self::Md => "md",
        }
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Auto => "Match the visitor's platform",
            Self::Ios => "Always use the iOS style",
            Self::Md => "Always use Material Design",
        }
    }

    /// Parses a theme name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional behaviour of the generated app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// Free-text search over the directory
    pub search: bool,
    /// Category drop-down (needs a category column)
    pub filters: bool,
    /// Start in dark mode
    pub dark_mode: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            search: true,
            filters: true,
            dark_mode: false,
        }
    }
}

/// Where the generated app finds its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSource {
    /// File name relative to the app directory
    pub file_name: String,
    /// Field separator of that file
    pub delimiter: Delimiter,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_DATA_FILE.to_string(),
            delimiter: Delimiter::Comma,
        }
    }
}

/// Problems that make a configuration ungeneratable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The title role has no column.
    #[error("A title column must be selected before generating")]
    MissingTitleColumn,
    /// Block count outside 1..=5.
    #[error("Expected between 1 and 5 content blocks, found {0}")]
    BlockCount(usize),
    /// A mapped column is not in the uploaded table.
    #[error("{role} column '{column}' does not exist in the data file")]
    UnknownColumn {
        /// Role the column was mapped to
        role: FieldRole,
        /// Missing column name
        column: String,
    },
}

/// Everything the generator needs. This is its sole input besides the
/// static asset bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Application title shown in the navbar
    pub app_title: String,
    /// Column assignments
    pub mapping: FieldMapping,
    /// Stylesheet colours
    pub style: StyleConfig,
    /// Home-screen content blocks (1-5)
    pub blocks: Vec<ContentBlock>,
    /// Framework7 theme
    pub theme: Theme,
    /// Optional features
    pub features: FeatureToggles,
    /// Data file convention
    pub data: DataSource,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            app_title: DEFAULT_APP_TITLE.to_string(),
            mapping: FieldMapping::default(),
            style: StyleConfig::default(),
            blocks: vec![ContentBlock::default()],
            theme: Theme::default(),
            features: FeatureToggles::default(),
            data: DataSource::default(),
        }
    }
}

impl GenerationConfig {
    /// Creates a default config with the given title.
    pub fn new(app_title: impl Into<String>) -> Self {
        Self {
            app_title: app_title.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with a new title.
    pub fn with_title(mut self, app_title: impl Into<String>) -> Self {
        self.app_title = app_title.into();
        self
    }

    /// Returns a copy with `role` mapped to `column`.
    pub fn with_role(mut self, role: FieldRole, column: Option<String>) -> Self {
        self.mapping = self.mapping.with(role, column);
        self
    }

    /// Returns a copy with a new mapping.
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Returns a copy with a new style.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Returns a copy with the block list resized to `count` (clamped to 1..=5).
    pub fn with_block_count(mut self, count: usize) -> Self {
        self.blocks = resize_blocks(self.blocks, count);
        self
    }

    /// Returns a copy with block `index` replaced. Out-of-range indices are ignored.
    pub fn with_block(mut self, index: usize, block: ContentBlock) -> Self {
        if let Some(slot) = self.blocks.get_mut(index) {
            *slot = block;
        }
        self
    }

    /// Returns a copy with a new theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a copy with new feature toggles.
    pub fn with_features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    /// Returns a copy with a new data source.
    pub fn with_data(mut self, data: DataSource) -> Self {
        self.data = data;
        self
    }

    /// Title to render, falling back to the default for blank input.
    #[must_use]
    pub fn display_title(&self) -> &str {
        let title = self.app_title.trim();
        if title.is_empty() {
            DEFAULT_APP_TITLE
        } else {
            title
        }
    }

    /// Checks the invariants the generator relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mapping.has_title() {
            return Err(ConfigError::MissingTitleColumn);
        }

        if !(MIN_CONTENT_BLOCKS..=MAX_CONTENT_BLOCKS).contains(&self.blocks.len()) {
            return Err(ConfigError::BlockCount(self.blocks.len()));
        }

        Ok(())
    }

    /// Checks that every mapped column exists in `table`.
    pub fn validate_against(&self, table: &ParsedTable) -> Result<(), ConfigError> {
        self.validate()?;

        for (role, column) in self.mapping.assigned() {
            if !table.has_column(column) {
                return Err(ConfigError::UnknownColumn {
                    role,
                    column: column.to_string(),
                });
            }
        }

        Ok(())
    }
}
