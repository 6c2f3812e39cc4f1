//! Data models for uploaded tables and generation settings.

pub mod content;
pub mod generation;
pub mod mapping;
pub mod style;
pub mod table;

pub use content::{resize_blocks, ContentBlock, MAX_CONTENT_BLOCKS, MIN_CONTENT_BLOCKS};
pub use generation::{
    ConfigError, DataSource, FeatureToggles, GenerationConfig, Theme, DEFAULT_APP_TITLE,
    DEFAULT_DATA_FILE,
};
pub use mapping::{FieldMapping, FieldRole};
pub use style::{is_valid_hex, normalize_hex, StyleConfig};
pub use table::{Delimiter, ParsedTable, Row, PREVIEW_COLUMNS, PREVIEW_ROWS};
