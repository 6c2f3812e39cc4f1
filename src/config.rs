//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::branding::{APP_DATA_DIR, CONFIG_DIR_ENV};
use crate::generator::{AssetSource, DirAssetSource, EmbeddedAssets};
use crate::models::Theme;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory with static assets overriding the embedded bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where generated packages are written when no `--out-dir` is given
    pub output_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Defaults applied to new generation configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Theme preselected in the wizard
    #[serde(default)]
    pub theme: Theme,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/RolodexGen/config.toml`
/// - macOS: `~/Library/Application Support/RolodexGen/config.toml`
/// - Windows: `%APPDATA%\RolodexGen\config.toml`
///
/// `ROLODEXGEN_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `assets_dir` must exist and be a directory (if set)
/// - `output_dir` must not be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// Wizard defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// Honors `ROLODEXGEN_CONFIG_DIR`, otherwise the platform config dir.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the config file without checking it.
    ///
    /// Used when editing: stored values that no longer validate (a deleted
    /// assets directory, say) must survive until the edit fixes them.
    pub fn load_unvalidated() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        tracing::debug!(path = %config_path.display(), "Saved configuration");
        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(assets_dir) = &self.paths.assets_dir {
            if !assets_dir.is_dir() {
                anyhow::bail!(
                    "Assets directory does not exist: {}",
                    assets_dir.display()
                );
            }
        }

        if self.output.output_dir.as_os_str().is_empty() {
            anyhow::bail!("Output directory must not be empty");
        }

        Ok(())
    }

    /// Asset source for generation: `override_dir`, then the configured
    /// directory, then the embedded bundle.
    #[must_use]
    pub fn asset_source(&self, override_dir: Option<&PathBuf>) -> Box<dyn AssetSource> {
        match override_dir.or(self.paths.assets_dir.as_ref()) {
            Some(dir) => Box::new(DirAssetSource::new(dir.clone())),
            None => Box::new(EmbeddedAssets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert!(config.paths.assets_dir.is_none());
        assert_eq!(config.output.output_dir, PathBuf::from("."));
        assert_eq!(config.defaults.theme, Theme::Auto);
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_assets_dir() {
        let mut config = Config::new();
        config.paths.assets_dir = Some(PathBuf::from("/nonexistent/rolodexgen/assets"));
        assert!(config.validate().is_err());

        let temp_dir = TempDir::new().unwrap();
        config.paths.assets_dir = Some(temp_dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_empty_output() {
        let mut config = Config::new();
        config.output.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.paths.assets_dir = Some(temp_dir.path().to_path_buf());
        config.defaults.theme = Theme::Md;

        let text = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[defaults]\ntheme = \"ios\"\n").unwrap();
        assert_eq!(config.defaults.theme, Theme::Ios);
        assert_eq!(config.output.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_asset_source_selection() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new();

        assert_eq!(config.asset_source(None).describe(), "embedded bundle");

        let dir = temp_dir.path().to_path_buf();
        assert_eq!(
            config.asset_source(Some(&dir)).describe(),
            dir.display().to_string()
        );
    }
}
