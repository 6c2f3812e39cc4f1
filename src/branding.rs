//! Branding and application identity configuration.
//!
//! This module centralizes all branding-related strings (names, paths) so the
//! CLI, web server and generated files agree on them.

/// The human-readable display name of the application.
///
/// Used in:
/// - Help text
/// - Web health responses
/// - Interactive wizard banner
pub const APP_DISPLAY_NAME: &str = "RolodexGen";

/// The binary/executable name (lowercase, no spaces).
///
/// Used in:
/// - Cargo.toml package name
/// - Command examples in help output
pub const APP_BINARY_NAME: &str = "rolodexgen";

/// The directory name for application data (config).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "RolodexGen";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ROLODEXGEN_CONFIG_DIR";

/// Short description for package metadata and help text.
pub const APP_DESCRIPTION: &str = "Turn a CSV/TSV resource list into a shinyMobile Rolodex app";

/// Identifier written into the header of generated sources.
pub const GENERATOR_ID: &str = concat!("rolodexgen ", env!("CARGO_PKG_VERSION"));
