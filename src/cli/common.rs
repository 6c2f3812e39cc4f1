//! Shared CLI plumbing: error type, exit codes and file loading helpers.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::models::GenerationConfig;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was read but rejected
    ValidationFailed = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by CLI commands.
#[derive(Debug)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Loads a [`GenerationConfig`] from TOML, JSON, JSON5 or YAML, chosen by
/// file extension. Unknown extensions are read as TOML.
pub fn load_generation_config(path: &Path) -> CliResult<GenerationConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))
        .map_err(|e| CliError::io(format!("{e:#}")))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parsed = match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(|e| e.to_string()),
        "json5" => json5::from_str(&content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yml::from_str(&content).map_err(|e| e.to_string()),
        _ => toml::from_str(&content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|e| {
        CliError::validation(format!(
            "Failed to parse generation config {}: {e}",
            path.display()
        ))
    })
}

/// Reads a data file as raw bytes.
pub fn read_data_file(path: &Path) -> CliResult<Vec<u8>> {
    fs::read(path)
        .map_err(|e| CliError::io(format!("Failed to read data file {}: {e}", path.display())))
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
