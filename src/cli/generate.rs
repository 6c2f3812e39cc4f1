//! Generate command: build the app package from a generation config.

use crate::cli::common::{
    load_generation_config, print_json, read_data_file, CliError, CliResult,
};
use crate::config::Config;
use crate::generator::{self, GenerateError, Package};
use crate::parser;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate a shinyMobile app package from a generation config
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Generation config (TOML, JSON, JSON5 or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Data file to check mapped columns against
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output directory (defaults to the configured output directory)
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output format: archive, app, or all
    #[arg(long, value_name = "TYPE", default_value = "archive")]
    pub format: String,

    /// Directory with static assets replacing the embedded bundle
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Print a JSON report instead of plain text
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct GenerateReport {
    generated_at: String,
    generator: &'static str,
    app_title: String,
    files: Vec<String>,
    app_sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stylesheet_sha256: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped_assets: Vec<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        if !matches!(self.format.as_str(), "archive" | "app" | "all") {
            return Err(CliError::validation(format!(
                "Invalid format '{}'. Must be 'archive', 'app', or 'all'",
                self.format
            )));
        }

        let settings = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;
        let config = load_generation_config(&self.config)?;

        if let Some(data_path) = &self.data {
            let bytes = read_data_file(data_path)?;
            let file_name = data_path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let table = parser::parse_upload(&file_name, None, &bytes)
                .map_err(|e| CliError::validation(e.to_string()))?;
            config
                .validate_against(&table)
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        let out_dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| settings.output.output_dir.clone());
        fs::create_dir_all(&out_dir).map_err(|e| {
            CliError::io(format!(
                "Failed to create output directory {}: {e}",
                out_dir.display()
            ))
        })?;

        let mut files = Vec::new();

        let report = if self.format == "app" {
            let (file_name, source) =
                generator::generate_app(&config).map_err(map_generate_error)?;
            files.push(write_output(&out_dir, &file_name, source.as_bytes())?);

            GenerateReport {
                generated_at: Utc::now().to_rfc3339(),
                generator: crate::branding::GENERATOR_ID,
                app_title: config.display_title().to_string(),
                files,
                app_sha256: generator::sha256_hex(source.as_bytes()),
                stylesheet_sha256: None,
                entries: Vec::new(),
                skipped_assets: Vec::new(),
            }
        } else {
            let assets = settings.asset_source(self.assets.as_ref());
            let package =
                generator::generate(&config, assets.as_ref()).map_err(map_generate_error)?;

            files.push(write_output(
                &out_dir,
                &package.archive_file_name,
                &package.archive,
            )?);
            if self.format == "all" {
                files.push(write_output(
                    &out_dir,
                    &package.app_file_name,
                    package.app_source.as_bytes(),
                )?);
            }

            package_report(config.display_title(), files, &package)
        };

        if self.json {
            print_json(&report)?;
        } else {
            println!("Generated app '{}'", report.app_title);
            for file in &report.files {
                println!("  {file}");
            }
            for skipped in &report.skipped_assets {
                println!("  (skipped optional asset {skipped})");
            }
        }

        Ok(())
    }
}

fn package_report(app_title: &str, files: Vec<String>, package: &Package) -> GenerateReport {
    GenerateReport {
        generated_at: Utc::now().to_rfc3339(),
        generator: crate::branding::GENERATOR_ID,
        app_title: app_title.to_string(),
        files,
        app_sha256: package.app_digest(),
        stylesheet_sha256: Some(package.stylesheet_digest()),
        entries: package.entries.clone(),
        skipped_assets: package.skipped.clone(),
    }
}

/// Config problems are the user's to fix; everything else is an I/O failure.
fn map_generate_error(error: GenerateError) -> CliError {
    match error {
        GenerateError::Config(e) => CliError::validation(e.to_string()),
        other => CliError::io(other.to_string()),
    }
}

fn write_output(out_dir: &Path, file_name: &str, bytes: &[u8]) -> CliResult<String> {
    let path = out_dir.join(file_name);
    fs::write(&path, bytes)
        .map_err(|e| CliError::io(format!("Failed to write {}: {e}", path.display())))?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote output file");
    Ok(path.display().to_string())
}
