//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::Theme;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory with static assets replacing the embedded bundle
    #[arg(long, value_name = "DIR")]
    assets_dir: Option<PathBuf>,

    /// Default output directory for generated packages
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Default theme (auto, ios, or md)
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    paths: PathsOutput,
    output: OutputOutput,
    defaults: DefaultsOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    assets_dir: Option<String>,
}

#[derive(Serialize, Debug)]
struct OutputOutput {
    output_dir: String,
}

#[derive(Serialize, Debug)]
struct DefaultsOutput {
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.assets_dir.is_none() && self.output_dir.is_none() && self.theme.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --assets-dir, --output-dir, or --theme",
            ));
        }

        let mut config = Config::load_unvalidated()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        if let Some(path) = &self.assets_dir {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Assets directory does not exist: {}",
                    path.display()
                )));
            }
            config.paths.assets_dir = Some(path.clone());
        }

        if let Some(path) = &self.output_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create output directory {}: {e}",
                    path.display()
                ))
            })?;
            config.output.output_dir.clone_from(path);
        }

        if let Some(name) = &self.theme {
            config.defaults.theme = Theme::from_name(name).ok_or_else(|| {
                CliError::validation("Invalid theme. Must be 'auto', 'ios', or 'md'")
            })?;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.display().to_string()),
        paths: PathsOutput {
            assets_dir: config
                .paths
                .assets_dir
                .as_ref()
                .map(|p| p.display().to_string()),
        },
        output: OutputOutput {
            output_dir: config.output.output_dir.display().to_string(),
        },
        defaults: DefaultsOutput {
            theme: config.defaults.theme.to_string(),
        },
    }
}

fn output_human_readable(config: &Config) {
    println!("Configuration:");
    if let Ok(path) = Config::config_file_path() {
        println!("  File:        {}", path.display());
    }
    println!();
    println!("Paths:");
    match &config.paths.assets_dir {
        Some(dir) => println!("  Assets:      {}", dir.display()),
        None => println!("  Assets:      (embedded bundle)"),
    }
    println!();
    println!("Output:");
    println!("  Directory:   {}", config.output.output_dir.display());
    println!();
    println!("Defaults:");
    println!("  Theme:       {}", config.defaults.theme);
}
