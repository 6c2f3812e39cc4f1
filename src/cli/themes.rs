//! Themes command: list the Framework7 themes a generated app can use.

use crate::cli::common::{print_json, CliResult};
use crate::models::Theme;
use clap::Args;
use serde::Serialize;

/// List available app themes
#[derive(Debug, Clone, Args)]
pub struct ThemesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Theme entry as listed by the CLI and the web API.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ThemeInfo {
    /// Value used in generation configs
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Whether this is the default theme
    pub default: bool,
}

/// All themes with descriptions, in display order.
#[must_use]
pub fn theme_list() -> Vec<ThemeInfo> {
    Theme::ALL
        .into_iter()
        .map(|theme| ThemeInfo {
            name: theme.as_str(),
            description: theme.description(),
            default: theme == Theme::default(),
        })
        .collect()
}

impl ThemesArgs {
    /// Execute the themes command
    pub fn execute(&self) -> CliResult<()> {
        let themes = theme_list();

        if self.json {
            return print_json(&themes);
        }

        println!("Themes:");
        for theme in themes {
            let marker = if theme.default { " (default)" } else { "" };
            println!("  {:<6} {}{marker}", theme.name, theme.description);
        }
        Ok(())
    }
}
