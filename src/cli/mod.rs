//! CLI command handlers for RolodexGen.
//!
//! Every command is headless and scriptable except `wizard`, which prompts on
//! stdin. Commands return [`common::CliError`], which carries the exit code.

pub mod common;
pub mod config;
pub mod generate;
pub mod inspect;
pub mod themes;
pub mod wizard;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use inspect::InspectArgs;
pub use themes::{theme_list, ThemeInfo, ThemesArgs};
pub use wizard::WizardArgs;
