//! RolodexGen - turn a resource spreadsheet into a mobile directory app
//!
//! Subcommands inspect data files, generate app packages from a config file,
//! or walk through the interactive wizard.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodexgen::branding::APP_DESCRIPTION;
use rolodexgen::cli::{
    ConfigArgs, ExitCode, GenerateArgs, InspectArgs, ThemesArgs, WizardArgs,
};

/// RolodexGen command line
#[derive(Parser, Debug)]
#[command(author, version, about = APP_DESCRIPTION, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a data file and show columns and a preview
    Inspect(InspectArgs),
    /// Generate an app package from a generation config
    Generate(GenerateArgs),
    /// Build an app interactively from a data file
    Wizard(WizardArgs),
    /// List available themes
    Themes(ThemesArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Command::Inspect(args) => args.execute(),
        Command::Generate(args) => args.execute(),
        Command::Wizard(args) => args.execute(),
        Command::Themes(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    match result {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
