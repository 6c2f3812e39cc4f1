//! RolodexGen Web Server Binary
//!
//! This binary starts the RolodexGen web server that provides a REST API for
//! parsing uploads and generating app packages.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001)
//! rolodexgen-web
//!
//! # Specify port and a custom asset bundle
//! rolodexgen-web --port 8080 --assets ~/my-assets
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodexgen::config::Config;
use rolodexgen::web;

/// RolodexGen Web Server - REST API for the app wizard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory with static assets replacing the embedded bundle
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().unwrap_or_default();
    if let Some(assets) = args.assets {
        config.paths.assets_dir = Some(assets);
        config.validate()?;
    }

    match &config.paths.assets_dir {
        Some(dir) => info!("Asset bundle: {}", dir.display()),
        None => info!("Asset bundle: embedded"),
    }

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, addr).await
}
