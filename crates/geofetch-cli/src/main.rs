//! geofetch command-line tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{DownloadCommand, InfoCommand};

/// Bulk feature downloader for hosted feature services
#[derive(Parser)]
#[command(name = "geofetch")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. "info" or "geofetch_client=debug"
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Download every feature from a service layer
    Download(DownloadCommand),

    /// Show service metadata and object-ID count
    Info(InfoCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log_level))
        .init();

    match cli.command {
        Commands::Download(cmd) => cmd.run().await,
        Commands::Info(cmd) => cmd.run().await,
    }
}
