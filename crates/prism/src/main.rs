//! Prism CLI - gallery manifest generator for AI-generated images.
//!
//! Prism scans a gallery directory of generated JPEGs, recovers the
//! generation parameters embedded in their metadata, and writes a
//! `gallery.json` manifest the display layer serves read-only.
//!
//! # Usage
//!
//! ```bash
//! # Generate the manifest for the configured gallery directory
//! prism generate
//!
//! # Generate for another directory
//! prism generate --gallery-dir ./public/gallery
//!
//! # View configuration
//! prism config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Prism - gallery manifest generator for AI-generated images.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan the gallery and write the manifest
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI verbose override.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match prism_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `prism config path`."
            );
            prism_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
