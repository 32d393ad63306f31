//! The `prism config` command.
//!
//! Prism runs fine without a config file at all (the defaults encode the
//! conventional `public/gallery` layout); these subcommands exist to inspect
//! what a generate run would actually use and to materialize a file worth
//! editing.

use clap::{Args, Subcommand};
use prism_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the active settings and the resolved gallery paths
    Show,

    /// Print the config file location
    Path,

    /// Write a config file with the default settings
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            print!("{}", render_show(&config)?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "A config file already exists at {} (pass --force to replace it)",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, Config::default().to_toml()?)?;
            tracing::info!("Config file created at {}", path.display());
            println!(
                "Wrote default configuration to {}\n\
                 Edit the [gallery] section to point Prism at your gallery directory.",
                path.display()
            );
        }
    }

    Ok(())
}

/// The settings TOML plus the paths a generate run would touch, with any
/// `~` in the gallery dir already expanded.
fn render_show(config: &Config) -> anyhow::Result<String> {
    let mut out = config.to_toml()?;
    out.push_str(&format!(
        "\n# resolved for this run:\n#   gallery dir: {}\n#   manifest:    {}\n",
        config.gallery_dir().display(),
        config.manifest_path().display()
    ));
    Ok(out)
}
