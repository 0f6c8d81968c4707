use anyhow::{bail, Context, Result};
use clap::Subcommand;
use flakeview_common::FlakeviewConfig;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (defaults, file and environment merged)
    Show,
    /// Write a configuration file with default values
    Init {
        /// Output file path (defaults to the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn handle_command(command: ConfigCommands, config: &FlakeviewConfig) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigCommands::Init { output, force } => init_config(output, force),
    }
}

fn init_config(output: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match output.or_else(FlakeviewConfig::default_path) {
        Some(path) => path,
        None => bail!("No configuration directory found, pass --output"),
    };

    if path.exists() && !force {
        bail!("{} already exists, use --force to overwrite", path.display());
    }

    FlakeviewConfig::default()
        .to_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
