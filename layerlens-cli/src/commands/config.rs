//! Configuration management CLI commands.
//!
//! Provides `config init` to write a commented default configuration file and
//! `config path` to show where it is read from.

use std::path::PathBuf;

use clap::Subcommand;
use layerlens::config::{config_file_path, ConfigFile, MapConfig};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a configuration file with default values
    Init {
        /// Target file (defaults to ~/.layerlens/config.ini)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate a configuration file and print the resulting map setup
    Check {
        /// File to check (defaults to ~/.layerlens/config.ini)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init { path, force } => run_init(path, force),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Check { path } => run_check(path),
    }
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        return Err(CliError::FileExists(path));
    }

    ConfigFile::default().save_to(&path)?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    let path = config_file_path();
    println!("{}", path.display());
    if !path.exists() {
        println!("(file does not exist; defaults are used)");
    }
    Ok(())
}

fn run_check(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(config_file_path);
    let file = ConfigFile::load_from(&path)?;
    let map = MapConfig::from_settings(&file).map_err(|e| CliError::InvalidConfig(e.to_string()))?;

    let camera = map.camera();
    let bounds = map.zoom_bounds();
    println!("Configuration OK: {}", path.display());
    println!("  center   {}", camera.center);
    println!("  zoom     {} (bounds {}..{})", camera.zoom, bounds.min(), bounds.max());
    println!("  style    {}", map.style_url());
    println!(
        "  token    {}",
        if map.access_token().is_some() { "set" } else { "(not set)" }
    );
    println!("  api      {}", file.api.url.as_deref().unwrap_or("(not set)"));
    println!("  aoi      {}", if map.aoi_enabled() { "enabled" } else { "disabled" });
    Ok(())
}
