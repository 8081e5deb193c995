//! layerlens CLI - Command-line interface
//!
//! Headless driver for the layerlens reconciler: inspects layer catalogs and
//! replays scripted state sequences against the in-memory map engine.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use layerlens::logging::{default_log_dir, default_log_file, init_logging};

use commands::catalog::CatalogArgs;
use commands::config::ConfigCommands;
use commands::replay::ReplayArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "layerlens")]
#[command(version = layerlens::VERSION)]
#[command(about = "Map layer lifecycle reconciler", long_about = None)]
struct Cli {
    /// Directory log files are written to
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log file name
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the layers of a catalog and report configuration problems
    Catalog(CatalogArgs),

    /// Replay a scripted sequence of states against the in-memory engine
    Replay(ReplayArgs),

    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.as_deref().unwrap_or(default_log_dir());
    let log_file = cli.log_file.as_deref().unwrap_or(default_log_file());
    let _guard = match init_logging(log_dir, log_file) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
