//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and exit codes per failure class.

use std::fmt;
use std::path::PathBuf;
use std::process;

use layerlens::catalog::CatalogError;
use layerlens::config::ConfigFileError;
use layerlens::view::MapViewError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file error
    Config(ConfigFileError),
    /// Configuration values that do not form a valid map setup
    InvalidConfig(String),
    /// Catalog could not be loaded
    Catalog(CatalogError),
    /// Replay script could not be read or parsed
    Script { path: PathBuf, reason: String },
    /// A replay step failed
    Replay { step: usize, error: MapViewError },
    /// The async runtime could not be started
    Runtime(std::io::Error),
    /// Refused to overwrite an existing file
    FileExists(PathBuf),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::LoggingInit(_) | CliError::Runtime(_) => 1,
            CliError::Config(_) | CliError::InvalidConfig(_) | CliError::FileExists(_) => 2,
            CliError::Catalog(_) => 3,
            CliError::Script { .. } => 4,
            CliError::Replay { .. } => 5,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::FileExists(_) = self {
            eprintln!();
            eprintln!("Use --force to overwrite it.");
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::InvalidConfig(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Catalog(e) => write!(f, "Catalog error: {}", e),
            CliError::Script { path, reason } => {
                write!(f, "Invalid script '{}': {}", path.display(), reason)
            }
            CliError::Replay { step, error } => write!(f, "Replay step {} failed: {}", step, error),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::FileExists(path) => write!(f, "File '{}' already exists", path.display()),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Catalog(e) => Some(e),
            CliError::Replay { error, .. } => Some(error),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        CliError::Catalog(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_class() {
        assert_eq!(CliError::LoggingInit("x".into()).exit_code(), 1);
        assert_eq!(CliError::InvalidConfig("x".into()).exit_code(), 2);
        assert_eq!(CliError::Catalog(CatalogError::EmptyId(0)).exit_code(), 3);
        let script = CliError::Script {
            path: PathBuf::from("s.json"),
            reason: "bad".into(),
        };
        assert_eq!(script.exit_code(), 4);
        let replay = CliError::Replay {
            step: 2,
            error: MapViewError::NotMounted,
        };
        assert_eq!(replay.exit_code(), 5);
    }

    #[test]
    fn test_display_names_the_step() {
        let e = CliError::Replay {
            step: 3,
            error: MapViewError::NotMounted,
        };
        assert_eq!(e.to_string(), "Replay step 3 failed: map view is not mounted");
    }
}
