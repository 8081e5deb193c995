//! Common helpers shared across CLI commands.

use std::path::Path;

use layerlens::catalog::Catalog;
use layerlens::config::ConfigFile;

use crate::error::CliError;

/// Load the configuration from `path`, or from the default location.
///
/// A missing file yields defaults.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Load a catalog, substituting the configured API URL when `api_url` is
/// not given explicitly.
pub fn load_catalog(
    path: &Path,
    api_url: Option<&str>,
    config: &ConfigFile,
) -> Result<Catalog, CliError> {
    let api = api_url.or(config.api.url.as_deref());
    Ok(Catalog::load(path, api)?)
}
