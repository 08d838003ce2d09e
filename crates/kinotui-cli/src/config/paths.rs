//! Config file path resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Resolves the config file path.
///
/// Uses `dir` when given, otherwise `~/.config/kinotui/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(Path::new(&home)
        .join(".config")
        .join("kinotui")
        .join(CONFIG_FILE_NAME))
}
