// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::model::ConfigFile;

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; semantic validation happens on
/// the merged [`Settings`](crate::config::Settings) via
/// [`validate_settings`](crate::config::validate_settings).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading config file at {path:?}"))?;

    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("parsing TOML config from {path:?}"))?;

    Ok(config)
}

/// Load the config file if one is available.
///
/// - With an explicit path, the file must exist and parse.
/// - Without one, `Thumbwatch.toml` is tried in the current directory and its
///   absence is not an error; defaults apply.
pub fn load_optional(explicit: Option<&str>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let path = default_config_path();
            if path.is_file() {
                load_from_path(&path)
            } else {
                debug!("no {:?} found, using built-in defaults", path);
                Ok(ConfigFile::default())
            }
        }
    }
}

/// Helper to resolve the default config path.
///
/// Currently this just returns `Thumbwatch.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Respect an env var (e.g. `THUMBWATCH_CONFIG`).
/// - Look for multiple default locations.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Thumbwatch.toml")
}
