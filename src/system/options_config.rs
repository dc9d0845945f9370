// src/system/options_config.rs

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::constants::{CONFIG_DIR_NAME, OPTIONS_FILENAME};
use crate::models::MenuOptions;

/// Failures while reading or writing the options file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The platform has no config directory.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// The file could not be read or written.
    #[error("Could not access options file '{path}': {source}")]
    Io {
        /// The options file.
        path: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid options TOML.
    #[error("Failed to parse options file '{path}': {source}")]
    TomlParse {
        /// The options file.
        path: String,
        /// The underlying error.
        #[source]
        source: toml::de::Error,
    },
    /// The options could not be turned into TOML.
    #[error("Failed to serialize menu options to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// `<config dir>/juusmenu/options.toml`. The file may not exist.
pub fn default_options_path() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join(CONFIG_DIR_NAME)
        .join(OPTIONS_FILENAME))
}

/// Reads and normalizes options from `path`. Missing fields take their
/// defaults; unknown fields are an error.
pub fn load_options(path: &Path) -> Result<MenuOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let options: MenuOptions = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.display().to_string(),
        source: e,
    })?;
    debug!("Loaded menu options from '{}'", path.display());
    Ok(options.normalized())
}

/// Options from the user's config file, or the defaults when there is none.
pub fn load_user_options() -> Result<MenuOptions, ConfigError> {
    let path = default_options_path()?;
    if !path.exists() {
        debug!("No options file at '{}', using defaults", path.display());
        return Ok(MenuOptions::default());
    }
    load_options(&path)
}

/// Writes `options` to `path`, creating parent directories as needed.
pub fn write_options(path: &Path, options: &MenuOptions) -> Result<(), ConfigError> {
    let io_error = |e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let toml_string = toml::to_string_pretty(options)?;
    fs::write(path, toml_string).map_err(io_error)?;
    debug!("Wrote menu options to '{}'", path.display());
    Ok(())
}
