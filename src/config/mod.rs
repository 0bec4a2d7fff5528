//! Loading and saving of `config.toml`.

use std::path::{Path, PathBuf};

use crate::app_dirs::AppPaths;

mod defaults;
mod types;

pub use types::{AppSettings, ConfigError, GridSettings, LoggingSettings, PickerSettings};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Location of `config.toml` in the app folder.
pub fn config_path(paths: &AppPaths) -> PathBuf {
    paths.file(CONFIG_FILE_NAME)
}

/// Load settings from the app folder.
///
/// A missing file is written out with defaults so users have something to edit.
pub fn load_or_default(paths: &AppPaths) -> Result<AppSettings, ConfigError> {
    let path = config_path(paths);
    if path.exists() {
        return load_from(&path);
    }
    let settings = AppSettings::default();
    save_to_path(&settings, &path)?;
    Ok(settings)
}

/// Resolve where the preference database lives for the given settings.
pub fn store_path(paths: &AppPaths, settings: &AppSettings) -> PathBuf {
    paths.file(&settings.store_file)
}

/// Load settings from a specific path; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
        .map(AppSettings::normalized)
}

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
