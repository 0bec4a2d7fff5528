use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::defaults::{
    clamp_grid_dimension, clamp_log_files, clamp_volume, default_audio_extensions,
    default_grid_columns, default_grid_rows, default_log_files, default_log_level,
    default_store_file, default_volume,
};

/// Settings persisted in `config.toml`.
///
/// Config keys (TOML): `volume`, `store_file`, `grid`, `picker`, `logging`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Playback volume (0.0-1.0).
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Filename of the preference database inside the `.soundpad` folder.
    #[serde(default = "default_store_file")]
    pub store_file: String,
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub picker: PickerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            store_file: default_store_file(),
            grid: GridSettings::default(),
            picker: PickerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppSettings {
    /// Clamp values loaded from disk into supported ranges.
    pub fn normalized(mut self) -> Self {
        self.volume = clamp_volume(self.volume);
        self.grid.rows = clamp_grid_dimension(self.grid.rows);
        self.grid.columns = clamp_grid_dimension(self.grid.columns);
        if self.store_file.trim().is_empty() {
            self.store_file = default_store_file();
        }
        if self.picker.extensions.is_empty() {
            self.picker.extensions = default_audio_extensions();
        }
        if self.logging.level.trim().is_empty() {
            self.logging.level = default_log_level();
        }
        self.logging.max_files = clamp_log_files(self.logging.max_files);
        self
    }
}

/// Shape of the soundboard grid.
///
/// Config keys: `rows`, `columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    #[serde(default = "default_grid_rows")]
    pub rows: usize,
    #[serde(default = "default_grid_columns")]
    pub columns: usize,
}

impl GridSettings {
    /// Number of slots on the board.
    pub fn slot_count(&self) -> usize {
        self.rows * self.columns
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            rows: default_grid_rows(),
            columns: default_grid_columns(),
        }
    }
}

/// File picker preferences.
///
/// Config keys: `extensions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerSettings {
    /// Extensions offered by the audio filter, without the leading dot.
    #[serde(default = "default_audio_extensions")]
    pub extensions: Vec<String>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        Self {
            extensions: default_audio_extensions(),
        }
    }
}

/// Log output preferences.
///
/// Config keys: `level` (an `EnvFilter` directive, overridden by `RUST_LOG`),
/// `max_files` (daily log files kept).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_files")]
    pub max_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_log_files(),
        }
    }
}

/// Errors raised while loading or saving `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        path: PathBuf,
        source: toml::ser::Error,
    },
}
