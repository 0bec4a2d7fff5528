//! Where Soundpad keeps the files that outlive a launch.
//!
//! Everything sits in one `.soundpad` folder: `config.toml`, the preference
//! database and a `logs` subfolder. The folder lives under the OS config
//! directory unless `SOUNDPAD_CONFIG_HOME` points somewhere else.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application folder inside the base directory.
pub const APP_DIR_NAME: &str = ".soundpad";
/// Environment variable that relocates the base directory.
pub const CONFIG_HOME_ENV: &str = "SOUNDPAD_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found; set {} to choose one", CONFIG_HOME_ENV)]
    NoBaseDir,
    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The resolved `.soundpad` folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    root: PathBuf,
}

impl AppPaths {
    /// Resolve from `SOUNDPAD_CONFIG_HOME`, falling back to the OS config dir.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = base_dir(std::env::var_os(CONFIG_HOME_ENV)).ok_or(AppDirError::NoBaseDir)?;
        Self::under(base)
    }

    /// Use `base/.soundpad`, creating it when missing.
    pub fn under(base: impl Into<PathBuf>) -> Result<Self, AppDirError> {
        let root = base.into().join(APP_DIR_NAME);
        create_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file stored directly in the app folder.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// The `logs` subfolder, created on demand.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        let logs = self.root.join(LOGS_DIR_NAME);
        create_dir(&logs)?;
        Ok(logs)
    }
}

fn base_dir(override_dir: Option<OsString>) -> Option<PathBuf> {
    override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
}

fn create_dir(path: &Path) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
