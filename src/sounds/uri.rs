//! Conversion between filesystem paths and the `file://` locators stored with sounds.

use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Failure to express a path as a locator.
#[derive(Debug, Error)]
pub enum UriError {
    #[error("Path must be absolute to build a file URI: {0}")]
    NotAbsolute(PathBuf),
}

/// Build a `file://` locator for an absolute path.
pub fn path_to_uri(path: &Path) -> Result<String, UriError> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| UriError::NotAbsolute(path.to_path_buf()))
}

/// Resolve a stored locator back to a path.
///
/// Accepts `file://` URLs and bare absolute paths; other schemes yield `None`.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    match Url::parse(uri) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        Ok(_) => None,
        Err(_) => {
            let path = PathBuf::from(uri);
            path.is_absolute().then_some(path)
        }
    }
}
