//! Native file picking for sound slots.

use std::path::Path;

use rfd::FileDialog;
use tracing::warn;

use crate::sounds::{sound_display_name, uri};

/// Whether the picked file can be reopened in later sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessGrant {
    Persisted,
    /// The location could not be resolved to a stable reference.
    Denied(String),
}

/// Result of a successful pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedSound {
    pub uri: String,
    /// Human-readable name; `None` when the file has no usable stem.
    pub display_name: Option<String>,
    pub access: AccessGrant,
}

/// Source of sound files chosen by the user.
pub trait SoundPicker {
    /// Block until the user picks a file or cancels.
    fn pick_sound(&mut self) -> Option<PickedSound>;
}

/// Native dialog filtered to audio extensions.
pub struct RfdPicker {
    extensions: Vec<String>,
}

impl RfdPicker {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }
}

impl SoundPicker for RfdPicker {
    fn pick_sound(&mut self) -> Option<PickedSound> {
        let path = FileDialog::new()
            .add_filter("Audio", self.extensions.as_slice())
            .pick_file()?;
        Some(picked_from_path(&path))
    }
}

/// Turn a chosen path into a durable uri plus display name.
pub fn picked_from_path(path: &Path) -> PickedSound {
    let display_name = sound_display_name(path);
    let resolved = path
        .canonicalize()
        .map_err(|err| err.to_string())
        .and_then(|canonical| uri::path_to_uri(&canonical).map_err(|err| err.to_string()));
    match resolved {
        Ok(uri) => PickedSound {
            uri,
            display_name,
            access: AccessGrant::Persisted,
        },
        Err(reason) => {
            warn!("Could not persist access to {}: {reason}", path.display());
            PickedSound {
                uri: path.to_string_lossy().into_owned(),
                display_name,
                access: AccessGrant::Denied(reason),
            }
        }
    }
}
