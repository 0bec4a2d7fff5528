use thiserror::Error;

/// Why a sound could not be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// No output device could be opened at startup.
    #[error("No audio output available: {0}")]
    NoOutput(String),
    /// The locator does not point at a local file.
    #[error("Unsupported sound location: {0}")]
    UnsupportedUri(String),
    /// The file is missing or unreadable.
    #[error("Could not open {uri}: {message}")]
    Open { uri: String, message: String },
    /// The file could not be decoded as audio.
    #[error("Could not decode {uri}: {message}")]
    Decode { uri: String, message: String },
}

/// A live playback; dropping it releases the underlying resources.
pub trait PlaybackHandle {
    /// True once the sound has played to the end.
    fn is_finished(&self) -> bool;
    /// Halt output immediately.
    fn stop(&mut self);
}

/// Source of playback handles.
pub trait PlaybackBackend {
    /// Acquire a handle that is already producing audio for `uri`.
    fn start(&mut self, uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}

/// Backend used when no output device could be opened.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PlaybackBackend for UnavailableBackend {
    fn start(&mut self, _uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        Err(PlaybackError::NoOutput(self.reason.clone()))
    }
}
