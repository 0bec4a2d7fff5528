//! Sound playback: one live handle at a time over a pluggable backend.

mod backend;
mod playback;
mod rodio_backend;

pub use backend::{PlaybackBackend, PlaybackError, PlaybackHandle, UnavailableBackend};
pub use playback::{PlaybackController, PlaybackState};
pub use rodio_backend::RodioBackend;
