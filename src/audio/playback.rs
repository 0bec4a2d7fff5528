use tracing::{debug, info, warn};

use super::backend::{PlaybackBackend, PlaybackError, PlaybackHandle};
use crate::sounds::SoundItem;

/// Observable playback state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing(SoundItem),
}

struct ActivePlayback {
    sound: SoundItem,
    handle: Box<dyn PlaybackHandle>,
}

impl ActivePlayback {
    fn release(mut self) -> SoundItem {
        self.handle.stop();
        self.sound
    }
}

/// Owns at most one playback handle at a time.
///
/// Starting a sound always releases the previous handle before acquiring the
/// next, and completion is only ever reported for the handle currently held.
pub struct PlaybackController {
    backend: Box<dyn PlaybackBackend>,
    active: Option<ActivePlayback>,
}

impl PlaybackController {
    pub fn new(backend: Box<dyn PlaybackBackend>) -> Self {
        Self {
            backend,
            active: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        match &self.active {
            Some(active) => PlaybackState::Playing(active.sound.clone()),
            None => PlaybackState::Idle,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Start `sound`, replacing whatever was playing.
    ///
    /// On failure the controller is left idle.
    pub fn play(&mut self, sound: &SoundItem) -> Result<(), PlaybackError> {
        if let Some(previous) = self.active.take() {
            let previous = previous.release();
            debug!("Released playback of slot {} for slot {}", previous.id, sound.id);
        }
        match self.backend.start(&sound.uri) {
            Ok(handle) => {
                info!("Playing slot {} ({})", sound.id, sound.name);
                self.active = Some(ActivePlayback {
                    sound: sound.clone(),
                    handle,
                });
                Ok(())
            }
            Err(err) => {
                warn!("Playback of slot {} failed: {err}", sound.id);
                Err(err)
            }
        }
    }

    /// Stop and release the current handle, returning the sound it played.
    pub fn stop(&mut self) -> Option<SoundItem> {
        let sound = self.active.take()?.release();
        debug!("Stopped slot {}", sound.id);
        Some(sound)
    }

    /// Release the current handle if it finished, returning its sound.
    pub fn poll_completion(&mut self) -> Option<SoundItem> {
        if !self.active.as_ref()?.handle.is_finished() {
            return None;
        }
        let sound = self.active.take()?.release();
        debug!("Slot {} finished playing", sound.id);
        Some(sound)
    }

    /// Release any held handle regardless of state.
    pub fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            active.release();
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.teardown();
    }
}
