//! Controller that mirrors the sound store into egui-ready state and routes
//! slot gestures to persistence, file picking and playback.

use tracing::{debug, info, warn};

use crate::audio::{PlaybackController, PlaybackState};
use crate::config::GridSettings;
use crate::egui_app::sound_view_model::SoundViewModel;
use crate::egui_app::state::{BoardTab, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model::{SlotAction, favorite_rows, slot_views};
use crate::sounds::{SlotId, SoundItem, fallback_sound_name};

mod picker;

pub use picker::{AccessGrant, PickedSound, RfdPicker, SoundPicker, picked_from_path};

const ACCESS_DENIED_NOTICE: &str = "Unable to save persistent access to this sound";
const PLAYBACK_FAILED_NOTICE: &str = "Cannot play this sound. Long-press to replace it.";

/// Maintains app state and bridges the sound store to the UI.
pub struct EguiController {
    pub ui: UiState,
    view_model: SoundViewModel,
    playback: PlaybackController,
    picker: Box<dyn SoundPicker>,
    grid: GridSettings,
}

impl EguiController {
    /// Build a controller over an already opened store and playback backend.
    pub fn new(
        view_model: SoundViewModel,
        playback: PlaybackController,
        picker: Box<dyn SoundPicker>,
        grid: GridSettings,
    ) -> Self {
        let mut controller = Self {
            ui: UiState::new(grid.columns),
            view_model,
            playback,
            picker,
            grid,
        };
        controller.rebuild_rows();
        controller
    }

    /// Per-frame housekeeping: pull store updates, start pending playback and
    /// notice finished sounds.
    pub fn tick(&mut self) {
        let mut dirty = self.view_model.refresh();
        if let Some(sound) = self.view_model.take_selection_event() {
            self.play_selection(sound);
            dirty = true;
        }
        if let Some(finished) = self.playback.poll_completion() {
            debug!("Slot {} completed", finished.id);
            self.view_model.stop_playing_sound();
            dirty = true;
        }
        if dirty {
            self.rebuild_rows();
        }
    }

    /// Apply a gesture produced by the renderer.
    pub fn handle_action(&mut self, action: SlotAction) {
        match action {
            SlotAction::Play(sound) => {
                self.view_model.select_sound(sound);
                if let Some(selected) = self.view_model.take_selection_event() {
                    self.play_selection(selected);
                }
            }
            SlotAction::Assign(slot) => {
                self.view_model.prepare_to_add_sound(slot);
                self.pick_sound();
            }
            SlotAction::Replace(sound) => {
                let name = self
                    .view_model
                    .find_sound(sound.id)
                    .map_or(sound.name, |stored| stored.name);
                self.set_status(format!("Replacing sound: {name}"), StatusTone::Info);
                self.view_model.prepare_to_add_sound(sound.id);
                self.pick_sound();
            }
            SlotAction::ToggleFavorite(sound) => self.toggle_favorite(&sound),
            SlotAction::Clear(slot) => self.clear_slot(slot),
        }
        self.view_model.refresh();
        self.rebuild_rows();
    }

    /// Stop whatever is playing and clear the playing marker.
    pub fn stop_playing_sound(&mut self) {
        if let Some(sound) = self.playback.stop() {
            info!("Stopped {}", sound.name);
        }
        self.view_model.stop_playing_sound();
        self.rebuild_rows();
    }

    pub fn select_tab(&mut self, tab: BoardTab) {
        self.ui.tab = tab;
    }

    /// Release audio resources; safe to call in any state.
    pub fn shutdown(&mut self) {
        self.playback.teardown();
        self.view_model.stop_playing_sound();
    }

    pub fn view_model(&self) -> &SoundViewModel {
        &self.view_model
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    fn play_selection(&mut self, sound: SoundItem) {
        if let Err(err) = self.playback.play(&sound) {
            warn!("Cannot play {} ({}): {err}", sound.name, sound.uri);
            self.view_model.stop_playing_sound();
            self.set_status(PLAYBACK_FAILED_NOTICE, StatusTone::Error);
        }
    }

    fn pick_sound(&mut self) {
        let Some(slot) = self.view_model.selection().sound_to_add else {
            return;
        };
        let Some(picked) = self.picker.pick_sound() else {
            debug!("File pick for slot {slot} cancelled");
            return;
        };
        let name = picked
            .display_name
            .clone()
            .unwrap_or_else(|| fallback_sound_name(slot));
        if let Err(err) = self.view_model.add_sound(slot, &name, &picked.uri) {
            self.set_status(format!("Failed to save sound: {err}"), StatusTone::Error);
            return;
        }
        match picked.access {
            AccessGrant::Persisted => {
                self.set_status(
                    format!("Added {name} to slot {}", slot + 1),
                    StatusTone::Info,
                );
            }
            AccessGrant::Denied(_) => self.set_status(ACCESS_DENIED_NOTICE, StatusTone::Warning),
        }
    }

    fn toggle_favorite(&mut self, sound: &SoundItem) {
        match self.view_model.toggle_favorite(sound) {
            Ok(Some(true)) => self.set_status("Added to favorites", StatusTone::Info),
            Ok(Some(false)) => self.set_status("Removed from favorites", StatusTone::Info),
            Ok(None) => self.set_status(
                format!("Slot {} has no sound", sound.id + 1),
                StatusTone::Warning,
            ),
            Err(err) => {
                self.set_status(format!("Failed to update favorites: {err}"), StatusTone::Error)
            }
        }
    }

    fn clear_slot(&mut self, slot: SlotId) {
        let playing_here = self
            .view_model
            .selection()
            .playing_sound
            .as_ref()
            .is_some_and(|sound| sound.id == slot);
        if playing_here {
            self.playback.stop();
            self.view_model.stop_playing_sound();
        }
        match self.view_model.remove_sound(slot) {
            Ok(()) => self.set_status(format!("Cleared slot {}", slot + 1), StatusTone::Info),
            Err(err) => self.set_status(format!("Failed to clear slot: {err}"), StatusTone::Error),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let text = text.into();
        match tone {
            StatusTone::Error | StatusTone::Warning => warn!("{text}"),
            StatusTone::Idle | StatusTone::Info => info!("{text}"),
        }
        self.ui.status.set(text, tone);
    }

    fn rebuild_rows(&mut self) {
        let playing = self.view_model.selection().playing_sound.as_ref();
        self.ui.slots = slot_views(self.view_model.sounds(), playing, self.grid.slot_count());
        self.ui.favorites = favorite_rows(self.view_model.favorites(), playing);
    }
}
