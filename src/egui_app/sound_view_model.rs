//! Ephemeral selection state plus the intents that mutate it or the store.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prefs::StoreError;
use crate::sounds::{SlotId, SoundFeed, SoundItem, SoundRepository};

/// UI selection state that lives only for the lifetime of the process.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Last sound the user chose.
    pub selected_sound: Option<SoundItem>,
    /// Sound currently producing audio.
    pub playing_sound: Option<SoundItem>,
    /// Slot waiting for a file-pick result.
    pub sound_to_add: Option<SlotId>,
}

/// Republishes repository lists and funnels every mutation through named intents.
pub struct SoundViewModel {
    repository: SoundRepository,
    sounds_feed: SoundFeed,
    favorites_feed: SoundFeed,
    sounds: Vec<SoundItem>,
    favorites: Vec<SoundItem>,
    selection: SelectionState,
    selection_event: Option<SoundItem>,
}

impl SoundViewModel {
    pub fn new(repository: SoundRepository) -> Self {
        let sounds_feed = repository.list_sounds();
        let favorites_feed = repository.list_favorites();
        let mut view_model = Self {
            repository,
            sounds_feed,
            favorites_feed,
            sounds: Vec::new(),
            favorites: Vec::new(),
            selection: SelectionState::default(),
            selection_event: None,
        };
        view_model.refresh();
        view_model
    }

    /// Pull the newest lists from both feeds; true when either changed.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        if let Some(sounds) = self.sounds_feed.latest() {
            changed |= sounds != self.sounds;
            self.sounds = sounds;
        }
        if let Some(favorites) = self.favorites_feed.latest() {
            changed |= favorites != self.favorites;
            self.favorites = favorites;
        }
        changed
    }

    /// All assigned sounds, ordered by id.
    pub fn sounds(&self) -> &[SoundItem] {
        &self.sounds
    }

    /// Favorite sounds, ordered by id.
    pub fn favorites(&self) -> &[SoundItem] {
        &self.favorites
    }

    /// Stored sound for `slot`, bypassing the last refreshed lists.
    pub fn find_sound(&self, slot: SlotId) -> Option<SoundItem> {
        self.repository.find(slot)
    }

    /// Read-only view of the selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Choose a sound; playback follows selection directly.
    pub fn select_sound(&mut self, sound: SoundItem) {
        debug!("Selected slot {}", sound.id);
        self.selection.selected_sound = Some(sound.clone());
        self.selection.playing_sound = Some(sound.clone());
        self.selection_event = Some(sound);
    }

    /// One-shot signal for the last `select_sound`; yields each selection once.
    pub fn take_selection_event(&mut self) -> Option<SoundItem> {
        self.selection_event.take()
    }

    pub fn stop_playing_sound(&mut self) {
        self.selection.playing_sound = None;
    }

    /// Remember which slot the next picked file belongs to.
    pub fn prepare_to_add_sound(&mut self, slot: SlotId) {
        self.selection.sound_to_add = Some(slot);
    }

    /// Persist a freshly picked sound and clear the pending slot.
    pub fn add_sound(&mut self, slot: SlotId, name: &str, uri: &str) -> Result<(), StoreError> {
        self.repository.save(&SoundItem::new(slot, name, uri))?;
        self.selection.sound_to_add = None;
        Ok(())
    }

    /// Flip the favorite flag of `sound`'s slot; returns the new flag.
    ///
    /// The flip is computed from the stored record, never from the caller's copy.
    pub fn toggle_favorite(&mut self, sound: &SoundItem) -> Result<Option<bool>, StoreError> {
        self.repository.toggle_favorite(sound.id)
    }

    /// Clear a slot, deleting its sound and favorite records.
    pub fn remove_sound(&mut self, slot: SlotId) -> Result<(), StoreError> {
        self.repository.remove(slot)
    }
}
