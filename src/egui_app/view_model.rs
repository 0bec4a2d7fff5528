//! Pure mapping from sound lists to render-ready rows and click outcomes.

use crate::sounds::{SlotId, SoundItem};

/// Label shown on slots that have no sound yet.
pub const EMPTY_SLOT_LABEL: &str = "Tap to add sound";

/// Background tone of a sound button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonTone {
    Normal,
    /// The slot's sound is the one currently playing.
    Highlighted,
}

/// State of the star control on a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavoriteIcon {
    Hidden,
    Filled,
    Hollow,
}

/// Render data for one soundboard slot or favorites row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotView {
    pub slot: SlotId,
    pub label: String,
    pub tone: ButtonTone,
    pub favorite: FavoriteIcon,
    /// Sound assigned to the slot; `None` renders the add affordance.
    pub sound: Option<SoundItem>,
}

/// What a user gesture on a slot asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotAction {
    Play(SoundItem),
    /// Pick a file for an empty slot.
    Assign(SlotId),
    /// Pick a file to replace the sound in an occupied slot.
    Replace(SoundItem),
    ToggleFavorite(SoundItem),
    Clear(SlotId),
}

impl SlotView {
    fn filled(sound: &SoundItem, playing: Option<&SoundItem>) -> Self {
        let is_playing = playing.is_some_and(|p| p.id == sound.id);
        Self {
            slot: sound.id,
            label: sound.name.clone(),
            tone: if is_playing {
                ButtonTone::Highlighted
            } else {
                ButtonTone::Normal
            },
            favorite: if sound.is_favorite {
                FavoriteIcon::Filled
            } else {
                FavoriteIcon::Hollow
            },
            sound: Some(sound.clone()),
        }
    }

    fn empty(slot: SlotId) -> Self {
        Self {
            slot,
            label: EMPTY_SLOT_LABEL.to_string(),
            tone: ButtonTone::Normal,
            favorite: FavoriteIcon::Hidden,
            sound: None,
        }
    }

    /// Primary click: play a filled slot, pick a file for an empty one.
    pub fn click(&self) -> SlotAction {
        match &self.sound {
            Some(sound) => SlotAction::Play(sound.clone()),
            None => SlotAction::Assign(self.slot),
        }
    }

    /// Long press: replace the sound in a filled slot.
    pub fn long_press(&self) -> Option<SlotAction> {
        self.sound.clone().map(SlotAction::Replace)
    }

    /// Star click: only available on filled slots.
    pub fn favorite_click(&self) -> Option<SlotAction> {
        self.sound.clone().map(SlotAction::ToggleFavorite)
    }

    /// Context-menu clear: only available on filled slots.
    pub fn clear(&self) -> Option<SlotAction> {
        self.sound.as_ref().map(|sound| SlotAction::Clear(sound.id))
    }
}

/// Build one row per grid slot; sounds outside the grid are not shown.
pub fn slot_views(
    sounds: &[SoundItem],
    playing: Option<&SoundItem>,
    slot_count: usize,
) -> Vec<SlotView> {
    let mut views: Vec<SlotView> = (0..slot_count)
        .map(|slot| SlotView::empty(slot as SlotId))
        .collect();
    for sound in sounds {
        if let Some(view) = views.get_mut(sound.id as usize) {
            *view = SlotView::filled(sound, playing);
        }
    }
    views
}

/// Build the favorites list rows in id order.
pub fn favorite_rows(favorites: &[SoundItem], playing: Option<&SoundItem>) -> Vec<SlotView> {
    favorites
        .iter()
        .map(|sound| SlotView::filled(sound, playing))
        .collect()
}
