use serde::{Deserialize, Serialize};

/// Position of a sound on the board.
pub type SlotId = u32;

/// A sound assigned to a slot.
///
/// Items are value snapshots rebuilt from the store on every read; identity
/// is the slot `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundItem {
    pub id: SlotId,
    pub name: String,
    /// Opaque locator handed to the playback backend (a `file://` URL on desktop).
    pub uri: String,
    pub is_favorite: bool,
}

impl SoundItem {
    /// Build a non-favorite item.
    pub fn new(id: SlotId, name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            uri: uri.into(),
            is_favorite: false,
        }
    }

    /// Copy of this item with the favorite flag set to `is_favorite`.
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }
}
