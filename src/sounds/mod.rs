//! Sound records, their storage layout and the repository that serves them.

pub mod codec;
mod item;
mod naming;
mod repository;
pub mod uri;

pub use item::{SlotId, SoundItem};
pub use naming::{fallback_sound_name, sound_display_name};
pub use repository::{SoundFeed, SoundRepository, favorites_from_snapshot, sounds_from_snapshot};
