//! Sound records on top of the preference store.

use std::{sync::Arc, time::Duration};

use tracing::{debug, info};

use super::codec::{
    FAVORITE_PREFIX, SOUND_PREFIX, decode_record, encode_record, favorite_key, parse_key,
    sound_key,
};
use super::item::{SlotId, SoundItem};
use crate::prefs::{PreferenceStore, Preferences, Snapshot, SnapshotReceiver, StoreError};

/// Encodes sound records into the `sound_`/`fav_` key families and exposes
/// them as live, id-ordered lists.
#[derive(Clone)]
pub struct SoundRepository {
    store: Arc<PreferenceStore>,
}

impl SoundRepository {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self { store }
    }

    /// Upsert a sound and add or remove its favorite mirror in one transaction.
    pub fn save(&self, sound: &SoundItem) -> Result<(), StoreError> {
        self.store.edit(|prefs| write_sound(prefs, sound))?;
        debug!(
            "Saved sound {} ({}), favorite: {}",
            sound.id, sound.name, sound.is_favorite
        );
        Ok(())
    }

    /// Delete both records for a slot.
    pub fn remove(&self, id: SlotId) -> Result<(), StoreError> {
        self.store.edit(|prefs| {
            prefs.remove(&sound_key(id));
            prefs.remove(&favorite_key(id));
        })?;
        info!("Removed sound in slot {id}");
        Ok(())
    }

    /// Flip the persisted favorite flag of a slot inside one transaction.
    ///
    /// The flag is read from the store rather than from a caller-held copy, so
    /// every call flips exactly once. Returns the new flag, or `None` when no
    /// sound is assigned to the slot. A favorite left behind without its sound
    /// record is removed and reported as `Some(false)`.
    pub fn toggle_favorite(&self, id: SlotId) -> Result<Option<bool>, StoreError> {
        let toggled = self.store.edit(|prefs| {
            let Some(sound) = sound_from_prefs(prefs, id) else {
                return prefs.remove(&favorite_key(id)).map(|_| false);
            };
            let flipped = sound.with_favorite(!prefs.contains_key(&favorite_key(id)));
            write_sound(prefs, &flipped);
            Some(flipped.is_favorite)
        })?;
        if let Some(is_favorite) = toggled {
            debug!("Slot {id} favorite set to {is_favorite}");
        }
        Ok(toggled)
    }

    /// Read one sound from the current snapshot.
    pub fn find(&self, id: SlotId) -> Option<SoundItem> {
        sound_from_prefs(self.store.snapshot().as_map(), id)
    }

    /// Live list of every assigned sound, ordered by id.
    pub fn list_sounds(&self) -> SoundFeed {
        SoundFeed::new(self.store.subscribe(), sounds_from_snapshot)
    }

    /// Live list of favorite sounds, ordered by id.
    pub fn list_favorites(&self) -> SoundFeed {
        SoundFeed::new(self.store.subscribe(), favorites_from_snapshot)
    }
}

/// A continuously updated sound list derived from store snapshots.
///
/// Every update recomputes the full list from the snapshot.
pub struct SoundFeed {
    snapshots: SnapshotReceiver,
    project: fn(&Snapshot) -> Vec<SoundItem>,
}

impl SoundFeed {
    fn new(snapshots: SnapshotReceiver, project: fn(&Snapshot) -> Vec<SoundItem>) -> Self {
        Self { snapshots, project }
    }

    /// Newest list if the store changed since the last poll.
    pub fn latest(&self) -> Option<Vec<SoundItem>> {
        self.snapshots
            .try_latest()
            .map(|snapshot| (self.project)(&snapshot))
    }

    /// Block until the next list arrives or the timeout elapses.
    pub fn wait_next(&self, timeout: Duration) -> Option<Vec<SoundItem>> {
        self.snapshots
            .recv_timeout(timeout)
            .map(|snapshot| (self.project)(&snapshot))
    }
}

/// Every decodable `sound_` record, flagged by the presence of its `fav_` twin.
pub fn sounds_from_snapshot(snapshot: &Snapshot) -> Vec<SoundItem> {
    let prefs = snapshot.as_map();
    collect_family(prefs, SOUND_PREFIX, |id| {
        prefs.contains_key(&favorite_key(id))
    })
}

/// Every decodable `fav_` record.
pub fn favorites_from_snapshot(snapshot: &Snapshot) -> Vec<SoundItem> {
    collect_family(snapshot.as_map(), FAVORITE_PREFIX, |_| true)
}

fn collect_family(
    prefs: &Preferences,
    prefix: &str,
    is_favorite: impl Fn(SlotId) -> bool,
) -> Vec<SoundItem> {
    let mut sounds: Vec<SoundItem> = prefs
        .range(prefix.to_string()..)
        .take_while(|(key, _)| key.starts_with(prefix))
        .filter_map(|(key, value)| {
            let id = parse_key(prefix, key)?;
            let (name, uri) = decode_record(value)?;
            Some(SoundItem {
                id,
                name,
                uri,
                is_favorite: is_favorite(id),
            })
        })
        .collect();
    sounds.sort_by_key(|sound| sound.id);
    sounds
}

fn sound_from_prefs(prefs: &Preferences, id: SlotId) -> Option<SoundItem> {
    let (name, uri) = decode_record(prefs.get(&sound_key(id))?)?;
    Some(SoundItem {
        id,
        name,
        uri,
        is_favorite: prefs.contains_key(&favorite_key(id)),
    })
}

fn write_sound(prefs: &mut Preferences, sound: &SoundItem) {
    let record = encode_record(&sound.name, &sound.uri);
    if sound.is_favorite {
        prefs.insert(favorite_key(sound.id), record.clone());
    } else {
        prefs.remove(&favorite_key(sound.id));
    }
    prefs.insert(sound_key(sound.id), record);
}
