//! Textual layout of sound records inside the preference map.
//!
//! Two key families are used: `sound_<id>` holds every assigned sound and
//! `fav_<id>` mirrors it while the sound is a favorite. Both values are
//! `"<name>|<uri>"`. Decoding splits on the first `|` only, so a `|` inside the
//! uri survives while one inside the name moves the remainder into the uri.

use super::item::SlotId;

pub const SOUND_PREFIX: &str = "sound_";
pub const FAVORITE_PREFIX: &str = "fav_";
pub const DELIMITER: char = '|';

pub fn sound_key(id: SlotId) -> String {
    format!("{SOUND_PREFIX}{id}")
}

pub fn favorite_key(id: SlotId) -> String {
    format!("{FAVORITE_PREFIX}{id}")
}

/// Parse the slot id out of a key of the given family.
///
/// Only the canonical spelling is accepted: `sound_05` or `sound_+5` would
/// alias `sound_5`, so they count as malformed.
pub fn parse_key(prefix: &str, key: &str) -> Option<SlotId> {
    let digits = key.strip_prefix(prefix)?;
    let id: SlotId = digits.parse().ok()?;
    (id.to_string() == digits).then_some(id)
}

pub fn encode_record(name: &str, uri: &str) -> String {
    format!("{name}{DELIMITER}{uri}")
}

/// Split a stored value into `(name, uri)`; `None` when the delimiter is missing.
pub fn decode_record(value: &str) -> Option<(String, String)> {
    let (name, uri) = value.split_once(DELIMITER)?;
    Some((name.to_string(), uri.to_string()))
}
