use std::path::Path;

use super::codec::DELIMITER;
use super::item::SlotId;

/// Label shown for a picked file: the file name without folders or extension.
///
/// The record delimiter is swapped for `-` so the stored uri stays intact.
pub fn sound_display_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(|stem| stem.replace(DELIMITER, "-"))
}

/// Label used when the picked file has no usable name.
pub fn fallback_sound_name(slot: SlotId) -> String {
    format!("Sound {}", slot + 1)
}
