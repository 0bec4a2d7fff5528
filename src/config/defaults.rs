pub(super) const MIN_GRID_DIMENSION: usize = 1;
pub(super) const MAX_GRID_DIMENSION: usize = 8;
pub(super) const MAX_LOG_FILES: usize = 100;

pub(super) fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return default_volume();
    }
    volume.clamp(0.0, 1.0)
}

pub(super) fn clamp_grid_dimension(value: usize) -> usize {
    value.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION)
}

pub(super) fn clamp_log_files(value: usize) -> usize {
    value.clamp(1, MAX_LOG_FILES)
}

pub(super) fn default_volume() -> f32 {
    1.0
}

pub(super) fn default_grid_rows() -> usize {
    4
}

pub(super) fn default_grid_columns() -> usize {
    5
}

pub(super) fn default_store_file() -> String {
    "soundpad_prefs.db".to_string()
}

pub(super) fn default_audio_extensions() -> Vec<String> {
    ["wav", "mp3", "ogg", "flac", "m4a", "aac"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

pub(super) fn default_log_files() -> usize {
    10
}
