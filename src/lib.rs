//! Library exports for the soundboard binary and integration tests.
/// Application directory resolution.
pub mod app_dirs;
/// Audio playback over a pluggable backend.
pub mod audio;
/// `config.toml` loading and saving.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Tracing setup.
pub mod logging;
/// Transactional key-value preference store.
pub mod prefs;
/// Sound records and their persistence.
pub mod sounds;
