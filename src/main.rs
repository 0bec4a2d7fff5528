//! Entry point for the egui-based soundboard.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::sync::Arc;

use eframe::egui;
use soundpad::app_dirs::AppPaths;
use soundpad::audio::{PlaybackBackend, PlaybackController, RodioBackend, UnavailableBackend};
use soundpad::config::{self, AppSettings, ConfigError};
use soundpad::egui_app::controller::{EguiController, RfdPicker};
use soundpad::egui_app::sound_view_model::SoundViewModel;
use soundpad::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use soundpad::logging;
use soundpad::prefs::PreferenceStore;
use soundpad::sounds::SoundRepository;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let startup = AppPaths::resolve()
        .map_err(|err| format!("Failed to prepare app folder: {err}"))
        .map(|paths| {
            let settings = config::load_or_default(&paths);
            (paths, settings)
        });
    if let Ok((paths, settings)) = &startup {
        let logging = settings
            .as_ref()
            .map(|settings| settings.logging.clone())
            .unwrap_or_default();
        if let Err(err) = logging::init(paths, &logging) {
            eprintln!("Logging disabled: {err}");
        }
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size([900.0, 640.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Soundpad",
        native_options,
        Box::new(move |_cc| {
            match startup.and_then(|(paths, settings)| build_controller(&paths, settings)) {
                Ok(controller) => Ok(Box::new(EguiApp::new(controller))),
                Err(err) => {
                    tracing::error!("Startup failed: {err}");
                    Ok(Box::new(LaunchError { message: err }))
                }
            }
        }),
    )?;
    Ok(())
}

fn build_controller(
    paths: &AppPaths,
    settings: Result<AppSettings, ConfigError>,
) -> Result<EguiController, String> {
    let settings = settings.unwrap_or_else(|err| {
        tracing::warn!("Using default settings: {err}");
        AppSettings::default()
    });
    let store_path = config::store_path(paths, &settings);
    let store = PreferenceStore::open(&store_path)
        .map_err(|err| format!("Failed to open {}: {err}", store_path.display()))?;
    let view_model = SoundViewModel::new(SoundRepository::new(Arc::new(store)));
    let playback = PlaybackController::new(open_backend(settings.volume));
    let picker = RfdPicker::new(settings.picker.extensions.clone());
    Ok(EguiController::new(
        view_model,
        playback,
        Box::new(picker),
        settings.grid,
    ))
}

fn open_backend(volume: f32) -> Box<dyn PlaybackBackend> {
    match RodioBackend::open_default(volume) {
        Ok(backend) => Box::new(backend),
        Err(err) => {
            tracing::warn!("Audio output unavailable: {err}");
            Box::new(UnavailableBackend::new(err.to_string()))
        }
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start Soundpad");
                ui.label(&self.message);
            });
        });
    }
}
