//! egui renderer for the soundboard.

use std::time::Duration;

use eframe::egui::{self, Color32, Frame, Margin, RichText, Ui};

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::BoardTab;
use crate::egui_app::view_model::SlotAction;

mod board;
pub mod style;

/// Minimum window size that still fits a full grid row.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(480.0, 360.0);
const FAVORITE_COLUMNS: usize = 2;
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Soundpad").strong().color(palette.text_primary));
                    ui.separator();
                    let current = self.controller.ui.tab;
                    for (tab, label) in [
                        (BoardTab::Soundboard, "Soundboard"),
                        (BoardTab::Favorites, "Favorites"),
                    ] {
                        if ui.selectable_label(current == tab, label).clicked() {
                            self.controller.select_tab(tab);
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_stop_button(ui);
                    });
                });
            });
    }

    fn render_stop_button(&mut self, ui: &mut Ui) {
        let playing = self.controller.is_playing();
        let button = egui::Button::new(RichText::new("■ Stop").color(Color32::WHITE));
        if ui.add_enabled(playing, button).clicked() {
            self.controller.stop_playing_sound();
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(22.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    let response = ui.label(RichText::new(&status.text).color(Color32::WHITE));
                    if !status.log.is_empty() {
                        response.on_hover_text(status.log_text());
                    }
                });
            });
    }

    fn render_board(&mut self, ctx: &egui::Context) -> Option<SlotAction> {
        let palette = style::palette();
        let mut action = None;
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_secondary)
                    .inner_margin(Margin::same(12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = match self.controller.ui.tab {
                        BoardTab::Soundboard => board::render_grid(
                            ui,
                            "sound_grid",
                            &self.controller.ui.slots,
                            self.controller.ui.columns,
                            board::SlotMenu::Editable,
                        ),
                        BoardTab::Favorites if self.controller.ui.favorites.is_empty() => {
                            ui.label(
                                RichText::new("No favorites yet. Tap ☆ on a sound to add it.")
                                    .color(palette.text_muted),
                            );
                            None
                        }
                        BoardTab::Favorites => board::render_grid(
                            ui,
                            "favorites_grid",
                            &self.controller.ui.favorites,
                            FAVORITE_COLUMNS,
                            board::SlotMenu::PlayOnly,
                        ),
                    };
                });
            });
        action
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.tick();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        if let Some(action) = self.render_board(ctx) {
            self.controller.handle_action(action);
        }
        // Playback completion is polled, so keep frames coming while idle.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();
    }
}
