use eframe::egui::{self, Color32, RichText, Ui, Vec2};

use super::style::{self, Palette};
use crate::egui_app::view_model::{ButtonTone, FavoriteIcon, SlotAction, SlotView};

const GRID_SPACING: f32 = 8.0;
const MIN_SLOT_WIDTH: f32 = 72.0;
const STAR_SIZE: f32 = 24.0;

/// Which secondary gestures a rendered slot offers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(super) enum SlotMenu {
    /// Long press and context menu can replace or clear the slot.
    Editable,
    PlayOnly,
}

/// Draw `rows` as a grid and return the gesture made this frame, if any.
pub(super) fn render_grid(
    ui: &mut Ui,
    id: &str,
    rows: &[SlotView],
    columns: usize,
    menu: SlotMenu,
) -> Option<SlotAction> {
    let palette = style::palette();
    let columns = columns.max(1);
    let gaps = GRID_SPACING * (columns as f32 - 1.0);
    let width = ((ui.available_width() - gaps) / columns as f32).max(MIN_SLOT_WIDTH);
    let size = egui::vec2(width, (width * 0.6).clamp(48.0, 120.0));
    let mut action = None;
    egui::Grid::new(id)
        .spacing([GRID_SPACING, GRID_SPACING])
        .show(ui, |ui| {
            for (index, view) in rows.iter().enumerate() {
                if let Some(found) = render_slot(ui, view, size, menu, &palette) {
                    action = Some(found);
                }
                if (index + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });
    action
}

fn render_slot(
    ui: &mut Ui,
    view: &SlotView,
    size: Vec2,
    menu: SlotMenu,
    palette: &Palette,
) -> Option<SlotAction> {
    let fill = match view.tone {
        ButtonTone::Normal => palette.sound_button,
        ButtonTone::Highlighted => palette.sound_playing,
    };
    let mut text = RichText::new(&view.label).color(Color32::WHITE);
    if view.sound.is_none() {
        text = text.italics();
    }
    let mut action = None;
    ui.push_id(("slot", view.slot), |ui| {
        let response = ui.add_sized(size, egui::Button::new(text).fill(fill));
        if response.clicked() {
            action = Some(view.click());
        }
        if menu == SlotMenu::Editable && view.sound.is_some() {
            if response.long_touched() {
                action = view.long_press();
            }
            response.context_menu(|ui| {
                if ui.button("Replace sound").clicked() {
                    action = view.long_press();
                    ui.close();
                }
                if ui.button("Clear slot").clicked() {
                    action = view.clear();
                    ui.close();
                }
            });
        }
        let star = match view.favorite {
            FavoriteIcon::Hidden => return,
            FavoriteIcon::Filled => "★",
            FavoriteIcon::Hollow => "☆",
        };
        let star_rect = egui::Rect::from_min_size(
            response.rect.right_top() + egui::vec2(-STAR_SIZE - 2.0, 2.0),
            egui::vec2(STAR_SIZE, STAR_SIZE),
        );
        let star_button =
            egui::Button::new(RichText::new(star).size(18.0).color(palette.star)).frame(false);
        if ui.put(star_rect, star_button).clicked() {
            action = view.favorite_click();
        }
    });
    action
}
