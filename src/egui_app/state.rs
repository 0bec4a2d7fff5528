//! Render-facing state owned by the controller.

use crate::egui_app::ui::style::{self, StatusTone};
use crate::egui_app::view_model::SlotView;
use egui::Color32;

/// Maximum number of status messages kept in the log.
pub const STATUS_LOG_LIMIT: usize = 50;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub tab: BoardTab,
    /// One entry per grid slot, in slot order.
    pub slots: Vec<SlotView>,
    pub favorites: Vec<SlotView>,
    pub columns: usize,
}

impl UiState {
    pub fn new(columns: usize) -> Self {
        Self {
            status: StatusBarState::idle(),
            tab: BoardTab::Soundboard,
            slots: Vec::new(),
            favorites: Vec::new(),
            columns: columns.max(1),
        }
    }
}

/// Which view fills the central panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardTab {
    Soundboard,
    Favorites,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub tone: StatusTone,
    pub badge_label: String,
    pub badge_color: Color32,
    /// Rolling log of recent messages, oldest first.
    pub log: Vec<String>,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Tap an empty slot to add a sound".into(),
            tone: StatusTone::Idle,
            badge_label: style::status_badge_label(StatusTone::Idle).into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            log: Vec::new(),
        }
    }

    /// Replace the current message and append it to the log.
    pub fn set(&mut self, text: String, tone: StatusTone) {
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        self.tone = tone;
        self.log.push(text.clone());
        if self.log.len() > STATUS_LOG_LIMIT {
            let excess = self.log.len() - STATUS_LOG_LIMIT;
            self.log.drain(..excess);
        }
        self.text = text;
    }

    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}
