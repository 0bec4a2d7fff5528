//! egui front end: view models, controller and renderer.

pub mod controller;
pub mod sound_view_model;
pub mod state;
pub mod ui;
pub mod view_model;
