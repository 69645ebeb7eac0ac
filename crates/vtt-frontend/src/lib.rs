//! VTT Scene Editor Frontend
//!
//! egui-based application for editing scene walls and regions.

mod app;
pub mod canvas;
pub mod config;
mod panels;
pub mod scene;

pub use app::VttEditorApp;
