//! UI panels

mod scene_list;
mod settings;

pub use scene_list::SceneListPanel;
pub use settings::SettingsPanel;

use crate::scene::SharedSceneState;

/// A section of the side panel
pub trait Panel {
    /// Heading shown above the panel
    fn name(&self) -> &str;

    fn ui(&mut self, ui: &mut egui::Ui, state: &SharedSceneState);
}
