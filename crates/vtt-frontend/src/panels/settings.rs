//! Settings panel - snapping and grid preferences

use crate::config::SharedConfig;
use crate::panels::Panel;
use crate::scene::SharedSceneState;

/// Editor preferences, persisted through the config manager
pub struct SettingsPanel {
    config: SharedConfig,
}

impl SettingsPanel {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }
}

impl Panel for SettingsPanel {
    fn name(&self) -> &str {
        "Settings"
    }

    fn ui(&mut self, ui: &mut egui::Ui, state: &SharedSceneState) {
        let mut editor = self.config.read().config().editor.clone();
        let mut changed = false;

        changed |= ui.checkbox(&mut editor.snap_to_grid, "Snap to grid").changed();
        changed |= ui.checkbox(&mut editor.show_grid, "Show grid").changed();
        changed |= ui
            .add(egui::Slider::new(&mut editor.grid_cell_size, 10.0..=200.0).text("Grid size"))
            .changed();

        if ui.button("Reset to defaults").clicked() {
            let mut config = self.config.write();
            config.reset_to_defaults();
            editor = config.config().editor.clone();
            changed = true;
        }

        if changed {
            self.config.write().config_mut().editor = editor.clone();
            state.lock().set_editor_config(editor);
        }

        ui.separator();
        let path = self.config.read().config_file_path().display().to_string();
        ui.weak(format!("Config: {}", path));
    }
}
