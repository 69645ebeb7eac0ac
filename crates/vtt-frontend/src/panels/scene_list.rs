//! Scene list panel - walls, regions and the editing session

use tracing::warn;

use crate::panels::Panel;
use crate::scene::{EditTarget, SharedSceneState};

/// Lists the scene's walls and regions and controls the editing session
pub struct SceneListPanel;

impl SceneListPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SceneListPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for SceneListPanel {
    fn name(&self) -> &str {
        "Scene"
    }

    fn ui(&mut self, ui: &mut egui::Ui, state: &SharedSceneState) {
        let mut state = state.lock();
        let editing = state.editing();
        let mut clicked = None;

        ui.label(egui::RichText::new(&state.scene.name).strong());
        ui.separator();

        ui.label("Walls");
        if state.scene.walls.is_empty() {
            ui.weak("No walls");
        }
        for wall in &state.scene.walls {
            let target = EditTarget::Wall(wall.id);
            let label = format!("{} ({} poles)", wall.name, wall.poles.len());
            if ui.selectable_label(editing == Some(target), label).clicked() {
                clicked = Some(target);
            }
        }

        ui.add_space(8.0);
        ui.label("Regions");
        if state.scene.regions.is_empty() {
            ui.weak("No regions");
        }
        for region in &state.scene.regions {
            let target = EditTarget::Region(region.id);
            let label = format!("{} [{}]", region.name, region.kind.name());
            if ui.selectable_label(editing == Some(target), label).clicked() {
                clicked = Some(target);
            }
        }

        if let Some(target) = clicked {
            if editing == Some(target) {
                state.finish_edit();
            } else {
                state.begin_edit(target);
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(state.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                match state.undo() {
                    Ok(description) => state.status = description.map(|d| format!("Undo: {}", d)),
                    Err(e) => {
                        warn!("Undo failed: {}", e);
                        state.status = Some(e.to_string());
                    }
                }
            }
            if ui
                .add_enabled(state.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                match state.redo() {
                    Ok(description) => state.status = description.map(|d| format!("Redo: {}", d)),
                    Err(e) => {
                        warn!("Redo failed: {}", e);
                        state.status = Some(e.to_string());
                    }
                }
            }
            if ui
                .add_enabled(state.editing().is_some(), egui::Button::new("Finish"))
                .clicked()
            {
                state.finish_edit();
            }
        });

        if let Some(active) = state.active() {
            ui.weak(format!("{} selected", active.selected_count()));
        }
        if let Some(status) = &state.status {
            ui.label(status.as_str());
        }

        ui.add_space(8.0);
        ui.weak(
            "Click a wall or region to edit.\n\
             Shift+click a line to add a point.\n\
             Delete removes, Alt+Delete splits a wall.\n\
             Alt drags freely, Alt+Ctrl snaps finely.\n\
             Escape deselects, Enter finishes.",
        );
    }
}
