//! Scene canvas: pan/zoom view, pointer routing and painting

pub mod input;
pub mod rendering;

use glam::Vec2;
use tracing::warn;

use crate::scene::{ActiveEditor, EditTarget, SharedSceneState};
use input::{PointerEvent, pointer_events};
use rendering::{CanvasTransform, colors};

/// Zoom factor per scrolled point
const ZOOM_SPEED: f32 = 0.0015;

/// Show the scene canvas filling the available space
pub fn canvas_ui(ui: &mut egui::Ui, state: &SharedSceneState, show_grid: bool) {
    let (response, painter) =
        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let rect = response.rect;
    let ctx = ui.ctx().clone();
    let mut state = state.lock();

    // Secondary/middle drag pans, wheel zooms about the pointer
    if response.dragged_by(egui::PointerButton::Secondary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        let delta = response.drag_delta();
        state.viewport.pan(Vec2::new(delta.x, delta.y));
    }
    if let Some(hover) = response.hover_pos() {
        let scroll = ctx.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            let anchor = Vec2::new(hover.x - rect.min.x, hover.y - rect.min.y);
            state.viewport.zoom_about(anchor, (scroll * ZOOM_SPEED).exp());
        }
    }

    let viewport = state.viewport;
    for event in pointer_events(&response, &ctx, &viewport) {
        if state.editing().is_some() {
            if let Err(e) = state.pointer(event) {
                warn!("Edit failed: {}", e);
                state.status = Some(e.to_string());
            }
        } else if let PointerEvent::Click { world, .. } = event {
            if let Some(target) = state.pick_target(world) {
                state.begin_edit(target);
            }
        }
    }

    painter.rect_filled(rect, 0.0, colors::BACKGROUND);
    let transform = CanvasTransform {
        origin: rect.min,
        viewport: state.viewport,
    };
    if show_grid {
        rendering::paint_grid(&painter, rect, &transform, &state.scene.grid);
    }

    let editing = state.editing();
    for region in &state.scene.regions {
        if editing != Some(EditTarget::Region(region.id)) {
            rendering::paint_region(&painter, &transform, region);
        }
    }
    for wall in &state.scene.walls {
        if editing != Some(EditTarget::Wall(wall.id)) {
            rendering::paint_wall(&painter, &transform, wall);
        }
    }
    match state.active() {
        Some(ActiveEditor::Wall(session)) => {
            rendering::paint_transformer(&painter, &transform, &session.editor);
        }
        Some(ActiveEditor::Region(session)) => {
            rendering::paint_transformer(&painter, &transform, &session.editor);
        }
        None => {}
    }
}
