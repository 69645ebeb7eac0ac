//! Main application

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};
use vtt_editor::{KeyOutcome, KeyboardRouter, ListenerGuard, Phase};

use crate::canvas::{self, input::key_events};
use crate::config::{SharedConfig, UiTheme, create_shared_config};
use crate::panels::{Panel, SceneListPanel, SettingsPanel};
use crate::scene::{EditTarget, Scene, SceneState, SharedSceneState};

/// Main application state
pub struct VttEditorApp {
    state: SharedSceneState,
    config: SharedConfig,
    router: KeyboardRouter,
    /// Listener of the current editing session, dropped when editing stops
    edit_listener: Option<(EditTarget, ListenerGuard)>,
    shift_down: bool,
    panels: Vec<Box<dyn Panel>>,
}

impl VttEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let (theme, editor_config) = {
            let config = config.read();
            (config.config().ui.theme, config.config().editor.clone())
        };
        match theme {
            UiTheme::Dark => cc.egui_ctx.set_visuals(egui::Visuals::dark()),
            UiTheme::Light => cc.egui_ctx.set_visuals(egui::Visuals::light()),
        }

        let state = Arc::new(Mutex::new(SceneState::new(Scene::demo(), editor_config)));
        let panels: Vec<Box<dyn Panel>> = vec![
            Box::new(SceneListPanel::new()),
            Box::new(SettingsPanel::new(config.clone())),
        ];

        Self {
            state,
            config,
            router: KeyboardRouter::new(),
            edit_listener: None,
            shift_down: false,
            panels,
        }
    }

    /// Keep exactly one key listener registered for the edited shape
    fn sync_key_listener(&mut self) {
        let editing = self.state.lock().editing();
        if self.edit_listener.as_ref().map(|(target, _)| *target) == editing {
            return;
        }

        self.edit_listener = editing.map(|target| {
            debug!("Registering key listener for {:?}", target);
            let state = self.state.clone();
            let guard = self
                .router
                .register(Phase::Capture, move |event| state.lock().handle_key(event));
            (target, guard)
        });
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        self.sync_key_listener();
        for event in key_events(ctx, &mut self.shift_down) {
            // The listener locks the state itself
            if self.router.dispatch(&event) == KeyOutcome::Handled {
                self.sync_key_listener();
            }
        }

        let redo = egui::KeyboardShortcut::new(
            egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
            egui::Key::Z,
        );
        let undo = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
        // Redo first: its shortcut contains undo's
        if ctx.input_mut(|i| i.consume_shortcut(&redo)) {
            self.apply_history(false);
        } else if ctx.input_mut(|i| i.consume_shortcut(&undo)) {
            self.apply_history(true);
        }
    }

    fn apply_history(&mut self, undo: bool) {
        let mut state = self.state.lock();
        let result = if undo { state.undo() } else { state.redo() };
        match result {
            Ok(Some(description)) => {
                let verb = if undo { "Undo" } else { "Redo" };
                state.status = Some(format!("{}: {}", verb, description));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("History operation failed: {}", e);
                state.status = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for VttEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let (panel_width, show_grid) = {
            let config = self.config.read();
            (config.config().ui.side_panel_width, config.config().editor.show_grid)
        };

        egui::SidePanel::left("scene_panel")
            .default_width(panel_width)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for panel in &mut self.panels {
                        ui.heading(panel.name());
                        panel.ui(ui, &self.state);
                        ui.separator();
                    }
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                canvas::canvas_ui(ui, &self.state, show_grid);
            });

        // Panels and the canvas may have started or ended a session
        self.sync_key_listener();

        let mut config = self.config.write();
        if config.is_dirty() {
            if let Err(e) = config.save() {
                warn!("Failed to save config: {}", e);
            }
        }
    }
}
