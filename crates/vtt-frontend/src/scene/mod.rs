//! Scene model and editing session state

mod hosts;

pub use hosts::{HostEvent, RegionHost, WallHost};

use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;
use vtt_core::{
    ControlPoint, GridConfig, Pole, Region, RegionKind, Viewport, Wall, distance_to_segment,
};
use vtt_editor::{
    ActionLog, EditorError, KeyEvent, KeyOutcome, RegionTransformer, Transformer,
    TransformerConfig, WallTransformer,
};

use crate::canvas::input::{GestureState, PointerEvent, apply_pointer};
use crate::config::EditorConfig;

/// Shared scene state type
pub type SharedSceneState = Arc<Mutex<SceneState>>;

/// Walls and regions of one scene
#[derive(Debug, Clone)]
pub struct Scene {
    pub name: String,
    pub grid: GridConfig,
    pub walls: Vec<Wall>,
    pub regions: Vec<Region>,
}

impl Scene {
    pub fn new(name: impl Into<String>, grid: GridConfig) -> Self {
        Self {
            name: name.into(),
            grid,
            walls: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// A small sample scene
    pub fn demo() -> Self {
        let mut scene = Self::new("Crypt", GridConfig::square(50.0));
        scene.walls.push(Wall::new(
            "North Wall",
            vec![
                Pole::new(100.0, 100.0),
                Pole::new(400.0, 100.0),
                Pole::new(400.0, 300.0),
            ],
        ));
        scene.walls.push(Wall::new(
            "Fence",
            vec![Pole::new(100.0, 450.0), Pole::new(350.0, 450.0)],
        ));
        scene.regions.push(Region::rectangle(
            "Raised Dais",
            RegionKind::Elevation,
            Vec2::new(150.0, 150.0),
            Vec2::new(300.0, 250.0),
        ));
        scene.regions.push(Region::new(
            "Rubble",
            RegionKind::Terrain,
            vec![
                Vec2::new(450.0, 350.0),
                Vec2::new(600.0, 325.0),
                Vec2::new(650.0, 450.0),
                Vec2::new(500.0, 500.0),
            ],
        ));
        scene.regions.push(Region::rectangle(
            "Unexplored",
            RegionKind::FogOfWar,
            Vec2::new(500.0, 50.0),
            Vec2::new(750.0, 250.0),
        ));
        scene
    }

    pub fn wall(&self, id: Uuid) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn region(&self, id: Uuid) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    fn wall_index(&self, id: Uuid) -> Option<usize> {
        self.walls.iter().position(|w| w.id == id)
    }

    fn region_index(&self, id: Uuid) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }
}

/// What is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Wall(Uuid),
    Region(Uuid),
}

/// One shape being edited, with its transaction-scoped undo log
#[derive(Debug)]
pub struct EditSession<V: ControlPoint> {
    pub id: Uuid,
    pub editor: Transformer<V>,
    pub log: ActionLog<V>,
    pub gesture: GestureState,
}

impl<V: ControlPoint> EditSession<V> {
    fn new(id: Uuid, editor: Transformer<V>, max_history: usize) -> Self {
        Self {
            id,
            editor,
            log: ActionLog::new(max_history),
            gesture: GestureState::default(),
        }
    }

    fn undo(&mut self, vertices: &mut Vec<V>) -> Result<Option<String>, EditorError> {
        let description = self.log.undo(vertices)?;
        if description.is_some() {
            self.resync(vertices);
        }
        Ok(description)
    }

    fn redo(&mut self, vertices: &mut Vec<V>) -> Result<Option<String>, EditorError> {
        let description = self.log.redo(vertices)?;
        if description.is_some() {
            self.resync(vertices);
        }
        Ok(description)
    }

    fn resync(&mut self, vertices: &[V]) {
        self.editor.sync_vertices(vertices.to_vec());
        self.gesture = GestureState::default();
    }
}

/// The active editing session
#[derive(Debug)]
pub enum ActiveEditor {
    Wall(EditSession<Pole>),
    Region(EditSession<Vec2>),
}

impl ActiveEditor {
    pub fn target(&self) -> EditTarget {
        match self {
            ActiveEditor::Wall(session) => EditTarget::Wall(session.id),
            ActiveEditor::Region(session) => EditTarget::Region(session.id),
        }
    }

    pub fn can_undo(&self) -> bool {
        match self {
            ActiveEditor::Wall(session) => session.log.can_undo(),
            ActiveEditor::Region(session) => session.log.can_undo(),
        }
    }

    pub fn can_redo(&self) -> bool {
        match self {
            ActiveEditor::Wall(session) => session.log.can_redo(),
            ActiveEditor::Region(session) => session.log.can_redo(),
        }
    }

    /// Number of selected vertices
    pub fn selected_count(&self) -> usize {
        match self {
            ActiveEditor::Wall(session) => session.editor.selection().len(),
            ActiveEditor::Region(session) => session.editor.selection().len(),
        }
    }
}

/// Scene plus the editing session and view
pub struct SceneState {
    pub scene: Scene,
    pub viewport: Viewport,
    editor_config: EditorConfig,
    active: Option<ActiveEditor>,
    events: Vec<HostEvent>,
    /// Last user-facing message
    pub status: Option<String>,
}

impl SceneState {
    pub fn new(scene: Scene, editor_config: EditorConfig) -> Self {
        let mut state = Self {
            scene,
            viewport: Viewport::default(),
            editor_config: editor_config.clone(),
            active: None,
            events: Vec::new(),
            status: None,
        };
        state.set_editor_config(editor_config);
        state
    }

    pub fn active(&self) -> Option<&ActiveEditor> {
        self.active.as_ref()
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.active.as_ref().map(ActiveEditor::target)
    }

    pub fn editor_config(&self) -> &EditorConfig {
        &self.editor_config
    }

    /// Apply new editor preferences to the scene grid and the active session
    pub fn set_editor_config(&mut self, config: EditorConfig) {
        self.scene.grid.cell_size = Vec2::splat(config.grid_cell_size.max(1.0));
        let grid = self.scene.grid;
        match &mut self.active {
            Some(ActiveEditor::Wall(session)) => {
                session.editor.set_grid(grid);
                session.editor.set_config(config.apply_to(TransformerConfig::wall()));
            }
            Some(ActiveEditor::Region(session)) => {
                session.editor.set_grid(grid);
                session.editor.set_config(config.apply_to(TransformerConfig::region()));
            }
            None => {}
        }
        self.editor_config = config;
    }

    // ============== Session lifecycle ==============

    /// Start editing a wall or region, ending any current session.
    ///
    /// Returns `false` if the target does not exist.
    pub fn begin_edit(&mut self, target: EditTarget) -> bool {
        let grid = self.scene.grid;
        let max_history = self.editor_config.max_history;
        let session = match target {
            EditTarget::Wall(id) => {
                let Some(wall) = self.scene.wall(id) else {
                    return false;
                };
                let mut editor: WallTransformer = WallTransformer::wall(wall.poles.clone(), grid);
                editor.set_config(self.editor_config.apply_to(TransformerConfig::wall()));
                ActiveEditor::Wall(EditSession::new(id, editor, max_history))
            }
            EditTarget::Region(id) => {
                let Some(region) = self.scene.region(id) else {
                    return false;
                };
                let mut editor: RegionTransformer =
                    RegionTransformer::region(region.vertices.clone(), grid);
                editor.set_config(self.editor_config.apply_to(TransformerConfig::region()));
                ActiveEditor::Region(EditSession::new(id, editor, max_history))
            }
        };
        info!("Editing {:?}", target);
        self.active = Some(session);
        true
    }

    /// End the editing session, discarding its undo log
    pub fn finish_edit(&mut self) {
        if let Some(active) = self.active.take() {
            info!("Finished editing {:?}", active.target());
        }
    }

    /// Wall or region under a world position, walls first
    pub fn pick_target(&self, world: Vec2) -> Option<EditTarget> {
        let radius = self.editor_config.hit.line_hit_width() / 2.0 / self.viewport.scale;
        let wall = self.scene.walls.iter().find(|wall| {
            wall.poles.windows(2).any(|pair| {
                distance_to_segment(world, pair[0].position, pair[1].position) <= radius
            })
        });
        if let Some(wall) = wall {
            return Some(EditTarget::Wall(wall.id));
        }
        self.scene
            .regions
            .iter()
            .find(|region| region.contains(world))
            .map(|region| EditTarget::Region(region.id))
    }

    // ============== Input ==============

    /// Feed a pointer event to the active session
    pub fn pointer(&mut self, event: PointerEvent) -> Result<(), EditorError> {
        let result = self.dispatch_pointer(event);
        self.process_events();
        result
    }

    fn dispatch_pointer(&mut self, event: PointerEvent) -> Result<(), EditorError> {
        let scale = self.viewport.scale;
        let Self {
            scene,
            active,
            events,
            ..
        } = self;
        match active {
            Some(ActiveEditor::Wall(session)) => {
                let Some(index) = scene.wall_index(session.id) else {
                    return Ok(());
                };
                let mut host = WallHost {
                    walls: &mut scene.walls,
                    index,
                    log: &mut session.log,
                    events,
                };
                apply_pointer(&mut session.editor, &mut host, &mut session.gesture, event, scale)
            }
            Some(ActiveEditor::Region(session)) => {
                let Some(index) = scene.region_index(session.id) else {
                    return Ok(());
                };
                let mut host = RegionHost {
                    regions: &mut scene.regions,
                    index,
                    log: &mut session.log,
                    events,
                };
                apply_pointer(&mut session.editor, &mut host, &mut session.gesture, event, scale)
            }
            None => Ok(()),
        }
    }

    /// Feed a key event to the active session
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let Self {
            scene,
            active,
            events,
            ..
        } = self;
        let outcome = match active {
            Some(ActiveEditor::Wall(session)) => match scene.wall_index(session.id) {
                Some(index) => {
                    let mut host = WallHost {
                        walls: &mut scene.walls,
                        index,
                        log: &mut session.log,
                        events,
                    };
                    session.editor.handle_key(event, &mut host)
                }
                None => KeyOutcome::Ignored,
            },
            Some(ActiveEditor::Region(session)) => match scene.region_index(session.id) {
                Some(index) => {
                    let mut host = RegionHost {
                        regions: &mut scene.regions,
                        index,
                        log: &mut session.log,
                        events,
                    };
                    session.editor.handle_key(event, &mut host)
                }
                None => KeyOutcome::Ignored,
            },
            None => KeyOutcome::Ignored,
        };
        self.process_events();
        outcome
    }

    // ============== Undo / redo ==============

    pub fn can_undo(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveEditor::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.active.as_ref().is_some_and(ActiveEditor::can_redo)
    }

    /// Undo the last edit of the active session
    pub fn undo(&mut self) -> Result<Option<String>, EditorError> {
        let Self { scene, active, .. } = self;
        match active {
            Some(ActiveEditor::Wall(session)) => {
                match scene.walls.iter_mut().find(|w| w.id == session.id) {
                    Some(wall) => session.undo(&mut wall.poles),
                    None => Ok(None),
                }
            }
            Some(ActiveEditor::Region(session)) => {
                match scene.regions.iter_mut().find(|r| r.id == session.id) {
                    Some(region) => session.undo(&mut region.vertices),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    /// Redo the last undone edit of the active session
    pub fn redo(&mut self) -> Result<Option<String>, EditorError> {
        let Self { scene, active, .. } = self;
        match active {
            Some(ActiveEditor::Wall(session)) => {
                match scene.walls.iter_mut().find(|w| w.id == session.id) {
                    Some(wall) => session.redo(&mut wall.poles),
                    None => Ok(None),
                }
            }
            Some(ActiveEditor::Region(session)) => {
                match scene.regions.iter_mut().find(|r| r.id == session.id) {
                    Some(region) => session.redo(&mut region.vertices),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }

    // ============== Host events ==============

    fn process_events(&mut self) {
        let events = std::mem::take(&mut self.events);
        for event in events {
            match event {
                HostEvent::ClearSelection | HostEvent::Finish => self.finish_edit(),
                HostEvent::SwitchToRegion(id) => {
                    self.begin_edit(EditTarget::Region(id));
                }
                HostEvent::WallBreak(split) => self.apply_wall_break(split),
            }
        }
    }

    fn apply_wall_break(&mut self, split: vtt_editor::WallBreak<Pole>) {
        let Some(ActiveEditor::Wall(session)) = &mut self.active else {
            return;
        };
        let Some(index) = self.scene.wall_index(session.id) else {
            return;
        };

        let wall = &mut self.scene.walls[index];
        wall.poles = split.first.clone();
        let mut piece = Wall::new(format!("{} (split)", wall.name), split.second);
        piece.visibility = wall.visibility;
        debug!("Split wall {} at pole {}", wall.name, split.break_index);
        self.status = Some(format!("Split {} at pole {}", wall.name, split.break_index));
        self.scene.walls.insert(index + 1, piece);

        // Indices recorded so far refer to the unsplit wall
        session.log.clear();
        session.resync(&split.first);
    }
}
