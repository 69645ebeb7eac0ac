//! Interactive vertex/line transformer
//!
//! One engine edits both walls (open polylines of [`Pole`]s) and regions
//! (closed polygons of `Vec2`). The differences are captured by
//! [`ShapeRules`]. The transformer keeps a mirror of the committed vertices,
//! a drag preview, and the current selection; every committed edit is
//! reported to a [`TransformerHost`] and, when the host provides a sink,
//! recorded as a [`LocalAction`](crate::LocalAction).

mod drag;
mod edit;
mod keys;

use glam::Vec2;
use tracing::trace;
use vtt_core::{
    ControlPoint, GridConfig, KeyModifiers, Pole, Rect, SnapMode, resolve_snap_mode,
    snap_to_nearest,
};

use crate::config::TransformerConfig;
use crate::handles::{HandleTable, VertexHandle};
use crate::hit::{self, HitTarget};
use crate::host::TransformerHost;
use crate::selection::Selection;
use crate::shape::ShapeRules;

/// Transformer over wall poles
pub type WallTransformer<H = ()> = Transformer<Pole, H>;

/// Transformer over region vertices
pub type RegionTransformer<H = ()> = Transformer<Vec2, H>;

/// An in-progress pointer drag
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragSession {
    Vertex {
        index: usize,
        /// Committed position of the dragged vertex
        anchor: Vec2,
    },
    Line {
        index: usize,
        first_index: usize,
        second_index: usize,
        /// Snapped pointer position at drag start
        anchor: Vec2,
        first: Vec2,
        second: Vec2,
    },
}

/// An in-progress marquee selection, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
struct Marquee {
    start: Vec2,
    end: Vec2,
}

/// Ghost vertex shown while Shift-hovering a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertPreview {
    pub line_index: usize,
    pub position: Vec2,
}

/// Interactive editor for one shape
#[derive(Debug)]
pub struct Transformer<V: ControlPoint, H: VertexHandle = ()> {
    rules: ShapeRules,
    config: TransformerConfig,
    grid: GridConfig,
    /// Last committed vertices
    vertices: Vec<V>,
    /// Live vertices while dragging
    preview: Option<Vec<V>>,
    selection: Selection,
    drag: Option<DragSession>,
    marquee: Option<Marquee>,
    insert_preview: Option<InsertPreview>,
    shift_held: bool,
    handles: HandleTable<H>,
}

impl<H: VertexHandle> Transformer<Pole, H> {
    /// Wall transformer with wall snapping defaults
    pub fn wall(poles: Vec<Pole>, grid: GridConfig) -> Self {
        Self::new(ShapeRules::WALL, poles, grid, TransformerConfig::wall())
    }
}

impl<H: VertexHandle> Transformer<Vec2, H> {
    /// Region transformer with region snapping defaults
    pub fn region(vertices: Vec<Vec2>, grid: GridConfig) -> Self {
        Self::new(ShapeRules::REGION, vertices, grid, TransformerConfig::region())
    }
}

impl<V: ControlPoint, H: VertexHandle> Transformer<V, H> {
    pub fn new(
        rules: ShapeRules,
        vertices: Vec<V>,
        grid: GridConfig,
        config: TransformerConfig,
    ) -> Self {
        Self {
            rules,
            config,
            grid,
            vertices,
            preview: None,
            selection: Selection::default(),
            drag: None,
            marquee: None,
            insert_preview: None,
            shift_held: false,
            handles: HandleTable::default(),
        }
    }

    // ============== Queries ==============

    pub fn rules(&self) -> &ShapeRules {
        &self.rules
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TransformerConfig) {
        self.config = config;
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
    }

    /// Last committed vertices
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Vertices to draw: the drag preview if dragging, else the committed list
    pub fn display_vertices(&self) -> &[V] {
        self.preview.as_deref().unwrap_or(&self.vertices)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Index of the vertex being dragged
    pub fn dragging_vertex(&self) -> Option<usize> {
        match self.drag {
            Some(DragSession::Vertex { index, .. }) => Some(index),
            _ => None,
        }
    }

    /// Index of the line being dragged
    pub fn dragging_line(&self) -> Option<usize> {
        match self.drag {
            Some(DragSession::Line { index, .. }) => Some(index),
            _ => None,
        }
    }

    pub fn is_marquee_active(&self) -> bool {
        self.marquee.is_some()
    }

    /// Current marquee rectangle in world space
    pub fn marquee_rect(&self) -> Option<Rect> {
        self.marquee.map(|m| Rect::from_corners(m.start, m.end))
    }

    pub fn insert_preview(&self) -> Option<InsertPreview> {
        self.insert_preview
    }

    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    pub fn segment_count(&self) -> usize {
        self.rules.segment_count(self.vertices.len())
    }

    /// Displayed segments as `(line_index, start, end)`
    pub fn segments(&self) -> impl Iterator<Item = (usize, Vec2, Vec2)> + '_ {
        let vertices = self.display_vertices();
        (0..self.rules.segment_count(vertices.len())).filter_map(move |line| {
            let (a, b) = self.rules.segment_endpoints(line, vertices.len())?;
            Some((line, vertices[a].position(), vertices[b].position()))
        })
    }

    /// Vertex or line under a world position at the given zoom
    pub fn hit_test(&self, world: Vec2, scale: f32) -> HitTarget {
        hit::hit_test(
            self.display_vertices(),
            &self.rules,
            world,
            &self.config.hit,
            scale,
        )
    }

    pub fn handles(&self) -> &HandleTable<H> {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut HandleTable<H> {
        &mut self.handles
    }

    // ============== Snapping ==============

    /// Snap mode selected by the given modifiers
    pub fn snap_mode(&self, modifiers: KeyModifiers) -> SnapMode {
        if self.config.snap_enabled {
            resolve_snap_mode(modifiers, &self.config.snap)
        } else {
            SnapMode::Free
        }
    }

    /// Snap a world position according to modifiers and configuration
    pub fn snap_point(&self, point: Vec2, modifiers: KeyModifiers) -> Vec2 {
        snap_to_nearest(
            point,
            &self.grid,
            self.snap_mode(modifiers),
            self.config.snap_tolerance,
        )
    }

    // ============== Synchronization ==============

    /// Replace the vertex mirror with an externally changed list.
    ///
    /// Any in-progress interaction is abandoned; the selection is kept but
    /// pruned to indices that still exist.
    pub fn sync_vertices(&mut self, vertices: Vec<V>) {
        trace!("{}: sync {} vertices", self.rules.name, vertices.len());
        self.vertices = vertices;
        self.preview = None;
        self.drag = None;
        self.marquee = None;
        self.insert_preview = None;
        self.prune_to_vertices();
        self.refresh_handles();
    }

    /// Adopt a committed vertex list and report it to the host
    fn commit(&mut self, vertices: Vec<V>, host: &mut dyn TransformerHost<V>) {
        self.vertices = vertices;
        self.preview = None;
        self.prune_to_vertices();
        self.refresh_handles();
        host.on_vertices_change(&self.vertices);
    }

    /// Move every handle to its displayed vertex
    fn refresh_handles(&mut self) {
        let vertices = self.preview.as_deref().unwrap_or(&self.vertices);
        self.handles.sync_positions(vertices);
    }

    fn prune_to_vertices(&mut self) {
        let count = self.vertices.len();
        self.selection.prune(count, self.rules.segment_count(count));
        let pruned = self.handles.prune(count);
        if pruned > 0 {
            trace!("{}: pruned {} stale handles", self.rules.name, pruned);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_host {
    use glam::Vec2;

    use crate::actions::{ActionSink, LocalAction};
    use crate::host::{TransformerHost, WallBreak};

    /// Host recording every callback
    #[derive(Debug)]
    pub struct RecordingHost<V> {
        pub changes: Vec<Vec<V>>,
        pub actions: Vec<LocalAction<V>>,
        pub breaks: Vec<WallBreak<V>>,
        pub empty_clicks: Vec<Vec2>,
        pub cleared: usize,
        pub finished: usize,
        pub record_actions: bool,
    }

    impl<V> RecordingHost<V> {
        pub fn new() -> Self {
            Self {
                changes: Vec::new(),
                actions: Vec::new(),
                breaks: Vec::new(),
                empty_clicks: Vec::new(),
                cleared: 0,
                finished: 0,
                record_actions: true,
            }
        }

        pub fn without_actions() -> Self {
            Self {
                record_actions: false,
                ..Self::new()
            }
        }
    }

    impl<V: Clone> TransformerHost<V> for RecordingHost<V> {
        fn on_vertices_change(&mut self, vertices: &[V]) {
            self.changes.push(vertices.to_vec());
        }

        fn on_clear_selections(&mut self) {
            self.cleared += 1;
        }

        fn on_empty_click(&mut self, world: Vec2) {
            self.empty_clicks.push(world);
            self.on_clear_selections();
        }

        fn on_finish(&mut self) {
            self.finished += 1;
        }

        fn on_wall_break(&mut self, split: WallBreak<V>) {
            self.breaks.push(split);
        }

        fn action_sink(&mut self) -> Option<&mut dyn ActionSink<V>> {
            if self.record_actions {
                Some(&mut self.actions)
            } else {
                None
            }
        }
    }
}
