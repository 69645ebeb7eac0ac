//! Transformer host interface

use glam::Vec2;

use crate::actions::ActionSink;

/// Result of breaking an open shape at a vertex.
///
/// Both halves share the break vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct WallBreak<V> {
    pub break_index: usize,
    /// Vertices `0..=break_index`
    pub first: Vec<V>,
    /// Vertices `break_index..`
    pub second: Vec<V>,
}

/// Owner of the edited geometry.
///
/// The transformer never mutates the host's data directly; it reports
/// committed vertex lists and user intents through these callbacks. Only
/// `on_vertices_change` is required.
pub trait TransformerHost<V> {
    /// A new committed vertex list
    fn on_vertices_change(&mut self, vertices: &[V]);

    /// The user asked to drop the shape-level selection
    fn on_clear_selections(&mut self) {}

    /// The user clicked empty canvas at a world position
    fn on_empty_click(&mut self, world: Vec2) {
        let _ = world;
        self.on_clear_selections();
    }

    /// The user asked to finish editing
    fn on_finish(&mut self) {}

    /// An open shape was split in two
    fn on_wall_break(&mut self, split: WallBreak<V>) {
        let _ = split;
    }

    /// Where committed edits are recorded, if anywhere
    fn action_sink(&mut self) -> Option<&mut dyn ActionSink<V>> {
        None
    }
}
