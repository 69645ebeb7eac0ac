//! Per-vertex rendered handles
//!
//! A transformer can keep an arbitrary handle per vertex (for example a
//! retained canvas node) and reposition it directly while dragging.

use std::collections::BTreeMap;

use glam::Vec2;
use vtt_core::ControlPoint;

/// A rendered representation of one vertex
pub trait VertexHandle {
    /// Move the handle to a world position
    fn set_position(&mut self, world: Vec2);
}

/// No handle: immediate-mode renderers redraw from the transformer state
impl VertexHandle for () {
    fn set_position(&mut self, _world: Vec2) {}
}

/// Handles keyed by vertex index
#[derive(Debug, Clone)]
pub struct HandleTable<H> {
    handles: BTreeMap<usize, H>,
}

impl<H> Default for HandleTable<H> {
    fn default() -> Self {
        Self {
            handles: BTreeMap::new(),
        }
    }
}

impl<H> HandleTable<H> {
    pub fn insert(&mut self, index: usize, handle: H) -> Option<H> {
        self.handles.insert(index, handle)
    }

    pub fn remove(&mut self, index: usize) -> Option<H> {
        self.handles.remove(&index)
    }

    pub fn get(&self, index: usize) -> Option<&H> {
        self.handles.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut H> {
        self.handles.get_mut(&index)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &H)> {
        self.handles.iter().map(|(&i, h)| (i, h))
    }

    /// Drop handles for indices at or beyond `vertex_count`.
    ///
    /// Returns the number of handles removed.
    pub fn prune(&mut self, vertex_count: usize) -> usize {
        let stale = self.handles.split_off(&vertex_count);
        stale.len()
    }

    /// Make room for a vertex inserted at `index`: handles at or after it
    /// move up by one. The new index has no handle.
    pub fn open_gap(&mut self, index: usize) {
        let tail = self.handles.split_off(&index);
        self.handles
            .extend(tail.into_iter().map(|(i, handle)| (i + 1, handle)));
    }

    /// Remove the handle of a deleted vertex; later handles move down by one
    pub fn close_gap(&mut self, index: usize) -> Option<H> {
        let mut tail = self.handles.split_off(&index);
        let removed = tail.remove(&index);
        self.handles
            .extend(tail.into_iter().map(|(i, handle)| (i - 1, handle)));
        removed
    }
}

impl<H: VertexHandle> HandleTable<H> {
    /// Reposition every handle from the vertex it stands for
    pub fn sync_positions<V: ControlPoint>(&mut self, vertices: &[V]) {
        for (&index, handle) in self.handles.iter_mut() {
            if let Some(vertex) = vertices.get(index) {
                handle.set_position(vertex.position());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Marker(Vec2);

    impl VertexHandle for Marker {
        fn set_position(&mut self, world: Vec2) {
            self.0 = world;
        }
    }

    #[test]
    fn test_prune_drops_stale_handles() {
        let mut table = HandleTable::default();
        for i in 0..5 {
            table.insert(i, Marker::default());
        }
        assert_eq!(table.prune(3), 2);
        assert_eq!(table.len(), 3);
        assert!(table.get(3).is_none());
        assert!(table.get(2).is_some());
    }

    #[test]
    fn test_gaps_shift_indices() {
        let mut table = HandleTable::default();
        for i in 0..4 {
            table.insert(i, Marker(Vec2::splat(i as f32)));
        }

        table.open_gap(1);
        let keys: Vec<usize> = table.iter().map(|(i, _)| i).collect();
        assert_eq!(keys, vec![0, 2, 3, 4]);
        assert_eq!(table.get(2).map(|m| m.0), Some(Vec2::splat(1.0)));

        let removed = table.close_gap(2);
        assert_eq!(removed.map(|m| m.0), Some(Vec2::splat(1.0)));
        let keys: Vec<usize> = table.iter().map(|(i, _)| i).collect();
        assert_eq!(keys, vec![0, 2, 3]);
        assert_eq!(table.get(3).map(|m| m.0), Some(Vec2::splat(3.0)));
    }

    #[test]
    fn test_sync_positions() {
        let mut table = HandleTable::default();
        table.insert(0, Marker::default());
        table.insert(5, Marker::default());
        table.sync_positions(&[Vec2::new(3.0, 4.0), Vec2::ONE]);
        assert_eq!(table.get(0).map(|m| m.0), Some(Vec2::new(3.0, 4.0)));
        assert_eq!(table.get(5).map(|m| m.0), Some(Vec2::ZERO));
    }
}
