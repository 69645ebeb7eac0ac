//! Vertex and line selection

use std::collections::BTreeSet;

/// Selected vertices and at most one selected line.
///
/// A selected line always has both of its endpoint vertices selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    vertices: BTreeSet<usize>,
    line: Option<usize>,
}

impl Selection {
    pub fn vertices(&self) -> &BTreeSet<usize> {
        &self.vertices
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn contains(&self, index: usize) -> bool {
        self.vertices.contains(&index)
    }

    /// Number of selected vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.line.is_none()
    }

    /// Lowest selected vertex index
    pub fn first(&self) -> Option<usize> {
        self.vertices.first().copied()
    }

    /// Select only the given vertex
    pub fn select_only(&mut self, index: usize) {
        self.vertices.clear();
        self.vertices.insert(index);
        self.line = None;
    }

    /// Add or remove a vertex, dropping any line selection
    pub fn toggle(&mut self, index: usize) {
        if !self.vertices.remove(&index) {
            self.vertices.insert(index);
        }
        self.line = None;
    }

    /// Select a line together with its two endpoints
    pub fn select_line(&mut self, line: usize, first: usize, second: usize) {
        self.vertices.clear();
        self.vertices.insert(first);
        self.vertices.insert(second);
        self.line = Some(line);
    }

    /// Replace the vertex selection, dropping any line selection
    pub fn replace(&mut self, vertices: impl IntoIterator<Item = usize>) {
        self.vertices = vertices.into_iter().collect();
        self.line = None;
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.line = None;
    }

    /// Drop indices that no longer exist.
    ///
    /// Returns `true` if anything was removed.
    pub fn prune(&mut self, vertex_count: usize, segment_count: usize) -> bool {
        let before = self.vertices.len();
        self.vertices.retain(|&i| i < vertex_count);
        let mut changed = self.vertices.len() != before;
        if self.line.is_some_and(|line| line >= segment_count) {
            self.line = None;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_clears_line() {
        let mut selection = Selection::default();
        selection.select_line(1, 1, 2);
        selection.toggle(2);
        assert_eq!(selection.line(), None);
        assert!(selection.contains(1));
        assert!(!selection.contains(2));
    }

    #[test]
    fn test_prune() {
        let mut selection = Selection::default();
        selection.select_line(3, 3, 0);
        assert!(selection.prune(3, 3));
        assert_eq!(selection.line(), None);
        assert_eq!(selection.vertices().iter().copied().collect::<Vec<_>>(), vec![0]);
        assert!(!selection.prune(3, 3));
    }

    #[test]
    fn test_is_empty() {
        let mut selection = Selection::default();
        assert!(selection.is_empty());
        selection.replace([4, 2]);
        assert_eq!(selection.first(), Some(2));
        selection.clear();
        assert!(selection.is_empty());
    }
}
