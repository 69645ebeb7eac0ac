//! Shape rules distinguishing walls from regions

use vtt_core::{Region, Wall};

/// Topology and editing capabilities of an editable shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRules {
    pub name: &'static str,
    /// Fewest vertices the shape may be left with
    pub min_vertices: usize,
    /// Whether the last vertex connects back to the first
    pub closed: bool,
    pub allows_insert: bool,
    /// Whether the shape can be split in two at a vertex
    pub allows_break: bool,
}

impl ShapeRules {
    /// Open polyline of poles
    pub const WALL: ShapeRules = ShapeRules {
        name: "Wall",
        min_vertices: Wall::MIN_POLES,
        closed: false,
        allows_insert: true,
        allows_break: true,
    };

    /// Closed polygon
    pub const REGION: ShapeRules = ShapeRules {
        name: "Region",
        min_vertices: Region::MIN_VERTICES,
        closed: true,
        allows_insert: true,
        allows_break: false,
    };

    /// Number of segments for `vertex_count` vertices
    pub fn segment_count(&self, vertex_count: usize) -> usize {
        if self.closed && vertex_count >= 3 {
            vertex_count
        } else {
            vertex_count.saturating_sub(1)
        }
    }

    /// Vertex indices joined by segment `line`
    pub fn segment_endpoints(&self, line: usize, vertex_count: usize) -> Option<(usize, usize)> {
        (line < self.segment_count(vertex_count)).then(|| (line, (line + 1) % vertex_count))
    }

    /// Whether `remove` vertices can be deleted from a shape of `vertex_count`
    pub fn can_remove(&self, vertex_count: usize, remove: usize) -> bool {
        vertex_count >= remove && vertex_count - remove >= self.min_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_segments_wrap() {
        let rules = ShapeRules::REGION;
        assert_eq!(rules.segment_count(4), 4);
        assert_eq!(rules.segment_endpoints(3, 4), Some((3, 0)));
        assert_eq!(rules.segment_endpoints(4, 4), None);
    }

    #[test]
    fn test_wall_segments_do_not_wrap() {
        let rules = ShapeRules::WALL;
        assert_eq!(rules.segment_count(3), 2);
        assert_eq!(rules.segment_endpoints(1, 3), Some((1, 2)));
        assert_eq!(rules.segment_endpoints(2, 3), None);
        assert_eq!(rules.segment_count(0), 0);
    }

    #[test]
    fn test_can_remove() {
        assert!(ShapeRules::REGION.can_remove(4, 1));
        assert!(!ShapeRules::REGION.can_remove(4, 2));
        assert!(!ShapeRules::REGION.can_remove(3, 1));
        assert!(ShapeRules::WALL.can_remove(4, 2));
        assert!(!ShapeRules::WALL.can_remove(2, 3));
    }
}
