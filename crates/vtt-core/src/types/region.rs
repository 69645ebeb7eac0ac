//! Region definitions

use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::point_in_polygon;

/// What a region does to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RegionKind {
    #[default]
    Elevation,
    Terrain,
    Illumination,
    FogOfWar,
}

impl RegionKind {
    pub fn name(&self) -> &'static str {
        match self {
            RegionKind::Elevation => "Elevation",
            RegionKind::Terrain => "Terrain",
            RegionKind::Illumination => "Illumination",
            RegionKind::FogOfWar => "Fog of War",
        }
    }

    pub fn all() -> [RegionKind; 4] {
        [
            RegionKind::Elevation,
            RegionKind::Terrain,
            RegionKind::Illumination,
            RegionKind::FogOfWar,
        ]
    }
}

/// A closed polygon area of a scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub kind: RegionKind,
    pub vertices: Vec<Vec2>,
}

impl Region {
    /// Minimum number of vertices a region keeps
    pub const MIN_VERTICES: usize = 3;

    pub fn new(name: impl Into<String>, kind: RegionKind, vertices: Vec<Vec2>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            vertices,
        }
    }

    /// Axis-aligned rectangle region
    pub fn rectangle(name: impl Into<String>, kind: RegionKind, min: Vec2, max: Vec2) -> Self {
        Self::new(
            name,
            kind,
            vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// Whether clicking inside this region can switch editing to it
    pub fn is_switch_target(&self) -> bool {
        self.kind != RegionKind::FogOfWar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_region() {
        let region = Region::rectangle(
            "Pit",
            RegionKind::Terrain,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
        );
        assert_eq!(region.vertices.len(), 4);
        assert!(region.contains(Vec2::new(2.0, 8.0)));
        assert!(!region.contains(Vec2::new(12.0, 8.0)));
    }

    #[test]
    fn test_fog_is_not_a_switch_target() {
        let fog = Region::new("Fog", RegionKind::FogOfWar, Vec::new());
        assert!(!fog.is_switch_target());
    }
}
