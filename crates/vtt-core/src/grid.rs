//! Scene grid configuration

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Grid layout of a scene, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Size of one grid cell
    pub cell_size: Vec2,
    /// World position of the corner of cell (0, 0)
    pub offset: Vec2,
    /// Whether snapping to this grid is enabled
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: Vec2::splat(50.0),
            offset: Vec2::ZERO,
            snap: true,
        }
    }
}

impl GridConfig {
    /// Square grid with the given cell size
    pub fn square(cell: f32) -> Self {
        Self {
            cell_size: Vec2::splat(cell),
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Cells with non-positive or non-finite size can't be snapped to
    pub fn is_degenerate(&self) -> bool {
        !(self.cell_size.is_finite() && self.cell_size.x > 0.0 && self.cell_size.y > 0.0)
    }

    /// Integer coordinates of the cell containing a world position
    pub fn cell_at(&self, world: Vec2) -> (i32, i32) {
        let local = (world - self.offset) / self.cell_size;
        (local.x.floor() as i32, local.y.floor() as i32)
    }

    /// World position of a cell's top-left corner
    pub fn cell_origin(&self, cell_x: i32, cell_y: i32) -> Vec2 {
        self.offset + Vec2::new(cell_x as f32, cell_y as f32) * self.cell_size
    }
}
