//! Screen/world transform of the scene canvas

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Smallest and largest allowed zoom factors
pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 20.0;

/// Uniform-scale pan/zoom transform.
///
/// `screen = world * scale + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Screen position of the world origin
    pub offset: Vec2,
    /// Screen pixels per world unit
    pub scale: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: Vec2, scale: f32) -> Self {
        Self {
            offset,
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.scale + self.offset
    }

    /// Convert a screen-space length to world units
    pub fn screen_len_to_world(&self, len: f32) -> f32 {
        len / self.scale
    }

    pub fn pan(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta;
    }

    /// Zoom by a factor, keeping the world point under `anchor` fixed on screen
    pub fn zoom_about(&mut self, anchor: Vec2, factor: f32) {
        let world = self.screen_to_world(anchor);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.offset = anchor - world * self.scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_screen_world_roundtrip() {
        let viewport = Viewport::new(Vec2::new(100.0, 50.0), 2.0);
        let world = viewport.screen_to_world(Vec2::new(300.0, 150.0));
        assert_eq!(world, Vec2::new(100.0, 50.0));
        assert_eq!(viewport.world_to_screen(world), Vec2::new(300.0, 150.0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut viewport = Viewport::new(Vec2::new(10.0, 20.0), 1.0);
        let anchor = Vec2::new(200.0, 120.0);
        let before = viewport.screen_to_world(anchor);
        viewport.zoom_about(anchor, 1.5);
        let after = viewport.screen_to_world(anchor);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-4);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-4);
        assert_relative_eq!(viewport.scale, 1.5);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_about(Vec2::ZERO, 1000.0);
        assert_eq!(viewport.scale, MAX_SCALE);
    }
}
