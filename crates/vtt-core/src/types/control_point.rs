//! Vertex abstraction shared by walls and regions

use glam::Vec2;

/// A 2D control point of an editable shape.
///
/// Editing only ever changes the position of a control point; any other data
/// it carries (such as a wall pole's height) is preserved.
pub trait ControlPoint: Clone + std::fmt::Debug {
    /// Position in world coordinates
    fn position(&self) -> Vec2;

    /// Set the position in world coordinates
    fn set_position(&mut self, position: Vec2);

    /// Copy of this point moved to a new position
    fn moved_to(&self, position: Vec2) -> Self {
        let mut moved = self.clone();
        moved.set_position(position);
        moved
    }

    /// Copy of this point translated by a delta
    fn translated(&self, delta: Vec2) -> Self {
        self.moved_to(self.position() + delta)
    }
}

impl ControlPoint for Vec2 {
    fn position(&self) -> Vec2 {
        *self
    }

    fn set_position(&mut self, position: Vec2) {
        *self = position;
    }
}

/// Positions of a slice of control points
pub fn positions<V: ControlPoint>(points: &[V]) -> Vec<Vec2> {
    points.iter().map(ControlPoint::position).collect()
}
