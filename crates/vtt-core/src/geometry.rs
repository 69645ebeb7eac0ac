//! 2D geometry helpers for scene editing

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Segments shorter than this (squared) are treated as a single point
pub const DEGENERATE_SEGMENT_EPSILON: f32 = 1e-10;

/// Geometry-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{label} must have finite coordinates, got ({x}, {y})")]
    NonFinite { label: &'static str, x: f32, y: f32 },
}

/// Reject points with NaN or infinite coordinates
pub fn ensure_finite(point: Vec2, label: &'static str) -> Result<Vec2, GeometryError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(GeometryError::NonFinite {
            label,
            x: point.x,
            y: point.y,
        })
    }
}

/// Project a point onto a line segment.
///
/// The interpolation parameter is clamped to `[0, 1]`, so the result always
/// lies on the segment. A zero-length segment projects everything onto its
/// start point.
pub fn project_point_to_segment(
    point: Vec2,
    segment_start: Vec2,
    segment_end: Vec2,
) -> Result<Vec2, GeometryError> {
    let point = ensure_finite(point, "point")?;
    let start = ensure_finite(segment_start, "segment start")?;
    let end = ensure_finite(segment_end, "segment end")?;

    let segment = end - start;
    let len_sq = segment.length_squared();

    if len_sq < DEGENERATE_SEGMENT_EPSILON {
        return Ok(start);
    }

    let t = ((point - start).dot(segment) / len_sq).clamp(0.0, 1.0);
    Ok(start + segment * t)
}

/// Distance from a point to a line segment
pub fn distance_to_segment(point: Vec2, segment_start: Vec2, segment_end: Vec2) -> f32 {
    let segment = segment_end - segment_start;
    let len_sq = segment.length_squared();

    if len_sq < DEGENERATE_SEGMENT_EPSILON {
        return (point - segment_start).length();
    }

    let t = ((point - segment_start).dot(segment) / len_sq).clamp(0.0, 1.0);
    let projection = segment_start + segment * t;
    (point - projection).length()
}

/// Axis-aligned rectangle with non-negative size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Build a normalized rectangle from two opposite corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Even-odd point-in-polygon test (polygon is implicitly closed)
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_project_onto_segment_interior() {
        let p = project_point_to_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0))
            .unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn test_projection_clamps_to_endpoints() {
        let start = Vec2::ZERO;
        let end = Vec2::new(10.0, 0.0);
        assert_eq!(
            project_point_to_segment(Vec2::new(-4.0, 2.0), start, end).unwrap(),
            start
        );
        assert_eq!(
            project_point_to_segment(Vec2::new(25.0, -1.0), start, end).unwrap(),
            end
        );
    }

    #[test]
    fn test_degenerate_segment_returns_start() {
        let start = Vec2::new(3.0, 4.0);
        let p = project_point_to_segment(Vec2::new(100.0, 100.0), start, start).unwrap();
        assert_eq!(p, start);
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let err = project_point_to_segment(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, Vec2::X)
            .unwrap_err();
        assert!(matches!(err, GeometryError::NonFinite { label: "point", .. }));

        let err = project_point_to_segment(Vec2::ZERO, Vec2::ZERO, Vec2::new(f32::INFINITY, 1.0))
            .unwrap_err();
        assert!(err.to_string().contains("segment end"));
    }

    #[test]
    fn test_rect_from_corners_is_normalized_and_inclusive() {
        let rect = Rect::from_corners(Vec2::new(10.0, 10.0), Vec2::new(0.0, 5.0));
        assert_eq!(rect.min(), Vec2::new(0.0, 5.0));
        assert_eq!(rect.max(), Vec2::new(10.0, 10.0));
        assert!(rect.contains(Vec2::new(0.0, 5.0)));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(10.1, 10.0)));
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(15.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(5.0, 5.0), &square[..2]));
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_segment(Vec2::new(5.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_relative_eq!(d, 4.0);
        let d = distance_to_segment(Vec2::new(13.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert_relative_eq!(d, 5.0);
    }
}
