//! Pointer hit-testing against vertices and lines
//!
//! Sizes are given in screen pixels and converted with the current zoom, so
//! handles keep the same on-screen size at every scale. Line hit areas are
//! much wider than the drawn stroke to make thin lines easy to grab.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use vtt_core::{ControlPoint, distance_to_segment};

use crate::shape::ShapeRules;

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Vertex(usize),
    Line(usize),
    Empty,
}

/// Visible and hit sizes in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitTestOptions {
    /// Drawn radius of a vertex dot
    pub vertex_radius: f32,
    /// Pick radius of a vertex
    pub vertex_hit_radius: f32,
    /// Drawn width of a line
    pub line_width: f32,
    /// Multiplier from drawn line width to pick width
    pub line_hit_factor: f32,
}

impl Default for HitTestOptions {
    fn default() -> Self {
        Self {
            vertex_radius: 5.0,
            vertex_hit_radius: 25.0,
            line_width: 3.0,
            line_hit_factor: 20.0,
        }
    }
}

impl HitTestOptions {
    /// Full width of the line pick area
    pub fn line_hit_width(&self) -> f32 {
        self.line_width * self.line_hit_factor
    }
}

/// Find the vertex or line under a world-space point.
///
/// Vertices take priority over lines; among several candidates the closest
/// one wins. `scale` is screen pixels per world unit.
pub fn hit_test<V: ControlPoint>(
    vertices: &[V],
    rules: &ShapeRules,
    point: Vec2,
    options: &HitTestOptions,
    scale: f32,
) -> HitTarget {
    if !point.is_finite() || scale <= 0.0 {
        return HitTarget::Empty;
    }

    let vertex_radius = options.vertex_hit_radius / scale;
    let nearest_vertex = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.position().distance(point)))
        .filter(|(_, d)| *d <= vertex_radius)
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((index, _)) = nearest_vertex {
        return HitTarget::Vertex(index);
    }

    let line_radius = options.line_hit_width() / 2.0 / scale;
    let nearest_line = (0..rules.segment_count(vertices.len()))
        .filter_map(|line| {
            let (a, b) = rules.segment_endpoints(line, vertices.len())?;
            let d = distance_to_segment(point, vertices[a].position(), vertices[b].position());
            (d <= line_radius).then_some((line, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest_line {
        Some((line, _)) => HitTarget::Line(line),
        None => HitTarget::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(200.0, 0.0),
            Vec2::new(200.0, 200.0),
            Vec2::new(0.0, 200.0),
        ]
    }

    #[test]
    fn test_vertex_has_priority() {
        let options = HitTestOptions::default();
        let hit = hit_test(&square(), &ShapeRules::REGION, Vec2::new(10.0, 2.0), &options, 1.0);
        assert_eq!(hit, HitTarget::Vertex(0));
    }

    #[test]
    fn test_line_hit_area_is_widened() {
        let options = HitTestOptions::default();
        // 28px off the top edge, within the 30px half-width
        let hit = hit_test(&square(), &ShapeRules::REGION, Vec2::new(100.0, 28.0), &options, 1.0);
        assert_eq!(hit, HitTarget::Line(0));
        let miss = hit_test(&square(), &ShapeRules::REGION, Vec2::new(100.0, 100.0), &options, 1.0);
        assert_eq!(miss, HitTarget::Empty);
    }

    #[test]
    fn test_closing_segment_only_for_closed_shapes() {
        let options = HitTestOptions::default();
        let point = Vec2::new(0.0, 100.0);
        assert_eq!(
            hit_test(&square(), &ShapeRules::REGION, point, &options, 1.0),
            HitTarget::Line(3)
        );
        assert_eq!(
            hit_test(&square(), &ShapeRules::WALL, point, &options, 1.0),
            HitTarget::Empty
        );
    }

    #[test]
    fn test_hit_radius_scales_with_zoom() {
        let options = HitTestOptions::default();
        // 20 world units is 80px at 4x zoom
        let hit = hit_test(&square(), &ShapeRules::WALL, Vec2::new(20.0, 0.0), &options, 4.0);
        assert_eq!(hit, HitTarget::Line(0));
    }
}
