//! Scene and transformer painting for the canvas

use egui::{Color32, Pos2, Shape, Stroke};
use glam::Vec2;
use vtt_core::{ControlPoint, GridConfig, Region, RegionKind, Viewport, Wall};
use vtt_editor::Transformer;

/// Colors for canvas rendering
pub mod colors {
    use egui::Color32;

    pub const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 34);
    pub const GRID: Color32 = Color32::from_rgb(52, 52, 58);
    pub const WALL: Color32 = Color32::from_rgb(220, 220, 220); // White
    pub const POLE: Color32 = Color32::from_rgb(160, 160, 160);
    pub const VERTEX: Color32 = Color32::from_rgb(0, 200, 0); // Green
    pub const SELECTED: Color32 = Color32::from_rgb(255, 128, 0); // Orange
    pub const EDIT_LINE: Color32 = Color32::from_rgb(0, 180, 255); // Cyan
    pub const PREVIEW: Color32 = Color32::from_rgba_premultiplied(100, 100, 200, 180); // Semi-transparent blue
    pub const MARQUEE: Color32 = Color32::from_rgb(255, 255, 0); // Yellow

    // Region outlines by kind
    pub const ELEVATION: Color32 = Color32::from_rgb(200, 160, 60);
    pub const TERRAIN: Color32 = Color32::from_rgb(110, 170, 90);
    pub const FOG: Color32 = Color32::from_rgb(120, 120, 150);
    pub const ILLUMINATION: Color32 = Color32::from_rgb(240, 220, 120);
}

/// Drawn width of scene walls that are not being edited
const WALL_WIDTH: f32 = 2.0;
/// Drawn radius of pole dots on walls that are not being edited
const POLE_RADIUS: f32 = 3.0;

/// Maps world coordinates into the canvas rect
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform {
    pub origin: Pos2,
    pub viewport: Viewport,
}

impl CanvasTransform {
    pub fn to_screen(&self, world: Vec2) -> Pos2 {
        let screen = self.viewport.world_to_screen(world);
        Pos2::new(self.origin.x + screen.x, self.origin.y + screen.y)
    }
}

fn region_color(kind: RegionKind) -> Color32 {
    match kind {
        RegionKind::Elevation => colors::ELEVATION,
        RegionKind::Terrain => colors::TERRAIN,
        RegionKind::FogOfWar => colors::FOG,
        RegionKind::Illumination => colors::ILLUMINATION,
    }
}

pub fn paint_grid(
    painter: &egui::Painter,
    rect: egui::Rect,
    transform: &CanvasTransform,
    grid: &GridConfig,
) {
    if grid.is_degenerate() {
        return;
    }
    let step = grid.cell_size * transform.viewport.scale;
    // Too dense to be useful
    if step.x < 6.0 || step.y < 6.0 {
        return;
    }

    let stroke = Stroke::new(1.0, colors::GRID);
    let top_left = transform.viewport.screen_to_world(Vec2::ZERO);
    let (start_x, start_y) = grid.cell_at(top_left);
    let first = transform.to_screen(grid.cell_origin(start_x, start_y));

    let mut x = first.x;
    while x <= rect.max.x {
        if x >= rect.min.x {
            painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
        }
        x += step.x;
    }
    let mut y = first.y;
    while y <= rect.max.y {
        if y >= rect.min.y {
            painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
        }
        y += step.y;
    }
}

pub fn paint_wall(painter: &egui::Painter, transform: &CanvasTransform, wall: &Wall) {
    let points: Vec<Pos2> = wall
        .poles
        .iter()
        .map(|pole| transform.to_screen(pole.position))
        .collect();
    painter.add(Shape::line(points.clone(), Stroke::new(WALL_WIDTH, colors::WALL)));
    for point in points {
        painter.circle_filled(point, POLE_RADIUS, colors::POLE);
    }
}

pub fn paint_region(painter: &egui::Painter, transform: &CanvasTransform, region: &Region) {
    let points: Vec<Pos2> = region
        .vertices
        .iter()
        .map(|&v| transform.to_screen(v))
        .collect();
    painter.add(Shape::closed_line(
        points,
        Stroke::new(WALL_WIDTH, region_color(region.kind)),
    ));
}

/// Paint the shape under edit: lines, vertices, insert preview and marquee
pub fn paint_transformer<V: ControlPoint>(
    painter: &egui::Painter,
    transform: &CanvasTransform,
    editor: &Transformer<V>,
) {
    let hit = editor.config().hit;
    let selection = editor.selection();
    let vertices = editor.display_vertices();

    for (index, start, end) in editor.segments() {
        let color = if selection.line() == Some(index) {
            colors::SELECTED
        } else {
            colors::EDIT_LINE
        };
        painter.line_segment(
            [transform.to_screen(start), transform.to_screen(end)],
            Stroke::new(hit.line_width, color),
        );
    }

    for (index, vertex) in vertices.iter().enumerate() {
        let color = if selection.contains(index) {
            colors::SELECTED
        } else {
            colors::VERTEX
        };
        painter.circle_filled(transform.to_screen(vertex.position()), hit.vertex_radius, color);
    }

    if let Some(vertex) = editor.dragging_vertex().and_then(|index| vertices.get(index)) {
        painter.circle_stroke(
            transform.to_screen(vertex.position()),
            hit.vertex_radius * 1.6,
            Stroke::new(1.5, colors::SELECTED),
        );
    }

    if let Some(preview) = editor.insert_preview() {
        let center = transform.to_screen(preview.position);
        let radius = hit.vertex_radius * 2.0;
        let outline: Vec<Pos2> = (0..=24)
            .map(|i| {
                let angle = i as f32 / 24.0 * std::f32::consts::TAU;
                center + egui::vec2(angle.cos(), angle.sin()) * radius
            })
            .collect();
        painter.extend(Shape::dashed_line(
            &outline,
            Stroke::new(1.5, colors::PREVIEW),
            3.0,
            3.0,
        ));
        painter.circle_filled(center, hit.vertex_radius * 0.6, colors::PREVIEW);
    }

    if let Some(rect) = editor.marquee_rect() {
        let screen = egui::Rect::from_two_pos(
            transform.to_screen(rect.min()),
            transform.to_screen(rect.max()),
        );
        painter.rect_filled(screen, 0.0, colors::MARQUEE.gamma_multiply(0.08));
        painter.rect_stroke(screen, 0.0, Stroke::new(1.0, colors::MARQUEE));
    }
}
