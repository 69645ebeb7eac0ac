//! Vertex and line dragging

use glam::Vec2;
use tracing::{debug, trace};
use vtt_core::{ControlPoint, KeyModifiers};

use super::{DragSession, Transformer};
use crate::actions::{LocalAction, VertexMove};
use crate::handles::VertexHandle;
use crate::host::TransformerHost;

/// Outcome of moving a dragged vertex to a pointer position
struct VertexDragPlan<V> {
    vertices: Vec<V>,
    target: Vec2,
    delta: Vec2,
    /// Whether the whole selection moves with the vertex
    multi: bool,
}

/// Outcome of moving a dragged line to a pointer position
struct LineDragPlan<V> {
    vertices: Vec<V>,
    delta: Vec2,
    new_first: Vec2,
    new_second: Vec2,
}

impl<V: ControlPoint, H: VertexHandle> Transformer<V, H> {
    // ============== Vertex drag ==============

    /// Start dragging a vertex.
    ///
    /// A vertex outside the current selection becomes the only selected
    /// vertex. Returns `false` if the index does not exist.
    pub fn begin_vertex_drag(&mut self, index: usize) -> bool {
        let Some(anchor) = self.vertices.get(index).map(ControlPoint::position) else {
            return false;
        };

        if !self.selection.contains(index) {
            self.selection.select_only(index);
        }
        self.insert_preview = None;
        self.marquee = None;
        self.drag = Some(DragSession::Vertex { index, anchor });
        trace!("{}: begin drag of vertex {}", self.rules.name, index);
        true
    }

    /// Move the dragged vertex (and the rest of a multi-selection) to follow
    /// the pointer, updating the live preview only
    pub fn update_vertex_drag(&mut self, index: usize, pointer: Vec2, modifiers: KeyModifiers) {
        let Some(DragSession::Vertex { index: dragged, anchor }) = self.drag else {
            return;
        };
        if dragged != index {
            trace!("Ignoring drag update for vertex {} while dragging {}", index, dragged);
            return;
        }

        let plan = self.plan_vertex_drag(dragged, anchor, pointer, modifiers);
        self.preview = Some(plan.vertices);
        self.refresh_handles();
    }

    /// Finish a vertex drag and commit the result.
    ///
    /// A drag that ends where it started commits nothing. Returns whether
    /// an edit was committed.
    pub fn end_vertex_drag(
        &mut self,
        index: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
        host: &mut dyn TransformerHost<V>,
    ) -> bool {
        let Some(DragSession::Vertex { index: dragged, anchor }) = self.drag else {
            return false;
        };
        if dragged != index {
            return false;
        }
        self.drag = None;
        self.preview = None;

        let plan = self.plan_vertex_drag(dragged, anchor, pointer, modifiers);
        if plan.delta == Vec2::ZERO {
            self.refresh_handles();
            trace!("{}: vertex {} released in place", self.rules.name, dragged);
            return false;
        }

        if let Some(sink) = host.action_sink() {
            let action = if plan.multi {
                let moves = self
                    .selection
                    .vertices()
                    .iter()
                    .filter_map(|&i| {
                        let old = self.vertices.get(i)?.position();
                        Some(VertexMove {
                            index: i,
                            old,
                            new: old + plan.delta,
                        })
                    })
                    .collect();
                LocalAction::MultiMoveVertex { moves }
            } else {
                LocalAction::MoveVertex {
                    index: dragged,
                    old: anchor,
                    new: plan.target,
                }
            };
            sink.record(action);
        }

        debug!(
            "{}: moved {} by ({}, {})",
            self.rules.name,
            if plan.multi { "selection" } else { "vertex" },
            plan.delta.x,
            plan.delta.y
        );
        self.commit(plan.vertices, host);
        true
    }

    fn plan_vertex_drag(
        &self,
        index: usize,
        anchor: Vec2,
        pointer: Vec2,
        modifiers: KeyModifiers,
    ) -> VertexDragPlan<V> {
        let target = self.snap_point(pointer, modifiers);
        let delta = target - anchor;
        let multi = self.selection.len() > 1 && self.selection.contains(index);

        let mut vertices = self.vertices.clone();
        if multi {
            for &i in self.selection.vertices() {
                if let Some(vertex) = vertices.get_mut(i) {
                    *vertex = vertex.translated(delta);
                }
            }
        } else if let Some(vertex) = vertices.get_mut(index) {
            vertex.set_position(target);
        }

        VertexDragPlan {
            vertices,
            target,
            delta,
            multi,
        }
    }

    // ============== Line drag ==============

    /// Start dragging a line.
    ///
    /// Only the currently selected line can be dragged. The grab point is
    /// snapped so the line moves in grid steps.
    pub fn begin_line_drag(
        &mut self,
        line: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
    ) -> bool {
        if self.selection.line() != Some(line) {
            return false;
        }
        let Some((first_index, second_index)) =
            self.rules.segment_endpoints(line, self.vertices.len())
        else {
            return false;
        };

        self.insert_preview = None;
        self.marquee = None;
        self.drag = Some(DragSession::Line {
            index: line,
            first_index,
            second_index,
            anchor: self.snap_point(pointer, modifiers),
            first: self.vertices[first_index].position(),
            second: self.vertices[second_index].position(),
        });
        trace!("{}: begin drag of line {}", self.rules.name, line);
        true
    }

    /// Translate the dragged line to follow the pointer, preview only
    pub fn update_line_drag(&mut self, pointer: Vec2, modifiers: KeyModifiers) {
        let Some(session) = self.drag else {
            return;
        };
        if let Some(plan) = self.plan_line_drag(session, pointer, modifiers) {
            self.preview = Some(plan.vertices);
            self.refresh_handles();
        }
    }

    /// Finish a line drag and commit the result
    pub fn end_line_drag(
        &mut self,
        pointer: Vec2,
        modifiers: KeyModifiers,
        host: &mut dyn TransformerHost<V>,
    ) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        let Some(plan) = self.plan_line_drag(session, pointer, modifiers) else {
            return false;
        };
        self.drag = None;
        self.preview = None;

        if plan.delta == Vec2::ZERO {
            self.refresh_handles();
            trace!("{}: line released in place", self.rules.name);
            return false;
        }

        let DragSession::Line {
            index,
            first_index,
            second_index,
            first,
            second,
            ..
        } = session
        else {
            return false;
        };

        if let Some(sink) = host.action_sink() {
            sink.record(LocalAction::MoveLine {
                line_index: index,
                first_index,
                second_index,
                old_first: first,
                old_second: second,
                new_first: plan.new_first,
                new_second: plan.new_second,
            });
        }

        debug!(
            "{}: moved line {} by ({}, {})",
            self.rules.name, index, plan.delta.x, plan.delta.y
        );
        self.commit(plan.vertices, host);
        true
    }

    fn plan_line_drag(
        &self,
        session: DragSession,
        pointer: Vec2,
        modifiers: KeyModifiers,
    ) -> Option<LineDragPlan<V>> {
        let DragSession::Line {
            first_index,
            second_index,
            anchor,
            first,
            second,
            ..
        } = session
        else {
            return None;
        };

        let delta = self.snap_point(pointer, modifiers) - anchor;
        let new_first = first + delta;
        let new_second = second + delta;

        let mut vertices = self.vertices.clone();
        vertices.get_mut(first_index)?.set_position(new_first);
        vertices.get_mut(second_index)?.set_position(new_second);

        Some(LineDragPlan {
            vertices,
            delta,
            new_first,
            new_second,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transformer::test_host::RecordingHost;
    use crate::transformer::{RegionTransformer, WallTransformer};
    use vtt_core::{GridConfig, Pole};

    fn region() -> RegionTransformer {
        RegionTransformer::region(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ],
            GridConfig::square(50.0),
        )
    }

    #[test]
    fn test_single_vertex_drag_snaps() {
        let mut editor = region();
        let mut host = RecordingHost::new();

        assert!(editor.begin_vertex_drag(2));
        editor.update_vertex_drag(2, Vec2::new(128.0, 122.0), KeyModifiers::NONE);
        assert_eq!(editor.display_vertices()[2], Vec2::new(125.0, 125.0));
        assert_eq!(editor.vertices()[2], Vec2::new(100.0, 100.0));

        assert!(editor.end_vertex_drag(2, Vec2::new(128.0, 122.0), KeyModifiers::NONE, &mut host));
        assert_eq!(host.changes.len(), 1);
        assert_eq!(host.changes[0][2], Vec2::new(125.0, 125.0));
        assert_eq!(
            host.actions,
            vec![LocalAction::MoveVertex {
                index: 2,
                old: Vec2::new(100.0, 100.0),
                new: Vec2::new(125.0, 125.0),
            }]
        );
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_zero_delta_drag_commits_nothing() {
        let mut editor = region();
        let mut host = RecordingHost::new();

        editor.begin_vertex_drag(1);
        assert!(!editor.end_vertex_drag(1, Vec2::new(102.0, 3.0), KeyModifiers::NONE, &mut host));
        assert!(host.changes.is_empty());
        assert!(host.actions.is_empty());
    }

    #[test]
    fn test_multi_vertex_drag_translates_selection() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.click_vertex(0, KeyModifiers::NONE);
        editor.click_vertex(1, KeyModifiers::ctrl());

        editor.begin_vertex_drag(1);
        assert!(editor.end_vertex_drag(1, Vec2::new(150.0, 50.0), KeyModifiers::NONE, &mut host));

        let committed = &host.changes[0];
        assert_eq!(committed[0], Vec2::new(50.0, 50.0));
        assert_eq!(committed[1], Vec2::new(150.0, 50.0));
        assert_eq!(committed[2], Vec2::new(100.0, 100.0));
        assert!(matches!(
            &host.actions[0],
            LocalAction::MultiMoveVertex { moves } if moves.len() == 2
        ));
    }

    #[test]
    fn test_drag_outside_selection_collapses_it() {
        let mut editor = region();
        editor.click_vertex(0, KeyModifiers::NONE);
        editor.click_vertex(1, KeyModifiers::ctrl());

        editor.begin_vertex_drag(3);
        assert_eq!(editor.selection().len(), 1);
        assert!(editor.selection().contains(3));
    }

    #[test]
    fn test_alt_drag_is_free() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.begin_vertex_drag(0);
        editor.end_vertex_drag(0, Vec2::new(7.0, 3.0), KeyModifiers::alt(), &mut host);
        assert_eq!(host.changes[0][0], Vec2::new(7.0, 3.0));
    }

    #[test]
    fn test_line_drag_requires_selected_line() {
        let mut editor = region();
        assert!(!editor.begin_line_drag(0, Vec2::new(50.0, 0.0), KeyModifiers::NONE));

        editor.select_line(0);
        assert!(editor.begin_line_drag(0, Vec2::new(50.0, 0.0), KeyModifiers::NONE));
        assert_eq!(editor.dragging_line(), Some(0));
    }

    #[test]
    fn test_line_drag_moves_both_endpoints() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.select_line(3);
        editor.begin_line_drag(3, Vec2::new(0.0, 50.0), KeyModifiers::NONE);
        editor.update_line_drag(Vec2::new(-24.0, 52.0), KeyModifiers::NONE);
        assert_eq!(editor.display_vertices()[3], Vec2::new(-25.0, 100.0));
        assert_eq!(editor.display_vertices()[0], Vec2::new(-25.0, 0.0));

        assert!(editor.end_line_drag(Vec2::new(-24.0, 52.0), KeyModifiers::NONE, &mut host));
        assert_eq!(host.changes[0][0], Vec2::new(-25.0, 0.0));
        assert_eq!(host.changes[0][1], Vec2::new(100.0, 0.0));
        assert!(matches!(
            host.actions[0],
            LocalAction::MoveLine {
                line_index: 3,
                first_index: 3,
                second_index: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_wall_drag_keeps_height_without_sink() {
        let mut editor: WallTransformer = WallTransformer::wall(
            vec![Pole::new(0.0, 0.0).with_height(4.0), Pole::new(100.0, 0.0)],
            GridConfig::square(50.0),
        );
        let mut host = RecordingHost::without_actions();
        editor.begin_vertex_drag(0);
        editor.end_vertex_drag(0, Vec2::new(24.0, 26.0), KeyModifiers::NONE, &mut host);
        assert_eq!(host.changes[0][0].position, Vec2::new(25.0, 25.0));
        assert_eq!(host.changes[0][0].h, 4.0);
        assert!(host.actions.is_empty());
    }
}
