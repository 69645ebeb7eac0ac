//! Selection, marquee, insert, delete and break operations

use glam::Vec2;
use tracing::{debug, trace, warn};
use vtt_core::{ControlPoint, KeyModifiers, project_point_to_segment};

use super::{InsertPreview, Marquee, Transformer};
use crate::actions::LocalAction;
use crate::error::EditorError;
use crate::handles::VertexHandle;
use crate::host::{TransformerHost, WallBreak};

impl<V: ControlPoint, H: VertexHandle> Transformer<V, H> {
    // ============== Selection ==============

    /// Click on a vertex: Ctrl/Cmd toggles it, otherwise it becomes the only
    /// selected vertex. Any line selection is dropped.
    pub fn click_vertex(&mut self, index: usize, modifiers: KeyModifiers) {
        if index >= self.vertices.len() {
            return;
        }
        if modifiers.command() {
            self.selection.toggle(index);
        } else {
            self.selection.select_only(index);
        }
    }

    /// Click on a line.
    ///
    /// With Shift held on a shape that allows it, this inserts a vertex at
    /// the pointer; otherwise it selects the line.
    pub fn click_line(
        &mut self,
        line: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
        host: &mut dyn TransformerHost<V>,
    ) -> Result<(), EditorError> {
        if (modifiers.shift || self.shift_held) && self.rules.allows_insert {
            self.insert_vertex(line, pointer, modifiers, host)?;
        } else {
            self.select_line(line);
        }
        Ok(())
    }

    /// Select a line together with both of its endpoints
    pub fn select_line(&mut self, line: usize) {
        let Some((first, second)) = self.rules.segment_endpoints(line, self.vertices.len()) else {
            return;
        };
        self.selection.select_line(line, first, second);
    }

    /// Click on empty canvas.
    ///
    /// The host decides what that means (clear, or switch to another shape).
    pub fn click_empty(&mut self, world: Vec2, host: &mut dyn TransformerHost<V>) {
        self.marquee = None;
        self.insert_preview = None;
        host.on_empty_click(world);
    }

    // ============== Marquee ==============

    pub fn begin_marquee(&mut self, world: Vec2) {
        self.insert_preview = None;
        self.marquee = Some(Marquee {
            start: world,
            end: world,
        });
    }

    pub fn update_marquee(&mut self, world: Vec2) {
        if let Some(marquee) = self.marquee.as_mut() {
            marquee.end = world;
        }
    }

    /// Finish the marquee, replacing the selection with every displayed
    /// vertex inside the rectangle (edges inclusive).
    ///
    /// Returns the number of selected vertices, or `None` if no marquee was
    /// active.
    pub fn end_marquee(&mut self) -> Option<usize> {
        let rect = self.marquee_rect()?;
        self.marquee = None;

        let inside: Vec<usize> = self
            .display_vertices()
            .iter()
            .enumerate()
            .filter(|(_, v)| rect.contains(v.position()))
            .map(|(i, _)| i)
            .collect();
        let count = inside.len();
        self.selection.replace(inside);
        trace!("{}: marquee selected {} vertices", self.rules.name, count);
        Some(count)
    }

    // ============== Delete ==============

    /// Delete every selected vertex, if the shape keeps its minimum size.
    ///
    /// Each removed vertex is recorded as its own action, highest index
    /// first. Returns whether anything was deleted.
    pub fn delete_selected(&mut self, host: &mut dyn TransformerHost<V>) -> bool {
        let count = self.vertices.len();
        let remove = self.selection.len();
        if remove == 0 {
            return false;
        }
        if !self.rules.can_remove(count, remove) {
            debug!(
                "{}: cannot delete {} of {} vertices, minimum is {}",
                self.rules.name, remove, count, self.rules.min_vertices
            );
            return false;
        }

        if let Some(sink) = host.action_sink() {
            let actions = self
                .selection
                .vertices()
                .iter()
                .rev()
                .map(|&index| LocalAction::DeleteVertex {
                    index,
                    vertex: self.vertices[index].clone(),
                    min_vertices: self.rules.min_vertices,
                })
                .collect();
            sink.record_batch(actions);
        }

        let remaining: Vec<V> = self
            .vertices
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.selection.contains(*i))
            .map(|(_, v)| v.clone())
            .collect();

        for &index in self.selection.vertices().iter().rev() {
            self.handles.close_gap(index);
        }

        debug!("{}: deleted {} vertices", self.rules.name, remove);
        self.selection.clear();
        self.insert_preview = None;
        self.commit(remaining, host);
        true
    }

    // ============== Insert ==============

    /// Shift-hover over a line: show where a vertex would be inserted.
    ///
    /// Returns the preview position, or `None` when insertion is not armed.
    pub fn hover_line(
        &mut self,
        line: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
    ) -> Option<Vec2> {
        let armed = (self.shift_held || modifiers.shift)
            && self.rules.allows_insert
            && self.drag.is_none()
            && self.marquee.is_none();
        if !armed {
            self.insert_preview = None;
            return None;
        }

        match self.insert_position(line, pointer, modifiers) {
            Ok(position) => {
                self.insert_preview = Some(InsertPreview {
                    line_index: line,
                    position,
                });
                Some(position)
            }
            Err(e) => {
                warn!("Insert preview failed: {}", e);
                self.insert_preview = None;
                None
            }
        }
    }

    /// The pointer left a line
    pub fn leave_line(&mut self, line: usize) {
        if self.insert_preview.is_some_and(|p| p.line_index == line) {
            self.insert_preview = None;
        }
    }

    /// Insert a vertex on a line at the pointer's projection.
    ///
    /// The new vertex becomes the only selected vertex. Returns `Ok(false)`
    /// if this shape does not allow insertion.
    pub fn insert_vertex(
        &mut self,
        line: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
        host: &mut dyn TransformerHost<V>,
    ) -> Result<bool, EditorError> {
        if !self.rules.allows_insert {
            return Ok(false);
        }
        let position = self.insert_position(line, pointer, modifiers)?;
        let (first, _) = self.line_endpoints(line)?;

        let index = line + 1;
        let vertex = self.vertices[first].moved_to(position);
        let mut vertices = self.vertices.clone();
        vertices.insert(index, vertex.clone());

        if let Some(sink) = host.action_sink() {
            sink.record(LocalAction::InsertVertex { index, vertex });
        }

        debug!(
            "{}: inserted vertex {} at ({}, {})",
            self.rules.name, index, position.x, position.y
        );
        self.insert_preview = None;
        self.handles.open_gap(index);
        self.commit(vertices, host);
        self.selection.select_only(index);
        Ok(true)
    }

    /// Snapped projection of the pointer onto a line
    fn insert_position(
        &self,
        line: usize,
        pointer: Vec2,
        modifiers: KeyModifiers,
    ) -> Result<Vec2, EditorError> {
        let (first, second) = self.line_endpoints(line)?;
        let vertices = self.display_vertices();
        let projected = project_point_to_segment(
            pointer,
            vertices[first].position(),
            vertices[second].position(),
        )?;
        Ok(self.snap_point(projected, modifiers))
    }

    fn line_endpoints(&self, line: usize) -> Result<(usize, usize), EditorError> {
        self.rules
            .segment_endpoints(line, self.vertices.len())
            .ok_or(EditorError::NoSuchLine {
                line,
                vertices: self.vertices.len(),
            })
    }

    // ============== Break ==============

    /// Split an open shape at the smallest selected vertex, or after the
    /// selected line when no vertex is selected.
    ///
    /// Breaking at the last vertex removes it. Otherwise the host receives
    /// both halves through [`TransformerHost::on_wall_break`] and is expected
    /// to resync this transformer. Returns whether anything changed.
    pub fn break_at_selection(&mut self, host: &mut dyn TransformerHost<V>) -> bool {
        if !self.rules.allows_break || self.rules.closed {
            return false;
        }
        let break_index = match (self.selection.first(), self.selection.line()) {
            (Some(index), _) => index,
            (None, Some(line)) => line + 1,
            (None, None) => return false,
        };

        let count = self.vertices.len();
        let min = self.rules.min_vertices;
        if break_index >= count {
            return false;
        }

        if break_index == count - 1 {
            if count - 1 < min {
                debug!("{}: cannot drop the last of {} vertices", self.rules.name, count);
                return false;
            }
            let mut vertices = self.vertices.clone();
            let removed = vertices.pop();
            if let (Some(sink), Some(vertex)) = (host.action_sink(), removed) {
                sink.record(LocalAction::DeleteVertex {
                    index: break_index,
                    vertex,
                    min_vertices: min,
                });
            }
            debug!("{}: removed end vertex {}", self.rules.name, break_index);
            self.selection.clear();
            self.commit(vertices, host);
            return true;
        }

        let first = self.vertices[..=break_index].to_vec();
        let second = self.vertices[break_index..].to_vec();
        if first.len() < min || second.len() < min {
            debug!(
                "{}: break at {} would leave a piece below {} vertices",
                self.rules.name, break_index, min
            );
            return false;
        }

        debug!("{}: break at vertex {}", self.rules.name, break_index);
        self.selection.clear();
        self.insert_preview = None;
        host.on_wall_break(WallBreak {
            break_index,
            first,
            second,
        });
        true
    }
}
