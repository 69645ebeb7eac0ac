//! Reversible local edit actions
//!
//! Every committed edit of a transformer can be described by one
//! [`LocalAction`]. Actions carry enough information (indices, old and new
//! positions, removed vertices) to be undone and redone against the vertex
//! list they were recorded for.

use glam::Vec2;
use thiserror::Error;
use vtt_core::ControlPoint;

/// Errors applying an action to a vertex list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Removing a vertex would leave {remaining}, minimum is {minimum}")]
    BelowMinimum { remaining: usize, minimum: usize },
}

/// Old and new position of one vertex in a batch move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMove {
    pub index: usize,
    pub old: Vec2,
    pub new: Vec2,
}

/// A structured, reversible description of one edit
#[derive(Debug, Clone, PartialEq)]
pub enum LocalAction<V> {
    /// One vertex dragged to a new position
    MoveVertex { index: usize, old: Vec2, new: Vec2 },

    /// A multi-vertex selection translated together
    MultiMoveVertex { moves: Vec<VertexMove> },

    /// A vertex inserted on a segment
    InsertVertex { index: usize, vertex: V },

    /// A vertex removed
    DeleteVertex {
        index: usize,
        vertex: V,
        /// Minimum vertex count of the shape, checked on redo
        min_vertices: usize,
    },

    /// Both endpoints of a segment translated together
    MoveLine {
        line_index: usize,
        first_index: usize,
        second_index: usize,
        old_first: Vec2,
        old_second: Vec2,
        new_first: Vec2,
        new_second: Vec2,
    },
}

/// Capability to record committed edits.
///
/// Implemented by undo/redo systems that observe a transformer without the
/// transformer depending on them.
pub trait ActionSink<V> {
    fn record(&mut self, action: LocalAction<V>);

    /// Record actions produced by a single gesture, in order
    fn record_batch(&mut self, actions: Vec<LocalAction<V>>) {
        for action in actions {
            self.record(action);
        }
    }
}

impl<V> ActionSink<V> for Vec<LocalAction<V>> {
    fn record(&mut self, action: LocalAction<V>) {
        self.push(action);
    }
}

impl<V: ControlPoint> LocalAction<V> {
    /// Short name of the action kind
    pub fn name(&self) -> &'static str {
        match self {
            LocalAction::MoveVertex { .. } => "Move Vertex",
            LocalAction::MultiMoveVertex { .. } => "Move Vertices",
            LocalAction::InsertVertex { .. } => "Insert Vertex",
            LocalAction::DeleteVertex { .. } => "Delete Vertex",
            LocalAction::MoveLine { .. } => "Move Line",
        }
    }

    /// Human-readable description for history display
    pub fn description(&self) -> String {
        match self {
            LocalAction::MoveVertex { index, new, .. } => {
                format!("Move vertex {} to ({}, {})", index, new.x, new.y)
            }
            LocalAction::MultiMoveVertex { moves } => format!("Move {} vertices", moves.len()),
            LocalAction::InsertVertex { index, vertex } => {
                let p = vertex.position();
                format!("Insert vertex {} at ({}, {})", index, p.x, p.y)
            }
            LocalAction::DeleteVertex { index, .. } => format!("Delete vertex {}", index),
            LocalAction::MoveLine { line_index, .. } => format!("Move line {}", line_index),
        }
    }

    /// Revert this action
    pub fn undo(&self, vertices: &mut Vec<V>) -> Result<(), ActionError> {
        match self {
            LocalAction::MoveVertex { index, old, .. } => set_positions(vertices, &[(*index, *old)]),
            LocalAction::MultiMoveVertex { moves } => {
                let targets: Vec<(usize, Vec2)> = moves.iter().map(|m| (m.index, m.old)).collect();
                set_positions(vertices, &targets)
            }
            LocalAction::InsertVertex { index, .. } => remove_at(vertices, *index, 0),
            LocalAction::DeleteVertex { index, vertex, .. } => {
                insert_at(vertices, *index, vertex.clone())
            }
            LocalAction::MoveLine {
                first_index,
                second_index,
                old_first,
                old_second,
                ..
            } => set_positions(
                vertices,
                &[(*first_index, *old_first), (*second_index, *old_second)],
            ),
        }
    }

    /// Re-apply this action
    pub fn redo(&self, vertices: &mut Vec<V>) -> Result<(), ActionError> {
        match self {
            LocalAction::MoveVertex { index, new, .. } => set_positions(vertices, &[(*index, *new)]),
            LocalAction::MultiMoveVertex { moves } => {
                let targets: Vec<(usize, Vec2)> = moves.iter().map(|m| (m.index, m.new)).collect();
                set_positions(vertices, &targets)
            }
            LocalAction::InsertVertex { index, vertex } => {
                insert_at(vertices, *index, vertex.clone())
            }
            LocalAction::DeleteVertex {
                index,
                min_vertices,
                ..
            } => remove_at(vertices, *index, *min_vertices),
            LocalAction::MoveLine {
                first_index,
                second_index,
                new_first,
                new_second,
                ..
            } => set_positions(
                vertices,
                &[(*first_index, *new_first), (*second_index, *new_second)],
            ),
        }
    }
}

/// Move vertices, all or nothing
fn set_positions<V: ControlPoint>(
    vertices: &mut [V],
    targets: &[(usize, Vec2)],
) -> Result<(), ActionError> {
    let len = vertices.len();
    if let Some(&(index, _)) = targets.iter().find(|(index, _)| *index >= len) {
        return Err(ActionError::IndexOutOfRange { index, len });
    }
    for &(index, position) in targets {
        vertices[index].set_position(position);
    }
    Ok(())
}

fn insert_at<V>(vertices: &mut Vec<V>, index: usize, vertex: V) -> Result<(), ActionError> {
    if index > vertices.len() {
        return Err(ActionError::IndexOutOfRange {
            index,
            len: vertices.len(),
        });
    }
    vertices.insert(index, vertex);
    Ok(())
}

fn remove_at<V>(vertices: &mut Vec<V>, index: usize, minimum: usize) -> Result<(), ActionError> {
    let len = vertices.len();
    if index >= len {
        return Err(ActionError::IndexOutOfRange { index, len });
    }
    if len - 1 < minimum {
        return Err(ActionError::BelowMinimum {
            remaining: len - 1,
            minimum,
        });
    }
    vertices.remove(index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtt_core::Pole;

    fn square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_move_vertex_undo_redo() {
        let action = LocalAction::MoveVertex {
            index: 2,
            old: Vec2::new(10.0, 10.0),
            new: Vec2::new(15.0, 12.0),
        };
        let mut vertices = square();
        action.redo(&mut vertices).unwrap();
        assert_eq!(vertices[2], Vec2::new(15.0, 12.0));
        action.undo(&mut vertices).unwrap();
        assert_eq!(vertices, square());
    }

    #[test]
    fn test_multi_move_is_all_or_nothing() {
        let action: LocalAction<Vec2> = LocalAction::MultiMoveVertex {
            moves: vec![
                VertexMove {
                    index: 0,
                    old: Vec2::ZERO,
                    new: Vec2::ONE,
                },
                VertexMove {
                    index: 9,
                    old: Vec2::ZERO,
                    new: Vec2::ONE,
                },
            ],
        };
        let mut vertices = square();
        assert_eq!(
            action.redo(&mut vertices),
            Err(ActionError::IndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(vertices, square());
    }

    #[test]
    fn test_insert_then_undo() {
        let action = LocalAction::InsertVertex {
            index: 1,
            vertex: Vec2::new(5.0, 0.0),
        };
        let mut vertices = square();
        action.redo(&mut vertices).unwrap();
        assert_eq!(vertices.len(), 5);
        assert_eq!(vertices[1], Vec2::new(5.0, 0.0));
        action.undo(&mut vertices).unwrap();
        assert_eq!(vertices, square());
    }

    #[test]
    fn test_delete_redo_respects_minimum() {
        let action = LocalAction::DeleteVertex {
            index: 0,
            vertex: Vec2::ZERO,
            min_vertices: 3,
        };
        let mut vertices = square();
        action.redo(&mut vertices).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(
            action.redo(&mut vertices),
            Err(ActionError::BelowMinimum {
                remaining: 2,
                minimum: 3
            })
        );
        action.undo(&mut vertices).unwrap();
        assert_eq!(vertices.len(), 4);
    }

    #[test]
    fn test_move_line_keeps_pole_heights() {
        let mut poles = vec![
            Pole::new(0.0, 0.0).with_height(2.0),
            Pole::new(5.0, 0.0).with_height(3.0),
        ];
        let action: LocalAction<Pole> = LocalAction::MoveLine {
            line_index: 0,
            first_index: 0,
            second_index: 1,
            old_first: Vec2::new(0.0, 0.0),
            old_second: Vec2::new(5.0, 0.0),
            new_first: Vec2::new(0.0, 5.0),
            new_second: Vec2::new(5.0, 5.0),
        };
        action.redo(&mut poles).unwrap();
        assert_eq!(poles[0].position, Vec2::new(0.0, 5.0));
        assert_eq!(poles[1].h, 3.0);
        action.undo(&mut poles).unwrap();
        assert_eq!(poles[1].position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_descriptions() {
        let action = LocalAction::InsertVertex {
            index: 1,
            vertex: Vec2::new(5.0, 0.0),
        };
        assert_eq!(action.name(), "Insert Vertex");
        assert_eq!(action.description(), "Insert vertex 1 at (5, 0)");
    }
}
