//! Undo/redo log of local edit actions

use tracing::debug;
use vtt_core::ControlPoint;

use crate::actions::{ActionError, ActionSink, LocalAction};

/// A logged action and the gesture it came from
#[derive(Debug, Clone)]
struct Entry<V> {
    batch: u64,
    action: LocalAction<V>,
}

/// Undo/redo stack of [`LocalAction`]s for one editing transaction
///
/// Actions recorded together through [`ActionSink::record_batch`] are undone
/// one at a time but trimmed from the history as a unit.
#[derive(Debug, Clone)]
pub struct ActionLog<V> {
    /// Actions that can be undone
    undo_stack: Vec<Entry<V>>,
    /// Actions that can be redone
    redo_stack: Vec<Entry<V>>,
    /// Maximum number of undo entries
    max_history: usize,
    next_batch: u64,
}

impl<V> Default for ActionLog<V> {
    fn default() -> Self {
        Self::new(50)
    }
}

impl<V> ActionLog<V> {
    /// Create a log with the specified maximum entries
    pub fn new(max_history: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_history,
            next_batch: 0,
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Most recent undoable action
    pub fn last(&self) -> Option<&LocalAction<V>> {
        self.undo_stack.last().map(|entry| &entry.action)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Drop the oldest batches until the history fits
    fn trim(&mut self) {
        while self.undo_stack.len() > self.max_history {
            let oldest = self.undo_stack[0].batch;
            let end = self
                .undo_stack
                .iter()
                .position(|entry| entry.batch != oldest)
                .unwrap_or(self.undo_stack.len());
            self.undo_stack.drain(..end);
            debug!("Trimmed {} oldest actions", end);
        }
    }
}

impl<V: ControlPoint> ActionLog<V> {
    /// Push a committed action
    pub fn push(&mut self, action: LocalAction<V>) {
        self.push_batch(vec![action]);
    }

    /// Push actions committed by one gesture
    pub fn push_batch(&mut self, actions: Vec<LocalAction<V>>) {
        if actions.is_empty() {
            return;
        }
        let batch = self.next_batch;
        self.next_batch += 1;

        // A new action invalidates everything that was undone
        self.redo_stack.clear();
        for action in actions {
            debug!("Recorded action: {}", action.description());
            self.undo_stack.push(Entry { batch, action });
        }
        self.trim();
    }

    /// Undo the last action against `vertices`.
    ///
    /// Returns the description of the undone action, or `None` when there is
    /// nothing to undo. A failed undo leaves both the log and the vertices
    /// unchanged.
    pub fn undo(&mut self, vertices: &mut Vec<V>) -> Result<Option<String>, ActionError> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = entry.action.undo(vertices) {
            self.undo_stack.push(entry);
            return Err(e);
        }
        let description = entry.action.description();
        debug!("Undo: {}", description);
        self.redo_stack.push(entry);
        Ok(Some(description))
    }

    /// Redo the last undone action against `vertices`
    pub fn redo(&mut self, vertices: &mut Vec<V>) -> Result<Option<String>, ActionError> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(e) = entry.action.redo(vertices) {
            self.redo_stack.push(entry);
            return Err(e);
        }
        let description = entry.action.description();
        debug!("Redo: {}", description);
        self.undo_stack.push(entry);
        Ok(Some(description))
    }
}

impl<V: ControlPoint> ActionSink<V> for ActionLog<V> {
    fn record(&mut self, action: LocalAction<V>) {
        self.push(action);
    }

    fn record_batch(&mut self, actions: Vec<LocalAction<V>>) {
        self.push_batch(actions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn move_action(index: usize, old: Vec2, new: Vec2) -> LocalAction<Vec2> {
        LocalAction::MoveVertex { index, old, new }
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut vertices = vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)];
        let mut log = ActionLog::default();

        vertices[1] = Vec2::new(20.0, 0.0);
        log.push(move_action(1, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)));
        assert!(log.can_undo());
        assert!(!log.can_redo());

        let description = log.undo(&mut vertices).unwrap();
        assert_eq!(description.as_deref(), Some("Move vertex 1 to (20, 0)"));
        assert_eq!(vertices[1], Vec2::new(10.0, 0.0));
        assert!(log.can_redo());

        log.redo(&mut vertices).unwrap();
        assert_eq!(vertices[1], Vec2::new(20.0, 0.0));
        assert!(!log.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut vertices = vec![Vec2::ZERO, Vec2::ONE, Vec2::X];
        let mut log = ActionLog::default();
        log.push(move_action(0, Vec2::ZERO, Vec2::ZERO));
        log.undo(&mut vertices).unwrap();
        assert_eq!(log.redo_len(), 1);

        log.push(move_action(0, Vec2::ZERO, Vec2::ZERO));
        assert_eq!(log.redo_len(), 0);
    }

    #[test]
    fn test_history_is_trimmed() {
        let mut log: ActionLog<Vec2> = ActionLog::new(3);
        for i in 0..5 {
            log.push(move_action(i, Vec2::ZERO, Vec2::ONE));
        }
        assert_eq!(log.undo_len(), 3);
        assert!(matches!(log.last(), Some(LocalAction::MoveVertex { index: 4, .. })));
    }

    #[test]
    fn test_trim_drops_whole_batches() {
        let mut log: ActionLog<Vec2> = ActionLog::new(3);
        log.push_batch(vec![
            LocalAction::DeleteVertex {
                index: 3,
                vertex: Vec2::new(0.0, 10.0),
                min_vertices: 3,
            },
            LocalAction::DeleteVertex {
                index: 1,
                vertex: Vec2::new(10.0, 0.0),
                min_vertices: 3,
            },
        ]);
        log.push(move_action(0, Vec2::ZERO, Vec2::ONE));
        assert_eq!(log.undo_len(), 3);

        log.push(move_action(1, Vec2::ZERO, Vec2::ONE));
        assert_eq!(log.undo_len(), 2);
        assert!(
            log.undo_stack
                .iter()
                .all(|entry| matches!(entry.action, LocalAction::MoveVertex { .. }))
        );
    }

    #[test]
    fn test_oversized_batch_is_dropped() {
        let mut log: ActionLog<Vec2> = ActionLog::new(2);
        log.push_batch((0..3).map(|i| move_action(i, Vec2::ZERO, Vec2::ONE)).collect());
        assert!(!log.can_undo());
    }

    #[test]
    fn test_failed_undo_keeps_log() {
        let mut vertices = vec![Vec2::ZERO];
        let mut log = ActionLog::default();
        log.push(move_action(5, Vec2::ZERO, Vec2::ONE));

        assert!(log.undo(&mut vertices).is_err());
        assert_eq!(log.undo_len(), 1);
        assert_eq!(log.redo_len(), 0);
    }

    #[test]
    fn test_empty_log() {
        let mut vertices: Vec<Vec2> = Vec::new();
        let mut log = ActionLog::default();
        assert_eq!(log.undo(&mut vertices), Ok(None));
        assert_eq!(log.redo(&mut vertices), Ok(None));
    }
}
