//! Keyboard handling

use tracing::trace;
use vtt_core::ControlPoint;

use super::Transformer;
use crate::handles::VertexHandle;
use crate::host::TransformerHost;
use crate::input::{Key, KeyEvent, KeyOutcome};

impl<V: ControlPoint, H: VertexHandle> Transformer<V, H> {
    /// Handle a key press or release.
    ///
    /// - Delete removes the selected vertices; Alt+Delete breaks an open
    ///   shape at the selection instead
    /// - Escape clears the vertex/line selection, or asks the host to clear
    ///   its selection when there is none
    /// - Enter finishes editing
    /// - Holding Shift arms vertex insertion on hovered lines
    ///
    /// Events aimed at text entry widgets are never handled.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        host: &mut dyn TransformerHost<V>,
    ) -> KeyOutcome {
        if event.pressed {
            self.handle_key_down(event, host)
        } else {
            self.handle_key_up(event)
        }
    }

    pub fn handle_key_down(
        &mut self,
        event: &KeyEvent,
        host: &mut dyn TransformerHost<V>,
    ) -> KeyOutcome {
        if event.target.is_text_entry() {
            return KeyOutcome::Ignored;
        }
        match event.key {
            Key::Shift => {
                self.shift_held = true;
                KeyOutcome::Ignored
            }
            Key::Enter => {
                trace!("{}: finish requested", self.rules.name);
                host.on_finish();
                KeyOutcome::Handled
            }
            Key::Delete if event.modifiers.alt && self.rules.allows_break => {
                self.break_at_selection(host);
                KeyOutcome::Handled
            }
            Key::Delete => {
                self.delete_selected(host);
                KeyOutcome::Handled
            }
            Key::Escape => {
                if self.selection.is_empty() {
                    host.on_clear_selections();
                } else {
                    self.selection.clear();
                }
                self.insert_preview = None;
                KeyOutcome::Handled
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    pub fn handle_key_up(&mut self, event: &KeyEvent) -> KeyOutcome {
        if event.target.is_text_entry() {
            return KeyOutcome::Ignored;
        }
        if event.key == Key::Shift {
            self.shift_held = false;
            self.insert_preview = None;
        }
        KeyOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use vtt_core::{GridConfig, KeyModifiers, Pole};

    use crate::input::KeyTarget;
    use crate::transformer::test_host::RecordingHost;
    use crate::transformer::{RegionTransformer, WallTransformer};

    use super::*;

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
    fn test_escape_clears_then_forwards() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.click_vertex(1, KeyModifiers::NONE);

        let outcome = editor.handle_key(&KeyEvent::down(Key::Escape), &mut host);
        assert_eq!(outcome, KeyOutcome::Handled);
        assert!(editor.selection().is_empty());
        assert_eq!(host.cleared, 0);

        editor.handle_key(&KeyEvent::down(Key::Escape), &mut host);
        assert_eq!(host.cleared, 1);
    }

    #[test]
    fn test_text_input_is_ignored() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.click_vertex(1, KeyModifiers::NONE);

        let event = KeyEvent::down(Key::Delete).with_target(KeyTarget::TextInput);
        assert_eq!(editor.handle_key(&event, &mut host), KeyOutcome::Ignored);
        assert!(host.changes.is_empty());
        assert!(editor.selection().contains(1));
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.click_vertex(1, KeyModifiers::NONE);
        editor.handle_key(&KeyEvent::down(Key::Delete), &mut host);
        assert_eq!(host.changes[0].len(), 3);
    }

    #[test]
    fn test_enter_finishes() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        assert!(editor.handle_key(&KeyEvent::down(Key::Enter), &mut host).is_handled());
        assert_eq!(host.finished, 1);
    }

    #[test]
    fn test_shift_tracking() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.handle_key(&KeyEvent::down(Key::Shift), &mut host);
        assert!(editor.shift_held());
        assert!(editor.hover_line(0, Vec2::new(30.0, 5.0), KeyModifiers::NONE).is_some());

        editor.handle_key(&KeyEvent::up(Key::Shift), &mut host);
        assert!(!editor.shift_held());
        assert!(editor.insert_preview().is_none());
    }

    #[test]
    fn test_alt_delete_breaks_wall() {
        let mut editor: WallTransformer = WallTransformer::wall(
            vec![Pole::new(0.0, 0.0), Pole::new(50.0, 0.0), Pole::new(100.0, 0.0)],
            GridConfig::square(50.0),
        );
        let mut host = RecordingHost::new();
        editor.click_vertex(1, KeyModifiers::NONE);

        let event = KeyEvent::down(Key::Delete).with_modifiers(KeyModifiers::alt());
        assert!(editor.handle_key(&event, &mut host).is_handled());
        assert_eq!(host.breaks.len(), 1);
        assert!(host.changes.is_empty());
    }

    #[test]
    fn test_alt_delete_on_region_deletes() {
        let mut editor = region();
        let mut host = RecordingHost::new();
        editor.click_vertex(1, KeyModifiers::NONE);
        let event = KeyEvent::down(Key::Delete).with_modifiers(KeyModifiers::alt());
        editor.handle_key(&event, &mut host);
        assert_eq!(host.changes[0].len(), 3);
    }
}
