//! Toolkit-independent keyboard events

use vtt_core::KeyModifiers;

/// Keys the transformers react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Delete,
    Escape,
    Enter,
    Shift,
    Other,
}

/// Where keyboard focus was when the event occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTarget {
    #[default]
    Canvas,
    TextInput,
    TextArea,
}

impl KeyTarget {
    /// Text entry widgets own their keystrokes
    pub fn is_text_entry(&self) -> bool {
        matches!(self, KeyTarget::TextInput | KeyTarget::TextArea)
    }
}

/// A key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// `true` on key down, `false` on key up
    pub pressed: bool,
    pub modifiers: KeyModifiers,
    pub target: KeyTarget,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            pressed: true,
            modifiers: KeyModifiers::NONE,
            target: KeyTarget::Canvas,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            pressed: false,
            ..Self::down(key)
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_target(mut self, target: KeyTarget) -> Self {
        self.target = target;
        self
    }
}

/// Whether a listener consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Consumed; stop propagation and suppress the default action
    Handled,
    Ignored,
}

impl KeyOutcome {
    pub fn is_handled(&self) -> bool {
        *self == KeyOutcome::Handled
    }
}
