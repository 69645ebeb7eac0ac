//! Keyboard listener routing
//!
//! Listeners register for a [`Phase`] and receive a [`ListenerGuard`];
//! dropping the guard deregisters the listener, so a listener lives exactly
//! as long as the editing session that owns its guard. Capture listeners run
//! before bubble listeners, each in registration order, and the first one to
//! return [`KeyOutcome::Handled`] stops propagation.

use std::collections::HashSet;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::trace;

use crate::input::{KeyEvent, KeyOutcome};

/// Dispatch phase of a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Capture,
    Bubble,
}

type ListenerId = u64;
type Listener = Box<dyn FnMut(&KeyEvent) -> KeyOutcome + Send>;

struct Registration {
    id: ListenerId,
    phase: Phase,
    listener: Listener,
}

#[derive(Default)]
struct RouterInner {
    next_id: ListenerId,
    listeners: Vec<Registration>,
    /// Guards dropped while their listener was checked out for dispatch
    removed: HashSet<ListenerId>,
}

/// Shared keyboard dispatcher
#[derive(Clone, Default)]
pub struct KeyboardRouter {
    inner: Arc<Mutex<RouterInner>>,
}

impl std::fmt::Debug for KeyboardRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardRouter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyboardRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a phase
    #[must_use = "the listener is removed when the guard is dropped"]
    pub fn register(
        &self,
        phase: Phase,
        listener: impl FnMut(&KeyEvent) -> KeyOutcome + Send + 'static,
    ) -> ListenerGuard {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(Registration {
            id,
            phase,
            listener: Box::new(listener),
        });
        trace!("Registered {:?} key listener {}", phase, id);

        ListenerGuard {
            id,
            router: Arc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Deliver an event to the registered listeners
    pub fn dispatch(&self, event: &KeyEvent) -> KeyOutcome {
        // Listeners run without the lock held so they may register or drop guards
        let mut listeners = std::mem::take(&mut self.inner.lock().listeners);
        listeners.sort_by_key(|r| r.phase);

        let mut outcome = KeyOutcome::Ignored;
        for registration in listeners.iter_mut() {
            if self.inner.lock().removed.contains(&registration.id) {
                continue;
            }
            if (registration.listener)(event).is_handled() {
                trace!("Key {:?} handled by listener {}", event.key, registration.id);
                outcome = KeyOutcome::Handled;
                break;
            }
        }

        let mut inner = self.inner.lock();
        let removed = std::mem::take(&mut inner.removed);
        listeners.retain(|r| !removed.contains(&r.id));
        listeners.append(&mut inner.listeners);
        inner.listeners = listeners;
        outcome
    }
}

/// Keeps a listener registered while alive
#[derive(Debug)]
pub struct ListenerGuard {
    id: ListenerId,
    router: Weak<Mutex<RouterInner>>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(inner) = self.router.upgrade() else {
            return;
        };
        let mut inner = inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|r| r.id != self.id);
        if inner.listeners.len() == before {
            inner.removed.insert(self.id);
        }
        trace!("Removed key listener {}", self.id);
    }
}
