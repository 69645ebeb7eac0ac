//! Canvas pointer and keyboard input
//!
//! egui responses are first translated into [`PointerEvent`]s in world
//! coordinates; [`apply_pointer`] then drives a transformer from those
//! events. The hit target under the press origin decides what a drag does:
//! a vertex drags the vertex (or the selection), the selected line drags the
//! line, and empty canvas draws a marquee.

use glam::Vec2;
use vtt_core::{ControlPoint, KeyModifiers, Viewport};
use vtt_editor::{
    EditorError, HitTarget, Key, KeyEvent, KeyTarget, Transformer, TransformerHost,
};

/// A pointer interaction in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved with no button held
    Hover { world: Vec2, modifiers: KeyModifiers },
    /// Pointer left the canvas
    Leave,
    /// Primary button drag started; `origin` is where the button went down
    DragStart {
        origin: Vec2,
        world: Vec2,
        modifiers: KeyModifiers,
    },
    Drag { world: Vec2, modifiers: KeyModifiers },
    DragEnd { world: Vec2, modifiers: KeyModifiers },
    /// Primary button pressed and released without dragging
    Click { world: Vec2, modifiers: KeyModifiers },
}

/// What the current primary drag is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragKind {
    Vertex(usize),
    Line,
    Marquee,
    /// A drag the transformer refused, such as an unselected line
    Ignored,
}

/// Per-session pointer state
#[derive(Debug, Clone, Default)]
pub struct GestureState {
    drag: Option<DragKind>,
    hovered_line: Option<usize>,
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

/// Drive a transformer with one pointer event
pub fn apply_pointer<V: ControlPoint>(
    editor: &mut Transformer<V>,
    host: &mut dyn TransformerHost<V>,
    gesture: &mut GestureState,
    event: PointerEvent,
    scale: f32,
) -> Result<(), EditorError> {
    match event {
        PointerEvent::Hover { world, modifiers } => {
            if gesture.drag.is_some() {
                return Ok(());
            }
            match editor.hit_test(world, scale) {
                HitTarget::Line(line) => {
                    if let Some(previous) = gesture.hovered_line.filter(|&p| p != line) {
                        editor.leave_line(previous);
                    }
                    gesture.hovered_line = Some(line);
                    editor.hover_line(line, world, modifiers);
                }
                _ => {
                    if let Some(previous) = gesture.hovered_line.take() {
                        editor.leave_line(previous);
                    }
                }
            }
        }
        PointerEvent::Leave => {
            if let Some(previous) = gesture.hovered_line.take() {
                editor.leave_line(previous);
            }
        }
        PointerEvent::DragStart {
            origin,
            world,
            modifiers,
        } => {
            let kind = match editor.hit_test(origin, scale) {
                HitTarget::Vertex(index) if editor.begin_vertex_drag(index) => {
                    editor.update_vertex_drag(index, world, modifiers);
                    DragKind::Vertex(index)
                }
                HitTarget::Line(line) if editor.begin_line_drag(line, origin, modifiers) => {
                    editor.update_line_drag(world, modifiers);
                    DragKind::Line
                }
                HitTarget::Empty => {
                    editor.begin_marquee(origin);
                    editor.update_marquee(world);
                    DragKind::Marquee
                }
                _ => DragKind::Ignored,
            };
            gesture.drag = Some(kind);
        }
        PointerEvent::Drag { world, modifiers } => match gesture.drag {
            Some(DragKind::Vertex(index)) => editor.update_vertex_drag(index, world, modifiers),
            Some(DragKind::Line) => editor.update_line_drag(world, modifiers),
            Some(DragKind::Marquee) => editor.update_marquee(world),
            Some(DragKind::Ignored) | None => {}
        },
        PointerEvent::DragEnd { world, modifiers } => match gesture.drag.take() {
            Some(DragKind::Vertex(index)) => {
                editor.end_vertex_drag(index, world, modifiers, host);
            }
            Some(DragKind::Line) => {
                editor.end_line_drag(world, modifiers, host);
            }
            Some(DragKind::Marquee) => {
                editor.update_marquee(world);
                editor.end_marquee();
            }
            Some(DragKind::Ignored) | None => {}
        },
        PointerEvent::Click { world, modifiers } => match editor.hit_test(world, scale) {
            HitTarget::Vertex(index) => editor.click_vertex(index, modifiers),
            HitTarget::Line(line) => editor.click_line(line, world, modifiers, host)?,
            HitTarget::Empty => editor.click_empty(world, host),
        },
    }
    Ok(())
}

// ============== egui translation ==============

pub fn modifiers_from_egui(modifiers: egui::Modifiers) -> KeyModifiers {
    KeyModifiers {
        alt: modifiers.alt,
        ctrl: modifiers.ctrl,
        shift: modifiers.shift,
        meta: modifiers.mac_cmd,
    }
}

fn key_from_egui(key: egui::Key) -> Key {
    match key {
        egui::Key::Delete | egui::Key::Backspace => Key::Delete,
        egui::Key::Escape => Key::Escape,
        egui::Key::Enter => Key::Enter,
        _ => Key::Other,
    }
}

fn to_world(viewport: &Viewport, rect: egui::Rect, pos: egui::Pos2) -> Vec2 {
    viewport.screen_to_world(Vec2::new(pos.x - rect.min.x, pos.y - rect.min.y))
}

/// Translate this frame's primary-button interaction with the canvas
pub fn pointer_events(
    response: &egui::Response,
    ctx: &egui::Context,
    viewport: &Viewport,
) -> Vec<PointerEvent> {
    let rect = response.rect;
    let modifiers = ctx.input(|i| modifiers_from_egui(i.modifiers));
    let mut events = Vec::new();

    let pointer = response
        .interact_pointer_pos()
        .or(response.hover_pos())
        .map(|pos| to_world(viewport, rect, pos));

    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(world) = pointer {
            let origin = ctx
                .input(|i| i.pointer.press_origin())
                .map_or(world, |pos| to_world(viewport, rect, pos));
            events.push(PointerEvent::DragStart {
                origin,
                world,
                modifiers,
            });
        }
    } else if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(world) = pointer {
            events.push(PointerEvent::Drag { world, modifiers });
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        if let Some(world) = pointer {
            events.push(PointerEvent::DragEnd { world, modifiers });
        }
    }

    if response.clicked() {
        if let Some(world) = pointer {
            events.push(PointerEvent::Click { world, modifiers });
        }
    }

    match response.hover_pos() {
        Some(pos) if !response.dragged() => events.push(PointerEvent::Hover {
            world: to_world(viewport, rect, pos),
            modifiers,
        }),
        None => events.push(PointerEvent::Leave),
        _ => {}
    }

    events
}

/// Collect this frame's key events.
///
/// egui reports Shift only as a modifier, so presses and releases are
/// synthesized from changes of the modifier state.
pub fn key_events(ctx: &egui::Context, shift_down: &mut bool) -> Vec<KeyEvent> {
    let target = if ctx.wants_keyboard_input() {
        KeyTarget::TextInput
    } else {
        KeyTarget::Canvas
    };

    ctx.input(|i| {
        let mut events: Vec<KeyEvent> = i
            .events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    modifiers,
                    ..
                } => {
                    let key = key_from_egui(*key);
                    (key != Key::Other).then_some(KeyEvent {
                        key,
                        pressed: *pressed,
                        modifiers: modifiers_from_egui(*modifiers),
                        target,
                    })
                }
                _ => None,
            })
            .collect();

        if i.modifiers.shift != *shift_down {
            *shift_down = i.modifiers.shift;
            events.push(KeyEvent {
                key: Key::Shift,
                pressed: i.modifiers.shift,
                modifiers: modifiers_from_egui(i.modifiers),
                target,
            });
        }
        events
    })
}
