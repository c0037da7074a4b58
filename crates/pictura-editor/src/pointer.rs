//! Pointer interpreter: raw pointer events → editor intents.
//!
//! The interpreter never touches the store. The caller hit-tests
//! `PointerDown` events, passes the hit in, and applies whatever `Intent`
//! comes back. Timing comes from the event itself, so the double-click
//! window is testable without a clock.
//!
//! | Event | Hit | Intent |
//! |-------|-----|--------|
//! | Down  | hit, within the window of the previous down | `EditRequest` |
//! | Down  | any other hit | `Select` (and a drag starts) |
//! | Down  | nothing | `Deselect` |
//!
//! Every down restarts the window, including one on empty space.
//! | Move  | dragging | `DragMove` to the raw pointer position |
//! | Up / Leave | any | drag ends |

use crate::input::PointerEvent;
use pictura_core::{AnnotationId, EditorConfig};
use std::time::Duration;

/// What the editor should do in response to a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Select(AnnotationId),
    DragMove { id: AnnotationId, x: f32, y: f32 },
    EditRequest(AnnotationId),
    Deselect,
}

/// Most recent pointer-down, whether or not it hit anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastDown {
    pub hit: Option<AnnotationId>,
    pub at: Duration,
}

/// Transient per-gesture state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSession {
    /// Annotation being dragged, if a drag is active.
    pub drag_target: Option<AnnotationId>,
    pub last_down: Option<LastDown>,
}

#[derive(Debug, Clone)]
pub struct PointerInterpreter {
    session: PointerSession,
    double_click_window: Duration,
}

impl Default for PointerInterpreter {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

impl PointerInterpreter {
    pub fn new(double_click_window: Duration) -> Self {
        Self {
            session: PointerSession::default(),
            double_click_window,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.double_click_window())
    }

    pub fn session(&self) -> &PointerSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.drag_target.is_some()
    }

    /// Forget the click history and any active drag.
    pub fn reset(&mut self) {
        self.session = PointerSession::default();
    }

    /// Stop dragging `id` (it was removed out from under the gesture).
    pub fn forget(&mut self, id: AnnotationId) {
        if self.session.drag_target == Some(id) {
            self.session.drag_target = None;
        }
        if let Some(last) = self.session.last_down.as_mut()
            && last.hit == Some(id)
        {
            last.hit = None;
        }
    }

    /// Interpret one event. `hit` is only consulted for `PointerDown`.
    pub fn handle(&mut self, event: &PointerEvent, hit: Option<AnnotationId>) -> Option<Intent> {
        match *event {
            PointerEvent::PointerDown { time, .. } => {
                self.session.drag_target = None;

                // Only the time since the previous down counts; the request
                // targets whatever is under this click.
                let repeat = self.session.last_down.is_some_and(|last| {
                    time.checked_sub(last.at)
                        .is_some_and(|elapsed| elapsed < self.double_click_window)
                });
                self.session.last_down = Some(LastDown { hit, at: time });

                let Some(id) = hit else {
                    log::trace!("pointer down on empty space");
                    return Some(Intent::Deselect);
                };

                if repeat {
                    log::debug!("double click on {id}");
                    Some(Intent::EditRequest(id))
                } else {
                    self.session.drag_target = Some(id);
                    Some(Intent::Select(id))
                }
            }
            PointerEvent::PointerMove { x, y } => self
                .session
                .drag_target
                .map(|id| Intent::DragMove { id, x, y }),
            PointerEvent::PointerUp { .. } | PointerEvent::PointerLeave => {
                if let Some(id) = self.session.drag_target.take() {
                    log::trace!("drag of {id} ended");
                }
                None
            }
        }
    }
}
