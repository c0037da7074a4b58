//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `PointerEvent`
//! consumed by the pointer interpreter. Coordinates are canvas-local, in
//! image pixels.

use std::time::Duration;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed. `time` is measured from any fixed epoch the
    /// host chooses; only differences between events matter.
    PointerDown { x: f32, y: f32, time: Duration },

    /// Pointer moved.
    PointerMove { x: f32, y: f32 },

    /// Primary button released.
    PointerUp { x: f32, y: f32 },

    /// Pointer left the canvas.
    PointerLeave,
}

impl PointerEvent {
    /// Create a PointerDown from a DOM event timestamp in milliseconds.
    /// (Used when bridging from JS via wasm-bindgen.)
    pub fn from_pointer_down(x: f32, y: f32, time_ms: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            time: Duration::from_secs_f64(time_ms.max(0.0) / 1000.0),
        }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    /// Extract position if the event carries one.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            Self::PointerLeave => None,
        }
    }
}
