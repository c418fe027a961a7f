//! Input abstraction layer.
//!
//! Normalizes pointer and keyboard events from whatever windowing layer
//! hosts the canvas into one `InputEvent` enum consumed by the engine.
//! Coordinates are screen (device) pixels; the engine converts to world
//! space through the viewport.

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Platform-neutral "command": ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer moved over the drawing surface.
    PointerMove { x: f64, y: f64 },

    /// Pointer pressed.
    PointerDown {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Pointer left the drawing surface entirely.
    PointerLeave,

    /// Scroll / pinch. `zoom` is a factor (1.0 = no change, >1 = in).
    Scroll { dx: f64, dy: f64, zoom: f64 },

    /// Keyboard event. `key` is the `KeyboardEvent.key` value
    /// (e.g. `"ArrowRight"`, `"Enter"`, `"Escape"`).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_owned(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerMove { x, y } | Self::PointerDown { x, y, .. } => Some((*x, *y)),
            _ => None,
        }
    }
}
