//! Generic input event types for cross-host compatibility.
//!
//! Host input sources map their native events (DOM, winit, Wayland, test
//! fixtures) to these tagged variants once, at the boundary, so the engine
//! never dispatches on platform event names.

/// Lifecycle phase of a raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    /// Press / contact down
    Start,
    /// Drag / contact move
    Move,
    /// Lift, leave, or cancel
    End,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (primary selection button)
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

/// One active contact reported by a multi-contact device.
///
/// `id` is assigned by the device and is stable across consecutive events
/// for the same physical contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchContact {
    pub id: u32,
    pub page_x: f64,
    pub page_y: f64,
}

/// Raw platform input event, already resolved to a device class.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Single-cursor pointer device
    Mouse {
        phase: EventPhase,
        button: MouseButton,
        page_x: f64,
        page_y: f64,
    },
    /// Multi-contact device; `contacts` lists every currently active
    /// contact. End events may legitimately carry zero contacts.
    Touch {
        phase: EventPhase,
        contacts: Vec<TouchContact>,
    },
    /// Stylus reporting a single position (mouse-compatible mode)
    Pen {
        phase: EventPhase,
        page_x: f64,
        page_y: f64,
    },
}

impl InputEvent {
    /// Returns the lifecycle phase of the event.
    pub fn phase(&self) -> EventPhase {
        match self {
            InputEvent::Mouse { phase, .. }
            | InputEvent::Touch { phase, .. }
            | InputEvent::Pen { phase, .. } => *phase,
        }
    }
}
