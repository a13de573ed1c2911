//! Pointer input normalization.
//!
//! This module translates heterogeneous platform input (single mouse,
//! multi-touch, stylus) into canonical per-frame pointer sample lists, and
//! hosts the double-tap arming detector.

pub mod arming;
pub mod events;
pub mod pointer;

// Re-export commonly used types at module level
pub use arming::DoubleTapDetector;
pub use events::{EventPhase, InputEvent, MouseButton, TouchContact};
pub use pointer::{MOUSE_POINTER_ID, Pointer, normalize};
