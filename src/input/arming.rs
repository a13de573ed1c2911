//! Double-tap arming detection.

use std::time::{Duration, Instant};

/// Detects two start taps landing within a fixed window.
///
/// Used by the double-tap arming mode: drawing stays disabled until the
/// user taps twice in quick succession. Timing is host-driven; callers
/// pass the current instant so the detector stays deterministic in tests.
#[derive(Debug)]
pub struct DoubleTapDetector {
    window: Duration,
    last_tap: Option<Instant>,
}

impl DoubleTapDetector {
    /// Creates a detector with the given tap window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_tap: None,
        }
    }

    /// Registers a start tap at `now`.
    ///
    /// Returns true when this tap completes a double tap, i.e. the
    /// previous tap happened within the window. A completing tap resets
    /// the detector; a third tap starts a fresh pair.
    pub fn register_tap(&mut self, now: Instant) -> bool {
        match self.last_tap.take() {
            Some(then) if now.saturating_duration_since(then) <= self.window => true,
            _ => {
                self.last_tap = Some(now);
                false
            }
        }
    }

    /// Forgets any pending first tap.
    pub fn reset(&mut self) {
        self.last_tap = None;
    }
}
