//! Gesture lifecycle state machine and engine surface.

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::{ArmingMode, Config, SelectionPolicy};
use crate::geometry::Point;
use crate::input::{DoubleTapDetector, EventPhase, InputEvent, MouseButton, Pointer, normalize};
use crate::layout::LayoutSnapshot;
use crate::select::{CollisionResolver, SelectionSet};
use crate::stroke::{Segment, StrokeRecorder, StrokeStyle};

use super::actions::ActionRegistry;

/// Gesture lifecycle phase.
///
/// Transitions are the only place drawing-related state is created or
/// destroyed. `Cooling` is the grace window between a pointer lift and
/// teardown, absorbing synthetic trailing end events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// Not tracking any gesture - waiting for a press
    Idle,
    /// Pointers down, resolving collisions every frame
    Active,
    /// Pointers lifted, cooldown timer armed
    Cooling,
}

/// Working state of one gesture: the frozen layout, collision
/// bookkeeping, and stroke pairing. Created at gesture start, discarded
/// when the cooldown expires.
struct Gesture {
    /// Surface origin frozen at gesture start; later raw events are
    /// normalized against it, not against a re-measured offset
    origin: Point,
    resolver: CollisionResolver,
    recorder: StrokeRecorder,
}

enum GestureState {
    Idle,
    Active(Gesture),
    Cooling(Gesture),
}

/// Cancellable deadline for the post-gesture grace window.
///
/// One timer per engine instance so independent engines never share
/// timer state. The host drives it by passing the current instant to
/// [`LassoEngine::advance`]; checking while disarmed is a no-op.
#[derive(Debug, Default)]
struct CooldownTimer {
    deadline: Option<Instant>,
}

impl CooldownTimer {
    fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }
}

/// Result of one move frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// Drawable line segments for this frame, one per pointer that was
    /// present in both the previous and current sample lists
    pub segments: Vec<Segment>,
    /// True if selection membership changed during this frame
    pub selection_changed: bool,
}

/// Freehand lasso selection engine.
///
/// Normalized pointer samples stream in per input frame; the engine
/// hit-tests them against the layout snapshot captured at gesture start,
/// maintains the selection set under the configured policy, and emits
/// line segments for visual feedback. The selection set is owned
/// exclusively by the engine; hosts read it or go through `select_all`
/// and `clear_selection`.
pub struct LassoEngine {
    policy: SelectionPolicy,
    multi_pointer: bool,
    cooldown: Duration,
    arming: ArmingMode,
    revoke_after_gesture: bool,
    clear_on_disable: bool,
    stroke_style: StrokeStyle,
    double_tap: DoubleTapDetector,
    draw_enabled: bool,
    state: GestureState,
    timer: CooldownTimer,
    selection: SelectionSet,
    observers: Vec<Box<dyn FnMut(usize)>>,
    actions: ActionRegistry,
}

impl LassoEngine {
    /// Creates an engine from a loaded configuration.
    ///
    /// Drawing starts enabled only in the `always` arming mode; the
    /// other modes wait for the host or a double tap.
    pub fn new(config: &Config) -> Self {
        Self {
            policy: config.selection.policy,
            multi_pointer: config.pointer.multi_pointer,
            cooldown: Duration::from_millis(config.gesture.cooldown_ms),
            arming: config.pointer.arming,
            revoke_after_gesture: config.pointer.revoke_after_gesture,
            clear_on_disable: config.selection.clear_on_disable,
            stroke_style: StrokeStyle {
                color: config.stroke.line_color.to_color(),
                width: config.stroke.line_width,
            },
            double_tap: DoubleTapDetector::new(Duration::from_millis(
                config.pointer.double_tap_window_ms,
            )),
            draw_enabled: config.pointer.arming == ArmingMode::Always,
            state: GestureState::Idle,
            timer: CooldownTimer::default(),
            selection: SelectionSet::new(),
            observers: Vec::new(),
            actions: ActionRegistry::default(),
        }
    }

    /// The active selection policy.
    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Styling hints for the renderer drawing this engine's strokes.
    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    /// The configured post-gesture grace period.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Current gesture lifecycle phase.
    pub fn phase(&self) -> GesturePhase {
        match self.state {
            GestureState::Idle => GesturePhase::Idle,
            GestureState::Active(_) => GesturePhase::Active,
            GestureState::Cooling(_) => GesturePhase::Cooling,
        }
    }

    /// Whether gesture-start input currently begins a gesture.
    pub fn draw_enabled(&self) -> bool {
        self.draw_enabled
    }

    /// Enables or disables drawing (the host's edit toggle).
    ///
    /// Disabling does not abort a gesture already in flight; it prevents
    /// the next one from starting. When `clear_on_disable` is configured,
    /// disabling also clears the selection.
    pub fn set_draw_enabled(&mut self, enabled: bool) {
        if self.draw_enabled == enabled {
            return;
        }
        self.draw_enabled = enabled;
        debug!("drawing {}", if enabled { "enabled" } else { "disabled" });
        if !enabled {
            self.double_tap.reset();
            if self.clear_on_disable {
                self.selection.clear();
                self.flush_notifications();
            }
        }
    }

    /// Selected item indices in insertion order.
    pub fn selection(&self) -> &[usize] {
        self.selection.to_list()
    }

    /// Number of selected items.
    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    /// Human-readable selection count (e.g. `"2 items selected"`).
    pub fn selection_summary(&self) -> String {
        self.selection.summary()
    }

    /// Registers an observer invoked with the new count whenever
    /// selection membership changes. At most one call per input frame,
    /// however many items that frame touched.
    pub fn on_count_change<F>(&mut self, observer: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Replaces the selection with the given items.
    pub fn select_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = usize>,
    {
        self.selection.select_all(items);
        self.flush_notifications();
    }

    /// Deselects everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.flush_notifications();
    }

    /// Registers a named host action over the current selection.
    ///
    /// The callback receives the selected item indices; returning false
    /// asks the engine to clear the selection afterwards.
    pub fn register_action<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnMut(&[usize]) -> bool + 'static,
    {
        self.actions.register(name, action);
    }

    /// Runs a registered action against the current selection.
    ///
    /// Running an unregistered name logs a warning and changes nothing.
    pub fn run_action(&mut self, name: &str) {
        match self.actions.run(name, self.selection.to_list()) {
            None => warn!("Unknown action '{name}'"),
            Some(true) => {}
            Some(false) => {
                self.selection.clear();
                self.flush_notifications();
            }
        }
    }

    /// Starts a gesture from already-normalized samples.
    ///
    /// On entry from `Idle` the snapshot is frozen for the gesture's
    /// duration and the starting samples are resolved immediately, which
    /// is what makes a plain tap select the item under it with zero move
    /// events. A start landing in the cooldown window cancels the timer
    /// and resumes the gesture in flight: the existing snapshot and
    /// retired-box state are kept, last-hit memory and stroke pairing are
    /// reset, and `snapshot` is ignored.
    ///
    /// Calling this while a gesture is already active is a host usage
    /// error; the call is ignored with a diagnostic and the selection is
    /// left intact.
    pub fn start_gesture(&mut self, origin: Point, snapshot: LayoutSnapshot, initial: &[Pointer]) {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Active(gesture) => {
                warn!("start_gesture while a gesture is active; ignoring");
                self.state = GestureState::Active(gesture);
            }
            GestureState::Cooling(mut gesture) => {
                if !self.draw_enabled {
                    debug!("drawing disabled; ignoring gesture start");
                    self.state = GestureState::Cooling(gesture);
                    return;
                }
                debug!("re-press during cooldown; resuming gesture");
                self.timer.cancel();
                gesture.resolver.reset_last_hits();
                gesture.recorder.rebase(initial);
                let changed = gesture.resolver.resolve(initial, &mut self.selection);
                self.state = GestureState::Active(gesture);
                if changed {
                    self.notify_count();
                }
            }
            GestureState::Idle => {
                if !self.draw_enabled {
                    debug!("drawing disabled; ignoring gesture start");
                    return;
                }
                debug!(
                    "gesture start: {} item boxes, {} initial samples",
                    snapshot.len(),
                    initial.len()
                );
                let mut resolver = CollisionResolver::new(snapshot, self.policy);
                let recorder = StrokeRecorder::begin(initial);
                let changed = resolver.resolve(initial, &mut self.selection);
                self.state = GestureState::Active(Gesture {
                    origin,
                    resolver,
                    recorder,
                });
                if changed {
                    self.notify_count();
                }
            }
        }
    }

    /// Feeds one frame of move samples to the active gesture.
    ///
    /// Returns the stroke segments for this frame and whether selection
    /// membership changed. Called while no gesture is active (out-of-order
    /// or duplicate platform events), or with an empty sample list, this
    /// is a no-op rather than an error.
    pub fn move_gesture(&mut self, samples: &[Pointer]) -> MoveOutcome {
        let GestureState::Active(gesture) = &mut self.state else {
            debug!("move_gesture while no gesture is active; ignoring");
            return MoveOutcome::default();
        };
        if samples.is_empty() {
            return MoveOutcome::default();
        }

        let segments = gesture.recorder.advance(samples);
        let selection_changed = gesture.resolver.resolve(samples, &mut self.selection);
        if selection_changed {
            self.notify_count();
        }

        MoveOutcome {
            segments,
            selection_changed,
        }
    }

    /// Ends the gesture: pointers lifted, cooldown timer armed.
    ///
    /// Duplicate end events (a lift followed by a synthetic leave) keep
    /// the deadline of the first one.
    pub fn end_gesture(&mut self, now: Instant) {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Active(gesture) => {
                self.state = GestureState::Cooling(gesture);
                self.timer.arm(now + self.cooldown);
                debug!("gesture end; cooldown armed for {:?}", self.cooldown);
            }
            other => self.state = other,
        }
    }

    /// Advances the cooldown timer.
    ///
    /// Returns true exactly once per gesture, when the cooldown expires:
    /// the snapshot and last-hit memory are discarded and the host should
    /// clear its rendered strokes. Safe to call at any time; outside the
    /// cooling phase it is a no-op.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !matches!(self.state, GestureState::Cooling(_)) {
            return false;
        }
        if !self.timer.expired(now) {
            return false;
        }

        self.timer.cancel();
        self.state = GestureState::Idle;
        debug!("cooldown expired; gesture torn down");
        if self.revoke_after_gesture {
            self.draw_enabled = false;
            debug!("drawing revoked until re-armed");
        }
        true
    }

    /// Normalizes a raw platform event and drives the state machine.
    ///
    /// `origin` is the surface's top-left page offset; while a gesture is
    /// in flight the origin frozen at its start is used instead, matching
    /// the frozen layout. `layout` is the layout provider, called
    /// synchronously only when a fresh gesture actually starts. Start
    /// events also feed the double-tap arming detector when that mode is
    /// configured. Mouse start events with a non-primary button are
    /// ignored.
    pub fn handle_event<F>(
        &mut self,
        event: &InputEvent,
        origin: Point,
        now: Instant,
        layout: F,
    ) -> MoveOutcome
    where
        F: FnOnce() -> LayoutSnapshot,
    {
        let origin = match &self.state {
            GestureState::Active(gesture) | GestureState::Cooling(gesture) => gesture.origin,
            GestureState::Idle => origin,
        };
        let samples = normalize(event, origin, !self.multi_pointer);

        match event.phase() {
            EventPhase::Start => {
                if let InputEvent::Mouse { button, .. } = event {
                    if *button != MouseButton::Left {
                        return MoveOutcome::default();
                    }
                }
                if !self.draw_enabled && self.arming == ArmingMode::DoubleTap {
                    if self.double_tap.register_tap(now) {
                        self.draw_enabled = true;
                        debug!("double tap armed drawing");
                    } else {
                        return MoveOutcome::default();
                    }
                }
                // Only a start that actually begins a fresh gesture
                // measures the layout; a resumed gesture keeps its frozen
                // snapshot and a rejected start never needs one.
                let snapshot = if self.phase() == GesturePhase::Idle && self.draw_enabled {
                    layout()
                } else {
                    LayoutSnapshot::default()
                };
                self.start_gesture(origin, snapshot, &samples);
                MoveOutcome::default()
            }
            EventPhase::Move => self.move_gesture(&samples),
            EventPhase::End => {
                self.end_gesture(now);
                MoveOutcome::default()
            }
        }
    }

    fn notify_count(&mut self) {
        let count = self.selection.len();
        for observer in &mut self.observers {
            observer(count);
        }
    }

    fn flush_notifications(&mut self) {
        if self.selection.take_dirty() {
            self.notify_count();
        }
    }
}

impl Default for LassoEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
