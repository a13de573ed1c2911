//! Canonical pointer samples and raw-event normalization.

use crate::geometry::Point;

use super::events::InputEvent;

/// Synthetic pointer id used for single-cursor devices (mouse, pen).
pub const MOUSE_POINTER_ID: u32 = 0;

/// One canonical pointer sample at a single instant.
///
/// `id` is stable across consecutive samples of the same physical contact
/// for the duration of a gesture. Coordinates are surface-relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Creates a new pointer sample.
    pub fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Returns the sample position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Converts a raw input event into an ordered list of pointer samples.
///
/// Mouse and pen events yield exactly one sample with [`MOUSE_POINTER_ID`];
/// touch events yield one sample per active contact in device order,
/// keeping the device-assigned contact id. Coordinates are computed as
/// `page coordinate - origin`.
///
/// When `single_pointer` is set, only the first sample is retained
/// regardless of device capability. An event with zero active contacts
/// (possible on end events) yields an empty list; that is not an error,
/// it means "no active pointers this frame."
pub fn normalize(event: &InputEvent, origin: Point, single_pointer: bool) -> Vec<Pointer> {
    let mut samples = match event {
        InputEvent::Mouse { page_x, page_y, .. } | InputEvent::Pen { page_x, page_y, .. } => {
            vec![Pointer::new(
                MOUSE_POINTER_ID,
                page_x - origin.x,
                page_y - origin.y,
            )]
        }
        InputEvent::Touch { contacts, .. } => contacts
            .iter()
            .map(|contact| {
                Pointer::new(
                    contact.id,
                    contact.page_x - origin.x,
                    contact.page_y - origin.y,
                )
            })
            .collect(),
    };

    if single_pointer {
        samples.truncate(1);
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::{EventPhase, MouseButton, TouchContact};

    #[test]
    fn mouse_event_yields_one_origin_relative_sample() {
        let event = InputEvent::Mouse {
            phase: EventPhase::Move,
            button: MouseButton::Left,
            page_x: 120.0,
            page_y: 80.0,
        };
        let samples = normalize(&event, Point::new(20.0, 30.0), false);
        assert_eq!(samples, vec![Pointer::new(MOUSE_POINTER_ID, 100.0, 50.0)]);
    }

    #[test]
    fn touch_event_keeps_contact_ids_and_order() {
        let event = InputEvent::Touch {
            phase: EventPhase::Move,
            contacts: vec![
                TouchContact {
                    id: 7,
                    page_x: 10.0,
                    page_y: 10.0,
                },
                TouchContact {
                    id: 3,
                    page_x: 40.0,
                    page_y: 40.0,
                },
            ],
        };
        let samples = normalize(&event, Point::new(0.0, 0.0), false);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].id, 7);
        assert_eq!(samples[1].id, 3);
    }

    #[test]
    fn single_pointer_mode_retains_first_sample_only() {
        let event = InputEvent::Touch {
            phase: EventPhase::Start,
            contacts: vec![
                TouchContact {
                    id: 1,
                    page_x: 5.0,
                    page_y: 5.0,
                },
                TouchContact {
                    id: 2,
                    page_x: 50.0,
                    page_y: 50.0,
                },
            ],
        };
        let samples = normalize(&event, Point::new(0.0, 0.0), true);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].id, 1);
    }

    #[test]
    fn zero_contact_end_event_yields_empty_list() {
        let event = InputEvent::Touch {
            phase: EventPhase::End,
            contacts: Vec::new(),
        };
        assert!(normalize(&event, Point::new(0.0, 0.0), false).is_empty());
    }
}
