//! Stroke segment pairing for visual feedback.

use crate::geometry::Point;
use crate::input::Pointer;

/// One drawable line segment between consecutive samples of a pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// Pairs each pointer's previous sample with its current sample.
///
/// A segment is emitted for a pointer id only when both lists carry a
/// sample with that id; pointers that appear in just one of the two lists
/// (newly arrived or just lifted) produce no segment for that frame.
pub fn pair_segments(prev: &[Pointer], curr: &[Pointer]) -> Vec<Segment> {
    prev.iter()
        .filter_map(|earlier| {
            curr.iter()
                .find(|later| later.id == earlier.id)
                .map(|later| Segment {
                    from: earlier.position(),
                    to: later.position(),
                })
        })
        .collect()
}

/// Rolling segment emitter over the lifetime of one gesture.
///
/// Purely presentational: a host that discards its output (headless
/// selection) gets identical selection results, since pairing never feeds
/// back into collision resolution.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    prev: Vec<Pointer>,
}

impl StrokeRecorder {
    /// Starts recording from the gesture's initial samples.
    pub fn begin(samples: &[Pointer]) -> Self {
        Self {
            prev: samples.to_vec(),
        }
    }

    /// Restarts pairing from the given samples without emitting segments.
    ///
    /// Used when a gesture resumes after a re-press so the stroke does not
    /// connect across the lift.
    pub fn rebase(&mut self, samples: &[Pointer]) {
        self.prev = samples.to_vec();
    }

    /// Emits the segments between the previous frame and `curr`, then
    /// makes `curr` the previous frame.
    pub fn advance(&mut self, curr: &[Pointer]) -> Vec<Segment> {
        let segments = pair_segments(&self.prev, curr);
        self.prev = curr.to_vec();
        segments
    }
}
