//! Gesture trace recording and replay.
//!
//! A trace captures one selection session so it can be replayed headless:
//! the item layout measured at gesture start plus the ordered input
//! frames. Traces serialize to JSON with a version field, optionally
//! gzip-compressed when the file name ends in `.gz`.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::LassoEngine;
use crate::geometry::{Point, Rect};
use crate::input::{EventPhase, InputEvent, TouchContact};
use crate::layout::LayoutSnapshot;

const CURRENT_VERSION: u32 = 1;

/// Time credited to each replayed frame.
const FRAME_STEP: Duration = Duration::from_millis(10);

/// Errors that can occur while reading or writing a trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to access trace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported trace version {found}")]
    UnsupportedVersion { found: u32 },
}

/// One recorded pointer sample, already surface-relative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceSample {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

/// Item bounding box as measured by the layout provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TraceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One recorded input frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum TraceFrame {
    /// Press; begins a gesture, or resumes one still in its cooldown
    Start { samples: Vec<TraceSample> },
    /// Drag
    Move { samples: Vec<TraceSample> },
    /// Lift, leave, or cancel
    End,
    /// Idle gap between frames, in milliseconds
    Wait { ms: u64 },
}

/// A recorded selection session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    /// Format version for forward compatibility
    pub version: u32,
    /// RFC 3339 timestamp of the recording
    pub recorded_at: String,
    /// Item boxes in item order
    pub layout: Vec<TraceRect>,
    /// Input frames in arrival order
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    /// Creates a trace stamped with the current time.
    pub fn new(layout: Vec<TraceRect>, frames: Vec<TraceFrame>) -> Self {
        Self {
            version: CURRENT_VERSION,
            recorded_at: Utc::now().to_rfc3339(),
            layout,
            frames,
        }
    }

    /// Builds the layout snapshot the replayed gestures select against.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot::from_rects(
            self.layout
                .iter()
                .map(|rect| Rect::new(rect.x, rect.y, rect.width, rect.height)),
        )
    }
}

/// Loads a trace, transparently decompressing gzip files.
pub fn load_trace(path: &Path) -> Result<Trace, TraceError> {
    let raw = fs::read(path)?;

    // Gzip magic bytes; the extension is not trusted on read.
    let text = if raw.starts_with(&[0x1f, 0x8b]) {
        let mut decoder = GzDecoder::new(raw.as_slice());
        let mut decoded = Vec::new();
        decoder.read_to_end(&mut decoded)?;
        decoded
    } else {
        raw
    };

    let trace: Trace = serde_json::from_slice(&text)?;
    if trace.version > CURRENT_VERSION {
        return Err(TraceError::UnsupportedVersion {
            found: trace.version,
        });
    }

    debug!(
        "loaded trace from {}: {} items, {} frames",
        path.display(),
        trace.layout.len(),
        trace.frames.len()
    );
    Ok(trace)
}

/// Saves a trace as JSON, gzip-compressing when the path ends in `.gz`.
pub fn save_trace(trace: &Trace, path: &Path) -> Result<(), TraceError> {
    let json = serde_json::to_vec_pretty(trace)?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        let file = fs::File::create(path)?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(&json)?;
        encoder.finish()?;
    } else {
        fs::write(path, json)?;
    }

    debug!("saved trace to {}", path.display());
    Ok(())
}

/// Totals reported by [`replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Input frames processed
    pub frames: usize,
    /// Stroke segments the renderer would have drawn
    pub segments: usize,
}

/// Replays a recorded trace through an engine.
///
/// Frames are delivered as raw touch events so the engine's own
/// normalization (including single-pointer truncation) applies, with a
/// synthetic clock advancing [`FRAME_STEP`] per frame plus any recorded
/// waits. The trailing cooldown is allowed to lapse so the engine ends
/// the session torn down.
pub fn replay(trace: &Trace, engine: &mut LassoEngine) -> ReplayStats {
    let origin = Point::new(0.0, 0.0);
    let mut now = Instant::now();
    let mut segments = 0;

    for frame in &trace.frames {
        engine.advance(now);
        match frame {
            TraceFrame::Start { samples } => {
                let event = InputEvent::Touch {
                    phase: EventPhase::Start,
                    contacts: contacts_of(samples),
                };
                engine.handle_event(&event, origin, now, || trace.snapshot());
            }
            TraceFrame::Move { samples } => {
                let event = InputEvent::Touch {
                    phase: EventPhase::Move,
                    contacts: contacts_of(samples),
                };
                segments += engine
                    .handle_event(&event, origin, now, || trace.snapshot())
                    .segments
                    .len();
            }
            TraceFrame::End => {
                let event = InputEvent::Touch {
                    phase: EventPhase::End,
                    contacts: Vec::new(),
                };
                engine.handle_event(&event, origin, now, || trace.snapshot());
            }
            TraceFrame::Wait { ms } => {
                now += Duration::from_millis(*ms);
            }
        }
        now += FRAME_STEP;
    }

    engine.advance(now + engine.cooldown());

    ReplayStats {
        frames: trace.frames.len(),
        segments,
    }
}

fn contacts_of(samples: &[TraceSample]) -> Vec<TouchContact> {
    samples
        .iter()
        .map(|sample| TouchContact {
            id: sample.id,
            page_x: sample.x,
            page_y: sample.y,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SelectionPolicy};
    use crate::engine::GesturePhase;

    fn two_box_trace(frames: Vec<TraceFrame>) -> Trace {
        Trace::new(
            vec![
                TraceRect {
                    x: 0.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                },
                TraceRect {
                    x: 20.0,
                    y: 0.0,
                    width: 10.0,
                    height: 10.0,
                },
            ],
            frames,
        )
    }

    fn single(id: u32, x: f64, y: f64) -> Vec<TraceSample> {
        vec![TraceSample { id, x, y }]
    }

    #[test]
    fn json_round_trip_preserves_frames() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gesture.json");
        let trace = two_box_trace(vec![
            TraceFrame::Start {
                samples: single(0, 5.0, 5.0),
            },
            TraceFrame::End,
        ]);

        save_trace(&trace, &path).unwrap();
        let loaded = load_trace(&path).unwrap();
        assert_eq!(loaded.layout.len(), 2);
        assert_eq!(loaded.frames.len(), 2);
    }

    #[test]
    fn gz_extension_round_trips_compressed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gesture.json.gz");
        let trace = two_box_trace(vec![TraceFrame::Start {
            samples: single(0, 5.0, 5.0),
        }]);

        save_trace(&trace, &path).unwrap();

        // The file on disk is gzip, not plain JSON.
        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..2], &[0x1f, 0x8b]);

        let loaded = load_trace(&path).unwrap();
        assert_eq!(loaded.frames.len(), 1);
    }

    #[test]
    fn future_versions_are_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("gesture.json");
        let mut trace = two_box_trace(Vec::new());
        trace.version = CURRENT_VERSION + 1;
        save_trace(&trace, &path).unwrap();

        match load_trace(&path) {
            Err(TraceError::UnsupportedVersion { found }) => {
                assert_eq!(found, CURRENT_VERSION + 1);
            }
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn replay_drives_a_full_session() {
        let trace = two_box_trace(vec![
            TraceFrame::Start {
                samples: single(0, 5.0, 5.0),
            },
            TraceFrame::Move {
                samples: single(0, 15.0, 5.0),
            },
            TraceFrame::Move {
                samples: single(0, 25.0, 5.0),
            },
            TraceFrame::End,
        ]);

        let mut engine = LassoEngine::default();
        let stats = replay(&trace, &mut engine);

        assert_eq!(stats.frames, 4);
        assert_eq!(stats.segments, 2);
        assert_eq!(engine.selection(), &[0, 1]);
        // The trailing cooldown lapsed.
        assert_eq!(engine.phase(), GesturePhase::Idle);
    }

    #[test]
    fn replay_respects_the_toggle_policy() {
        let trace = two_box_trace(vec![
            TraceFrame::Start {
                samples: single(0, 5.0, 5.0),
            },
            TraceFrame::Move {
                samples: single(0, 15.0, 5.0),
            },
            TraceFrame::Move {
                samples: single(0, 5.0, 5.0),
            },
            TraceFrame::End,
        ]);

        let mut config = Config::default();
        config.selection.policy = SelectionPolicy::Toggle;
        let mut engine = LassoEngine::new(&config);
        replay(&trace, &mut engine);

        assert!(engine.selection().is_empty());
    }

    #[test]
    fn recorded_wait_lets_the_cooldown_lapse_between_gestures() {
        // Two taps separated by a wait longer than the cooldown: two
        // distinct gestures, both selections kept (additive).
        let trace = two_box_trace(vec![
            TraceFrame::Start {
                samples: single(0, 5.0, 5.0),
            },
            TraceFrame::End,
            TraceFrame::Wait { ms: 200 },
            TraceFrame::Start {
                samples: single(0, 25.0, 5.0),
            },
            TraceFrame::End,
        ]);

        let mut engine = LassoEngine::default();
        replay(&trace, &mut engine);
        assert_eq!(engine.selection(), &[0, 1]);
    }
}
