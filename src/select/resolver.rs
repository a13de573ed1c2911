//! Per-frame collision resolution against a layout snapshot.

use std::collections::HashMap;

use crate::config::SelectionPolicy;
use crate::input::Pointer;
use crate::layout::LayoutSnapshot;

use super::set::SelectionSet;

/// Tests pointer samples against a frozen layout and applies the active
/// selection policy.
///
/// Owns the per-gesture bookkeeping: which boxes have been retired from
/// testing (additive policy) and which item each pointer touched last
/// (toggle policy). Created at gesture start, discarded at gesture end.
#[derive(Debug)]
pub struct CollisionResolver {
    snapshot: LayoutSnapshot,
    policy: SelectionPolicy,
    /// Boxes skipped for the rest of the gesture. Selection is monotonic
    /// under the additive policy, so a hit box never needs re-testing;
    /// under toggle a box must stay testable so it can be deselected.
    retired: Vec<bool>,
    /// Last item each pointer touched, keyed by pointer id.
    last_hit: HashMap<u32, usize>,
}

impl CollisionResolver {
    /// Creates a resolver over a snapshot captured at gesture start.
    pub fn new(snapshot: LayoutSnapshot, policy: SelectionPolicy) -> Self {
        let retired = vec![false; snapshot.len()];
        Self {
            snapshot,
            policy,
            retired,
            last_hit: HashMap::new(),
        }
    }

    /// The layout snapshot this resolver tests against.
    pub fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    /// Forgets all last-hit memory (used when a gesture resumes after a
    /// re-press, matching a fresh press).
    pub fn reset_last_hits(&mut self) {
        self.last_hit.clear();
    }

    /// Resolves one frame of samples, mutating `selection` per the policy.
    ///
    /// Returns true if selection membership changed at least once during
    /// the call, so the caller can emit a single batched notification for
    /// the whole frame.
    ///
    /// Toggle suppression compares against the table as it stood when the
    /// frame began: a pointer lingering inside the box it last hit makes
    /// no change. A pointer that hits nothing this frame forgets its last
    /// hit, so re-entering a box after leaving it toggles afresh.
    pub fn resolve(&mut self, samples: &[Pointer], selection: &mut SelectionSet) -> bool {
        let mut frame_hits: HashMap<u32, usize> = HashMap::new();

        for (index, entry) in self.snapshot.entries().iter().enumerate() {
            if self.retired[index] {
                continue;
            }
            for sample in samples {
                if !entry.rect.intersects(sample.x, sample.y) {
                    continue;
                }
                match self.policy {
                    SelectionPolicy::Additive => {
                        selection.add(entry.item);
                        self.retired[index] = true;
                    }
                    SelectionPolicy::Toggle => {
                        if self.last_hit.get(&sample.id) != Some(&entry.item) {
                            if selection.contains(entry.item) {
                                selection.remove(entry.item);
                            } else {
                                selection.add(entry.item);
                            }
                        }
                    }
                }
                frame_hits.insert(sample.id, entry.item);
            }
        }

        for sample in samples {
            match frame_hits.get(&sample.id) {
                Some(item) => {
                    self.last_hit.insert(sample.id, *item);
                }
                None => {
                    self.last_hit.remove(&sample.id);
                }
            }
        }

        selection.take_dirty()
    }
}
