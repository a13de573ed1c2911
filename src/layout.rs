//! Frozen item layout snapshots.

use crate::geometry::Rect;

/// One selectable item paired with its measured bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    /// Index of the item in the host's item list
    pub item: usize,
    /// Bounding box in surface-local coordinates
    pub rect: Rect,
}

/// Ordered mapping from item index to bounding box.
///
/// Captured once from the layout provider at gesture start and held fixed
/// until the gesture ends; items do not move mid-gesture by contract. A
/// snapshot with zero entries is valid (nothing to select).
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    entries: Vec<LayoutEntry>,
}

impl LayoutSnapshot {
    /// Creates a snapshot from explicit item/box pairs.
    pub fn new(entries: Vec<LayoutEntry>) -> Self {
        Self { entries }
    }

    /// Creates a snapshot from boxes in item order, numbering items from 0.
    pub fn from_rects<I>(rects: I) -> Self
    where
        I: IntoIterator<Item = Rect>,
    {
        Self {
            entries: rects
                .into_iter()
                .enumerate()
                .map(|(item, rect)| LayoutEntry { item, rect })
                .collect(),
        }
    }

    /// Returns the snapshot entries in capture order.
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Number of selectable items in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rects_numbers_items_in_order() {
        let snapshot = LayoutSnapshot::from_rects(vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        ]);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.entries()[0].item, 0);
        assert_eq!(snapshot.entries()[1].item, 1);
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot = LayoutSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.entries().len(), 0);
    }
}
