//! Ordered, duplicate-free selection storage.

/// Ordered set of selected item indices.
///
/// Enumeration preserves insertion order. `add` and `remove` are
/// idempotent; mutations that actually change membership mark the set
/// dirty so the owning engine can emit a single count-change notification
/// per input frame instead of one per item.
#[derive(Debug, Default)]
pub struct SelectionSet {
    items: Vec<usize>,
    dirty: bool,
}

impl SelectionSet {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item; no-op if already present.
    ///
    /// Returns true if membership changed.
    pub fn add(&mut self, item: usize) -> bool {
        if self.contains(item) {
            return false;
        }
        self.items.push(item);
        self.dirty = true;
        true
    }

    /// Removes an item; no-op if absent.
    ///
    /// Returns true if membership changed.
    pub fn remove(&mut self, item: usize) -> bool {
        let Some(position) = self.items.iter().position(|&held| held == item) else {
            return false;
        };
        self.items.remove(position);
        self.dirty = true;
        true
    }

    /// Returns true if the item is currently selected.
    pub fn contains(&self, item: usize) -> bool {
        self.items.contains(&item)
    }

    /// Replaces the selection with the given items, in the given order.
    pub fn select_all<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = usize>,
    {
        let previous = std::mem::take(&mut self.items);
        for item in items {
            if !self.items.contains(&item) {
                self.items.push(item);
            }
        }
        if self.items != previous {
            self.dirty = true;
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.dirty = true;
        }
    }

    /// Selected item indices in insertion order.
    pub fn to_list(&self) -> &[usize] {
        &self.items
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Takes and clears the pending-notification flag.
    ///
    /// The engine calls this once after a batch of operations; a true
    /// result means at least one membership change happened since the
    /// last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Human-readable count summary for count observers.
    pub fn summary(&self) -> String {
        let count = self.items.len();
        if count == 1 {
            "1 item selected".to_string()
        } else {
            format!("{count} items selected")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent_and_keeps_order() {
        let mut set = SelectionSet::new();
        assert!(set.add(2));
        assert!(set.add(0));
        assert!(!set.add(2));
        assert_eq!(set.to_list(), &[2, 0]);
    }

    #[test]
    fn remove_absent_item_is_a_noop() {
        let mut set = SelectionSet::new();
        set.add(1);
        set.take_dirty();
        assert!(!set.remove(9));
        assert!(!set.take_dirty());
        assert!(set.remove(1));
        assert!(set.take_dirty());
    }

    #[test]
    fn select_all_replaces_in_order() {
        let mut set = SelectionSet::new();
        set.add(5);
        set.select_all([0, 1, 2]);
        assert_eq!(set.to_list(), &[0, 1, 2]);
        assert!(set.take_dirty());
    }

    #[test]
    fn select_all_with_identical_contents_stays_clean() {
        let mut set = SelectionSet::new();
        set.select_all([0, 1]);
        set.take_dirty();
        set.select_all([0, 1]);
        assert!(!set.take_dirty());
    }

    #[test]
    fn clear_marks_dirty_only_when_nonempty() {
        let mut set = SelectionSet::new();
        set.clear();
        assert!(!set.take_dirty());
        set.add(3);
        set.take_dirty();
        set.clear();
        assert!(set.take_dirty());
        assert!(set.is_empty());
    }

    #[test]
    fn summary_pluralizes() {
        let mut set = SelectionSet::new();
        assert_eq!(set.summary(), "0 items selected");
        set.add(0);
        assert_eq!(set.summary(), "1 item selected");
        set.add(1);
        assert_eq!(set.summary(), "2 items selected");
    }
}
