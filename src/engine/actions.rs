//! Named host actions over the current selection.

use std::collections::HashMap;

type ActionFn = Box<dyn FnMut(&[usize]) -> bool>;

/// Registry of named callbacks the host wires to its UI controls.
///
/// Each action receives the selected item indices when run. The boolean
/// return value decides whether the selection survives the action: false
/// asks the engine to clear it (e.g. after a "delete selected" action).
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, ActionFn>,
}

impl ActionRegistry {
    /// Registers an action under a name, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, action: F)
    where
        F: FnMut(&[usize]) -> bool + 'static,
    {
        self.actions.insert(name.into(), Box::new(action));
    }

    /// Runs the named action against `selection`.
    ///
    /// Returns the action's keep-selection flag, or None if no action is
    /// registered under that name.
    pub fn run(&mut self, name: &str, selection: &[usize]) -> Option<bool> {
        self.actions.get_mut(name).map(|action| action(selection))
    }
}
