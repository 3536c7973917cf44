//! The set of currently instantiated windows, keyed by origin.
//!
//! Leaf-level storage: lookup, insert, remove and snapshot iteration only.
//! Composition decisions live above it, in the wrapper factory and the
//! activity chain helpers.

use std::collections::HashMap;

use crate::shell::window::AppWindow;

#[derive(Default)]
pub struct WindowRegistry {
    windows: HashMap<String, AppWindow>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.windows.contains_key(origin)
    }

    pub fn get(&self, origin: &str) -> Option<&AppWindow> {
        self.windows.get(origin)
    }

    pub fn get_mut(&mut self, origin: &str) -> Option<&mut AppWindow> {
        self.windows.get_mut(origin)
    }

    /// Insert a window under its configured origin, returning any window that
    /// previously occupied the key.
    pub fn insert(&mut self, window: AppWindow) -> Option<AppWindow> {
        self.windows.insert(window.origin().to_string(), window)
    }

    pub fn remove(&mut self, origin: &str) -> Option<AppWindow> {
        self.windows.remove(origin)
    }

    /// Snapshot of all keys, for iteration that may mutate the registry.
    pub fn origins(&self) -> Vec<String> {
        self.windows.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AppWindow)> {
        self.windows.iter()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
