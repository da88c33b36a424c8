//! In-memory value store.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::ports::ValueStore;

/// Thread-safe in-memory store of resolved values.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryValueStore {
    values: Arc<RwLock<IndexMap<String, String>>>,
}

impl InMemoryValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Returns true if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl ValueStore for InMemoryValueStore {
    fn set(&self, name: &str, value: &str) {
        self.values
            .write()
            .insert(name.to_string(), value.to_string());
    }

    fn get(&self, name: &str) -> Option<String> {
        self.values.read().get(name).cloned()
    }

    fn snapshot(&self) -> Vec<(String, String)> {
        self.values
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_get() {
        let store = InMemoryValueStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("--a"), None);

        store.set("--a", "red");
        assert_eq!(store.get("--a").as_deref(), Some("red"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let store = InMemoryValueStore::new();
        store.set("--a", "red");
        store.set("--a", "blue");
        assert_eq!(store.get("--a").as_deref(), Some("blue"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryValueStore::new();
        let other = store.clone();
        other.set("--b", "1px");
        assert_eq!(store.get("--b").as_deref(), Some("1px"));
    }

    #[test]
    fn test_snapshot_keeps_first_write_order() {
        let store = InMemoryValueStore::new();
        store.set("--z", "1");
        store.set("--a", "2");
        store.set("--z", "3");
        assert_eq!(
            store.snapshot(),
            vec![
                ("--z".to_string(), "3".to_string()),
                ("--a".to_string(), "2".to_string()),
            ]
        );
    }
}
