//! In-memory store

use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

/// Store backed by a `HashMap`; contents vanish with the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail (exercises degraded persistence)
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            read_only: true,
        }
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write(format!("{key} is read-only")));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_key() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("pixelPopLeaderboard", "[]").unwrap();
        store.set("pixelPopLeaderboard", "[1]").unwrap();
        store.set("pixelPopSettings", "{}").unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("pixelPopLeaderboard").as_deref(), Some("[1]"));
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut store = MemoryStore::read_only();
        let err = store.set("k", "v").unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
        assert!(store.is_empty());
        assert_eq!(store.get("k"), None);
    }
}
