//! Browser LocalStorage store

use super::{KeyValueStore, StorageError};

/// Store backed by `window.localStorage`
///
/// When storage is unavailable (private browsing, disabled cookies) reads
/// return nothing and writes fail with `StorageError::Unavailable`.
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - scores will not persist");
        }
        Self { storage }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}
