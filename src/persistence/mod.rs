//! Key-value persistence
//!
//! The game persists two small JSON blobs (leaderboard, settings) under fixed
//! keys. Backends:
//! - `LocalStore`: browser LocalStorage (wasm32)
//! - `FileStore`: one file per key in a directory (native)
//! - `MemoryStore`: in-process map (tests, headless runs)

pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;

#[cfg(target_arch = "wasm32")]
pub mod local;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

use thiserror::Error;

/// Errors raised when writing to a store
///
/// Reads never fail: a missing or unreadable value is reported as absent.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend is unavailable")]
    Unavailable,
    #[error("storage write rejected: {0}")]
    Write(String),
    #[error("storage io error")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("could not serialize value")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
}

/// Durable string-keyed store
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Load and deserialize a JSON value, `None` if absent or malformed
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding malformed value under {key:?}: {e}");
            None
        }
    }
}

/// Serialize a value to JSON and store it
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
