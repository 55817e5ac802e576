//! Player preferences
//!
//! Persisted separately from the leaderboard. Presentation and host behaviour
//! only; gameplay rules are fixed.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StorageError, load_json, save_json};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pause automatically when the window loses focus
    pub pause_on_blur: bool,
    /// Show FPS counter
    pub show_fps: bool,
    /// Reduced motion (fixed hue, popups don't drift)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pause_on_blur: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "pixelPopSettings";

    /// Load settings, defaults if absent or corrupt
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            pause_on_blur: false,
            show_fps: true,
            reduced_motion: true,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"show_fps": true}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.show_fps);
        assert!(settings.pause_on_blur);
        assert!(!settings.reduced_motion);
    }
}
