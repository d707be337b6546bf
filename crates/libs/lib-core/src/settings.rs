//! # Settings Service
//!
//! Durable language and location preferences.
//!
//! [`SettingsService`] reads both values from a [`SettingsStore`] once on
//! construction and writes through on every mutation. Screens hold a
//! [`SharedSettings`] handle instead of touching ambient globals.
//!
//! ## Stored keys
//!
//! | Key                | Values              | Default |
//! |--------------------|---------------------|---------|
//! | `app_language`     | `en` / `hi`         | `en`    |
//! | `location_enabled` | `"true"` / `"false"`| `true`  |
//!
//! Unknown or corrupt values fall back to the default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use shared::Locale;

use crate::error::Result;

pub const LANGUAGE_KEY: &str = "app_language";
pub const LOCATION_ENABLED_KEY: &str = "location_enabled";

/// String key-value store that survives restarts.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ========== JSON File Store ==========

/// Settings kept as a flat JSON object in a single file.
///
/// The whole file is rewritten on every `set`.
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store, starting empty when the file is missing or unreadable.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<BTreeMap<String, String>>(&json) {
                Ok(values) => {
                    tracing::info!("Loaded settings from {:?}", path);
                    values
                }
                Err(e) => {
                    tracing::warn!("Corrupt settings file {:?}: {}. Using defaults.", path, e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                tracing::debug!("No settings file at {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&*values)?;
        std::fs::write(&self.path, json)?;
        tracing::info!(key, value, "Saved setting to {:?}", self.path);
        Ok(())
    }
}

// ========== Memory Store ==========

/// Non-durable store, used when the settings file cannot be written and in tests.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ========== Settings Service ==========

/// Shared read/write handle passed to every screen.
pub type SharedSettings = Arc<RwLock<SettingsService>>;

pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    locale: Locale,
    location_enabled: bool,
}

impl SettingsService {
    /// Initialise from the durable store.
    pub fn load(store: Arc<dyn SettingsStore>) -> Self {
        let locale = store
            .get(LANGUAGE_KEY)
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or_default();
        // Only a literal "true" enables location once a value has been stored
        let location_enabled = match store.get(LOCATION_ENABLED_KEY) {
            None => true,
            Some(value) => value == "true",
        };

        Self {
            store,
            locale,
            location_enabled,
        }
    }

    pub fn shared(self) -> SharedSettings {
        Arc::new(RwLock::new(self))
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn location_enabled(&self) -> bool {
        self.location_enabled
    }

    /// Change the language and persist it.
    ///
    /// The in-memory value changes even when the write fails.
    pub fn set_locale(&mut self, locale: Locale) -> Result<()> {
        self.locale = locale;
        self.store.set(LANGUAGE_KEY, locale.code())
    }

    pub fn set_location_enabled(&mut self, enabled: bool) -> Result<()> {
        self.location_enabled = enabled;
        self.store
            .set(LOCATION_ENABLED_KEY, if enabled { "true" } else { "false" })
    }

    /// Flip the location flag, returning the new value.
    pub fn toggle_location(&mut self) -> Result<bool> {
        let enabled = !self.location_enabled;
        self.set_location_enabled(enabled)?;
        Ok(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Arc<dyn SettingsStore> {
        Arc::new(MemoryStore::default())
    }

    // ========== Defaults Tests ==========

    #[test]
    fn test_defaults_when_store_empty() {
        let settings = SettingsService::load(memory());
        assert_eq!(settings.locale(), Locale::En);
        assert!(settings.location_enabled());
    }

    #[test]
    fn test_corrupt_values_fall_back() {
        let store = memory();
        store.set(LANGUAGE_KEY, "klingon").unwrap();
        store.set(LOCATION_ENABLED_KEY, "maybe").unwrap();

        let settings = SettingsService::load(store);
        assert_eq!(settings.locale(), Locale::En);
        assert!(!settings.location_enabled());
    }

    #[test]
    fn test_stored_true_enables_location() {
        let store = memory();
        store.set(LOCATION_ENABLED_KEY, "true").unwrap();
        assert!(SettingsService::load(store).location_enabled());
    }

    // ========== Write-through Tests ==========

    #[test]
    fn test_toggle_twice_restores_store_and_state() {
        let store = memory();
        let mut settings = SettingsService::load(store.clone());
        let original = settings.location_enabled();

        settings.toggle_location().unwrap();
        assert_eq!(store.get(LOCATION_ENABLED_KEY).as_deref(), Some("false"));

        settings.toggle_location().unwrap();
        assert_eq!(settings.location_enabled(), original);
        assert_eq!(store.get(LOCATION_ENABLED_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_locale_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        {
            let mut settings = SettingsService::load(Arc::new(JsonFileStore::open(&path)));
            settings.set_locale(Locale::Hi).unwrap();
            settings.set_location_enabled(false).unwrap();
        }

        let reloaded = SettingsService::load(Arc::new(JsonFileStore::open(&path)));
        assert_eq!(reloaded.locale(), Locale::Hi);
        assert!(!reloaded.location_enabled());
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(LANGUAGE_KEY), None);
        store.set(LANGUAGE_KEY, "hi").unwrap();
        assert_eq!(JsonFileStore::open(&path).get(LANGUAGE_KEY).as_deref(), Some("hi"));
    }
}
