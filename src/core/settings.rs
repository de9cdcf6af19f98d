//! Settings store - the single persisted settings record.
//!
//! Reads always produce a fully populated [`Settings`]: whatever is persisted under
//! [`SETTINGS_KEY`] is merged over the defaults, and any storage or parse failure yields
//! the defaults outright.

use crate::{
    errors::Result,
    models::{Setting, Settings},
    storage::KeyValueStore,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Storage key of the serialized settings object
pub const SETTINGS_KEY: &str = "talk2trade-settings";

/// Owns the settings record.
pub struct SettingsStore {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsStore {
    /// Creates a settings store over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current settings, defaults filled in for anything missing.
    pub async fn get(&self) -> Settings {
        self.read().await.unwrap_or_else(|e| {
            warn!("Failed to load settings from storage: {e}");
            Settings::default()
        })
    }

    /// Overwrites one field and returns the full new record.
    ///
    /// The value is stored as given; range checks belong to the caller. When the stored
    /// record cannot be read, the change is applied to the defaults and not saved.
    pub async fn set(&self, setting: Setting) -> Settings {
        let mut settings = match self.read().await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to load settings from storage, change will not be saved: {e}");
                let mut settings = Settings::default();
                settings.apply(setting);
                return settings;
            }
        };
        settings.apply(setting);

        match serde_json::to_string(&settings) {
            Ok(blob) => {
                if let Err(e) = self.store.set(SETTINGS_KEY, blob).await {
                    error!("Failed to save settings to storage: {e}");
                } else {
                    info!("Setting `{}` updated", setting.key());
                }
            }
            Err(e) => error!("Failed to serialize settings: {e}"),
        }

        settings
    }

    /// Deletes the persisted record and returns the defaults.
    pub async fn reset(&self) -> Settings {
        if let Err(e) = self.store.remove(SETTINGS_KEY).await {
            error!("Failed to reset settings: {e}");
        } else {
            info!("Settings reset to defaults");
        }
        Settings::default()
    }

    /// Persisted settings merged over the defaults. A missing or corrupt record reads as
    /// the defaults; only a failing store is an error.
    async fn read(&self) -> Result<Settings> {
        let Some(blob) = self.store.get(SETTINGS_KEY).await? else {
            debug!("No persisted settings, using defaults");
            return Ok(Settings::default());
        };

        Ok(match serde_json::from_str::<Value>(&blob) {
            Ok(Value::Object(stored)) => Settings::merged_over_defaults(&stored),
            Ok(other) => {
                warn!("Persisted settings are not an object ({other}), using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!("Persisted settings are corrupt, using defaults: {e}");
                Settings::default()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::models::{LanguageCode, Theme};
    use crate::storage::MemoryKeyValueStore;

    fn store_with(entries: &[(&str, &str)]) -> (Arc<MemoryKeyValueStore>, SettingsStore) {
        let kv = Arc::new(MemoryKeyValueStore::with_entries(entries.iter().copied()));
        let settings = SettingsStore::new(Arc::clone(&kv) as Arc<dyn KeyValueStore>);
        (kv, settings)
    }

    #[tokio::test]
    async fn test_get_on_empty_store_returns_defaults() {
        let (_, settings) = store_with(&[]);
        assert_eq!(settings.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_set_theme_then_get() {
        let (_, settings) = store_with(&[]);
        let returned = settings.set(Setting::Theme(Theme::Dark)).await;
        let expected = Settings {
            theme: Theme::Dark,
            ..Settings::default()
        };
        assert_eq!(returned, expected);
        assert_eq!(settings.get().await, expected);
    }

    #[tokio::test]
    async fn test_successive_sets_accumulate() {
        let (_, settings) = store_with(&[]);
        settings.set(Setting::Language(LanguageCode::Gu)).await;
        settings.set(Setting::VoiceSensitivity(0.9)).await;
        let current = settings.get().await;
        assert_eq!(current.language, LanguageCode::Gu);
        assert_eq!(current.voice_sensitivity, 0.9);
        assert!(current.notifications);
    }

    #[tokio::test]
    async fn test_reset_after_sets_returns_defaults() {
        let (kv, settings) = store_with(&[]);
        settings.set(Setting::KioskMode(true)).await;
        settings.set(Setting::Notifications(false)).await;

        assert_eq!(settings.reset().await, Settings::default());
        assert_eq!(settings.get().await, Settings::default());
        assert_eq!(kv.raw(SETTINGS_KEY).await, None);
    }

    #[tokio::test]
    async fn test_partial_blob_is_merged() {
        let (_, settings) = store_with(&[(SETTINGS_KEY, r#"{"offlineMode": false}"#)]);
        assert_eq!(
            settings.get().await,
            Settings {
                offline_mode: false,
                ..Settings::default()
            }
        );
    }

    #[tokio::test]
    async fn test_corrupt_or_non_object_blob_yields_defaults() {
        let (_, corrupt) = store_with(&[(SETTINGS_KEY, "{{{")]);
        assert_eq!(corrupt.get().await, Settings::default());

        let (_, array) = store_with(&[(SETTINGS_KEY, "[1, 2]")]);
        assert_eq!(array.get().await, Settings::default());
    }

    #[tokio::test]
    async fn test_unavailable_store_degrades_to_defaults() {
        let (kv, settings) = store_with(&[(SETTINGS_KEY, r#"{"theme": "dark"}"#)]);
        kv.set_failing(true);

        assert_eq!(settings.get().await, Settings::default());
        let after_set = settings.set(Setting::Theme(Theme::System)).await;
        assert_eq!(after_set.theme, Theme::System);
        assert_eq!(settings.reset().await, Settings::default());

        kv.set_failing(false);
        assert_eq!(settings.get().await.theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_set_during_read_failure_keeps_stored_record() {
        let stored = r#"{"theme":"dark","kioskMode":true,"language":"ta"}"#;
        let (kv, settings) = store_with(&[(SETTINGS_KEY, stored)]);

        kv.set_failing_reads(true);
        let returned = settings.set(Setting::Notifications(false)).await;
        assert_eq!(
            returned,
            Settings {
                notifications: false,
                ..Settings::default()
            }
        );
        kv.set_failing_reads(false);

        assert_eq!(kv.raw(SETTINGS_KEY).await.as_deref(), Some(stored));
        let current = settings.get().await;
        assert_eq!(current.theme, Theme::Dark);
        assert!(current.kiosk_mode);
        assert_eq!(current.language, LanguageCode::Ta);
        assert!(current.notifications);
    }
}
