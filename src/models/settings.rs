//! The application settings record.

use super::LanguageCode;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
    /// Follow the operating system
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        })
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(Error::InvalidInput {
                message: format!("Unknown theme `{s}` (expected light, dark or system)"),
            }),
        }
    }
}

/// User preferences. One record per device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Show toasts
    pub notifications: bool,
    /// Locked-down shop display
    pub kiosk_mode: bool,
    /// Warn when working without a connection
    pub offline_mode: bool,
    /// Default voice input language
    pub language: LanguageCode,
    /// Detect the language of typed or spoken input
    pub auto_detect_language: bool,
    /// Colour scheme
    pub theme: Theme,
    /// Microphone sensitivity in [0, 1]
    pub voice_sensitivity: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            kiosk_mode: false,
            offline_mode: true,
            language: LanguageCode::Hi,
            auto_detect_language: true,
            theme: Theme::Light,
            voice_sensitivity: 0.5,
        }
    }
}

impl Settings {
    /// Overlays a persisted (possibly partial or older) settings object on the defaults.
    ///
    /// Unknown keys are ignored. A known key whose value has the wrong shape keeps its
    /// default and is logged, the remaining keys still apply.
    #[must_use]
    pub fn merged_over_defaults(stored: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
            return defaults;
        };

        for (key, value) in stored {
            if !merged.contains_key(key) {
                tracing::debug!("Ignoring unknown persisted setting `{key}`");
                continue;
            }
            let previous = merged.insert(key.clone(), value.clone());
            if serde_json::from_value::<Self>(Value::Object(merged.clone())).is_err() {
                tracing::warn!("Ignoring invalid value for persisted setting `{key}`: {value}");
                if let Some(previous) = previous {
                    merged.insert(key.clone(), previous);
                }
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
    }

    /// Overwrites the single field named by `setting`.
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::Notifications(v) => self.notifications = v,
            Setting::KioskMode(v) => self.kiosk_mode = v,
            Setting::OfflineMode(v) => self.offline_mode = v,
            Setting::Language(v) => self.language = v,
            Setting::AutoDetectLanguage(v) => self.auto_detect_language = v,
            Setting::Theme(v) => self.theme = v,
            Setting::VoiceSensitivity(v) => self.voice_sensitivity = v,
        }
    }
}

/// One settings field together with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting {
    Notifications(bool),
    KioskMode(bool),
    OfflineMode(bool),
    Language(LanguageCode),
    AutoDetectLanguage(bool),
    Theme(Theme),
    VoiceSensitivity(f64),
}

impl Setting {
    /// Persisted field name
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Notifications(_) => "notifications",
            Self::KioskMode(_) => "kioskMode",
            Self::OfflineMode(_) => "offlineMode",
            Self::Language(_) => "language",
            Self::AutoDetectLanguage(_) => "autoDetectLanguage",
            Self::Theme(_) => "theme",
            Self::VoiceSensitivity(_) => "voiceSensitivity",
        }
    }

    /// Parses user text such as `theme` / `dark`. Keys accept the persisted camelCase
    /// name or a snake/kebab-case spelling.
    ///
    /// # Errors
    /// Returns [`Error::InvalidInput`] for an unknown key, a malformed value, or a
    /// voice sensitivity outside [0, 1].
    pub fn parse(key: &str, value: &str) -> Result<Self> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let setting = match normalized.as_str() {
            "notifications" => Self::Notifications(parse_bool(value)?),
            "kioskmode" => Self::KioskMode(parse_bool(value)?),
            "offlinemode" => Self::OfflineMode(parse_bool(value)?),
            "language" => Self::Language(value.parse()?),
            "autodetectlanguage" => Self::AutoDetectLanguage(parse_bool(value)?),
            "theme" => Self::Theme(value.parse()?),
            "voicesensitivity" => {
                let sensitivity: f64 = value.trim().parse().map_err(|_| Error::InvalidInput {
                    message: format!("Voice sensitivity must be a number, got `{value}`"),
                })?;
                if !(0.0..=1.0).contains(&sensitivity) {
                    return Err(Error::InvalidInput {
                        message: format!(
                            "Voice sensitivity must be between 0 and 1, got {sensitivity}"
                        ),
                    });
                }
                Self::VoiceSensitivity(sensitivity)
            }
            _ => {
                return Err(Error::InvalidInput {
                    message: format!("Unknown setting `{key}`"),
                });
            }
        };
        Ok(setting)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(Error::InvalidInput {
            message: format!("Expected true/false, got `{value}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.notifications);
        assert!(!settings.kiosk_mode);
        assert!(settings.offline_mode);
        assert_eq!(settings.language, LanguageCode::Hi);
        assert!(settings.auto_detect_language);
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.voice_sensitivity, 0.5);
    }

    #[test]
    fn test_partial_blob_is_filled_from_defaults() {
        let merged = Settings::merged_over_defaults(&object(json!({ "theme": "dark" })));
        assert_eq!(
            merged,
            Settings {
                theme: Theme::Dark,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_unknown_keys_and_bad_values_are_ignored() {
        let merged = Settings::merged_over_defaults(&object(json!({
            "fontSize": 14,
            "theme": "neon",
            "kioskMode": true,
            "language": "ta"
        })));
        assert_eq!(merged.theme, Theme::Light);
        assert!(merged.kiosk_mode);
        assert_eq!(merged.language, LanguageCode::Ta);
    }

    #[test]
    fn test_apply_changes_one_field() {
        let mut settings = Settings::default();
        settings.apply(Setting::VoiceSensitivity(0.8));
        assert_eq!(
            settings,
            Settings {
                voice_sensitivity: 0.8,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_parse_setting() {
        assert_eq!(
            Setting::parse("theme", "dark").unwrap(),
            Setting::Theme(Theme::Dark)
        );
        assert_eq!(
            Setting::parse("kiosk_mode", "on").unwrap(),
            Setting::KioskMode(true)
        );
        assert_eq!(
            Setting::parse("autoDetectLanguage", "false").unwrap(),
            Setting::AutoDetectLanguage(false)
        );
        assert_eq!(
            Setting::parse("language", "bn").unwrap(),
            Setting::Language(LanguageCode::Bn)
        );
        assert_eq!(Setting::parse("theme", "dark").unwrap().key(), "theme");
    }

    #[test]
    fn test_parse_setting_rejects_bad_input() {
        assert!(Setting::parse("volume", "1").is_err());
        assert!(Setting::parse("notifications", "maybe").is_err());
        assert!(Setting::parse("voice-sensitivity", "1.5").is_err());
        assert!(Setting::parse("voiceSensitivity", "loud").is_err());
    }
}
