//! Application configuration loading from config.toml
//!
//! Every field is optional. A missing config file is not an error: the built-in
//! defaults are used instead, so the binary runs with no setup at all.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Database URL for the key-value store. `DATABASE_URL` takes precedence.
    pub database_url: Option<String>,
    /// Simulated latency of the mock language services
    pub language: LanguageConfig,
}

/// Tuning for the mock translator and transcriber
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LanguageConfig {
    /// Simulated translation delay in milliseconds
    pub translate_delay_ms: u64,
    /// Simulated transcription delay in milliseconds
    pub transcribe_delay_ms: u64,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            translate_delay_ms: 500,
            transcribe_delay_ms: 1500,
        }
    }
}

impl LanguageConfig {
    /// Translation delay as a [`Duration`]
    #[must_use]
    pub const fn translate_delay(&self) -> Duration {
        Duration::from_millis(self.translate_delay_ms)
    }

    /// Transcription delay as a [`Duration`]
    #[must_use]
    pub const fn transcribe_delay(&self) -> Duration {
        Duration::from_millis(self.transcribe_delay_ms)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.as_ref().display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// # Errors
/// Returns an error if the TOML is invalid or a field has the wrong type.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `path`, falling back to defaults when the file does not exist.
///
/// # Errors
/// Returns an error only if the file exists but cannot be read or parsed.
pub fn load_app_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    tracing::debug!("Loading configuration from {}", path.display());
    load_config(path)
}
