// SPDX-License-Identifier: GPL-3.0-only

//! User configuration for a keyboard session.
//!
//! A [`KeyboardConfig`] carries the behavior knobs a host may tune: gesture
//! timing and autocapitalization. Values omitted from a configuration file
//! fall back to the defaults in [`crate::settings`], and files round-trip
//! through JSON.

use crate::gesture::GestureTiming;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Error type for configuration loading and saving.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error while reading or writing a configuration file
    Io {
        /// The underlying I/O error
        source: std::io::Error,
        /// The file path involved
        file_path: String,
    },

    /// JSON error while parsing or serializing configuration
    Json {
        /// The underlying JSON error
        source: serde_json::Error,
        /// The file path involved, if any
        file_path: Option<String>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { source, file_path } => {
                write!(f, "I/O error for config file '{}': {}", file_path, source)
            }
            ConfigError::Json { source, file_path } => {
                write!(f, "JSON error in config")?;
                if let Some(path) = file_path {
                    write!(f, " file '{}'", path)?;
                }
                write!(f, ": {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json { source, .. } => Some(source),
        }
    }
}

/// User configuration that persists between keyboard sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Milliseconds before a press becomes a long press.
    pub long_press_delay_ms: u64,
    /// Milliseconds between repeat firings for repeatable keys.
    pub repeat_interval_ms: u64,
    /// Milliseconds within which a second tap is a double tap.
    pub double_tap_window_ms: u64,
    /// Whether autocase requests (e.g. sentence auto-capitalization) are
    /// honored.
    pub autocapitalize: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            long_press_delay_ms: settings::LONG_PRESS_DELAY_MS,
            repeat_interval_ms: settings::REPEAT_INTERVAL_MS,
            double_tap_window_ms: settings::DOUBLE_TAP_WINDOW_MS,
            autocapitalize: true,
        }
    }
}

impl KeyboardConfig {
    /// Parses a configuration from a JSON string.
    ///
    /// Unknown fields are ignored and missing fields take their defaults,
    /// so older and newer files both load.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Json {
            source,
            file_path: None,
        })
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            file_path: path.display().to_string(),
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            source,
            file_path: Some(path.display().to_string()),
        })
    }

    /// Saves the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            source,
            file_path: Some(path.display().to_string()),
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            source,
            file_path: path.display().to_string(),
        })
    }

    /// The gesture timing this configuration describes.
    #[must_use]
    pub fn gesture_timing(&self) -> GestureTiming {
        GestureTiming {
            long_press_delay: Duration::from_millis(self.long_press_delay_ms),
            repeat_interval: Duration::from_millis(self.repeat_interval_ms),
            double_tap_window: Duration::from_millis(self.double_tap_window_ms),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Defaults mirror the settings constants.
    #[test]
    fn test_defaults_match_settings() {
        let config = KeyboardConfig::default();
        assert_eq!(config.long_press_delay_ms, settings::LONG_PRESS_DELAY_MS);
        assert_eq!(config.repeat_interval_ms, settings::REPEAT_INTERVAL_MS);
        assert_eq!(config.double_tap_window_ms, settings::DOUBLE_TAP_WINDOW_MS);
        assert!(config.autocapitalize);
    }

    /// Missing fields take defaults; present fields win.
    #[test]
    fn test_partial_json_fills_defaults() {
        let config = KeyboardConfig::from_json_str(r#"{ "long_press_delay_ms": 350 }"#)
            .expect("partial config should parse");
        assert_eq!(config.long_press_delay_ms, 350);
        assert_eq!(
            config.repeat_interval_ms,
            settings::REPEAT_INTERVAL_MS,
            "omitted fields should take defaults"
        );
    }

    /// Gesture timing conversion carries the configured durations.
    #[test]
    fn test_gesture_timing_conversion() {
        let mut config = KeyboardConfig::default();
        config.long_press_delay_ms = 400;
        config.repeat_interval_ms = 80;

        let timing = config.gesture_timing();
        assert_eq!(timing.long_press_delay, Duration::from_millis(400));
        assert_eq!(timing.repeat_interval, Duration::from_millis(80));
        assert_eq!(
            timing.double_tap_window,
            Duration::from_millis(settings::DOUBLE_TAP_WINDOW_MS)
        );
    }

    /// Configurations round-trip through a file on disk.
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("keyboard.json");

        let mut config = KeyboardConfig::default();
        config.autocapitalize = false;
        config.double_tap_window_ms = 250;
        config.save(&path).expect("should save");

        let restored = KeyboardConfig::load(&path).expect("should load");
        assert_eq!(restored, config, "round trip should preserve every field");
    }

    /// Errors carry the file path for diagnosis.
    #[test]
    fn test_error_context() {
        let missing = KeyboardConfig::load("/nonexistent/keyboard.json").unwrap_err();
        assert!(
            missing.to_string().contains("/nonexistent/keyboard.json"),
            "I/O error should name the file"
        );

        let malformed = KeyboardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(malformed, ConfigError::Json { .. }));
    }
}
