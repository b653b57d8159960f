// Copyright 2026 Haptic Patterns Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. haptic.yaml file
//! 3. Environment variables (HAPTIC_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::time::MAX_DURATION_SECS;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults applied to events and durations given on the command line
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Haptic sink settings
    #[serde(default)]
    pub sink: SinkConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_path {
            if path.exists() {
                let content = std::fs::read_to_string(path)?;
                config = serde_yaml::from_str(&content)?;
            }
        } else {
            for path in &[
                "haptic.yaml",
                "haptic.yml",
                "/etc/haptic-patterns/config.yaml",
            ] {
                let path = Path::new(path);
                if path.exists() {
                    let content = std::fs::read_to_string(path)?;
                    config = serde_yaml::from_str(&content)?;
                    break;
                }
            }
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("HAPTIC_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("HAPTIC_LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("HAPTIC_SUPPORTS_HAPTICS") {
            self.sink.supports_haptics = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("HAPTIC_IDLE_TIMEOUT_MS") {
            if let Ok(ms) = val.parse() {
                self.sink.idle_timeout_ms = Some(ms);
            }
        }
        if let Ok(val) = env::var("HAPTIC_MAX_SEGMENTS") {
            if let Ok(n) = val.parse() {
                self.sink.max_segments = n;
            }
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.playback.default_intensity) {
            return Err(Error::Config(format!(
                "default_intensity must be in [0, 1], got {}",
                self.playback.default_intensity
            )));
        }
        if !(0.0..=1.0).contains(&self.playback.default_sharpness) {
            return Err(Error::Config(format!(
                "default_sharpness must be in [0, 1], got {}",
                self.playback.default_sharpness
            )));
        }
        if self.playback.default_duration_ms == 0
            || self.playback.default_duration_ms as f64 > MAX_DURATION_SECS * 1000.0
        {
            return Err(Error::Config(format!(
                "default_duration_ms must be in (0, {}], got {}",
                MAX_DURATION_SECS * 1000.0,
                self.playback.default_duration_ms
            )));
        }
        if self.sink.max_segments == 0 {
            return Err(Error::Config("max_segments cannot be 0".into()));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(Error::Config(format!(
                "Unknown log format '{}' (expected 'pretty' or 'json')",
                self.logging.format
            )));
        }
        if !self.sink.supports_haptics {
            tracing::warn!(
                "Sink is configured without haptics support; every play request will fail. \
                 Set HAPTIC_SUPPORTS_HAPTICS=true to enable playback."
            );
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (pretty, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

/// Playback defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Intensity used when an event spec omits it
    #[serde(default = "default_unit")]
    pub default_intensity: f32,

    /// Sharpness used when an event spec omits it
    #[serde(default = "default_unit")]
    pub default_sharpness: f32,

    /// Duration used when none is given
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_intensity: default_unit(),
            default_sharpness: default_unit(),
            default_duration_ms: default_duration_ms(),
        }
    }
}

fn default_unit() -> f32 {
    1.0
}

fn default_duration_ms() -> u64 {
    1000
}

/// Haptic sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Whether the simulated device reports haptics support
    #[serde(default = "default_true")]
    pub supports_haptics: bool,

    /// Release the engine after this long without playback (None = never)
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: Option<u64>,

    /// Largest plan the simulated engine accepts
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
}

impl SinkConfig {
    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            supports_haptics: true,
            idle_timeout_ms: default_idle_timeout_ms(),
            max_segments: default_max_segments(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_idle_timeout_ms() -> Option<u64> {
    Some(30_000)
}

fn default_max_segments() -> usize {
    4096
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.playback.default_intensity, 1.0);
        assert_eq!(config.playback.default_duration_ms, 1000);
        assert!(config.sink.supports_haptics);
        assert_eq!(config.sink.idle_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.sink.max_segments, 4096);
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut bad_config = Config::default();
        bad_config.playback.default_intensity = 1.5;
        assert!(bad_config.validate().is_err());
    }

    #[test]
    fn test_validate_sharpness() {
        let mut config = Config::default();
        config.playback.default_sharpness = -0.1;
        let msg = format!("{}", config.validate().unwrap_err());
        assert!(msg.contains("default_sharpness"));
    }

    #[test]
    fn test_validate_duration_bounds() {
        let mut config = Config::default();
        config.playback.default_duration_ms = 0;
        assert!(config.validate().is_err());

        config.playback.default_duration_ms = 3_600_000;
        assert!(config.validate().is_ok());

        config.playback.default_duration_ms = 3_600_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_max_segments_zero() {
        let mut config = Config::default();
        config.sink.max_segments = 0;
        let msg = format!("{}", config.validate().unwrap_err());
        assert!(msg.contains("max_segments"));
    }

    #[test]
    fn test_validate_log_format() {
        let mut config = Config::default();
        config.logging.format = "json".into();
        assert!(config.validate().is_ok());

        config.logging.format = "xml".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unsupported_sink_still_passes() {
        let mut config = Config::default();
        config.sink.supports_haptics = false;
        // Should warn but still pass validation
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
logging:
  level: "debug"
playback:
  default_intensity: 0.5
  default_duration_ms: 250
sink:
  idle_timeout_ms: null
  max_segments: 16
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.playback.default_intensity, 0.5);
        assert_eq!(config.playback.default_sharpness, 1.0);
        assert_eq!(config.playback.default_duration_ms, 250);
        assert_eq!(config.sink.max_segments, 16);
    }

    #[test]
    fn test_config_parse_partial_yaml() {
        let config: Config = serde_yaml::from_str(
            r#"
logging:
  level: "debug"
sink:
  idle_timeout_ms: null
"#,
        )
        .unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.sink.idle_timeout(), None);
        assert!(config.sink.supports_haptics);
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let path = std::path::Path::new("/tmp/does_not_exist_haptic_patterns_test.yaml");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.playback.default_duration_ms, 1000);
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();

        let result = Config::load(Some(f.path()));
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_env_override_log_level() {
        let mut config = Config::default();
        std::env::set_var("HAPTIC_LOG_LEVEL", "trace");
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "trace");
        std::env::remove_var("HAPTIC_LOG_LEVEL");
    }

    #[test]
    fn test_env_override_supports_haptics() {
        let mut config = Config::default();
        std::env::set_var("HAPTIC_SUPPORTS_HAPTICS", "false");
        config.apply_env_overrides();
        assert!(!config.sink.supports_haptics);
        std::env::remove_var("HAPTIC_SUPPORTS_HAPTICS");

        std::env::set_var("HAPTIC_SUPPORTS_HAPTICS", "1");
        config.apply_env_overrides();
        assert!(config.sink.supports_haptics);
        std::env::remove_var("HAPTIC_SUPPORTS_HAPTICS");
    }

    #[test]
    fn test_env_override_idle_timeout() {
        let mut config = Config::default();
        std::env::set_var("HAPTIC_IDLE_TIMEOUT_MS", "1500");
        config.apply_env_overrides();
        assert_eq!(config.sink.idle_timeout(), Some(Duration::from_millis(1500)));
        std::env::remove_var("HAPTIC_IDLE_TIMEOUT_MS");
    }

    #[test]
    fn test_env_override_max_segments_ignores_garbage() {
        let mut config = Config::default();
        std::env::set_var("HAPTIC_MAX_SEGMENTS", "lots");
        config.apply_env_overrides();
        assert_eq!(config.sink.max_segments, 4096);
        std::env::remove_var("HAPTIC_MAX_SEGMENTS");
    }
}
