//! FlipText configuration system
//!
//! This crate provides centralized configuration for the flip text component,
//! loading settings from `flip.toml` with environment variable overrides.
//!
//! Values are kept as plain strings and numbers here; `flip-text` parses the
//! named options (transition, easing, split mode, key policy) into its own
//! types so this crate stays free of rendering concerns.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Default configuration file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "flip.toml";

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`FlipConfig`].
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlipConfig {
    /// Transition timing
    pub animation: AnimationConfig,
    /// Text splitting, keying and styling
    pub text: TextConfig,
    /// Optional background drawn behind every character unit
    pub background: BackgroundConfig,
}

/// Transition timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of each insertion/removal transition in milliseconds
    pub duration_ms: f32,
    /// Delay before a transition starts in milliseconds
    pub delay_ms: f32,
    /// Easing curve name (linear, ease, ease_in, ease_out, ease_in_out)
    pub easing: String,
}

/// Text configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Transition variant name (rotate, rotate_scale, none)
    pub transition: String,
    /// How the string is split into units (graphemes, chars)
    pub split_mode: String,
    /// How units are keyed for diffing (by_occurrence, by_value)
    pub key_policy: String,
    /// Font family; `None` uses the host's body font
    pub font_family: Option<String>,
    /// Font size in points
    pub font_size: f32,
}

/// Background configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Linear RGBA color; `None` draws no background
    pub rgba: Option<[f32; 4]>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000.0,
            delay_ms: 0.0,
            easing: "ease_in".to_string(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            transition: "rotate".to_string(),
            split_mode: "graphemes".to_string(),
            key_policy: "by_occurrence".to_string(),
            font_family: None,
            font_size: 17.0,
        }
    }
}

impl FlipConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from `path`, returning defaults when the file is
    /// missing. A file that exists but fails to load is reported and ignored.
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "falling back to default flip configuration");
                Self::default()
            }
        }
    }

    /// Load configuration from `flip.toml` in the current directory
    /// or return default configuration if it doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_or_default_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from the default file, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    /// Merge overrides from an arbitrary variable lookup.
    ///
    /// Numeric values that fail to parse are ignored.
    pub fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("FLIP_DURATION_MS") {
            if let Ok(duration) = val.parse::<f32>() {
                self.animation.duration_ms = duration;
            }
        }
        if let Some(val) = lookup("FLIP_DELAY_MS") {
            if let Ok(delay) = val.parse::<f32>() {
                self.animation.delay_ms = delay;
            }
        }
        if let Some(easing) = lookup("FLIP_EASING") {
            self.animation.easing = easing;
        }

        if let Some(transition) = lookup("FLIP_TRANSITION") {
            self.text.transition = transition;
        }
        if let Some(mode) = lookup("FLIP_SPLIT_MODE") {
            self.text.split_mode = mode;
        }
        if let Some(policy) = lookup("FLIP_KEY_POLICY") {
            self.text.key_policy = policy;
        }
        if let Some(val) = lookup("FLIP_FONT_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.text.font_size = size;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_match_demo() {
        let config = FlipConfig::default();
        assert_eq!(config.animation.duration_ms, 1000.0);
        assert_eq!(config.animation.delay_ms, 0.0);
        assert_eq!(config.animation.easing, "ease_in");
        assert_eq!(config.text.transition, "rotate");
        assert_eq!(config.text.split_mode, "graphemes");
        assert_eq!(config.text.key_policy, "by_occurrence");
        assert_eq!(config.text.font_family, None);
        assert_eq!(config.background.rgba, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FlipConfig::from_toml_str(
            r#"
            [animation]
            duration_ms = 250.0

            [text]
            transition = "rotate_scale"
            "#,
        )
        .unwrap();

        assert_eq!(config.animation.duration_ms, 250.0);
        assert_eq!(config.animation.easing, "ease_in");
        assert_eq!(config.text.transition, "rotate_scale");
        assert_eq!(config.text.key_policy, "by_occurrence");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[text]
font_family = "SFMono-Bold"
font_size = 64.0

[background]
rgba = [0.5, 0.5, 0.5, 1.0]
"#
        )
        .unwrap();

        let config = FlipConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.text.font_family.as_deref(), Some("SFMono-Bold"));
        assert_eq!(config.text.font_size, 64.0);
        assert_eq!(config.background.rgba, Some([0.5, 0.5, 0.5, 1.0]));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nduration_ms = \"slow\"").unwrap();

        let err = FlipConfig::load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            FlipConfig::load_from_file(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(FlipConfig::load_or_default_from(&path), FlipConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not toml at all [").unwrap();
        assert_eq!(
            FlipConfig::load_or_default_from(file.path()),
            FlipConfig::default()
        );
    }

    #[test]
    fn test_merge_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FLIP_DURATION_MS", "400"),
            ("FLIP_DELAY_MS", "not-a-number"),
            ("FLIP_EASING", "linear"),
            ("FLIP_TRANSITION", "none"),
            ("FLIP_KEY_POLICY", "by_value"),
            ("FLIP_FONT_SIZE", "32.5"),
        ]
        .into_iter()
        .collect();

        let mut config = FlipConfig::default();
        config.merge_with(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.animation.duration_ms, 400.0);
        // Unparseable values leave the existing setting alone
        assert_eq!(config.animation.delay_ms, 0.0);
        assert_eq!(config.animation.easing, "linear");
        assert_eq!(config.text.transition, "none");
        assert_eq!(config.text.split_mode, "graphemes");
        assert_eq!(config.text.key_policy, "by_value");
        assert_eq!(config.text.font_size, 32.5);
    }

    #[test]
    fn test_serialize_roundtrip_through_toml() {
        let config = FlipConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[animation]"));
        assert_eq!(FlipConfig::from_toml_str(&text).unwrap(), config);
    }
}
