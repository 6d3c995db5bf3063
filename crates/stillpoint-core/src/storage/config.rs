//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - the preset selected when a session opens
//! - timer length overrides
//! - terminal frame rate and display options
//! - custom presets, validated when the catalog is built
//!
//! Configuration is stored at `~/.config/stillpoint/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::error::{ConfigError, CoreError, Result};
use crate::preset::{Preset, PresetCatalog, DEFAULT_PRESET_ID};

/// Session-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_preset")]
    pub default_preset: String,
    /// Overrides the duration of timer presets when set.
    #[serde(default)]
    pub timer_minutes: Option<f64>,
}

/// Terminal display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Frames per second of the live runner.
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_true")]
    pub show_scale_bar: bool,
    #[serde(default = "default_bar_width")]
    pub bar_width: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/stillpoint/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub custom_presets: Vec<Preset>,
}

// Default functions
fn default_preset() -> String {
    DEFAULT_PRESET_ID.into()
}
fn default_fps() -> u32 {
    30
}
fn default_true() -> bool {
    true
}
fn default_bar_width() -> u32 {
    40
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_preset: default_preset(),
            timer_minutes: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            show_scale_bar: true,
            bar_width: default_bar_width(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            display: DisplayConfig::default(),
            custom_presets: Vec::new(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    // "none" only deserializes for optional fields.
                    serde_json::Value::Number(_) if value == "none" => serde_json::Value::Null,
                    serde_json::Value::Number(_) => parse_number(value).ok_or_else(|| {
                        invalid(format!("cannot parse '{value}' as number"))
                    })?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional fields start out as null; take numbers as numbers.
                    serde_json::Value::Null => match value {
                        "" | "none" | "null" => serde_json::Value::Null,
                        _ => parse_number(value)
                            .unwrap_or_else(|| serde_json::Value::String(value.into())),
                    },
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(CoreError::Io(e)),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory, validating the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; invalid custom presets surface as
    /// preset errors.
    pub fn validate(&self) -> Result<()> {
        if self.display.fps == 0 {
            return Err(ConfigError::InvalidValue {
                key: "display.fps".into(),
                message: "must be at least 1".into(),
            }
            .into());
        }
        if let Some(minutes) = self.session.timer_minutes {
            if !minutes.is_finite() || minutes <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "session.timer_minutes".into(),
                    message: format!("must be a positive number of minutes (got {minutes})"),
                }
                .into());
            }
        }
        let catalog = self.catalog()?;
        catalog.require(&self.session.default_preset)?;
        Ok(())
    }

    /// Built-in presets plus the configured custom ones.
    ///
    /// # Errors
    ///
    /// Returns the first custom preset that fails validation.
    pub fn catalog(&self) -> Result<PresetCatalog> {
        Ok(PresetCatalog::with_custom(&self.custom_presets)?)
    }
}

fn parse_number(value: &str) -> Option<serde_json::Value> {
    if let Ok(n) = value.parse::<u64>() {
        Some(serde_json::Value::Number(n.into()))
    } else {
        value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
    }
}
