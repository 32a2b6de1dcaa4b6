//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default breathing session length
//! - Default reminder preset and unit parsing policy
//! - Default custom countdown
//! - Log level
//!
//! Configuration is stored at `~/.config/tranquil/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::breathing::SessionLength;
use crate::error::{ConfigError, Result};
use crate::reminder::{ReminderChoice, ReminderOffset, ReminderPreset};

/// Breathing exercise defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Session length in minutes: 1, 3 or 5.
    #[serde(default = "default_session_minutes")]
    pub default_session_minutes: u32,
}

/// Reminder defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_reminder")]
    pub default_preset: String,
    /// Treat unknown reminder units as minutes instead of rejecting them.
    #[serde(default = "default_true")]
    pub lenient_units: bool,
}

/// Custom countdown defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_countdown_minutes")]
    pub default_minutes: u32,
    #[serde(default)]
    pub default_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tranquil/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_session_minutes() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_reminder() -> String {
    "30_minutes".into()
}
fn default_countdown_minutes() -> u32 {
    5
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_session_minutes: default_session_minutes(),
        }
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            default_preset: default_reminder(),
            lenient_units: true,
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_countdown_minutes(),
            default_seconds: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
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
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current.get_mut(part).ok_or_else(unknown)?;
            }
        }

        let obj = current.as_object_mut().ok_or_else(unknown)?;
        let existing = obj.get(leaf).ok_or_else(unknown)?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
            ),
            serde_json::Value::Number(_) => {
                let n = value
                    .parse::<u64>()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                serde_json::Value::Number(n.into())
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    /// Reject values that parse but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        SessionLength::from_minutes(self.breathing.default_session_minutes).map_err(|e| {
            ConfigError::InvalidValue {
                key: "breathing.default_session_minutes".into(),
                message: e.to_string(),
            }
        })?;
        let parsed = if self.reminders.lenient_units {
            ReminderOffset::parse_lenient(&self.reminders.default_preset)
        } else {
            self.reminders.default_preset.parse()
        };
        parsed.map_err(|e| ConfigError::InvalidValue {
            key: "reminders.default_preset".into(),
            message: e.to_string(),
        })?;
        if self.countdown.default_seconds >= 60 {
            return Err(ConfigError::InvalidValue {
                key: "countdown.default_seconds".into(),
                message: "must be below 60".into(),
            });
        }
        Ok(())
    }

    /// The configured default breathing session.
    pub fn session_length(&self) -> SessionLength {
        SessionLength::from_minutes(self.breathing.default_session_minutes).unwrap_or_default()
    }

    /// Parse a reminder descriptor with the configured unit policy.
    pub fn parse_reminder(&self, descriptor: &str) -> Result<ReminderOffset> {
        let offset = if self.reminders.lenient_units {
            ReminderOffset::parse_lenient(descriptor)?
        } else {
            descriptor.parse()?
        };
        Ok(offset)
    }

    /// A preset id ("1".."4") picks that preset; anything else is parsed as
    /// a custom descriptor with the configured unit policy.
    pub fn reminder_choice(&self, input: &str) -> Result<ReminderChoice> {
        if let Some(preset) = ReminderPreset::by_id(input.trim()) {
            return Ok(ReminderChoice::Preset(preset));
        }
        Ok(ReminderChoice::Custom(self.parse_reminder(input)?))
    }

    /// Location of `config.toml` in the data directory.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
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
            Err(e) => Err(e.into()),
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

    /// Set a config value by key. The new config is validated before it
    /// replaces `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}
