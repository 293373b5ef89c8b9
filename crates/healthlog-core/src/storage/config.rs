//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Reminder period, message and on/off switch
//! - Display text for the dashboard (meal placeholder, welcome line)
//!
//! Configuration is stored at `~/.config/healthlog/config.toml`.
//! Records themselves are never written here; they live for the session only.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::reminder::{DEFAULT_REMINDER_MESSAGE, DEFAULT_REMINDER_PERIOD_MS};
use crate::trend::DEFAULT_MEALS_PLACEHOLDER;

/// Periodic check-in reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    #[serde(default = "default_message")]
    pub message: String,
}

/// Dashboard text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_meals_placeholder")]
    pub meals_placeholder: String,
    /// `{name}` is replaced with the profile name.
    #[serde(default = "default_welcome_template")]
    pub welcome_template: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/healthlog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

// Default functions
fn default_true() -> bool {
    true
}
fn default_period_ms() -> u64 {
    DEFAULT_REMINDER_PERIOD_MS
}
fn default_message() -> String {
    DEFAULT_REMINDER_MESSAGE.into()
}
fn default_meals_placeholder() -> String {
    DEFAULT_MEALS_PLACEHOLDER.into()
}
fn default_welcome_template() -> String {
    "Welcome, {name}!".into()
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            period_ms: default_period_ms(),
            message: default_message(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            meals_placeholder: default_meals_placeholder(),
            welcome_template: default_welcome_template(),
        }
    }
}

impl DisplayConfig {
    pub fn welcome(&self, name: &str) -> String {
        self.welcome_template.replace("{name}", name)
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

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(unknown());
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if nothing exists.
    ///
    /// A file whose reminder period is zero is rejected like `set_value`
    /// would reject it.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.check_reminder_period("reminder.period_ms")?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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

    /// Update a value in memory by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit it.
    /// A reminder period of zero is rejected.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.check_reminder_period(key)?;
        *self = updated;
        Ok(())
    }

    fn check_reminder_period(&self, key: &str) -> Result<(), ConfigError> {
        if self.reminder.period_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "reminder period must be at least 1 ms".into(),
            });
        }
        Ok(())
    }

    /// Set a config value by key and persist it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert!(parsed.reminder.enabled);
        assert_eq!(parsed.reminder.period_ms, 3_600_000);
        assert_eq!(parsed.display.meals_placeholder, "No record");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[reminder]\nperiod_ms = 5000\n").unwrap();
        assert_eq!(parsed.reminder.period_ms, 5000);
        assert!(parsed.reminder.enabled);
        assert_eq!(parsed.display.welcome_template, "Welcome, {name}!");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("reminder.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("reminder.period_ms").as_deref(), Some("3600000"));
        assert_eq!(cfg.get("display.meals_placeholder").as_deref(), Some("No record"));
        assert!(cfg.get("display.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_value_updates_each_type() {
        let mut cfg = Config::default();
        cfg.set_value("reminder.enabled", "false").unwrap();
        cfg.set_value("reminder.period_ms", "60000").unwrap();
        cfg.set_value("display.meals_placeholder", "n/a").unwrap();
        assert!(!cfg.reminder.enabled);
        assert_eq!(cfg.reminder.period_ms, 60_000);
        assert_eq!(cfg.display.meals_placeholder, "n/a");
    }

    #[test]
    fn set_value_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("reminder.nonexistent", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set_value("reminder", "1"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_value_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set_value("reminder.enabled", "not_a_bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set_value("reminder.period_ms", "-5"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn zero_period_is_rejected_and_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.set_value("reminder.period_ms", "0").is_err());
        assert_eq!(cfg.reminder.period_ms, 3_600_000);
    }

    #[test]
    fn welcome_substitutes_name() {
        let display = DisplayConfig::default();
        assert_eq!(display.welcome("Li"), "Welcome, Li!");
        assert_eq!(display.welcome(""), "Welcome, !");
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.reminder.period_ms, 3_600_000);

        let mut cfg = cfg;
        cfg.set_value("reminder.period_ms", "1234").unwrap();
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().reminder.period_ms, 1234);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "reminder = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn load_from_rejects_zero_period() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[reminder]\nperiod_ms = 0\n").unwrap();
        match Config::load_from(&path) {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "reminder.period_ms"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}
