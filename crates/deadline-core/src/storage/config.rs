//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Notification and mute flags
//! - Render scale for the visual sinks
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::render::DEFAULT_FULL_WIDTH;

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Desktop notification on completion.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Suppresses the audible chime only, never the notification.
    #[serde(default)]
    pub muted: bool,
}

/// Render sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Full-scale width of the linear progress track.
    #[serde(default = "default_full_width")]
    pub full_width: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_true() -> bool {
    true
}

fn default_full_width() -> f64 {
    DEFAULT_FULL_WIDTH
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            muted: false,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            full_width: DEFAULT_FULL_WIDTH,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing defaults on first run.
    ///
    /// Only a missing file counts as a first run; any other read failure
    /// propagates so an existing config is never overwritten with
    /// defaults.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value cannot be
    /// parsed as the existing type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }
}

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
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        let is_leaf = parts.peek().is_none();
        if is_leaf {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else if let Ok(n) = value.parse::<f64>() {
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as number")));
                    }
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that point DEADLINE_DATA_DIR at a tempdir must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert!(cfg.notifications.enabled);
        assert!(!cfg.notifications.muted);
        assert_eq!(cfg.render.full_width, DEFAULT_FULL_WIDTH);
    }

    #[test]
    fn get_by_dotted_key() {
        let cfg = Config::default();
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("render.full_width").as_deref(), Some("586.0"));
        assert!(cfg.get("no.such.key").is_none());
    }

    #[test]
    fn set_updates_in_memory_value() {
        let _guard = ENV_LOCK.lock().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("DEADLINE_DATA_DIR", tmp.path());

        let mut cfg = Config::default();
        cfg.set("notifications.muted", "true").unwrap();
        assert!(cfg.notifications.muted);
        cfg.set("render.full_width", "300").unwrap();
        assert_eq!(cfg.render.full_width, 300.0);

        assert!(matches!(
            cfg.set("notifications.bogus", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(
            cfg.set("notifications.muted", "not-a-bool"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn load_writes_defaults_only_when_the_file_is_missing() {
        let _guard = ENV_LOCK.lock().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("DEADLINE_DATA_DIR", tmp.path());

        let cfg = Config::load().unwrap();
        assert!(cfg.notifications.enabled);
        assert!(tmp.path().join("config.toml").is_file());
    }

    #[test]
    fn load_propagates_unreadable_config_instead_of_clobbering() {
        let _guard = ENV_LOCK.lock().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        std::env::set_var("DEADLINE_DATA_DIR", tmp.path());

        // A directory at the config path fails to read with an error
        // other than NotFound; load must surface it, not write defaults.
        std::fs::create_dir(tmp.path().join("config.toml")).unwrap();
        assert!(matches!(
            Config::load(),
            Err(ConfigError::LoadFailed { .. })
        ));
        assert!(tmp.path().join("config.toml").is_dir());
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.render.full_width, cfg.render.full_width);
        assert_eq!(back.notifications.enabled, cfg.notifications.enabled);
    }
}
