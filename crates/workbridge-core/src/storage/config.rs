//! TOML-based application configuration.
//!
//! Stores analysis preferences including:
//! - Working-hours window and scan step
//! - Local UTC offset used for day boundaries
//! - Conflict policy and delegation capacity
//! - Attendees and notification channel for synced items
//!
//! Configuration is stored at `~/.config/workbridge/config.toml`.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::calendar::local_offset;
use crate::error::{ConfigError, Result};
use crate::scheduler::{ConflictPolicy, ScanWindow};

/// Working-hours configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkdayConfig {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
    /// Minutes east of UTC. Unset means the machine's local offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub conflict_policy: ConflictPolicy,
    /// Committed hours above which delegation is suggested.
    #[serde(default = "default_capacity_hours")]
    pub capacity_hours: f64,
}

/// Sync configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_attendees")]
    pub attendees: Vec<String>,
    #[serde(default = "default_notify_channel")]
    pub notify_channel: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/workbridge/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workday: WorkdayConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

// Default functions
fn default_start_hour() -> u32 {
    8
}
fn default_end_hour() -> u32 {
    18
}
fn default_step_minutes() -> u32 {
    30
}
fn default_capacity_hours() -> f64 {
    40.0
}
fn default_attendees() -> Vec<String> {
    vec!["team@company.com".into()]
}
fn default_notify_channel() -> String {
    "#team".into()
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            step_minutes: default_step_minutes(),
            utc_offset_minutes: None,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::default(),
            capacity_hours: default_capacity_hours(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            attendees: default_attendees(),
            notify_channel: default_notify_channel(),
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
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                // Optional fields are absent from the JSON view until set.
                let existing = obj.get(part).cloned().unwrap_or(serde_json::Value::Null);
                if existing.is_null() && !Self::is_optional_key(key) {
                    return Err(ConfigError::UnknownKey(key.to_string()));
                }

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) | serde_json::Value::Null => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
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

    fn is_optional_key(key: &str) -> bool {
        key == "workday.utc_offset_minutes"
    }

    /// Location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load and validate a config file at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default configuration");
                Self::default()
            }
        }
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

    /// Set a config value by dot-separated key and re-validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid. The config is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.workday.end_hour > 24 {
            return Err(invalid("workday.end_hour", "must be at most 24"));
        }
        if self.workday.start_hour >= self.workday.end_hour {
            return Err(invalid("workday.start_hour", "must be before workday.end_hour"));
        }
        if self.workday.step_minutes == 0 {
            return Err(invalid("workday.step_minutes", "must be positive"));
        }
        if let Some(minutes) = self.workday.utc_offset_minutes {
            if minutes.abs() > 14 * 60 {
                return Err(invalid("workday.utc_offset_minutes", "must be within +/-14 hours"));
            }
        }
        if !(self.analysis.capacity_hours > 0.0) {
            return Err(invalid("analysis.capacity_hours", "must be positive"));
        }
        Ok(())
    }

    /// Offset used for local day boundaries.
    pub fn utc_offset(&self) -> FixedOffset {
        self.workday
            .utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
            .unwrap_or_else(local_offset)
    }

    /// Working window for availability scans.
    pub fn scan_window(&self) -> ScanWindow {
        ScanWindow {
            start_hour: self.workday.start_hour,
            end_hour: self.workday.end_hour,
            step_minutes: self.workday.step_minutes as i64,
        }
    }
}
