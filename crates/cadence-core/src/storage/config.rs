//! TOML-based application configuration.
//!
//! Stores user-tunable knobs:
//! - Base-tier resource caps
//! - Guest access-window duration
//! - Overdue summary toggle
//!
//! Configuration is stored at `~/.config/cadence/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::access::GUEST_WINDOW_MS;
use crate::entitlement::ResourceCaps;
use crate::error::ConfigError;

/// Base-tier quota configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_habit_cap")]
    pub habits: u32,
    #[serde(default = "default_task_cap")]
    pub tasks: u32,
    #[serde(default = "default_transaction_cap")]
    pub transactions: u32,
}

impl LimitsConfig {
    pub fn caps(&self) -> ResourceCaps {
        ResourceCaps {
            habits: self.habits,
            tasks: self.tasks,
            transactions: self.transactions,
        }
    }
}

/// Guest access-window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Guest window duration in hours.
    #[serde(default = "default_guest_window_hours")]
    pub guest_window_hours: u32,
}

impl AccessConfig {
    pub fn guest_window_ms(&self) -> i64 {
        i64::from(self.guest_window_hours) * 60 * 60 * 1000
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Whether the daily overdue summary is emitted at all.
    #[serde(default = "default_true")]
    pub overdue_summary: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cadence/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_habit_cap() -> u32 {
    3
}
fn default_task_cap() -> u32 {
    15
}
fn default_transaction_cap() -> u32 {
    30
}
fn default_guest_window_hours() -> u32 {
    (GUEST_WINDOW_MS / (60 * 60 * 1000)) as u32
}
fn default_true() -> bool {
    true
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            habits: default_habit_cap(),
            tasks: default_task_cap(),
            transactions: default_transaction_cap(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            guest_window_hours: default_guest_window_hours(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            overdue_summary: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: LimitsConfig::default(),
            access: AccessConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    /// Path of the config file, `~/.config/cadence/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/cadence"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        self.save_to(&path)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = Config::default();
        assert_eq!(config.limits.habits, 3);
        assert_eq!(config.access.guest_window_hours, 24);
        assert_eq!(config.access.guest_window_ms(), GUEST_WINDOW_MS);
        assert!(config.notifications.overdue_summary);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            "[limits]\nhabits = 5\n",
        )
        .unwrap();
        assert_eq!(config.limits.habits, 5);
        assert_eq!(config.limits.tasks, 15);
        assert_eq!(config.access.guest_window_hours, 24);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.limits.transactions = 99;
        config.notifications.overdue_summary = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.limits.transactions, 99);
        assert!(!loaded.notifications.overdue_summary);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.limits.habits, 3);
    }
}
