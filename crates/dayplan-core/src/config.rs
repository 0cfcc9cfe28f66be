//! TOML-based engine configuration.
//!
//! Holds the defaults the service layer falls back to when a caller leaves
//! a knob unset: working-hours window, scheduling buffer, break policy,
//! recurrence horizon. Stored at `~/.config/dayplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::slots::Workday;
use crate::store::data_dir;

/// Working-hours configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkdayConfig {
    #[serde(default = "default_work_start")]
    pub start_hour: u32,
    #[serde(default = "default_work_end")]
    pub end_hour: u32,
}

/// Task-packing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Buffer inserted between scheduled tasks and around existing events
    #[serde(default = "default_buffer")]
    pub buffer_minutes: i64,
    /// Slot length assumed when a free-slot query omits one
    #[serde(default = "default_slot")]
    pub default_slot_minutes: i64,
}

/// Break-suggestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakConfig {
    /// Continuous work tolerated before a break is suggested
    #[serde(default = "default_work_duration")]
    pub work_duration_minutes: i64,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/dayplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workday: WorkdayConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    #[serde(default)]
    pub breaks: BreakConfig,
}

// Default functions
fn default_work_start() -> u32 {
    9
}
fn default_work_end() -> u32 {
    17
}
fn default_buffer() -> i64 {
    10
}
fn default_slot() -> i64 {
    60
}
fn default_work_duration() -> i64 {
    90
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start_hour: default_work_start(),
            end_hour: default_work_end(),
        }
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            buffer_minutes: default_buffer(),
            default_slot_minutes: default_slot(),
        }
    }
}

impl Default for BreakConfig {
    fn default() -> Self {
        Self {
            work_duration_minutes: default_work_duration(),
        }
    }
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/dayplan"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the configuration from disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/dayplan"),
            message: e.to_string(),
        })?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Working window as the engine's [`Workday`] value.
    pub fn workday(&self) -> Workday {
        Workday {
            start_hour: self.workday.start_hour,
            end_hour: self.workday.end_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_constants() {
        let config = Config::default();
        assert_eq!(config.workday.start_hour, 9);
        assert_eq!(config.workday.end_hour, 17);
        assert_eq!(config.scheduling.buffer_minutes, 10);
        assert_eq!(config.scheduling.default_slot_minutes, 60);
        assert_eq!(config.breaks.work_duration_minutes, 90);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str("[workday]\nstart_hour = 8\n").unwrap();
        assert_eq!(config.workday.start_hour, 8);
        assert_eq!(config.workday.end_hour, 17);
        assert_eq!(config.scheduling.buffer_minutes, 10);
    }
}
