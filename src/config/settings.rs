//! Runtime settings
//!
//! Defines the configurable knobs of the automation. Everything that
//! describes the game itself (layout, colours, roster) is a static table
//! elsewhere; settings only cover the environment and timing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the per-resolution reference image directories
    pub assets_dir: PathBuf,
    /// Default similarity threshold for reference-image matching
    pub confidence: f32,
    /// Device and helper tool settings
    pub device: DeviceSettings,
    /// General automation settings
    pub automation: AutomationSettings,
    /// Polling settings
    pub timings: TimingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            confidence: 0.8,
            device: DeviceSettings::default(),
            automation: AutomationSettings::default(),
            timings: TimingSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Device and helper tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Path to the `adb` executable
    pub adb_path: PathBuf,
    /// Serial of the emulator to drive when several are attached
    pub device_serial: Option<String>,
    /// Path to the `tesseract` executable
    pub tesseract_path: PathBuf,
    /// Upper bound on any single external command (ms)
    pub command_timeout_ms: u64,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            adb_path: PathBuf::from("adb"),
            device_serial: None,
            tesseract_path: PathBuf::from("tesseract"),
            command_timeout_ms: 15_000,
        }
    }
}

/// General automation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationSettings {
    /// Warn when no bonus has shown up for this many minutes
    pub bonus_stale_minutes: u64,
    /// Upper bound on shafts visited by one max-all sweep
    pub max_shaft_sweep: u32,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            bonus_stale_minutes: 30,
            max_shaft_sweep: 35,
        }
    }
}

/// Polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Pause between two observations of a bounded poll (ms)
    pub poll_interval_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

impl TimingSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
