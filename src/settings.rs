//! Runtime settings
//!
//! Loaded from a JSON file next to the binary; every field is optional.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_TICK_RATE_HZ;

/// Settings file used when none is given on the command line
pub const DEFAULT_SETTINGS_PATH: &str = "pacgrid.json";

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Simulation ticks per second
    pub tick_rate_hz: f64,
    /// Pursuer RNG seed (clock-derived when absent)
    pub seed: Option<u64>,
    /// Level files in play order (built-in levels when empty)
    pub level_files: Vec<PathBuf>,
    /// Stop a demo run after this many ticks
    pub max_ticks: u64,
    /// Print a text frame after every tick
    pub render: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            seed: None,
            level_files: Vec::new(),
            max_ticks: 2000,
            render: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Save settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Time between ticks (non-positive rates fall back to the default)
    pub fn tick_interval(&self) -> Duration {
        let hz = if self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0 {
            self.tick_rate_hz
        } else {
            DEFAULT_TICK_RATE_HZ
        };
        Duration::from_secs_f64(1.0 / hz)
    }

    /// Configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
