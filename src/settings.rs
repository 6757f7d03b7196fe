//! Game settings and preferences
//!
//! Read once at startup from the JSON file named by `DODGE_BLOCK_SETTINGS`.
//! Never written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "DODGE_BLOCK_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Start muted
    pub muted: bool,

    // === Simulation ===
    /// Fixed RNG seed; a time-derived seed is used when absent
    pub seed: Option<u64>,

    // === Display ===
    /// Show FPS counter
    pub show_fps: bool,
    /// Window size multiplier over the 600x500 canvas
    pub window_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            seed: None,
            show_fps: false,
            window_scale: 1.0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `DODGE_BLOCK_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{} - using default settings", e);
                Self::default()
            }
        }
    }

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        if !self.window_scale.is_finite() || self.window_scale <= 0.0 {
            self.window_scale = 1.0;
        }
        self.window_scale = self.window_scale.clamp(0.5, 4.0);
        self
    }
}
