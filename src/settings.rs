//! Game tuning and arena layout
//!
//! Stored as JSON. Missing fields take the arcade defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{Layout, LayoutError};

/// Why a settings file could not be used
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Layout(LayoutError),
    Tuning { field: &'static str, reason: &'static str },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read settings: {err}"),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::Layout(err) => write!(f, "unplayable layout: {err}"),
            Self::Tuning { field, reason } => write!(f, "{field} {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Tuning { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<LayoutError> for SettingsError {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

/// Tuning for a run of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ball speed on level 1, in pixels per second
    pub base_ball_speed: f32,
    /// Added to the ball speed for every level after the first
    pub ball_speed_increase_per_level: f32,
    pub initial_lives: u32,
    pub layout: Layout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_ball_speed: DEFAULT_BALL_SPEED,
            ball_speed_increase_per_level: BALL_SPEED_INCREASE_PER_LEVEL,
            initial_lives: INITIAL_LIVES,
            layout: Layout::default(),
        }
    }
}

impl Settings {
    /// Ball speed for a 1-based level number
    pub fn ball_speed_for_level(&self, level: u32) -> f32 {
        assert!(level >= 1, "levels are numbered from 1, got {level}");
        self.base_ball_speed + (level - 1) as f32 * self.ball_speed_increase_per_level
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.base_ball_speed.is_finite() && self.base_ball_speed > 0.0) {
            return Err(SettingsError::Tuning {
                field: "base_ball_speed",
                reason: "must be finite and positive",
            });
        }
        if !(self.ball_speed_increase_per_level.is_finite() && self.ball_speed_increase_per_level >= 0.0)
        {
            return Err(SettingsError::Tuning {
                field: "ball_speed_increase_per_level",
                reason: "must be finite and not negative",
            });
        }
        if self.initial_lives == 0 {
            return Err(SettingsError::Tuning {
                field: "initial_lives",
                reason: "must be at least 1",
            });
        }
        self.layout.validate()?;
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys, serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Read and validate a settings file
    pub fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or unusable
    pub fn load(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json())?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
