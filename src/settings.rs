//! Game settings and preferences
//!
//! Stored as JSON next to the game. A missing or broken file falls back to
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::ChannelVolumes;

/// Default settings file name
pub const SETTINGS_FILE: &str = "jumpy-cat.json";

/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "JUMPY_CAT_SETTINGS";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Per-channel loop volumes (0.0 - 1.0)
    pub volumes: ChannelVolumes,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Silence every channel
    pub muted: bool,

    // === Game ===
    /// Fixed run seed (random when unset)
    pub seed: Option<u64>,
    /// Directory holding images and audio
    pub asset_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volumes: ChannelVolumes::default(),
            master_volume: 1.0,
            muted: false,
            seed: None,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl Settings {
    /// Volumes actually sent to the audio channels
    pub fn effective_volumes(&self) -> ChannelVolumes {
        if self.muted {
            self.volumes.scaled(0.0)
        } else {
            self.volumes.scaled(self.master_volume)
        }
    }

    /// Settings file location (`JUMPY_CAT_SETTINGS` or `./jumpy-cat.json`)
    pub fn default_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source: std::io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Load from the default path, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            log::info!("No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_loop_volumes() {
        let s = Settings::default();
        assert_eq!(s.effective_volumes(), ChannelVolumes::default());
        assert_eq!(s.asset_dir, PathBuf::from("assets"));
    }

    #[test]
    fn test_muted_zeroes_volumes() {
        let s = Settings {
            muted: true,
            ..Default::default()
        };
        let v = s.effective_volumes();
        assert_eq!((v.ambient, v.run, v.rain), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            master_volume: 0.5,
            seed: Some(99),
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "muted": true }"#).unwrap();
        let s = Settings::load_from(&path).unwrap();
        assert!(s.muted);
        assert_eq!(s.master_volume, 1.0);
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
