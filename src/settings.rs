//! Game settings and preferences
//!
//! Persisted separately from tuning as a small JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start with the music muted
    pub start_muted: bool,

    // === Accessibility ===
    /// Reduced motion (no invincibility blinking)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            music_volume: 0.5,
            start_muted: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Blink the boat while invincible (respects reduced_motion)
    pub fn effective_blink(&self) -> bool {
        !self.reduced_motion
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("fruit-boat-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"reduced_motion": true}"#).unwrap();
        assert!(settings.reduced_motion);
        assert!(!settings.effective_blink());
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(&scratch_path("missing.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let path = scratch_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("saved.json");
        let settings = Settings {
            music_volume: 0.25,
            start_muted: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(path);
    }
}
