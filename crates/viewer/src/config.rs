//! Viewer configuration (window, audio, shadows). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// Persistent viewer settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Start in borderless fullscreen instead of a window.
    #[serde(default)]
    pub fullscreen: bool,
    /// Music volume, 0.0 to 1.0. Playback still starts paused.
    #[serde(default = "default_music_volume")]
    pub music_volume: f32,
    /// Volume for UI click sounds, 0.0 to 1.0.
    #[serde(default = "default_sfx_volume")]
    pub sfx_volume: f32,
    /// Render the sun's shadow map. Turn off on weak GPUs.
    #[serde(default = "default_true")]
    pub shadows: bool,
    /// Mouse sensitivity multiplier for orbiting (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Seed for the starfield, asteroid belt, and generated surface textures.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Number of background stars.
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Number of asteroid belt rocks.
    #[serde(default = "default_belt_rock_count")]
    pub belt_rock_count: usize,
    /// Number of comets crossing the system.
    #[serde(default = "default_comet_count")]
    pub comet_count: usize,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_music_volume() -> f32 {
    0.5
}
fn default_sfx_volume() -> f32 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    1.0
}
fn default_seed() -> u64 {
    42
}
fn default_star_count() -> usize {
    1500
}
fn default_belt_rock_count() -> usize {
    150
}
fn default_comet_count() -> usize {
    8
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fullscreen: false,
            music_volume: default_music_volume(),
            sfx_volume: default_sfx_volume(),
            shadows: default_true(),
            sensitivity: default_sensitivity(),
            seed: default_seed(),
            star_count: default_star_count(),
            belt_rock_count: default_belt_rock_count(),
            comet_count: default_comet_count(),
        }
    }
}

impl ViewerConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ViewerConfig = ron::from_str("(window_width: 1920)").unwrap();
        assert_eq!(config.window_width, 1920);
        assert_eq!(config.window_height, 720);
        assert!(!config.fullscreen);
        assert!((config.music_volume - 0.5).abs() < 1e-6);
        assert!(config.shadows);
        assert_eq!(config.star_count, 1500);
        assert_eq!(config.belt_rock_count, 150);
        assert_eq!(config.comet_count, 8);
    }

    #[test]
    fn round_trips_through_ron() {
        let config = ViewerConfig {
            music_volume: 0.25,
            shadows: false,
            seed: 7,
            ..Default::default()
        };
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        let back: ViewerConfig = ron::from_str(&text).unwrap();
        assert!((back.music_volume - 0.25).abs() < 1e-6);
        assert!(!back.shadows);
        assert_eq!(back.seed, 7);
    }
}
