//! Game settings and preferences
//!
//! Read as JSON from LocalStorage. Missing fields take their defaults so
//! older saved settings keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Number of memory blocks on the floor
    pub block_count: usize,
    /// Side length of the square map
    pub map_size: f32,
    /// Orthographic view height (zoom)
    pub camera_height: f32,
    /// Player speed in units per second
    pub player_speed: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no indicator pulse or pop scaling on screen)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_count: BLOCK_COUNT,
            map_size: MAP_SIZE,
            camera_height: CAMERA_HEIGHT,
            player_speed: PLAYER_SPEED,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "memory_walk_settings";

    /// Parse settings from JSON, clamping values into usable ranges
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp every tunable into a range the game can run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f32, d: f32| if v.is_finite() { v } else { d };

        self.block_count = self.block_count.clamp(1, 500);
        self.map_size = finite_or(self.map_size, defaults.map_size).clamp(4.0, 400.0);
        self.camera_height =
            finite_or(self.camera_height, defaults.camera_height).clamp(2.0, 200.0);
        self.player_speed =
            finite_or(self.player_speed, defaults.player_speed).clamp(0.1, 50.0);
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.block_count, 50);
        assert_eq!(s.map_size, 40.0);
        assert_eq!(s.camera_height, 15.0);
        assert_eq!(s.player_speed, 5.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{"block_count": 12}"#).unwrap();
        assert_eq!(s.block_count, 12);
        assert_eq!(s.map_size, MAP_SIZE);
        assert!(!s.reduced_motion);
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let s = Settings::from_json(r#"{"block_count": 0, "map_size": 1.0, "player_speed": 900.0}"#)
            .unwrap();
        assert_eq!(s.block_count, 1);
        assert_eq!(s.map_size, 4.0);
        assert_eq!(s.player_speed, 50.0);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_flags() {
        let s = Settings {
            reduced_motion: true,
            show_fps: true,
            ..Default::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
