//! Game settings
//!
//! Every field falls back to the built-in constant when absent, so a partial
//! JSON document is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable play-field parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Radius of the player and every bubble
    pub bubble_radius: f32,
    /// Milliseconds between spawns
    pub spawn_period_ms: f64,
    /// Horizontal distance per move input
    pub player_step: f32,
    /// Vertical distance per frame (positive is downward)
    pub fall_speed: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            bubble_radius: BUBBLE_RADIUS,
            spawn_period_ms: SPAWN_PERIOD_MS,
            player_step: PLAYER_STEP,
            fall_speed: FALL_SPEED,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bubble_stack_settings";

    /// Environment variable naming a settings file (native)
    pub const ENV_PATH: &'static str = "BUBBLE_STACK_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        let radius_ok = self.bubble_radius.is_finite() && self.bubble_radius > 0.0;
        let canvas_ok = self.canvas_width.is_finite()
            && self.canvas_height.is_finite()
            && self.canvas_width > 2.0 * self.bubble_radius
            && self.canvas_height > 2.0 * self.bubble_radius;
        if !radius_ok || !canvas_ok {
            log::warn!(
                "Invalid geometry {}x{} r={}, using defaults",
                self.canvas_width,
                self.canvas_height,
                self.bubble_radius
            );
            self.canvas_width = defaults.canvas_width;
            self.canvas_height = defaults.canvas_height;
            self.bubble_radius = defaults.bubble_radius;
        }

        if !(self.spawn_period_ms.is_finite() && self.spawn_period_ms > 0.0) {
            log::warn!("Invalid spawn period {}, using default", self.spawn_period_ms);
            self.spawn_period_ms = defaults.spawn_period_ms;
        }

        if !(self.player_step.is_finite() && self.player_step > 0.0) {
            log::warn!("Invalid player step {}, using default", self.player_step);
            self.player_step = defaults.player_step;
        }

        if !self.fall_speed.is_finite() {
            log::warn!("Invalid fall speed {}, using default", self.fall_speed);
            self.fall_speed = defaults.fall_speed;
        }

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
                        return settings.validated();
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from the file named by `BUBBLE_STACK_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_PATH) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings.validated()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.canvas_width, 800.0);
        assert_eq!(s.canvas_height, 600.0);
        assert_eq!(s.bubble_radius, 20.0);
        assert_eq!(s.spawn_period_ms, 1000.0);
        assert_eq!(s.player_step, 5.0);
        assert_eq!(s.fall_speed, 1.0);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "fall_speed": 2.5, "seed": 9 }"#).unwrap();
        assert_eq!(s.fall_speed, 2.5);
        assert_eq!(s.seed, Some(9));
        assert_eq!(s.canvas_width, 800.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{ fall_speed: }").is_err());
    }

    #[test]
    fn test_validated_repairs_nonsense() {
        let s = Settings {
            canvas_width: 10.0,
            spawn_period_ms: 0.0,
            player_step: -3.0,
            fall_speed: f32::NAN,
            ..Settings::default()
        }
        .validated();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let custom = Settings {
            canvas_width: 1024.0,
            canvas_height: 768.0,
            bubble_radius: 16.0,
            spawn_period_ms: 500.0,
            player_step: 8.0,
            fall_speed: 3.0,
            seed: Some(1),
        };
        assert_eq!(custom.clone().validated(), custom);
    }

    #[test]
    fn test_json_round_trip() {
        let s = Settings {
            seed: Some(1234),
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }
}
