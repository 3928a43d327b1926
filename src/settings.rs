//! Runtime settings
//!
//! Loaded from a JSON file; anything missing falls back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_FRAME_MS, PHYSICS_HZ, RENDER_HZ};
use crate::error::{Result, SimError};

/// Simulation and loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Loop pacing ===
    /// Physics ticks per second
    pub physics_hz: f64,
    /// Snapshots published per second
    pub render_hz: f64,
    /// Upper bound on a single tick's delta (ms)
    pub max_frame_ms: f64,

    // === Run ===
    /// RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Level file (built-in level when absent)
    pub level: Option<PathBuf>,

    // === Initial toggles ===
    pub muted: bool,
    pub red_mode: bool,
    pub animation_off: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics_hz: PHYSICS_HZ,
            render_hz: RENDER_HZ,
            max_frame_ms: MAX_FRAME_MS,

            seed: None,
            level: None,

            muted: false,
            red_mode: false,
            animation_off: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Rates must be finite and positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("physics_hz", self.physics_hz),
            ("render_hz", self.render_hz),
            ("max_frame_ms", self.max_frame_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimError::Settings(format!("{name} must be > 0, got {value}")));
            }
        }
        Ok(())
    }

    /// Physics tick period (ms)
    pub fn physics_period_ms(&self) -> f64 {
        1000.0 / self.physics_hz
    }

    /// Render period (ms)
    pub fn render_period_ms(&self) -> f64 {
        1000.0 / self.render_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.physics_period_ms() - 1000.0 / 300.0).abs() < 1e-9);
        assert!((settings.render_period_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.muted);
        assert_eq!(settings.physics_hz, PHYSICS_HZ);
        assert!(settings.level.is_none());
    }

    #[test]
    fn test_rejects_bad_rates() {
        let err = Settings::from_json(r#"{ "physics_hz": 0 }"#).unwrap_err();
        assert!(matches!(err, SimError::Settings(_)));

        let err = Settings::from_json(r#"{ "render_hz": -5.0 }"#).unwrap_err();
        assert!(matches!(err, SimError::Settings(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ physics_hz: ").unwrap_err();
        assert!(matches!(err, SimError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
