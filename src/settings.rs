//! World configuration
//!
//! Screen dimensions drive generation bounds, wall clamping, camera culling
//! and the fall-out check. Everything else is tuning in `consts`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::worldgen::PLATFORM_WIDTH_MAX;

/// Largest accepted screen dimension in world units
pub const MAX_SCREEN_DIMENSION: f32 = 16_384.0;

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the tower in world units (walls at 0 and this value)
    pub screen_width: f32,
    /// Height of the visible window in world units
    pub screen_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
        }
    }
}

impl WorldConfig {
    pub fn new(screen_width: f32, screen_height: f32) -> Result<Self, ConfigError> {
        let config = Self {
            screen_width,
            screen_height,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config; missing fields fall back to the defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
            if value > MAX_SCREEN_DIMENSION {
                return Err(ConfigError::TooLarge {
                    name,
                    value,
                    max: MAX_SCREEN_DIMENSION,
                });
            }
        }

        // Every row must be able to fit its widest platform
        let min = PLATFORM_WIDTH_MAX as f32;
        if self.screen_width < min {
            return Err(ConfigError::TooNarrow {
                width: self.screen_width,
                min,
            });
        }
        Ok(())
    }
}
