//! Configuration errors
//!
//! Gameplay never errors (falling or touching a hazard is a phase change);
//! only a bad world configuration is rejected, and always at construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be at most {max}, got {value}")]
    TooLarge {
        name: &'static str,
        value: f32,
        max: f32,
    },
    #[error("screen width {width} is narrower than the widest platform ({min})")]
    TooNarrow { width: f32, min: f32 },
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}
