//! Tower Jumper - an endless vertical platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, physics, collisions, effects)
//! - `settings`: Screen/world configuration
//! - `highscores`: In-memory session leaderboard
//! - `error`: Configuration errors

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::WorldConfig;
pub use sim::{GameState, TickInput, initialize, step, tick};

/// Game configuration constants
///
/// Values are per nominal tick (60 Hz); velocities are units per tick.
pub mod consts {
    /// Nominal simulation rate the tuning below assumes
    pub const TICKS_PER_SECOND: f32 = 60.0;
    /// Fixed timestep, in nominal ticks
    pub const SIM_DT: f32 = 1.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.5;
    /// Vertical velocity applied by a jump (negative = upward)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Bounce platforms relaunch at this multiple of the jump impulse
    pub const BOUNCE_MULTIPLIER: f32 = 1.5;
    /// Horizontal speed while a direction is held
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Horizontal air resistance applied every tick
    pub const AIR_DAMPING: f32 = 0.9;
    /// |vx| below this does not change facing
    pub const FACING_DEADBAND: f32 = 0.5;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Extra slack below a platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Camera scrolls once the player climbs within this distance of its top edge
    pub const SCROLL_THRESHOLD: f32 = 200.0;
    /// Entities this far below the bottom of the view are dropped
    pub const OFFSCREEN_MARGIN: f32 = 100.0;
    /// Height units per score point
    pub const SCORE_UNIT: f32 = 10.0;

    /// Slow-time buff halves every scaled delta
    pub const SLOW_TIME_FACTOR: f32 = 0.5;
    pub const WINGS_DURATION_TICKS: f32 = 5.0 * TICKS_PER_SECOND;
    pub const MAGNET_DURATION_TICKS: f32 = 7.0 * TICKS_PER_SECOND;
    pub const SLOW_TIME_DURATION_TICKS: f32 = 3.0 * TICKS_PER_SECOND;

    /// Platform defaults
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    pub const PLATFORM_SPEED: f32 = 2.0;
    pub const PLATFORM_MOVE_DISTANCE: f32 = 100.0;
    /// Ticks a breaking platform survives after being landed on
    pub const BREAK_DELAY_TICKS: f32 = 30.0;

    pub const POWERUP_SIZE: f32 = 20.0;
    pub const HAZARD_SIZE: f32 = 30.0;
}
