//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (`SimRng`, owned by the state)
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod collision;
pub mod entities;
pub mod environment;
pub mod rng;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use aabb::Aabb;
pub use collision::{Landing, lands_on, resolve_platform_landing};
pub use entities::{
    Buff, BuffKind, Hazard, HazardKind, Platform, PlatformKind, Player, Powerup, PowerupKind,
};
pub use environment::{EffectTimer, Environment};
pub use rng::SimRng;
pub use state::{Camera, GameEvent, GamePhase, GameState, World};
pub use tick::{TickInput, initialize, step, tick};
pub use worldgen::WorldGenerator;
