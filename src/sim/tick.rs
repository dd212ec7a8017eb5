//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use serde::{Deserialize, Serialize};

use super::collision::{Landing, resolve_platform_landing};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::ConfigError;
use crate::settings::WorldConfig;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Jump (or double jump) this tick
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a new run after game over
    pub restart: bool,
}

/// Build a fresh run for the given seed and screen size
pub fn initialize(seed: u64, screen_width: f32, screen_height: f32) -> Result<GameState, ConfigError> {
    GameState::new(seed, WorldConfig::new(screen_width, screen_height)?)
}

/// Value form of `tick`: consumes the state and hands back the next one
pub fn step(mut state: GameState, input: &TickInput, dt: f32) -> (GameState, bool) {
    let game_over = tick(&mut state, input, dt);
    (state, game_over)
}

/// Advance the game state by one fixed timestep.
///
/// Returns true on the tick the run ends.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.restart {
            let seed = state.rng.next_seed();
            log::info!("Restarting with seed {}", seed);
            state.reset(seed);
        }
        return false;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return false;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    if state.phase != GamePhase::Playing {
        return false;
    }

    state.time_ticks += 1;
    let screen_width = state.config.screen_width;
    let screen_height = state.config.screen_height;

    state.player.steer(input.move_left, input.move_right);
    let factor = state.player.time_factor() * dt;

    state.environment.update(
        factor,
        &mut state.world.platforms,
        screen_width,
        &mut state.rng,
        &mut state.events,
    );

    // Player movement and landing
    let wind = state.environment.wind_force();
    state.player.integrate(wind, factor, dt, screen_width);
    let landing = resolve_platform_landing(&mut state.player, &mut state.world.platforms);
    match landing {
        Some(Landing::BreakArmed) => state.events.push(GameEvent::PlatformArmed),
        Some(Landing::Bounce) => state.events.push(GameEvent::Bounced),
        Some(Landing::Rest) | None => {}
    }

    let events = &mut state.events;
    state.player.tick_buffs(factor, |kind| {
        log::debug!("{:?} wore off", kind);
        events.push(GameEvent::BuffExpired { kind });
    });

    // A bounce already relaunched the player this tick
    if input.jump && landing != Some(Landing::Bounce) {
        let double = state.player.jumping;
        if state.player.jump() {
            state.events.push(GameEvent::Jumped { double });
        }
    }

    state.camera.follow(state.player.pos.y);
    let camera = state.camera;

    // Platforms
    let events = &mut state.events;
    state.world.platforms.retain_mut(|platform| {
        platform.update(dt);
        if platform.is_broken() {
            events.push(GameEvent::PlatformBroke);
            return false;
        }
        !camera.is_below_view(platform.pos.y, screen_height)
    });

    state
        .generator
        .extend_above(&mut state.world, camera.top, &mut state.rng);

    // Powerups
    let player = &mut state.player;
    let player_bounds = player.bounds();
    state.world.powerups.retain_mut(|powerup| {
        if camera.is_below_view(powerup.pos.y, screen_height) {
            return false;
        }
        if !powerup.collected && powerup.bounds().intersects(&player_bounds) {
            powerup.collected = true;
            player.apply_powerup(powerup.kind);
            events.push(GameEvent::PowerupCollected { kind: powerup.kind });
            return false;
        }
        true
    });

    // Hazards
    for hazard in &mut state.world.hazards {
        hazard.update(factor, screen_width);
    }
    state
        .world
        .hazards
        .retain(|hazard| !camera.is_below_view(hazard.pos.y, screen_height));
    let hit = state
        .world
        .hazards
        .iter()
        .find(|hazard| hazard.bounds().intersects(&player_bounds))
        .map(|hazard| hazard.kind);

    state.update_score();

    if let Some(kind) = hit {
        state.end_run(GameEvent::HazardHit { kind });
        return true;
    }
    if state.player.pos.y > camera.top + screen_height {
        state.end_run(GameEvent::FellOut);
        return true;
    }
    false
}
