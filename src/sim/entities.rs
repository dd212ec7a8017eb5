//! Player, platforms, power-ups and hazards
//!
//! Entity kinds are enums carrying their own transient state; behavior is a
//! `match` on the kind rather than a trait per type.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// A timed player buff
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub active: bool,
    /// Ticks left (scaled by the time factor)
    pub remaining: f32,
}

impl Buff {
    /// (Re)start the buff with a full duration
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
    }

    /// Count down; returns true on the tick the buff runs out
    pub fn tick(&mut self, factor: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= factor;
        if self.remaining <= 0.0 {
            self.active = false;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    Wings,
    SlowTime,
    Magnet,
}

/// The climber
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Airborne after a jump (cleared on landing)
    pub jumping: bool,
    /// One extra mid-air jump available
    pub can_double_jump: bool,
    pub facing_right: bool,
    /// Cosmetic flight flag, no effect on gravity
    pub wings: Buff,
    /// Halves the global time factor while active
    pub slow_time: Buff,
    /// Attraction hook; powerups are not pulled
    pub magnet: Buff,
    /// Height (y) that scores zero
    pub score_baseline: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            jumping: false,
            can_double_jump: false,
            facing_right: true,
            wings: Buff::default(),
            slow_time: Buff::default(),
            magnet: Buff::default(),
            score_baseline: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Global slow-motion multiplier contributed by the player's buffs
    pub fn time_factor(&self) -> f32 {
        if self.slow_time.active {
            SLOW_TIME_FACTOR
        } else {
            1.0
        }
    }

    /// Horizontal input: a held direction sets the speed outright,
    /// no direction bleeds speed off
    pub fn steer(&mut self, left: bool, right: bool) {
        if left {
            self.vel.x = -PLAYER_SPEED;
        } else if right {
            self.vel.x = PLAYER_SPEED;
        } else {
            self.vel.x *= AIR_DAMPING;
        }
    }

    /// Ground jump, or the double jump if one is banked.
    /// Returns false when neither is available.
    pub fn jump(&mut self) -> bool {
        if !self.jumping {
            self.vel.y = JUMP_IMPULSE;
            self.jumping = true;
            true
        } else if self.can_double_jump {
            self.vel.y = JUMP_IMPULSE;
            self.can_double_jump = false;
            true
        } else {
            false
        }
    }

    /// Gravity, wind, damping and movement, then the side walls
    pub fn integrate(&mut self, wind_force: f32, factor: f32, dt: f32, screen_width: f32) {
        self.vel.y += GRAVITY * factor;
        self.vel.x += wind_force * factor;
        self.vel.x *= AIR_DAMPING;

        self.pos += self.vel * dt;

        if self.vel.x > FACING_DEADBAND {
            self.facing_right = true;
        } else if self.vel.x < -FACING_DEADBAND {
            self.facing_right = false;
        }

        let max_x = screen_width - self.size.x;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = 0.0;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x = 0.0;
        }
    }

    /// Count down all timed buffs, reporting each one that expires
    pub fn tick_buffs(&mut self, factor: f32, mut on_expire: impl FnMut(BuffKind)) {
        if self.wings.tick(factor) {
            on_expire(BuffKind::Wings);
        }
        if self.slow_time.tick(factor) {
            on_expire(BuffKind::SlowTime);
        }
        if self.magnet.tick(factor) {
            on_expire(BuffKind::Magnet);
        }
    }

    pub fn apply_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Wings => self.wings.activate(WINGS_DURATION_TICKS),
            PowerupKind::DoubleJump => self.can_double_jump = true,
            PowerupKind::Magnet => self.magnet.activate(MAGNET_DURATION_TICKS),
            PowerupKind::SlowTime => self.slow_time.activate(SLOW_TIME_DURATION_TICKS),
        }
    }
}

/// Platform types with their per-type state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Static,
    /// Oscillates horizontally around `origin_x`
    Moving {
        origin_x: f32,
        amplitude: f32,
        direction: f32,
    },
    /// Crumbles `countdown` ticks after the first landing
    Breaking { triggered: bool, countdown: f32 },
    /// Relaunches the player on contact
    Bounce,
}

impl PlatformKind {
    pub fn moving(origin_x: f32) -> Self {
        PlatformKind::Moving {
            origin_x,
            amplitude: PLATFORM_MOVE_DISTANCE,
            direction: 1.0,
        }
    }

    pub fn breaking() -> Self {
        PlatformKind::Breaking {
            triggered: false,
            countdown: BREAK_DELAY_TICKS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlatformKind::Static => "static",
            PlatformKind::Moving { .. } => "moving",
            PlatformKind::Breaking { .. } => "breaking",
            PlatformKind::Bounce => "bounce",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, width: f32, kind: PlatformKind) -> Self {
        Self { pos, width, kind }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, PLATFORM_HEIGHT))
    }

    /// Oscillate moving platforms and run the break countdown
    pub fn update(&mut self, dt: f32) {
        match &mut self.kind {
            PlatformKind::Moving {
                origin_x,
                amplitude,
                direction,
            } => {
                self.pos.x += PLATFORM_SPEED * *direction * dt;
                if self.pos.x > *origin_x + *amplitude {
                    *direction = -1.0;
                } else if self.pos.x < *origin_x - *amplitude {
                    *direction = 1.0;
                }
            }
            PlatformKind::Breaking {
                triggered: true,
                countdown,
            } => {
                *countdown -= dt;
            }
            _ => {}
        }
    }

    /// Arm a breaking platform; landing again does not reset the countdown.
    /// Returns true only on the landing that armed it.
    pub fn trigger_break(&mut self) -> bool {
        match &mut self.kind {
            PlatformKind::Breaking { triggered, .. } if !*triggered => {
                *triggered = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(
            self.kind,
            PlatformKind::Breaking { triggered: true, countdown } if countdown <= 0.0
        )
    }

    /// Quake displacement: shift, keep inside the walls, and re-center
    /// a moving platform's oscillation on its new spot
    pub fn shift(&mut self, dx: f32, screen_width: f32) {
        let max_x = (screen_width - self.width).max(0.0);
        self.pos.x = (self.pos.x + dx).clamp(0.0, max_x);
        if let PlatformKind::Moving { origin_x, .. } = &mut self.kind {
            *origin_x = self.pos.x;
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Wings,
    DoubleJump,
    Magnet,
    SlowTime,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 4] = [
        PowerupKind::Wings,
        PowerupKind::DoubleJump,
        PowerupKind::Magnet,
        PowerupKind::SlowTime,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub kind: PowerupKind,
    pub collected: bool,
}

impl Powerup {
    pub fn new(pos: Vec2, kind: PowerupKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Sits on a platform
    Spike,
    /// Flies across the tower, wrapping at the walls
    Bird,
    /// Falls straight down
    Rock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub pos: Vec2,
    pub kind: HazardKind,
    /// Signed for birds (direction of travel), downward for rocks
    pub speed: f32,
}

impl Hazard {
    pub fn new(pos: Vec2, kind: HazardKind, speed: f32) -> Self {
        Self { pos, kind, speed }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(HAZARD_SIZE))
    }

    pub fn update(&mut self, factor: f32, screen_width: f32) {
        match self.kind {
            HazardKind::Spike => {}
            HazardKind::Bird => {
                self.pos.x += self.speed * factor;
                if self.pos.x > screen_width {
                    self.pos.x = -HAZARD_SIZE;
                } else if self.pos.x < -HAZARD_SIZE {
                    self.pos.x = screen_width;
                }
            }
            HazardKind::Rock => {
                self.pos.y += self.speed * factor;
            }
        }
    }
}
