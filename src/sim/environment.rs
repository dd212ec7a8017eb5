//! Tower-wide environmental effects
//!
//! Two independent timers, each alternating between dormant (counting down
//! to the next activation) and active (counting down to the end):
//! - Quake: shoves every platform sideways once on activation, tilts the view
//! - Wind: pushes the player horizontally while active
//!
//! Both count in scaled ticks, so slow-time stretches their cadence too.

use serde::{Deserialize, Serialize};

use super::entities::Platform;
use super::rng::SimRng;
use super::state::GameEvent;
use crate::consts::TICKS_PER_SECOND;

/// Seconds between quakes (inclusive range)
pub const QUAKE_INTERVAL_SECS: (i32, i32) = (10, 15);
pub const QUAKE_DURATION_TICKS: f32 = 2.0 * TICKS_PER_SECOND;
/// Largest sideways shove a quake gives a platform
pub const QUAKE_MAX_SHIFT: i32 = 30;
pub const QUAKE_INTENSITY_RANGE: (f32, f32) = (2.0, 5.0);
/// View tilt in degrees, cosmetic
pub const QUAKE_MAX_TILT: f32 = 5.0;

pub const WIND_FORCE: f32 = 1.5;
pub const WIND_DURATION_TICKS: f32 = 5.0 * TICKS_PER_SECOND;
/// Seconds between gusts (inclusive range)
pub const WIND_INTERVAL_SECS: (i32, i32) = (8, 20);

/// Two-state effect timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EffectTimer {
    Dormant { countdown: f32 },
    Active { remaining: f32 },
}

/// Timer edge produced by `EffectTimer::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Ended,
}

impl EffectTimer {
    pub fn is_active(&self) -> bool {
        matches!(self, EffectTimer::Active { .. })
    }

    /// Count down by `factor`; flips state when the current phase runs out.
    /// `next_interval` is only drawn when going dormant again.
    pub fn advance(
        &mut self,
        factor: f32,
        active_for: f32,
        next_interval: impl FnOnce() -> f32,
    ) -> Option<Transition> {
        match self {
            EffectTimer::Dormant { countdown } => {
                *countdown -= factor;
                if *countdown <= 0.0 {
                    *self = EffectTimer::Active {
                        remaining: active_for,
                    };
                    return Some(Transition::Started);
                }
            }
            EffectTimer::Active { remaining } => {
                *remaining -= factor;
                if *remaining <= 0.0 {
                    *self = EffectTimer::Dormant {
                        countdown: next_interval(),
                    };
                    return Some(Transition::Ended);
                }
            }
        }
        None
    }
}

/// Whole-second interval in ticks
fn interval_ticks(rng: &mut SimRng, (min_secs, max_secs): (i32, i32)) -> f32 {
    rng.int_inclusive(min_secs, max_secs) as f32 * TICKS_PER_SECOND
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quake {
    pub timer: EffectTimer,
    /// Screen-shake amplitude for the renderer
    pub intensity: f32,
    /// View rotation in degrees (0 when dormant)
    pub tilt_degrees: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub timer: EffectTimer,
    /// Signed horizontal force (0 when dormant)
    pub force: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub quake: Quake,
    pub wind: Wind,
}

impl Environment {
    /// Both effects start dormant with freshly drawn intervals
    pub fn new(rng: &mut SimRng) -> Self {
        Self {
            quake: Quake {
                timer: EffectTimer::Dormant {
                    countdown: interval_ticks(rng, QUAKE_INTERVAL_SECS),
                },
                intensity: 0.0,
                tilt_degrees: 0.0,
            },
            wind: Wind {
                timer: EffectTimer::Dormant {
                    countdown: interval_ticks(rng, WIND_INTERVAL_SECS),
                },
                force: 0.0,
            },
        }
    }

    pub fn quake_active(&self) -> bool {
        self.quake.timer.is_active()
    }

    pub fn wind_active(&self) -> bool {
        self.wind.timer.is_active()
    }

    /// Horizontal force on the player this tick
    pub fn wind_force(&self) -> f32 {
        if self.wind_active() { self.wind.force } else { 0.0 }
    }

    /// Advance both timers by the scaled time factor
    pub fn update(
        &mut self,
        factor: f32,
        platforms: &mut [Platform],
        screen_width: f32,
        rng: &mut SimRng,
        events: &mut Vec<GameEvent>,
    ) {
        let quake_edge = self.quake.timer.advance(factor, QUAKE_DURATION_TICKS, || {
            interval_ticks(rng, QUAKE_INTERVAL_SECS)
        });
        match quake_edge {
            Some(Transition::Started) => {
                let (lo, hi) = QUAKE_INTENSITY_RANGE;
                self.quake.intensity = rng.uniform(lo, hi);
                self.quake.tilt_degrees = rng.uniform(-QUAKE_MAX_TILT, QUAKE_MAX_TILT);
                for platform in platforms.iter_mut() {
                    let dx = rng.int_inclusive(-QUAKE_MAX_SHIFT, QUAKE_MAX_SHIFT) as f32;
                    platform.shift(dx, screen_width);
                }
                log::debug!(
                    "Tower quake: intensity {:.2}, tilt {:.2}, {} platforms shifted",
                    self.quake.intensity,
                    self.quake.tilt_degrees,
                    platforms.len()
                );
                events.push(GameEvent::QuakeStarted {
                    intensity: self.quake.intensity,
                });
            }
            Some(Transition::Ended) => {
                self.quake.tilt_degrees = 0.0;
                log::debug!("Tower quake over");
                events.push(GameEvent::QuakeEnded);
            }
            None => {}
        }

        let wind_edge = self.wind.timer.advance(factor, WIND_DURATION_TICKS, || {
            interval_ticks(rng, WIND_INTERVAL_SECS)
        });
        match wind_edge {
            Some(Transition::Started) => {
                self.wind.force = WIND_FORCE * rng.sign();
                log::debug!("Wind gust: force {}", self.wind.force);
                events.push(GameEvent::WindStarted {
                    force: self.wind.force,
                });
            }
            Some(Transition::Ended) => {
                self.wind.force = 0.0;
                log::debug!("Wind died down");
                events.push(GameEvent::WindEnded);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::PlatformKind;
    use glam::Vec2;
    use proptest::prelude::*;

    const WIDTH: f32 = 800.0;

    fn platforms_across() -> Vec<Platform> {
        vec![
            Platform::new(Vec2::new(0.0, 100.0), 100.0, PlatformKind::Static),
            Platform::new(Vec2::new(10.0, 0.0), 60.0, PlatformKind::moving(10.0)),
            Platform::new(Vec2::new(350.0, -100.0), 120.0, PlatformKind::breaking()),
            Platform::new(Vec2::new(650.0, -200.0), 150.0, PlatformKind::Bounce),
            Platform::new(Vec2::new(790.0 - 60.0, -300.0), 60.0, PlatformKind::Static),
        ]
    }

    fn about_to_quake(rng: &mut SimRng) -> Environment {
        let mut env = Environment::new(rng);
        env.quake.timer = EffectTimer::Dormant { countdown: 1.0 };
        env
    }

    #[test]
    fn test_initial_intervals() {
        for seed in 0..50 {
            let mut rng = SimRng::new(seed);
            let env = Environment::new(&mut rng);
            let EffectTimer::Dormant { countdown: quake } = env.quake.timer else {
                panic!("quake should start dormant");
            };
            let EffectTimer::Dormant { countdown: wind } = env.wind.timer else {
                panic!("wind should start dormant");
            };
            assert!((600.0..=900.0).contains(&quake));
            assert!((480.0..=1200.0).contains(&wind));
            assert_eq!(quake % TICKS_PER_SECOND, 0.0);
            assert_eq!(wind % TICKS_PER_SECOND, 0.0);
        }
    }

    #[test]
    fn test_quake_lifecycle() {
        let mut rng = SimRng::new(5);
        let mut env = about_to_quake(&mut rng);
        let mut platforms = platforms_across();
        let mut events = Vec::new();

        env.update(1.0, &mut platforms, WIDTH, &mut rng, &mut events);
        assert!(env.quake_active());
        assert!((2.0..=5.0).contains(&env.quake.intensity));
        assert!(env.quake.tilt_degrees.abs() <= QUAKE_MAX_TILT);
        assert!(matches!(events[0], GameEvent::QuakeStarted { .. }));

        // Active for exactly the quake duration
        for _ in 0..(QUAKE_DURATION_TICKS as usize - 1) {
            events.clear();
            env.update(1.0, &mut platforms, WIDTH, &mut rng, &mut events);
            assert!(env.quake_active());
        }
        events.clear();
        env.update(1.0, &mut platforms, WIDTH, &mut rng, &mut events);
        assert!(!env.quake_active());
        assert_eq!(env.quake.tilt_degrees, 0.0);
        assert!(events.contains(&GameEvent::QuakeEnded));
        let EffectTimer::Dormant { countdown } = env.quake.timer else {
            panic!("quake should be dormant");
        };
        assert!((600.0..=900.0).contains(&countdown));
    }

    #[test]
    fn test_quake_rebases_moving_platforms() {
        let mut rng = SimRng::new(11);
        let mut env = about_to_quake(&mut rng);
        let mut platforms = platforms_across();
        env.update(1.0, &mut platforms, WIDTH, &mut rng, &mut Vec::new());

        let moving = &platforms[1];
        let PlatformKind::Moving { origin_x, .. } = moving.kind else {
            panic!("expected a moving platform");
        };
        assert_eq!(origin_x, moving.pos.x);
    }

    #[test]
    fn test_wind_force_and_duration() {
        let mut rng = SimRng::new(8);
        let mut env = Environment::new(&mut rng);
        assert_eq!(env.wind_force(), 0.0);
        env.wind.timer = EffectTimer::Dormant { countdown: 0.5 };

        let mut events = Vec::new();
        env.update(1.0, &mut [], WIDTH, &mut rng, &mut events);
        assert!(env.wind_active());
        assert_eq!(env.wind_force().abs(), WIND_FORCE);
        assert!(matches!(events[0], GameEvent::WindStarted { .. }));

        for _ in 0..(WIND_DURATION_TICKS as usize - 1) {
            env.update(1.0, &mut [], WIDTH, &mut rng, &mut events);
            assert!(env.wind_active());
        }
        env.update(1.0, &mut [], WIDTH, &mut rng, &mut events);
        assert!(!env.wind_active());
        assert_eq!(env.wind_force(), 0.0);
        assert_eq!(env.wind.force, 0.0);
    }

    #[test]
    fn test_slow_time_stretches_cadence() {
        let mut rng = SimRng::new(9);
        let mut env = Environment::new(&mut rng);
        env.wind.timer = EffectTimer::Dormant { countdown: 1.0 };

        env.update(0.5, &mut [], WIDTH, &mut rng, &mut Vec::new());
        assert!(!env.wind_active());
        env.update(0.5, &mut [], WIDTH, &mut rng, &mut Vec::new());
        assert!(env.wind_active());
    }

    proptest! {
        #[test]
        fn quake_shift_stays_in_bounds(seed in 0u64..1000) {
            let mut rng = SimRng::new(seed);
            let mut env = about_to_quake(&mut rng);
            let mut platforms = platforms_across();
            let before: Vec<f32> = platforms.iter().map(|p| p.pos.x).collect();

            env.update(1.0, &mut platforms, WIDTH, &mut rng, &mut Vec::new());

            for (platform, x0) in platforms.iter().zip(before) {
                let x = platform.pos.x;
                prop_assert!(x >= 0.0);
                prop_assert!(x <= WIDTH - platform.width);
                prop_assert!((x - x0).abs() <= QUAKE_MAX_SHIFT as f32);
            }
        }
    }
}
