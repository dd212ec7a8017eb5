//! Procedural tower generation
//!
//! Rows are generated lazily above a frontier (the y of the highest row so
//! far). Each tick the frontier is pushed until it sits at least one screen
//! height above the camera, so the world is always populated ahead of the
//! player without ever building the whole tower.
//!
//! Difficulty scales with height: unstable platforms and hazards get more
//! common as `height_factor` grows, saturating at `HEIGHT_FACTOR_MAX`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Hazard, HazardKind, Platform, PlatformKind, Powerup, PowerupKind};
use super::rng::SimRng;
use super::state::World;
use crate::consts::{HAZARD_SIZE, POWERUP_SIZE};
use crate::settings::WorldConfig;

/// Vertical gap between consecutive rows
pub const PLATFORM_GAP_MIN: i32 = 60;
pub const PLATFORM_GAP_MAX: i32 = 120;
/// Platform width range
pub const PLATFORM_WIDTH_MIN: i32 = 60;
pub const PLATFORM_WIDTH_MAX: i32 = 150;

/// Starting platform sits this far above the bottom of the screen
pub const START_PLATFORM_LIFT: f32 = 50.0;
pub const START_PLATFORM_WIDTH: f32 = 100.0;
/// Player spawns standing on the starting platform
pub const PLAYER_SPAWN_LIFT: f32 = 100.0;
/// First generated row is measured from this far above the bottom
pub const FIRST_ROW_LIFT: f32 = 150.0;
/// Initial pass keeps generating until a row passes this y
pub const INITIAL_CEILING_Y: f32 = -1000.0;
/// No hazards in the initial pass within this distance of the bottom
pub const HAZARD_SAFE_ZONE: f32 = 300.0;

/// Upper bound on rows added by one `extend_above` call
pub const MAX_ROWS_PER_EXTEND: usize = 256;
/// Upper bound on rows in the initial pass
pub const MAX_INITIAL_ROWS: usize = 1024;

pub const HEIGHT_FACTOR_SCALE: f32 = 10_000.0;
pub const HEIGHT_FACTOR_MAX: f32 = 0.7;

pub const POWERUP_CHANCE: f64 = 0.1;
/// Powerups hover this far above their platform
pub const POWERUP_HOVER: f32 = 30.0;

pub const HAZARD_BASE_CHANCE: f64 = 0.05;
pub const HAZARD_HEIGHT_CHANCE: f64 = 0.1;

const SPIKE_LIFT: f32 = 15.0;
const BIRD_SPEED: f32 = 3.0;
const ROCK_SPEED: f32 = 3.0;

/// Difficulty in [0, HEIGHT_FACTOR_MAX] for a row at `y`
pub fn height_factor(y: f32) -> f32 {
    (y.abs() / HEIGHT_FACTOR_SCALE).min(HEIGHT_FACTOR_MAX)
}

/// Cumulative thresholds for (bounce, moving, breaking); anything above is static
pub fn platform_thresholds(height_factor: f32) -> [f64; 3] {
    let hf = height_factor as f64;
    [0.1 + 0.1 * hf, 0.3 + 0.2 * hf, 0.4 + 0.3 * hf]
}

pub fn hazard_chance(height_factor: f32) -> f64 {
    HAZARD_BASE_CHANCE + HAZARD_HEIGHT_CHANCE * height_factor as f64
}

/// Which generation pass a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Opening screenful: flat difficulty, no rocks, safe start
    Initial,
    /// Everything generated while climbing
    Extension,
}

/// Generator state: the frontier plus the bounds rows must fit in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGenerator {
    /// y of the highest generated row
    pub frontier: f32,
    screen_width: f32,
    screen_height: f32,
}

impl WorldGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            frontier: config.screen_height,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
        }
    }

    /// Top-left corner the player spawns at
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(
            self.screen_width / 2.0,
            self.screen_height - PLAYER_SPAWN_LIFT,
        )
    }

    /// Starting platform plus rows up past `INITIAL_CEILING_Y`
    pub fn generate_initial(&mut self, world: &mut World, rng: &mut SimRng) {
        let start = Platform::new(
            Vec2::new(
                self.screen_width / 2.0 - START_PLATFORM_WIDTH / 2.0,
                self.screen_height - START_PLATFORM_LIFT,
            ),
            START_PLATFORM_WIDTH,
            PlatformKind::Static,
        );
        world.platforms.push(start);

        let mut y = self.screen_height - FIRST_ROW_LIFT;
        let mut rows = 0;
        while y > INITIAL_CEILING_Y && rows < MAX_INITIAL_ROWS {
            y -= rng.int_inclusive(PLATFORM_GAP_MIN, PLATFORM_GAP_MAX) as f32;
            self.spawn_row(world, rng, y, Pass::Initial);
            rows += 1;
        }
        if y > INITIAL_CEILING_Y {
            log::warn!("Initial generation capped at {} rows at y {}", rows, y);
        }
        self.frontier = y;

        log::debug!(
            "Initial tower: {} platforms, {} powerups, {} hazards, frontier {}",
            world.platforms.len(),
            world.powerups.len(),
            world.hazards.len(),
            self.frontier
        );
    }

    /// Push the frontier until it is at least one screen above `camera_top`.
    ///
    /// Returns the number of rows added (at most `MAX_ROWS_PER_EXTEND`; any
    /// remaining shortfall is made up on the next call).
    pub fn extend_above(&mut self, world: &mut World, camera_top: f32, rng: &mut SimRng) -> usize {
        let target = camera_top - self.screen_height;
        let mut rows = 0;
        while self.frontier > target && rows < MAX_ROWS_PER_EXTEND {
            let y = self.frontier - rng.int_inclusive(PLATFORM_GAP_MIN, PLATFORM_GAP_MAX) as f32;
            self.spawn_row(world, rng, y, Pass::Extension);
            self.frontier = y;
            rows += 1;
        }
        if self.frontier > target {
            log::warn!(
                "Generation capped at {} rows; frontier {} still below target {}",
                rows,
                self.frontier,
                target
            );
        }
        rows
    }

    /// One platform at `y` plus its optional powerup and hazard
    fn spawn_row(&self, world: &mut World, rng: &mut SimRng, y: f32, pass: Pass) {
        let width = rng.int_inclusive(PLATFORM_WIDTH_MIN, PLATFORM_WIDTH_MAX);
        let x = rng.int_inclusive(0, self.screen_width as i32 - width) as f32;
        let width = width as f32;

        let hf = match pass {
            Pass::Initial => 0.0,
            Pass::Extension => height_factor(y),
        };
        let kind = match rng.categorical(&platform_thresholds(hf)) {
            0 => PlatformKind::Bounce,
            1 => PlatformKind::moving(x),
            2 => PlatformKind::breaking(),
            _ => PlatformKind::Static,
        };
        log::trace!("row y={} x={} w={} {}", y, x, width, kind.name());
        world.platforms.push(Platform::new(Vec2::new(x, y), width, kind));

        if rng.chance(POWERUP_CHANCE) {
            let kind = rng.pick(&PowerupKind::ALL).unwrap_or(PowerupKind::Wings);
            let pos = Vec2::new(x + width / 2.0 - POWERUP_SIZE / 2.0, y - POWERUP_HOVER);
            world.powerups.push(Powerup::new(pos, kind));
        }

        let hazard_kind = match pass {
            Pass::Initial => {
                let roll = rng.chance(HAZARD_BASE_CHANCE);
                if roll && y < self.screen_height - HAZARD_SAFE_ZONE {
                    Some(if rng.chance(0.5) {
                        HazardKind::Spike
                    } else {
                        HazardKind::Bird
                    })
                } else {
                    None
                }
            }
            Pass::Extension => {
                if rng.chance(hazard_chance(hf)) {
                    Some(match rng.categorical(&[0.4, 0.8]) {
                        0 => HazardKind::Spike,
                        1 => HazardKind::Bird,
                        _ => HazardKind::Rock,
                    })
                } else {
                    None
                }
            }
        };
        if let Some(kind) = hazard_kind {
            world.hazards.push(self.spawn_hazard(kind, x, y, width, rng));
        }
    }

    fn spawn_hazard(&self, kind: HazardKind, x: f32, y: f32, width: f32, rng: &mut SimRng) -> Hazard {
        match kind {
            HazardKind::Spike => {
                let offset = rng.int_inclusive(10, width as i32 - 40) as f32;
                Hazard::new(Vec2::new(x + offset, y - SPIKE_LIFT), kind, 0.0)
            }
            HazardKind::Bird => {
                let lift = rng.int_inclusive(50, 100) as f32;
                let speed = BIRD_SPEED * rng.sign();
                // Enter from the wall behind the direction of travel
                let start_x = if speed > 0.0 { 0.0 } else { self.screen_width };
                Hazard::new(Vec2::new(start_x, y - lift), kind, speed)
            }
            HazardKind::Rock => {
                let rock_x = rng.int_inclusive(0, (self.screen_width - HAZARD_SIZE) as i32) as f32;
                let lift = rng.int_inclusive(100, 200) as f32;
                Hazard::new(Vec2::new(rock_x, y - lift), kind, ROCK_SPEED)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh(seed: u64) -> (WorldGenerator, World, SimRng) {
        let mut rng = SimRng::new(seed);
        let mut generator = WorldGenerator::new(&WorldConfig::default());
        let mut world = World::default();
        generator.generate_initial(&mut world, &mut rng);
        (generator, world, rng)
    }

    fn assert_rows_contiguous(world: &World) {
        let mut ys: Vec<f32> = world.platforms.iter().skip(1).map(|p| p.pos.y).collect();
        ys.sort_by(|a, b| b.partial_cmp(a).unwrap());
        for pair in ys.windows(2) {
            let gap = pair[0] - pair[1];
            assert!(
                (PLATFORM_GAP_MIN as f32..=PLATFORM_GAP_MAX as f32).contains(&gap),
                "gap {} out of range",
                gap
            );
        }
    }

    #[test]
    fn test_start_platform() {
        let (generator, world, _) = fresh(42);
        let start = &world.platforms[0];
        assert_eq!(start.pos, Vec2::new(350.0, 550.0));
        assert_eq!(start.width, 100.0);
        assert_eq!(start.kind, PlatformKind::Static);
        assert_eq!(generator.spawn_point(), Vec2::new(400.0, 500.0));
    }

    #[test]
    fn test_initial_rows_reach_ceiling() {
        for seed in 0..20 {
            let (generator, world, _) = fresh(seed);
            assert!(generator.frontier <= INITIAL_CEILING_Y);
            assert!(generator.frontier > INITIAL_CEILING_Y - PLATFORM_GAP_MAX as f32);
            assert_rows_contiguous(&world);

            for p in &world.platforms[1..] {
                assert!(p.width >= PLATFORM_WIDTH_MIN as f32 && p.width <= PLATFORM_WIDTH_MAX as f32);
                assert!(p.pos.x >= 0.0 && p.pos.x + p.width <= 800.0);
                assert!(p.pos.y <= 600.0 - FIRST_ROW_LIFT - PLATFORM_GAP_MIN as f32);
            }
        }
    }

    #[test]
    fn test_initial_hazards_spare_the_start() {
        for seed in 0..200 {
            let (_, world, _) = fresh(seed);
            for hazard in &world.hazards {
                assert_ne!(hazard.kind, HazardKind::Rock);
                assert!(hazard.pos.y < 600.0 - HAZARD_SAFE_ZONE);
            }
        }
    }

    #[test]
    fn test_powerups_hover_over_platform_centers() {
        for seed in 0..50 {
            let (_, world, _) = fresh(seed);
            for powerup in &world.powerups {
                let center_x = powerup.pos.x + POWERUP_SIZE / 2.0;
                let row_y = powerup.pos.y + POWERUP_HOVER;
                assert!(world.platforms.iter().any(|p| {
                    p.pos.y == row_y && (p.pos.x + p.width / 2.0 - center_x).abs() < 1e-3
                }));
            }
        }
    }

    #[test]
    fn test_height_factor_saturates() {
        assert_eq!(height_factor(0.0), 0.0);
        assert!((height_factor(-5_000.0) - 0.5).abs() < 1e-6);
        assert_eq!(height_factor(-7_000.0), HEIGHT_FACTOR_MAX);
        assert_eq!(height_factor(-1_000_000.0), HEIGHT_FACTOR_MAX);

        let low = platform_thresholds(0.0);
        assert_eq!(low, [0.1, 0.3, 0.4]);
        let high = platform_thresholds(HEIGHT_FACTOR_MAX);
        for i in 0..3 {
            assert!(high[i] > low[i]);
        }
        assert!(hazard_chance(HEIGHT_FACTOR_MAX) > hazard_chance(0.0));
    }

    #[test]
    fn test_extend_noop_when_ahead() {
        let (mut generator, mut world, mut rng) = fresh(1);
        let before = world.platforms.len();
        // Initial frontier is already past -600
        assert_eq!(generator.extend_above(&mut world, 0.0, &mut rng), 0);
        assert_eq!(world.platforms.len(), before);
    }

    #[test]
    fn test_extend_is_bounded() {
        let (mut generator, mut world, mut rng) = fresh(2);
        let far = -1_000_000.0;
        assert_eq!(generator.extend_above(&mut world, far, &mut rng), MAX_ROWS_PER_EXTEND);
        assert!(generator.frontier > far - 600.0);

        // Later calls keep closing the gap
        let before = generator.frontier;
        generator.extend_above(&mut world, far, &mut rng);
        assert!(generator.frontier < before);
    }

    #[test]
    fn test_initial_pass_is_bounded() {
        // Unvalidated height so large that `y - gap` rounds back to `y`
        let config = WorldConfig {
            screen_width: 800.0,
            screen_height: 1.0e10,
        };
        let mut rng = SimRng::new(4);
        let mut generator = WorldGenerator::new(&config);
        let mut world = World::default();
        generator.generate_initial(&mut world, &mut rng);
        assert_eq!(world.platforms.len(), MAX_INITIAL_ROWS + 1);
    }

    #[test]
    fn test_largest_screen_is_not_capped() {
        let config = WorldConfig::new(800.0, crate::settings::MAX_SCREEN_DIMENSION).unwrap();
        let mut rng = SimRng::new(4);
        let mut generator = WorldGenerator::new(&config);
        let mut world = World::default();
        generator.generate_initial(&mut world, &mut rng);
        assert!(generator.frontier <= INITIAL_CEILING_Y);
        assert!(world.platforms.len() < MAX_INITIAL_ROWS);
    }

    #[test]
    fn test_extension_spawns_rocks_somewhere() {
        let (mut generator, mut world, mut rng) = fresh(3);
        for step in 1..=200 {
            generator.extend_above(&mut world, step as f32 * -500.0, &mut rng);
        }
        assert!(world.hazards.iter().any(|h| h.kind == HazardKind::Rock));
        assert_rows_contiguous(&world);
    }

    proptest! {
        #[test]
        fn extend_leaves_no_gap(seed in 0u64..500, climb in 0.0f32..10_000.0) {
            let (mut generator, mut world, mut rng) = fresh(seed);
            let camera_top = -climb;
            generator.extend_above(&mut world, camera_top, &mut rng);
            prop_assert!(generator.frontier <= camera_top - 600.0);
            let highest = world
                .platforms
                .iter()
                .map(|p| p.pos.y)
                .fold(f32::MAX, f32::min);
            prop_assert_eq!(highest, generator.frontier);
        }
    }
}
