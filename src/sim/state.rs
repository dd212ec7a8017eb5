//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; the tick function is the only
//! thing that mutates it.

use serde::{Deserialize, Serialize};

use super::entities::{BuffKind, Hazard, HazardKind, Platform, Player, Powerup, PowerupKind};
use super::environment::Environment;
use super::rng::SimRng;
use super::worldgen::WorldGenerator;
use crate::consts::*;
use crate::error::ConfigError;
use crate::highscores::{HighScores, RunRecord};
use crate::settings::WorldConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; waits for a restart
    GameOver,
}

/// Something noteworthy that happened during a tick (for audio/render hooks)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { double: bool },
    Bounced,
    /// A breaking platform started its countdown
    PlatformArmed,
    PlatformBroke,
    PowerupCollected { kind: PowerupKind },
    BuffExpired { kind: BuffKind },
    QuakeStarted { intensity: f32 },
    QuakeEnded,
    WindStarted { force: f32 },
    WindEnded,
    HazardHit { kind: HazardKind },
    /// Dropped below the bottom of the view
    FellOut,
    NewHighScore { score: u64 },
}

/// Vertical scroll position of the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World y at the top edge of the screen; only ever decreases
    pub top: f32,
}

impl Camera {
    /// Scroll up when the player climbs within the threshold of the top edge
    pub fn follow(&mut self, player_y: f32) {
        if player_y < self.top + SCROLL_THRESHOLD {
            self.top = player_y - SCROLL_THRESHOLD;
        }
    }

    /// Far enough below the view to be dropped
    pub fn is_below_view(&self, y: f32, screen_height: f32) -> bool {
        y > self.top + screen_height + OFFSCREEN_MARGIN
    }
}

/// All generated entities
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub powerups: Vec<Powerup>,
    pub hazards: Vec<Hazard>,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: WorldConfig,
    /// Every random draw comes from here
    pub rng: SimRng,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub world: World,
    pub camera: Camera,
    pub generator: WorldGenerator,
    pub environment: Environment,
    /// Best height reached this run, in score units
    pub score: u64,
    /// Survives `reset`
    pub high_scores: HighScores,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(seed, config, HighScores::new()))
    }

    fn build(seed: u64, config: WorldConfig, high_scores: HighScores) -> Self {
        let mut rng = SimRng::new(seed);
        let environment = Environment::new(&mut rng);

        let mut generator = WorldGenerator::new(&config);
        let mut world = World::default();
        generator.generate_initial(&mut world, &mut rng);
        let player = Player::new(generator.spawn_point());

        log::info!(
            "New run: seed {}, {}x{} tower",
            seed,
            config.screen_width,
            config.screen_height
        );

        Self {
            seed,
            config,
            rng,
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            world,
            camera: Camera::default(),
            generator,
            environment,
            score: 0,
            high_scores,
            events: Vec::new(),
        }
    }

    /// Start over with a new seed, keeping the config and high scores
    pub fn reset(&mut self, seed: u64) {
        let high_scores = std::mem::take(&mut self.high_scores);
        *self = Self::build(seed, self.config, high_scores);
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Session best
    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score()
    }

    /// Raise the score to the current height if it is a new best
    pub fn update_score(&mut self) {
        let climbed = ((self.player.score_baseline - self.player.pos.y) / SCORE_UNIT).floor();
        let height_score = if climbed > 0.0 { climbed as u64 } else { 0 };
        self.score = self.score.max(height_score);
    }

    /// Enter game over and file the run with the leaderboard
    pub fn end_run(&mut self, cause: GameEvent) {
        self.phase = GamePhase::GameOver;
        self.events.push(cause);
        log::info!(
            "Run over ({:?}) after {} ticks, score {}",
            cause,
            self.time_ticks,
            self.score
        );

        let record = RunRecord {
            score: self.score,
            peak_height: self.score as f32 * SCORE_UNIT,
            ticks: self.time_ticks,
        };
        if self.high_scores.add_run(record) == Some(1) {
            log::info!("New high score: {}", self.score);
            self.events.push(GameEvent::NewHighScore { score: self.score });
        }
    }
}
