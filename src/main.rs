//! Tower Jumper headless runner
//!
//! Plays one run with a scripted autopilot and prints a JSON summary.
//!
//! Usage: `tower-jumper [seed] [config.json]`

use std::process::ExitCode;

use tower_jumper::consts::*;
use tower_jumper::sim::{GameState, TickInput, tick};
use tower_jumper::WorldConfig;

/// Longest run the autopilot plays, in simulated seconds
const MAX_RUN_SECS: f32 = 60.0;
const DEFAULT_SEED: u64 = 42;

/// Jump whenever grounded and drift toward the nearest platform overhead
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let center = player.pos.x + player.size.x / 2.0;

    let target = state
        .world
        .platforms
        .iter()
        .filter(|p| p.pos.y < player.pos.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|p| p.pos.x + p.width / 2.0);

    let (move_left, move_right) = match target {
        Some(x) if x < center - PLAYER_SPEED => (true, false),
        Some(x) if x > center + PLAYER_SPEED => (false, true),
        _ => (false, false),
    };

    TickInput {
        move_left,
        move_right,
        jump: !player.jumping,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("Invalid seed {:?}: {}", arg, e);
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_SEED,
    };

    let config = match args.next() {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| WorldConfig::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => config,
                Err(e) => {
                    log::error!("Failed to load config {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
            }
        }
        None => WorldConfig::default(),
    };

    let mut state = match GameState::new(seed, config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let max_ticks = (MAX_RUN_SECS * TICKS_PER_SECOND) as u64;
    let mut game_over = false;
    while state.time_ticks < max_ticks && !game_over {
        let input = autopilot(&state);
        game_over = tick(&mut state, &input, SIM_DT);
    }

    let summary = serde_json::json!({
        "seed": seed,
        "ticks": state.time_ticks,
        "game_over": game_over,
        "score": state.score,
        "height": state.score as f32 * SCORE_UNIT,
        "high_score": state.high_score(),
        "platforms": state.world.platforms.len(),
    });
    println!("{}", summary);
    ExitCode::SUCCESS
}
