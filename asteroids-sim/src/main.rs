//! Asteroids Headless Runner
//!
//! Plays a game with a simple autopilot, logs what happens and then
//! replays the recorded inputs to verify the simulation is deterministic.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `ASTEROIDS_SEED`: RNG seed (default 12345)
//! - `ASTEROIDS_TICKS`: ticks to simulate (default 3 minutes)
//! - `ASTEROIDS_CONFIG`: optional JSON `GameConfig` override file
//! - `ASTEROIDS_RECORD`: optional path to write the input recording as JSON

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use asteroids::{
    TICK_RATE, VERSION,
    GameConfig, GameState, InputFrame, InputRecording,
    game::{
        events::GameEventData,
        tick::{replay, tick},
    },
};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICKS: u32 = TICK_RATE * 180;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Asteroids headless runner v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let seed = env_or("ASTEROIDS_SEED", DEFAULT_SEED)?;
    let ticks = env_or("ASTEROIDS_TICKS", DEFAULT_TICKS)?;
    let config = match env::var("ASTEROIDS_CONFIG") {
        Ok(path) => GameConfig::from_json_file(&path)?,
        Err(_) => GameConfig::default(),
    };

    run_demo(config, seed, ticks)
}

/// Parse an environment variable, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("Invalid {} value: {:?}", key, value)),
        Err(_) => Ok(default),
    }
}

fn run_demo(config: GameConfig, seed: u64, ticks: u32) -> Result<()> {
    info!("=== Starting Demo Game ===");
    info!("RNG Seed: {}", seed);
    info!("Running {} ticks ({} seconds)...", ticks, ticks / TICK_RATE);

    let mut state = GameState::new(config.clone(), seed, 0);
    let mut recording = InputRecording::new(seed);
    let mut pilot = Autopilot::default();

    let mut total_events = 0;
    let mut games_played = 1;
    let mut best_score = 0;

    for t in 0..ticks {
        let input = pilot.decide(&state);
        recording.record(state.tick, input);

        let result = tick(&mut state, input);
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::BulletFired { .. } => {}
                GameEventData::LevelStarted { .. }
                | GameEventData::GameOver { .. }
                | GameEventData::GameRestarted => info!("{}", event),
                _ => debug!("{}", event),
            }
            if let GameEventData::GameOver { score, .. } = event.data {
                best_score = best_score.max(score);
            }
            if event.data == GameEventData::GameRestarted {
                games_played += 1;
            }
        }

        // Report every 30 seconds
        if t > 0 && t % (TICK_RATE * 30) == 0 {
            info!(
                "Tick {}: level {}, score {}, lives {}, {} asteroids, {} events so far",
                t, state.level, state.score, state.ship.lives, state.asteroids.len(), total_events
            );
        }
    }

    info!("=== Demo Results ===");
    best_score = best_score.max(state.score);
    info!("Games played: {}", games_played);
    info!("Best score: {}", best_score);
    info!("Total events: {}", total_events);
    info!("Input changes recorded: {}", recording.delta_count());
    info!("Input Recording Hash: {}", hex::encode(recording.compute_hash()));

    let hash = state.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    if let Ok(path) = env::var("ASTEROIDS_RECORD") {
        let json = recording.to_json().context("Failed to serialize recording")?;
        fs::write(&path, json).with_context(|| format!("Failed to write recording to {}", path))?;
        info!("Recording written to {}", path);
    }

    // Verify determinism by replaying
    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay(config, seed, 0, &recording);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash {
        warn!("DETERMINISM FAILURE: Hashes differ!");
        bail!("replay diverged from the recorded game");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}

/// Turns toward the nearest asteroid and shoots at it.
#[derive(Default)]
struct Autopilot {
    restart_held: bool,
}

impl Autopilot {
    fn decide(&mut self, state: &GameState) -> InputFrame {
        let mut input = InputFrame::new();

        if state.is_game_over() {
            // Restart is edge-triggered: press on alternate ticks
            self.restart_held = !self.restart_held;
            input.set_restart(self.restart_held);
            return input;
        }

        let ship = &state.ship;
        let nearest = state
            .asteroids
            .iter()
            .map(|a| (a, a.position.distance(ship.position)))
            .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2));

        let Some((target, distance)) = nearest else {
            return input;
        };

        let to_target = target.position - ship.position;
        let desired = to_target.x.atan2(-to_target.y).to_degrees();
        let mut diff = (desired - ship.rotation).rem_euclid(360.0);
        if diff > 180.0 {
            diff -= 360.0;
        }

        input.set_rotate_left(diff < -3.0);
        input.set_rotate_right(diff > 3.0);
        input.set_fire(diff.abs() < 15.0);
        input.set_thrust(distance > 250.0 && state.tick % 4 == 0);

        let danger = target.radius() + ship.radius + 25.0;
        input.set_hyperspace(ship.is_vulnerable() && distance < danger && state.tick % 30 == 0);

        input
    }
}
