//! Client runtime settings read from the environment.

use std::env;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::Serialize;

use asteroids::highscore::DEFAULT_HIGHSCORE_FILE;
use asteroids::GameConfig;

pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Resource, Debug, Clone, Serialize)]
pub struct ClientConfig {
    pub game: GameConfig,
    pub seed: u64,
    pub highscore_path: PathBuf,
    pub volume: f32,
    pub record_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: rand::random(),
            highscore_path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
            volume: DEFAULT_VOLUME,
            record_path: None,
        }
    }
}

impl ClientConfig {
    /// Read `ASTEROIDS_CONFIG`, `ASTEROIDS_SEED`, `ASTEROIDS_HIGHSCORE`,
    /// `ASTEROIDS_VOLUME` and `ASTEROIDS_RECORD`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Bad values are logged and replaced
    /// by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("ASTEROIDS_CONFIG") {
            match GameConfig::from_json_file(&path) {
                Ok(game) => config.game = game,
                Err(e) => warn!("Ignoring game config: {}", e),
            }
        }

        if let Some(value) = lookup("ASTEROIDS_SEED") {
            match value.trim().parse() {
                Ok(seed) => config.seed = seed,
                Err(_) => warn!("Invalid ASTEROIDS_SEED {:?}, using random seed", value),
            }
        }

        if let Some(path) = lookup("ASTEROIDS_HIGHSCORE") {
            config.highscore_path = PathBuf::from(path);
        }

        if let Some(value) = lookup("ASTEROIDS_VOLUME") {
            match value.trim().parse::<f32>() {
                Ok(volume) if (0.0..=1.0).contains(&volume) => config.volume = volume,
                _ => warn!("Invalid ASTEROIDS_VOLUME {:?}, using {}", value, DEFAULT_VOLUME),
            }
        }

        config.record_path = lookup("ASTEROIDS_RECORD").map(PathBuf::from);
        config
    }
}
