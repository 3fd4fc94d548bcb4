//! Game Events
//!
//! Events generated during simulation. The client turns them into sound
//! and particles; the headless runner logs them.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::core::Vec2;
use crate::game::asteroid::AsteroidSize;
use crate::game::bullet::BulletOwner;
use crate::game::ufo::UfoSize;
use crate::sound::SoundEffect;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    BulletFired {
        owner: BulletOwner,
    },

    AsteroidDestroyed {
        size: AsteroidSize,
        position: Vec2,
        points: u32,
    },

    UfoSpawned {
        size: UfoSize,
    },

    /// UFO shot down by the player
    UfoDestroyed {
        size: UfoSize,
        position: Vec2,
        points: u32,
    },

    /// UFO flew off the far edge
    UfoLeft,

    ShipDestroyed {
        position: Vec2,
        lives_left: u32,
    },

    Hyperspace {
        /// The jump itself destroyed the ship
        destroyed: bool,
    },

    LevelStarted {
        level: u32,
        asteroids: u32,
    },

    GameOver {
        score: u32,
        new_high_score: bool,
    },

    GameRestarted,
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    pub fn bullet_fired(tick: u32, owner: BulletOwner) -> Self {
        Self::new(tick, GameEventData::BulletFired { owner })
    }

    pub fn asteroid_destroyed(tick: u32, size: AsteroidSize, position: Vec2) -> Self {
        Self::new(
            tick,
            GameEventData::AsteroidDestroyed {
                size,
                position,
                points: size.points(),
            },
        )
    }

    pub fn ufo_spawned(tick: u32, size: UfoSize) -> Self {
        Self::new(tick, GameEventData::UfoSpawned { size })
    }

    pub fn ufo_destroyed(tick: u32, size: UfoSize, position: Vec2) -> Self {
        Self::new(
            tick,
            GameEventData::UfoDestroyed {
                size,
                position,
                points: size.points(),
            },
        )
    }

    pub fn ufo_left(tick: u32) -> Self {
        Self::new(tick, GameEventData::UfoLeft)
    }

    pub fn ship_destroyed(tick: u32, position: Vec2, lives_left: u32) -> Self {
        Self::new(tick, GameEventData::ShipDestroyed { position, lives_left })
    }

    pub fn hyperspace(tick: u32, destroyed: bool) -> Self {
        Self::new(tick, GameEventData::Hyperspace { destroyed })
    }

    pub fn level_started(tick: u32, level: u32, asteroids: u32) -> Self {
        Self::new(tick, GameEventData::LevelStarted { level, asteroids })
    }

    pub fn game_over(tick: u32, score: u32, new_high_score: bool) -> Self {
        Self::new(tick, GameEventData::GameOver { score, new_high_score })
    }

    pub fn game_restarted(tick: u32) -> Self {
        Self::new(tick, GameEventData::GameRestarted)
    }

    /// One-shot sound this event should trigger, if any.
    pub fn sound(&self) -> Option<SoundEffect> {
        match self.data {
            GameEventData::BulletFired { .. } => Some(SoundEffect::Fire),
            GameEventData::AsteroidDestroyed { .. }
            | GameEventData::UfoDestroyed { .. }
            | GameEventData::ShipDestroyed { .. } => Some(SoundEffect::Explode),
            GameEventData::Hyperspace { .. } => Some(SoundEffect::Hyperspace),
            _ => None,
        }
    }

    /// Where debris should fly from, for destruction events.
    pub fn explosion_at(&self) -> Option<Vec2> {
        match self.data {
            GameEventData::AsteroidDestroyed { position, .. }
            | GameEventData::UfoDestroyed { position, .. }
            | GameEventData::ShipDestroyed { position, .. } => Some(position),
            _ => None,
        }
    }

    /// Points this event added to the score.
    pub fn points(&self) -> u32 {
        match self.data {
            GameEventData::AsteroidDestroyed { points, .. }
            | GameEventData::UfoDestroyed { points, .. } => points,
            _ => 0,
        }
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}] ", self.tick)?;
        match &self.data {
            GameEventData::BulletFired { owner } => write!(f, "{:?} fired", owner),
            GameEventData::AsteroidDestroyed { size, position, points } => {
                write!(f, "{:?} asteroid destroyed at {} (+{})", size, position, points)
            }
            GameEventData::UfoSpawned { size } => write!(f, "{:?} UFO appeared", size),
            GameEventData::UfoDestroyed { size, position, points } => {
                write!(f, "{:?} UFO destroyed at {} (+{})", size, position, points)
            }
            GameEventData::UfoLeft => write!(f, "UFO left the field"),
            GameEventData::ShipDestroyed { position, lives_left } => {
                write!(f, "Ship destroyed at {}, {} lives left", position, lives_left)
            }
            GameEventData::Hyperspace { destroyed: true } => write!(f, "Hyperspace jump failed"),
            GameEventData::Hyperspace { destroyed: false } => write!(f, "Hyperspace jump"),
            GameEventData::LevelStarted { level, asteroids } => {
                write!(f, "Level {} started with {} asteroids", level, asteroids)
            }
            GameEventData::GameOver { score, new_high_score } => {
                write!(f, "Game over, score {}", score)?;
                if *new_high_score {
                    write!(f, " (new high score)")?;
                }
                Ok(())
            }
            GameEventData::GameRestarted => write!(f, "Game restarted"),
        }
    }
}
