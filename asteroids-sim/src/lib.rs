//! # Asteroids Simulation
//!
//! Deterministic game simulation for an Asteroids arcade clone. The
//! Bevy client and the headless runner both drive this crate.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ASTEROIDS SIMULATION                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── vec2.rs     - 2D f32 vector, heading and wrapping       │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── input.rs    - Input frames and recordings               │
//! │  ├── ship.rs     - Player ship                               │
//! │  ├── bullet.rs   - Player and UFO bullets                    │
//! │  ├── asteroid.rs - Asteroid tiers and splitting              │
//! │  ├── ufo.rs      - Enemy saucer AI                           │
//! │  ├── collision.rs- Circle collision tests                    │
//! │  ├── shape.rs    - Vector outlines                           │
//! │  ├── events.rs   - Game events                               │
//! │  ├── state.rs    - Game state, lives, levels                 │
//! │  └── tick.rs     - Authoritative simulation loop             │
//! │                                                              │
//! │  config.rs       - Gameplay constants, JSON overrides        │
//! │  highscore.rs    - High-score file                           │
//! │  sound.rs        - Synthesized WAV sound effects             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are deterministic:
//! - Fixed update order, entities kept in `Vec`s in spawn order
//! - No system time dependencies
//! - All randomness from seeded Xorshift128+
//!
//! Given identical config, inputs and RNG seed, the simulation produces
//! identical state hashes on every run.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod config;
pub mod error;
pub mod highscore;
pub mod sound;

// Re-export commonly used types
pub use core::vec2::Vec2;
pub use core::rng::DeterministicRng;
pub use config::GameConfig;
pub use error::{ConfigError, HighScoreError};
pub use game::input::{InputFrame, InputRecording};
pub use game::state::{GamePhase, GameState};
pub use game::events::{GameEvent, GameEventData};
pub use highscore::HighScoreStore;
pub use sound::{SoundBank, SoundEffect};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Default play-field width
pub const FIELD_WIDTH: f32 = 800.0;

/// Default play-field height
pub const FIELD_HEIGHT: f32 = 600.0;
