//! Game Logic Module
//!
//! All game simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `input`: Per-tick controls and input recording
//! - `ship`, `bullet`, `asteroid`, `ufo`: Entities and their movement
//! - `collision`: Circle collision tests
//! - `shape`: Vector outlines for rendering
//! - `state`: Game state, scoring, lives and levels
//! - `tick`: Authoritative simulation loop and replay
//! - `events`: Game events for sound, effects and logs

pub mod input;
pub mod ship;
pub mod bullet;
pub mod asteroid;
pub mod ufo;
pub mod collision;
pub mod shape;
pub mod events;
pub mod state;
pub mod tick;

// Re-export key types
pub use input::{InputFrame, InputDelta, InputRecording};
pub use ship::Ship;
pub use bullet::{Bullet, BulletOwner};
pub use asteroid::{Asteroid, AsteroidSize};
pub use ufo::{Ufo, UfoSize};
pub use events::{GameEvent, GameEventData};
pub use state::{GamePhase, GameState};
pub use tick::{replay, tick, TickResult};
