//! Game State
//!
//! Everything needed to reproduce a game: config, RNG, entities and
//! score. The tick loop in [`crate::game::tick`] is the only writer
//! during play.

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::{DeterministicRng, Vec2};
use crate::game::asteroid::{Asteroid, AsteroidSize};
use crate::game::bullet::{Bullet, BulletOwner};
use crate::game::events::GameEvent;
use crate::game::ship::Ship;
use crate::game::ufo::Ufo;

/// Spawn attempts before accepting a point closer than the safe distance.
const MAX_SPAWN_ATTEMPTS: u32 = 1000;

// =============================================================================
// GAME PHASE
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Out of lives; the world is frozen until a restart
    GameOver,
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of one game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,

    /// Ticks simulated so far, including frozen game-over ticks
    pub tick: u32,

    pub phase: GamePhase,

    /// RNG seed (for verification)
    pub rng_seed: u64,

    /// Deterministic RNG state
    pub rng: DeterministicRng,

    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub ufos: Vec<Ufo>,

    pub score: u32,
    pub high_score: u32,
    pub level: u32,

    /// Next asteroid/UFO ID (monotonic counter)
    pub next_entity_id: u32,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new game: ship at the centre, level 1.
    pub fn new(config: GameConfig, rng_seed: u64, high_score: u32) -> Self {
        let ship = Ship::new(config.field_center(), &config);
        let mut state = Self {
            config,
            tick: 0,
            phase: GamePhase::Playing,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            ship,
            bullets: Vec::new(),
            asteroids: Vec::new(),
            ufos: Vec::new(),
            score: 0,
            high_score,
            level: 1,
            next_entity_id: 0,
            pending_events: Vec::new(),
        };
        state.start_level();
        state
    }

    /// Start over after a game over. The high score and RNG carry on.
    pub fn reset(&mut self) {
        self.ship = Ship::new(self.config.field_center(), &self.config);
        self.bullets.clear();
        self.asteroids.clear();
        self.ufos.clear();
        self.score = 0;
        self.level = 1;
        self.phase = GamePhase::Playing;

        info!("Game restarted");
        self.push_event(GameEvent::game_restarted(self.tick));
        self.start_level();
    }

    /// Fill the field for the current level.
    fn start_level(&mut self) {
        let count = if self.level == 1 {
            self.config.initial_asteroids
        } else {
            self.config.initial_asteroids + self.level
        };
        self.spawn_asteroids(count);
        info!("Level {} started with {} asteroids", self.level, count);
        self.push_event(GameEvent::level_started(self.tick, self.level, count));
    }

    /// Advance to the next level once the field is clear.
    pub fn next_level(&mut self) {
        self.level += 1;
        self.start_level();
    }

    /// Spawn `count` large asteroids away from the ship.
    ///
    /// Positions are resampled until they are farther than the safe
    /// distance from the ship.
    pub fn spawn_asteroids(&mut self, count: u32) {
        let (w, h) = (self.config.field_width, self.config.field_height);

        for _ in 0..count {
            let mut position = self.rng.random_point(w, h);
            let mut attempts = 1;
            while position.distance(self.ship.position) <= self.config.asteroid_safe_distance {
                if attempts >= MAX_SPAWN_ATTEMPTS {
                    debug!("No safe asteroid spawn point found, using {}", position);
                    break;
                }
                position = self.rng.random_point(w, h);
                attempts += 1;
            }

            let id = self.alloc_id();
            let asteroid = Asteroid::spawn(id, position, AsteroidSize::Large, &mut self.rng, &self.config);
            self.asteroids.push(asteroid);
        }
    }

    /// Allocate an entity ID.
    pub fn alloc_id(&mut self) -> u32 {
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        id
    }

    /// Score and split the asteroid at `index`.
    pub fn destroy_asteroid(&mut self, index: usize) {
        let asteroid = self.asteroids.remove(index);
        self.score += asteroid.points();

        let pieces = asteroid.split(&mut self.next_entity_id, &mut self.rng, &self.config);
        self.asteroids.extend(pieces);

        debug!("{:?} asteroid {} destroyed at {}", asteroid.size, asteroid.id, asteroid.position);
        self.push_event(GameEvent::asteroid_destroyed(self.tick, asteroid.size, asteroid.position));
    }

    /// Lose a life: respawn, or end the game on the last one.
    pub fn destroy_ship(&mut self) {
        let position = self.ship.position;
        self.ship.lives = self.ship.lives.saturating_sub(1);
        self.ship.thrusting = false;
        self.push_event(GameEvent::ship_destroyed(self.tick, position, self.ship.lives));

        if self.ship.lives == 0 {
            self.phase = GamePhase::GameOver;
            let new_high_score = self.score > self.high_score;
            if new_high_score {
                self.high_score = self.score;
            }
            info!("Game over at level {} with score {}", self.level, self.score);
            self.push_event(GameEvent::game_over(self.tick, self.score, new_high_score));
        } else {
            debug!("Ship destroyed, {} lives left", self.ship.lives);
            let center = self.config.field_center();
            self.ship.respawn(center, &self.config);
            self.bullets.clear();
            self.ufos.clear();
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Whether a UFO is on the field.
    pub fn ufo_present(&self) -> bool {
        !self.ufos.is_empty()
    }

    pub fn player_bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|b| b.owner == BulletOwner::Player)
    }

    /// Centre of the play-field.
    pub fn center(&self) -> Vec2 {
        self.config.field_center()
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            hasher.update_u8(match self.phase {
                GamePhase::Playing => 0,
                GamePhase::GameOver => 1,
            });

            self.ship.hash_into(hasher);

            hasher.update_u32(self.bullets.len() as u32);
            for bullet in &self.bullets {
                bullet.hash_into(hasher);
            }

            hasher.update_u32(self.asteroids.len() as u32);
            for asteroid in &self.asteroids {
                asteroid.hash_into(hasher);
            }

            hasher.update_u32(self.ufos.len() as u32);
            for ufo in &self.ufos {
                ufo.hash_into(hasher);
            }

            hasher.update_u32(self.score);
            hasher.update_u32(self.high_score);
            hasher.update_u32(self.level);
            hasher.update_u32(self.next_entity_id);
            let [s0, s1] = self.rng.state();
            hasher.update_u64(s0);
            hasher.update_u64(s1);
        })
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================
