//! Player Ship
//!
//! Inertial movement, shooting, hyperspace and respawn invincibility.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::hash::StateHasher;
use crate::core::{DeterministicRng, Vec2};
use crate::game::bullet::{Bullet, BulletOwner};
use crate::game::shape::SHIP_NOSE;

/// Blink cycle length while invincible (ticks)
pub const BLINK_PERIOD: u32 = 10;

/// Ship is hidden for the first half of each blink cycle
pub const BLINK_HIDDEN_TICKS: u32 = 5;

/// The player's ship.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Heading in degrees (0 = up, clockwise positive)
    pub rotation: f32,
    /// Thrust held this tick
    pub thrusting: bool,
    /// Ticks until the next shot is allowed
    pub shoot_cooldown: u32,
    pub lives: u32,
    pub radius: f32,
    pub invincible: bool,
    /// Invincibility ticks remaining
    pub invincibility_ticks: u32,
    /// Cycles 0..BLINK_PERIOD while invincible
    pub blink_counter: u32,
}

impl Ship {
    /// Create a ship at rest, pointing up.
    pub fn new(position: Vec2, config: &GameConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            thrusting: false,
            shoot_cooldown: 0,
            lives: config.starting_lives,
            radius: config.ship_radius,
            invincible: false,
            invincibility_ticks: 0,
            blink_counter: 0,
        }
    }

    /// Unit vector the nose points along.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_heading(self.rotation)
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.rotation += degrees;
    }

    /// Advance one tick.
    pub fn update(&mut self, config: &GameConfig) {
        if self.thrusting {
            self.velocity += self.heading() * config.ship_acceleration;
            if self.velocity.length() > config.ship_max_speed {
                self.velocity = self.velocity.scale_to_length(config.ship_max_speed);
            }
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);

        if self.invincible {
            self.invincibility_ticks = self.invincibility_ticks.saturating_sub(1);
            self.blink_counter = (self.blink_counter + 1) % BLINK_PERIOD;
            if self.invincibility_ticks == 0 {
                self.invincible = false;
            }
        }

        self.position = (self.position + self.velocity).wrap(config.field_width, config.field_height);
    }

    /// Fire from the nose, if the cooldown allows.
    pub fn shoot(&mut self, config: &GameConfig) -> Option<Bullet> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = config.ship_shoot_cooldown;

        let nose = SHIP_NOSE.rotate_deg(self.rotation);
        Some(Bullet::new(
            self.position + nose,
            self.velocity + self.heading() * config.bullet_speed,
            BulletOwner::Player,
            config,
        ))
    }

    /// Jump to a random point. Returns `true` if the jump destroyed the ship.
    pub fn hyperspace(&mut self, rng: &mut DeterministicRng, config: &GameConfig) -> bool {
        self.position = rng.random_point(config.field_width, config.field_height);
        self.velocity = Vec2::ZERO;
        rng.next_f32() < config.hyperspace_death_chance
    }

    /// Return to `position` at rest and start respawn invincibility.
    pub fn respawn(&mut self, position: Vec2, config: &GameConfig) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.rotation = 0.0;
        self.invincible = true;
        self.invincibility_ticks = config.respawn_invincibility;
        self.blink_counter = 0;
    }

    /// Whether the ship should be drawn this tick.
    pub fn is_visible(&self) -> bool {
        !(self.invincible && self.blink_counter < BLINK_HIDDEN_TICKS)
    }

    /// Whether collisions can destroy the ship.
    #[inline]
    pub fn is_vulnerable(&self) -> bool {
        !self.invincible
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.rotation);
        hasher.update_bool(self.thrusting);
        hasher.update_u32(self.shoot_cooldown);
        hasher.update_u32(self.lives);
        hasher.update_bool(self.invincible);
        hasher.update_u32(self.invincibility_ticks);
        hasher.update_u32(self.blink_counter);
    }
}
