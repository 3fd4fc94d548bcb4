//! Bullets fired by the ship and by UFOs.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::hash::StateHasher;
use crate::core::Vec2;

/// Bullet collision radius
pub const BULLET_RADIUS: f32 = 1.0;

/// Who fired a bullet.
///
/// Player bullets hit asteroids and UFOs; UFO bullets only hit the ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Ufo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub ticks_left: u32,
    pub owner: BulletOwner,
}

impl Bullet {
    pub fn new(position: Vec2, velocity: Vec2, owner: BulletOwner, config: &GameConfig) -> Self {
        Self {
            position,
            velocity,
            ticks_left: config.bullet_lifetime,
            owner,
        }
    }

    /// Move, wrap and age by one tick.
    pub fn update(&mut self, config: &GameConfig) {
        self.position = (self.position + self.velocity).wrap(config.field_width, config.field_height);
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.ticks_left == 0
    }

    #[inline]
    pub fn is_from_player(&self) -> bool {
        self.owner == BulletOwner::Player
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_u32(self.ticks_left);
        hasher.update_u8(match self.owner {
            BulletOwner::Player => 0,
            BulletOwner::Ufo => 1,
        });
    }
}
