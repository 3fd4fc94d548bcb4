//! Asteroids
//!
//! Three size tiers. Each one drifts, spins and splits into two pieces
//! of the next tier when shot.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::hash::StateHasher;
use crate::core::{DeterministicRng, Vec2};

// =============================================================================
// SIZE TIERS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    /// Collision radius.
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 40.0,
            AsteroidSize::Medium => 20.0,
            AsteroidSize::Small => 10.0,
        }
    }

    /// Points for destroying an asteroid of this size.
    pub fn points(self) -> u32 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Tier of the pieces, or `None` for the smallest tier.
    pub fn smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Where the two pieces appear relative to the parent.
    fn split_offsets(self) -> [Vec2; 2] {
        match self {
            AsteroidSize::Large => [Vec2::new(5.0, 5.0), Vec2::new(-5.0, -5.0)],
            _ => [Vec2::new(5.0, 0.0), Vec2::new(0.0, 5.0)],
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            AsteroidSize::Large => 0,
            AsteroidSize::Medium => 1,
            AsteroidSize::Small => 2,
        }
    }
}

// =============================================================================
// ASTEROID
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per tick
    pub spin: f32,
    pub size: AsteroidSize,
    /// Outline in model space, unrotated
    pub outline: Vec<Vec2>,
}

impl Asteroid {
    /// Create an asteroid with random drift, spin and outline.
    pub fn spawn(
        id: u32,
        position: Vec2,
        size: AsteroidSize,
        rng: &mut DeterministicRng,
        config: &GameConfig,
    ) -> Self {
        let speed = rng.next_f32_range(config.asteroid_min_speed, config.asteroid_max_speed);
        let velocity = rng.random_direction() * speed;
        let rotation = rng.next_int_range(0, 360) as f32;
        let spin = rng.next_f32_range(-config.asteroid_max_spin, config.asteroid_max_spin);
        let outline = generate_outline(size.radius(), rng);

        Self {
            id,
            position,
            velocity,
            rotation,
            spin,
            size,
            outline,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.size.points()
    }

    /// Move, wrap and spin by one tick.
    pub fn update(&mut self, config: &GameConfig) {
        self.position = (self.position + self.velocity).wrap(config.field_width, config.field_height);
        self.rotation = (self.rotation + self.spin).rem_euclid(360.0);
    }

    /// Pieces left behind when this asteroid is destroyed.
    ///
    /// `next_id` is advanced for every piece created.
    pub fn split(
        &self,
        next_id: &mut u32,
        rng: &mut DeterministicRng,
        config: &GameConfig,
    ) -> Vec<Asteroid> {
        let Some(smaller) = self.size.smaller() else {
            return Vec::new();
        };

        self.size
            .split_offsets()
            .iter()
            .map(|&offset| {
                let id = *next_id;
                *next_id += 1;
                let position = (self.position + offset).wrap(config.field_width, config.field_height);
                Asteroid::spawn(id, position, smaller, rng, config)
            })
            .collect()
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_u8(self.size.to_u8());
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_f32(self.rotation);
        hasher.update_f32(self.spin);
    }
}

/// Jagged outline: 7 to 12 evenly spaced vertices at 80-120% of the radius.
fn generate_outline(radius: f32, rng: &mut DeterministicRng) -> Vec<Vec2> {
    let vertex_count = rng.next_int_range(7, 12);
    (0..vertex_count)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / vertex_count as f32;
            let r = radius * rng.next_f32_range(0.8, 1.2);
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}
