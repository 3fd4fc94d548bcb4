//! UFO (Enemy AI)
//!
//! A saucer enters from the left or right edge, drifts across the field
//! with occasional vertical course changes and fires at the ship.
//! Large saucers are inaccurate; small ones aim straight at the ship.

use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::hash::StateHasher;
use crate::core::{DeterministicRng, Vec2};
use crate::game::bullet::{Bullet, BulletOwner};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UfoSize {
    Small,
    Large,
}

impl UfoSize {
    pub fn radius(self) -> f32 {
        match self {
            UfoSize::Small => 15.0,
            UfoSize::Large => 30.0,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            UfoSize::Small => 1000,
            UfoSize::Large => 200,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ufo {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: UfoSize,
    /// Ticks until the next shot (0 = ready)
    pub fire_timer: u32,
}

impl Ufo {
    /// Enter from a random side at a random height.
    pub fn spawn(id: u32, size: UfoSize, rng: &mut DeterministicRng, config: &GameConfig) -> Self {
        let from_left = rng.next_bool(0.5);
        let (x, vx) = if from_left {
            (0.0, rng.next_f32_range(config.ufo_min_speed, config.ufo_max_speed))
        } else {
            (
                config.field_width,
                rng.next_f32_range(-config.ufo_max_speed, -config.ufo_min_speed),
            )
        };
        let margin = config.ufo_vertical_margin as i32;
        let y = rng.next_int_range(margin, config.field_height as i32 - margin) as f32;

        Self {
            id,
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, 0.0),
            size,
            fire_timer: 0,
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

    /// Advance one tick. Returns `false` once the UFO has left the field.
    ///
    /// Height wraps like every other entity; the horizontal pass does not,
    /// so a saucer crosses the field once and leaves past the far edge.
    pub fn update(&mut self, rng: &mut DeterministicRng, config: &GameConfig) -> bool {
        self.position += self.velocity;
        self.position.y = self.position.y.rem_euclid(config.field_height);

        let exit = config.ufo_exit_margin;
        let gone_right = self.velocity.x > 0.0 && self.position.x > config.field_width + exit;
        let gone_left = self.velocity.x < 0.0 && self.position.x < -exit;
        if gone_right || gone_left {
            return false;
        }

        self.fire_timer = self.fire_timer.saturating_sub(1);

        if rng.next_bool(config.ufo_course_change_chance) {
            self.velocity.y = rng.next_f32_range(-1.0, 1.0);
        }

        let top = config.ufo_vertical_margin;
        let bottom = config.field_height - config.ufo_vertical_margin;
        if self.position.y < top {
            self.velocity.y = self.velocity.y.abs();
        } else if self.position.y > bottom {
            self.velocity.y = -self.velocity.y.abs();
        }

        true
    }

    /// Fire at `target` if the timer allows.
    pub fn shoot(
        &mut self,
        target: Vec2,
        rng: &mut DeterministicRng,
        config: &GameConfig,
    ) -> Option<Bullet> {
        if self.fire_timer > 0 {
            return None;
        }
        self.fire_timer = config.ufo_shoot_interval;

        let mut direction = (target - self.position).normalize();
        if self.size == UfoSize::Large {
            let error = rng.next_f32_range(-config.ufo_aim_spread, config.ufo_aim_spread);
            direction = direction.rotate_deg(error.to_degrees());
        }

        Some(Bullet::new(
            self.position,
            self.velocity + direction * config.bullet_speed,
            BulletOwner::Ufo,
            config,
        ))
    }

    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id);
        hasher.update_bool(self.size == UfoSize::Small);
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_u32(self.fire_timer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ufo_at(position: Vec2, velocity: Vec2, size: UfoSize) -> Ufo {
        Ufo { id: 0, position, velocity, size, fire_timer: 0 }
    }

    #[test]
    fn test_spawn_on_an_edge() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(21);
        let (mut left, mut right) = (0, 0);

        for id in 0..200 {
            let ufo = Ufo::spawn(id, UfoSize::Large, &mut rng, &config);
            assert!((50.0..=550.0).contains(&ufo.position.y));
            assert_eq!(ufo.velocity.y, 0.0);
            if ufo.position.x == 0.0 {
                left += 1;
                assert!((1.0..2.0).contains(&ufo.velocity.x));
            } else {
                right += 1;
                assert_eq!(ufo.position.x, 800.0);
                assert!((-2.0..-1.0).contains(&ufo.velocity.x));
            }
        }
        assert!(left > 50 && right > 50);
    }

    #[test]
    fn test_ufo_leaves_past_far_edge() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(1);
        let mut ufo = ufo_at(Vec2::new(815.0, 300.0), Vec2::new(2.0, 0.0), UfoSize::Small);

        assert!(ufo.update(&mut rng, &config)); // 817
        assert!(ufo.update(&mut rng, &config)); // 819
        assert!(!ufo.update(&mut rng, &config)); // 821
    }

    #[test]
    fn test_ufo_crosses_field_once() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(2);
        let mut ufo = ufo_at(Vec2::new(800.0, 300.0), Vec2::new(-2.0, 0.0), UfoSize::Large);

        let mut ticks = 0;
        while ufo.update(&mut rng, &config) {
            ticks += 1;
            assert!(ticks < 1000, "UFO never left");
        }
        assert_eq!(ticks, 410);
    }

    #[test]
    fn test_ufo_bounces_off_margins() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(3);

        let mut ufo = ufo_at(Vec2::new(400.0, 45.0), Vec2::new(1.0, -1.0), UfoSize::Small);
        ufo.update(&mut rng, &config);
        assert!(ufo.velocity.y >= 0.0);

        let mut ufo = ufo_at(Vec2::new(400.0, 556.0), Vec2::new(1.0, 1.0), UfoSize::Small);
        ufo.update(&mut rng, &config);
        assert!(ufo.velocity.y <= 0.0);
    }

    #[test]
    fn test_small_ufo_aims_at_target() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(4);
        let mut ufo = ufo_at(Vec2::new(100.0, 300.0), Vec2::new(1.5, 0.0), UfoSize::Small);

        let bullet = ufo.shoot(Vec2::new(400.0, 300.0), &mut rng, &config).unwrap();
        assert_eq!(bullet.owner, BulletOwner::Ufo);
        assert_eq!(bullet.position, ufo.position);
        assert!((bullet.velocity.x - 11.5).abs() < 1e-4);
        assert!(bullet.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_fire_timer() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(5);
        let mut ufo = ufo_at(Vec2::new(100.0, 300.0), Vec2::new(1.0, 0.0), UfoSize::Large);
        let target = Vec2::new(400.0, 300.0);

        assert!(ufo.shoot(target, &mut rng, &config).is_some());
        for _ in 0..119 {
            ufo.update(&mut rng, &config);
            assert!(ufo.shoot(target, &mut rng, &config).is_none());
        }
        ufo.update(&mut rng, &config);
        assert!(ufo.shoot(target, &mut rng, &config).is_some());
    }

    #[test]
    fn test_large_ufo_spread_is_bounded() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(6);
        let target = Vec2::new(400.0, 300.0);

        for _ in 0..200 {
            let mut ufo = ufo_at(Vec2::new(100.0, 300.0), Vec2::ZERO, UfoSize::Large);
            let bullet = ufo.shoot(target, &mut rng, &config).unwrap();
            let aim = bullet.velocity.normalize();
            // cos(0.5 rad) ~ 0.8776
            assert!(aim.x >= 0.877, "aim = {:?}", aim);
        }
    }
}
