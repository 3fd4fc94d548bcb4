//! Collision Detection
//!
//! Every entity is a circle. Two bodies collide when the distance
//! between their centres is strictly less than the sum of their radii.

use crate::core::Vec2;
use crate::game::asteroid::Asteroid;
use crate::game::bullet::{Bullet, BulletOwner, BULLET_RADIUS};
use crate::game::ship::Ship;
use crate::game::ufo::Ufo;

/// A circular collision body.
pub trait Body {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Body for Ship {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Body for Bullet {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn radius(&self) -> f32 {
        BULLET_RADIUS
    }
}

impl Body for Asteroid {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn radius(&self) -> f32 {
        self.size.radius()
    }
}

impl Body for Ufo {
    fn center(&self) -> Vec2 {
        self.position
    }
    fn radius(&self) -> f32 {
        self.size.radius()
    }
}

/// Check if two circles overlap.
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Check if two bodies collide.
#[inline]
pub fn collides(a: &impl Body, b: &impl Body) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Index of the first bullet from `owner` that hits `target`.
pub fn first_bullet_hit(bullets: &[Bullet], owner: BulletOwner, target: &impl Body) -> Option<usize> {
    bullets
        .iter()
        .position(|bullet| bullet.owner == owner && collides(bullet, target))
}

/// Index of the first asteroid touching the ship, ignoring invincibility.
pub fn asteroid_hitting_ship(asteroids: &[Asteroid], ship: &Ship) -> Option<usize> {
    asteroids.iter().position(|asteroid| collides(asteroid, ship))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::core::DeterministicRng;
    use crate::game::asteroid::AsteroidSize;

    #[test]
    fn test_overlap_is_strict() {
        let a = Vec2::new(0.0, 0.0);
        assert!(circles_overlap(a, 10.0, Vec2::new(19.0, 0.0), 10.0));
        // Touching edges do not count
        assert!(!circles_overlap(a, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_overlap(a, 10.0, Vec2::new(30.0, 0.0), 10.0));
    }

    #[test]
    fn test_first_bullet_hit_filters_owner() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(1);
        let asteroid = Asteroid::spawn(0, Vec2::new(100.0, 100.0), AsteroidSize::Small, &mut rng, &config);

        let bullets = vec![
            Bullet::new(Vec2::new(300.0, 300.0), Vec2::ZERO, BulletOwner::Player, &config),
            Bullet::new(Vec2::new(105.0, 100.0), Vec2::ZERO, BulletOwner::Ufo, &config),
            Bullet::new(Vec2::new(95.0, 100.0), Vec2::ZERO, BulletOwner::Player, &config),
            Bullet::new(Vec2::new(100.0, 95.0), Vec2::ZERO, BulletOwner::Player, &config),
        ];

        assert_eq!(first_bullet_hit(&bullets, BulletOwner::Player, &asteroid), Some(2));
        assert_eq!(first_bullet_hit(&bullets, BulletOwner::Ufo, &asteroid), Some(1));
        assert_eq!(first_bullet_hit(&bullets[..1], BulletOwner::Player, &asteroid), None);
    }

    #[test]
    fn test_asteroid_hitting_ship() {
        let config = GameConfig::default();
        let mut rng = DeterministicRng::new(2);
        let ship = Ship::new(Vec2::new(400.0, 300.0), &config);
        let far = Asteroid::spawn(0, Vec2::new(100.0, 100.0), AsteroidSize::Large, &mut rng, &config);
        // 15 + 40 = 55
        let near = Asteroid::spawn(1, Vec2::new(454.0, 300.0), AsteroidSize::Large, &mut rng, &config);

        assert_eq!(asteroid_hitting_ship(&[far.clone()], &ship), None);
        assert_eq!(asteroid_hitting_ship(&[far, near], &ship), Some(1));
    }
}
