//! Vector outlines for rendering.
//!
//! Model-space points are rotated by the entity heading and translated
//! to its position. Coordinates are play-field units (+y down).

use crate::core::Vec2;
use crate::game::asteroid::Asteroid;
use crate::game::bullet::Bullet;
use crate::game::ship::Ship;
use crate::game::ufo::{Ufo, UfoSize};

/// Bullet spawn point, relative to the ship centre.
pub const SHIP_NOSE: Vec2 = Vec2::new(0.0, -20.0);

pub const SHIP_POINTS: [Vec2; 4] = [
    SHIP_NOSE,
    Vec2::new(-12.0, 12.0),
    Vec2::new(0.0, 6.0),
    Vec2::new(12.0, 12.0),
];

pub const THRUSTER_POINTS: [Vec2; 3] = [
    Vec2::new(-6.0, 12.0),
    Vec2::new(0.0, 20.0),
    Vec2::new(6.0, 12.0),
];

/// Small ship drawn once per remaining life in the HUD.
pub const LIFE_ICON_POINTS: [Vec2; 4] = [
    Vec2::new(0.0, -8.0),
    Vec2::new(-5.0, 5.0),
    Vec2::new(0.0, 2.0),
    Vec2::new(5.0, 5.0),
];

// Hull then cockpit
pub const SMALL_UFO_POINTS: [Vec2; 11] = [
    Vec2::new(-5.0, -2.0),
    Vec2::new(5.0, -2.0),
    Vec2::new(8.0, 0.0),
    Vec2::new(5.0, 2.0),
    Vec2::new(-5.0, 2.0),
    Vec2::new(-8.0, 0.0),
    Vec2::new(-5.0, -2.0),
    Vec2::new(-5.0, -2.0),
    Vec2::new(-3.0, -4.0),
    Vec2::new(3.0, -4.0),
    Vec2::new(5.0, -2.0),
];

pub const LARGE_UFO_POINTS: [Vec2; 11] = [
    Vec2::new(-10.0, -3.0),
    Vec2::new(10.0, -3.0),
    Vec2::new(15.0, 0.0),
    Vec2::new(10.0, 3.0),
    Vec2::new(-10.0, 3.0),
    Vec2::new(-15.0, 0.0),
    Vec2::new(-10.0, -3.0),
    Vec2::new(-10.0, -3.0),
    Vec2::new(-5.0, -7.0),
    Vec2::new(5.0, -7.0),
    Vec2::new(10.0, -3.0),
];

/// Rotate `points` by `rotation` degrees, move them to `position` and
/// close the loop by repeating the first point.
pub fn closed_outline(points: &[Vec2], position: Vec2, rotation: f32) -> Vec<Vec2> {
    let mut outline: Vec<Vec2> = points
        .iter()
        .map(|&p| p.rotate_deg(rotation) + position)
        .collect();
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    outline
}

pub fn ship_outline(ship: &Ship) -> Vec<Vec2> {
    closed_outline(&SHIP_POINTS, ship.position, ship.rotation)
}

/// Flame behind the ship, or `None` when not thrusting.
pub fn thruster_outline(ship: &Ship) -> Option<Vec<Vec2>> {
    ship.thrusting
        .then(|| closed_outline(&THRUSTER_POINTS, ship.position, ship.rotation))
}

pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    closed_outline(&asteroid.outline, asteroid.position, asteroid.rotation)
}

pub fn ufo_outline(ufo: &Ufo) -> Vec<Vec2> {
    let points: &[Vec2] = match ufo.size {
        UfoSize::Small => &SMALL_UFO_POINTS,
        UfoSize::Large => &LARGE_UFO_POINTS,
    };
    closed_outline(points, ufo.position, 0.0)
}

/// A bullet is drawn as a one-unit diagonal dash.
pub fn bullet_segment(bullet: &Bullet) -> [Vec2; 2] {
    [bullet.position, bullet.position + Vec2::new(1.0, 1.0)]
}

/// Life icons along the bottom-left of the HUD.
pub fn life_icons(lives: u32, field_height: f32) -> Vec<Vec<Vec2>> {
    (0..lives)
        .map(|i| {
            let position = Vec2::new(70.0 + i as f32 * 30.0, field_height - 20.0);
            closed_outline(&LIFE_ICON_POINTS, position, 0.0)
        })
        .collect()
}
