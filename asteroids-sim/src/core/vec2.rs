//! 2D Vector
//!
//! Plain `f32` vector used for all positions and velocities.
//! Screen convention: +x right, +y down, heading 0 points up.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use serde::{Serialize, Deserialize};

/// 2D vector with `f32` components.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Unit vector pointing up the screen (-Y)
    pub const UP: Self = Self { x: 0.0, y: -1.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading in degrees (0 = up, clockwise positive).
    #[inline]
    pub fn from_heading(degrees: f32) -> Self {
        let rad = degrees.to_radians();
        Self {
            x: rad.sin(),
            y: -rad.cos(),
        }
    }

    /// Scale by a scalar.
    #[inline]
    pub fn scale(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Length (magnitude).
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Normalize to unit length.
    /// Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }

    /// Rescale to the given length, keeping direction.
    /// A zero vector stays zero.
    #[inline]
    pub fn scale_to_length(self, length: f32) -> Self {
        self.normalize().scale(length)
    }

    /// Rotate clockwise on screen by `degrees`.
    ///
    /// With +y pointing down, the standard rotation matrix turns
    /// vectors clockwise as seen by the player.
    #[inline]
    pub fn rotate_deg(self, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Wrap into `[0, width) x [0, height)`.
    #[inline]
    pub fn wrap(self, width: f32, height: f32) -> Self {
        Self {
            x: wrap_coord(self.x, width),
            y: wrap_coord(self.y, height),
        }
    }

    /// Dot product with another vector.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Euclidean remainder that never returns `extent` itself.
///
/// `rem_euclid` can round a tiny negative value up to exactly `extent`.
#[inline]
fn wrap_coord(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl fmt::Debug for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec2({:.3}, {:.3})", self.x, self.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_vec2_add_sub() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(1.0, 2.0);
        assert_eq!(a + b, Vec2::new(4.0, 6.0));
        assert_eq!(a - b, Vec2::new(2.0, 2.0));
        assert_eq!(-a, Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(Vec2::ZERO.distance(v), 5.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let norm = Vec2::new(3.0, 4.0).normalize();
        assert!(approx(norm.length(), 1.0));

        // Zero vector normalizes to zero
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_scale_to_length() {
        let v = Vec2::new(6.0, 8.0).scale_to_length(5.0);
        assert!(approx(v.x, 3.0));
        assert!(approx(v.y, 4.0));
    }

    #[test]
    fn test_heading_conventions() {
        let up = Vec2::from_heading(0.0);
        assert!(approx(up.x, 0.0) && approx(up.y, -1.0));

        let right = Vec2::from_heading(90.0);
        assert!(approx(right.x, 1.0) && approx(right.y, 0.0));

        // Rotating the up vector matches the heading helper
        let rotated = Vec2::UP.rotate_deg(90.0);
        assert!(approx(rotated.x, right.x) && approx(rotated.y, right.y));
    }

    #[test]
    fn test_wrap() {
        let w = Vec2::new(805.0, -10.0).wrap(800.0, 600.0);
        assert!(approx(w.x, 5.0));
        assert!(approx(w.y, 590.0));

        let inside = Vec2::new(400.0, 300.0);
        assert_eq!(inside.wrap(800.0, 600.0), inside);
    }

    proptest! {
        #[test]
        fn wrap_stays_in_field(x in -5000.0f32..5000.0, y in -5000.0f32..5000.0) {
            let w = Vec2::new(x, y).wrap(800.0, 600.0);
            prop_assert!(w.x >= 0.0 && w.x < 800.0);
            prop_assert!(w.y >= 0.0 && w.y < 600.0);
        }
    }
}
