//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ algorithm for fast, high-quality, deterministic randomness.
//! Given the same seed, produces identical sequence on all platforms.

use serde::{Serialize, Deserialize};

use super::vec2::Vec2;

/// Deterministic PRNG using Xorshift128+ algorithm.
///
/// Every random decision in the simulation (asteroid shapes, UFO
/// spawns, hyperspace outcome) draws from one instance, so a seed plus
/// an input recording reproduces a whole game.
///
/// # Example
///
/// ```
/// use asteroids::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random u32.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - slight bias for very large max, but acceptable
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Generate a random integer in range [min, max].
    #[inline]
    pub fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let range = (max - min + 1) as u32;
        min + self.next_int(range) as i32
    }

    /// Generate a random f32 in range [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits fill the f32 mantissa exactly
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Generate a random f32 in range [min, max).
    #[inline]
    pub fn next_f32_range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + (max - min) * self.next_f32()
    }

    /// Generate a random boolean that is `true` with given probability.
    #[inline]
    pub fn next_bool(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }

    /// Generate a random normalized direction vector.
    pub fn random_direction(&mut self) -> Vec2 {
        let angle = self.next_f32_range(0.0, 360.0);
        Vec2::from_heading(angle)
    }

    /// Generate a random integer point in `[0, width] x [0, height]`.
    pub fn random_point(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(
            self.next_int_range(0, width as i32) as f32,
            self.next_int_range(0, height as i32) as f32,
        )
    }

    /// Select a random element from a slice.
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.next_int(slice.len() as u32) as usize;
            Some(&slice[idx])
        }
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> [u64; 2] {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: [u64; 2]) {
        self.state = state;
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================
