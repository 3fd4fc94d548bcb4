//! State Hashing for Verification
//!
//! Provides deterministic hashing of game state for:
//! - Replay validation (recorded inputs must reproduce the same game)
//! - Regression checks in tests

use sha2::{Sha256, Digest};
use super::vec2::Vec2;

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Deterministic hasher for game state.
///
/// Wraps SHA-256 with typed helpers. Floats are hashed by bit pattern,
/// so two states only match when every value is bit-identical.
/// Order of updates is critical for determinism.
pub struct StateHasher {
    hasher: Sha256,
}

impl StateHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for game state.
    pub fn for_game_state() -> Self {
        Self::new(b"ASTEROIDS_STATE_V1")
    }

    /// Create hasher for an input recording.
    pub fn for_input_recording() -> Self {
        Self::new(b"ASTEROIDS_INPUTS_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an f32 value (raw bits, little-endian).
    #[inline]
    pub fn update_f32(&mut self, value: f32) {
        self.update_u32(value.to_bits());
    }

    /// Update with a Vec2.
    #[inline]
    pub fn update_vec2(&mut self, value: Vec2) {
        self.update_f32(value.x);
        self.update_f32(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(u8::from(value));
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> StateHash {
        self.hasher.finalize().into()
    }
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute state hash for a game.
///
/// Called by `GameState::compute_hash()`.
/// The closure adds state-specific data.
pub fn compute_state_hash<F>(tick: u32, rng_seed: u64, add_state: F) -> StateHash
where
    F: FnOnce(&mut StateHasher),
{
    let mut hasher = StateHasher::for_game_state();

    // Always hash tick and seed first
    hasher.update_u32(tick);
    hasher.update_u64(rng_seed);

    add_state(&mut hasher);

    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
