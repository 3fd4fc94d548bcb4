//! Input Capture and Recording
//!
//! One [`InputFrame`] is fed to the simulation every tick. Held controls
//! (rotate, thrust, fire) stay set while the key is down; edge controls
//! (hyperspace, restart) are set only on the tick the key went down.

use serde::{Serialize, Deserialize};

use crate::core::hash::{StateHash, StateHasher};

// =============================================================================
// INPUT TYPES
// =============================================================================

/// Control state for a single tick.
///
/// NO tick field - tick is stored separately for compression.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Rotate left (held)
    /// - Bit 1: Rotate right (held)
    /// - Bit 2: Thrust (held)
    /// - Bit 3: Fire (held)
    /// - Bit 4: Hyperspace pressed this frame
    /// - Bit 5: Restart pressed this frame
    pub flags: u8,
}

impl InputFrame {
    pub const FLAG_ROTATE_LEFT: u8 = 0x01;
    pub const FLAG_ROTATE_RIGHT: u8 = 0x02;
    pub const FLAG_THRUST: u8 = 0x04;
    pub const FLAG_FIRE: u8 = 0x08;
    pub const FLAG_HYPERSPACE: u8 = 0x10;
    pub const FLAG_RESTART: u8 = 0x20;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flag bits.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    #[inline]
    fn has(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    fn set(&mut self, flag: u8, pressed: bool) {
        if pressed {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    #[inline]
    pub fn rotate_left_held(&self) -> bool {
        self.has(Self::FLAG_ROTATE_LEFT)
    }

    #[inline]
    pub fn rotate_right_held(&self) -> bool {
        self.has(Self::FLAG_ROTATE_RIGHT)
    }

    #[inline]
    pub fn thrust_held(&self) -> bool {
        self.has(Self::FLAG_THRUST)
    }

    #[inline]
    pub fn fire_held(&self) -> bool {
        self.has(Self::FLAG_FIRE)
    }

    /// Check if hyperspace was pressed this frame.
    #[inline]
    pub fn hyperspace_pressed(&self) -> bool {
        self.has(Self::FLAG_HYPERSPACE)
    }

    /// Check if restart was pressed this frame.
    #[inline]
    pub fn restart_pressed(&self) -> bool {
        self.has(Self::FLAG_RESTART)
    }

    /// Check if this is an idle frame (no input).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    pub fn set_rotate_left(&mut self, held: bool) {
        self.set(Self::FLAG_ROTATE_LEFT, held);
    }

    pub fn set_rotate_right(&mut self, held: bool) {
        self.set(Self::FLAG_ROTATE_RIGHT, held);
    }

    pub fn set_thrust(&mut self, held: bool) {
        self.set(Self::FLAG_THRUST, held);
    }

    pub fn set_fire(&mut self, held: bool) {
        self.set(Self::FLAG_FIRE, held);
    }

    pub fn set_hyperspace(&mut self, pressed: bool) {
        self.set(Self::FLAG_HYPERSPACE, pressed);
    }

    pub fn set_restart(&mut self, pressed: bool) {
        self.set(Self::FLAG_RESTART, pressed);
    }

    /// Builder-style helpers, mostly for tests and the autopilot.
    pub fn with_thrust(mut self) -> Self {
        self.set_thrust(true);
        self
    }

    pub fn with_fire(mut self) -> Self {
        self.set_fire(true);
        self
    }

    pub fn with_rotate_left(mut self) -> Self {
        self.set_rotate_left(true);
        self
    }

    pub fn with_rotate_right(mut self) -> Self {
        self.set_rotate_right(true);
        self
    }

    pub fn with_hyperspace(mut self) -> Self {
        self.set_hyperspace(true);
        self
    }

    pub fn with_restart(mut self) -> Self {
        self.set_restart(true);
        self
    }
}

/// Delta-compressed input entry.
///
/// Only stored when input CHANGES (not every tick).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDelta {
    /// Tick when this input state began
    pub tick: u32,
    /// The new input state
    pub frame: InputFrame,
}

impl InputDelta {
    pub fn new(tick: u32, frame: InputFrame) -> Self {
        Self { tick, frame }
    }
}

// =============================================================================
// INPUT RECORDING
// =============================================================================

/// Complete input recording for one game session.
///
/// Together with the seed and config it reproduces the session exactly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputRecording {
    /// RNG seed used for this session
    pub rng_seed: u64,

    /// Number of ticks covered, starting at tick 0
    tick_count: u32,

    /// Delta-compressed input data.
    /// Only stores ticks where input CHANGED.
    deltas: Vec<InputDelta>,

    /// Last recorded input (for delta comparison)
    #[serde(skip)]
    last_frame: InputFrame,
}

impl InputRecording {
    pub fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            tick_count: 0,
            deltas: Vec::with_capacity(256),
            last_frame: InputFrame::new(),
        }
    }

    /// Record input for a tick.
    ///
    /// Ticks must be recorded in increasing order.
    pub fn record(&mut self, tick: u32, frame: InputFrame) {
        self.tick_count = tick + 1;

        if frame != self.last_frame {
            self.deltas.push(InputDelta::new(tick, frame));
            self.last_frame = frame;
        }
    }

    /// Get input at a specific tick.
    pub fn input_at(&self, tick: u32) -> InputFrame {
        // Last delta at or before this tick
        let idx = self.deltas.partition_point(|d| d.tick <= tick);

        if idx == 0 {
            InputFrame::new()
        } else {
            self.deltas[idx - 1].frame
        }
    }

    pub fn deltas(&self) -> &[InputDelta] {
        &self.deltas
    }

    pub fn delta_count(&self) -> usize {
        self.deltas.len()
    }

    /// Number of ticks covered (0 when nothing was recorded).
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a recording written by [`InputRecording::to_json`].
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let mut recording: Self = serde_json::from_str(text)?;
        recording.last_frame = recording
            .deltas
            .last()
            .map(|d| d.frame)
            .unwrap_or_default();
        Ok(recording)
    }

    /// Fingerprint of the seed, length and every delta.
    pub fn compute_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_input_recording();
        hasher.update_u64(self.rng_seed);
        hasher.update_u32(self.tick_count);
        for delta in &self.deltas {
            hasher.update_u32(delta.tick);
            hasher.update_u8(delta.frame.flags);
        }
        hasher.finalize()
    }

    /// Iterate over every tick's input for replay.
    pub fn replay_iter(&self) -> ReplayIterator<'_> {
        ReplayIterator {
            recording: self,
            current_tick: 0,
            delta_idx: 0,
            current_frame: InputFrame::new(),
        }
    }
}

/// Iterator for replaying inputs tick-by-tick.
pub struct ReplayIterator<'a> {
    recording: &'a InputRecording,
    current_tick: u32,
    delta_idx: usize,
    current_frame: InputFrame,
}

impl Iterator for ReplayIterator<'_> {
    type Item = (u32, InputFrame);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_tick >= self.recording.tick_count() {
            return None;
        }

        while let Some(delta) = self.recording.deltas.get(self.delta_idx) {
            if delta.tick <= self.current_tick {
                self.current_frame = delta.frame;
                self.delta_idx += 1;
            } else {
                break;
            }
        }

        let result = (self.current_tick, self.current_frame);
        self.current_tick += 1;
        Some(result)
    }
}

// =============================================================================
// TESTS
// =============================================================================
