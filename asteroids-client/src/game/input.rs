//! Keyboard to [`InputFrame`] mapping.
//!
//! Held controls are sampled when the fixed step runs. Hyperspace and
//! restart are edges, so their presses are latched every frame and
//! handed to the next fixed step; a press between two steps is never lost.

use bevy::prelude::*;

use asteroids::InputFrame;

pub const ROTATE_LEFT_KEY: KeyCode = KeyCode::ArrowLeft;
pub const ROTATE_RIGHT_KEY: KeyCode = KeyCode::ArrowRight;
pub const THRUST_KEY: KeyCode = KeyCode::ArrowUp;
pub const FIRE_KEY: KeyCode = KeyCode::Space;
pub const HYPERSPACE_KEY: KeyCode = KeyCode::KeyH;
pub const RESTART_KEY: KeyCode = KeyCode::Enter;

/// Edge presses seen since the last fixed step.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LatchedPresses {
    pub hyperspace: bool,
    pub restart: bool,
}

impl LatchedPresses {
    pub fn latch(&mut self, keys: &ButtonInput<KeyCode>) {
        self.hyperspace |= keys.just_pressed(HYPERSPACE_KEY);
        self.restart |= keys.just_pressed(RESTART_KEY);
    }
}

/// Build this step's frame and clear the latched edges.
pub fn frame_from_keys(keys: &ButtonInput<KeyCode>, latched: &mut LatchedPresses) -> InputFrame {
    let mut frame = InputFrame::new();
    frame.set_rotate_left(keys.pressed(ROTATE_LEFT_KEY));
    frame.set_rotate_right(keys.pressed(ROTATE_RIGHT_KEY));
    frame.set_thrust(keys.pressed(THRUST_KEY));
    frame.set_fire(keys.pressed(FIRE_KEY));
    frame.set_hyperspace(latched.hyperspace);
    frame.set_restart(latched.restart);
    *latched = LatchedPresses::default();
    frame
}

/// Runs every frame, before the fixed steps.
pub fn latch_presses(keys: Res<ButtonInput<KeyCode>>, mut latched: ResMut<LatchedPresses>) {
    latched.latch(&keys);
}
