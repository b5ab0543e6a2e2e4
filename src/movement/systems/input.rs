//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::{InputSnapshot, MovementInput};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    input.snapshot = sample_keyboard(&keyboard);
}

/// Raw axes in `[-1, 1]`, opposing keys cancel out.
pub(crate) fn sample_keyboard(keyboard: &ButtonInput<KeyCode>) -> InputSnapshot {
    // Horizontal axis (strafe)
    let mut horizontal = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        horizontal -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        horizontal += 1.0;
    }

    // Vertical axis (forward / back)
    let mut vertical = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        vertical -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        vertical += 1.0;
    }

    InputSnapshot {
        horizontal,
        vertical,
        jump_held: keyboard.pressed(KeyCode::Space),
    }
}
