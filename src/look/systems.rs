//! Look domain: mouse look, camera follow and cursor grabbing.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::look::{LookSettings, LookState, PlayerCamera};
use crate::movement::Player;

pub(crate) fn update_look(
    mouse_motion: Res<AccumulatedMouseMotion>,
    settings: Res<LookSettings>,
    cursor_query: Query<&CursorOptions, With<PrimaryWindow>>,
    mut query: Query<&mut LookState, With<Player>>,
) {
    // Mouse only steers the view while the cursor is captured
    let captured = cursor_query
        .single()
        .map(|cursor| cursor.grab_mode != CursorGrabMode::None)
        .unwrap_or(false);

    // Screen space grows downwards, look space treats up as positive
    let delta = if captured {
        Vec2::new(mouse_motion.delta.x, -mouse_motion.delta.y)
    } else {
        Vec2::ZERO
    };

    for mut look in &mut query {
        look.update(delta, &settings);
    }
}

pub(crate) fn follow_player(
    settings: Res<LookSettings>,
    players: Query<(&Transform, &LookState), With<Player>>,
    mut cameras: Query<(&PlayerCamera, &mut Transform), Without<Player>>,
) {
    for (camera, mut camera_transform) in &mut cameras {
        let Ok((player_transform, look)) = players.get(camera.target) else {
            continue;
        };

        camera_transform.translation = player_transform.translation + Vec3::Y * settings.eye_height;
        camera_transform.rotation = look.camera_rotation();
    }
}

pub(crate) fn grab_cursor(mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor_query.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

/// Escape releases the cursor, a left click captures it again
pub(crate) fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}
