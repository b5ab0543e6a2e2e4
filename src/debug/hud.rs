//! Debug domain: movement info overlay.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::debug::recording::{Recorder, RecorderMode};
use crate::debug::state::DebugState;
use crate::movement::locomotion::ground_speed;
use crate::movement::{MovementState, Player};

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn format_movement_info(
    velocity: Vec3,
    state: &MovementState,
    recorder: &RecorderMode,
) -> String {
    let recorder = match recorder {
        RecorderMode::Idle => "idle".to_string(),
        RecorderMode::Recording => "REC".to_string(),
        RecorderMode::Replaying { cursor } => format!("replay #{}", cursor),
    };

    format!(
        "Speed: {:.2}\nGround speed: {:.2}\nMode: {:?}\nWall run: {:.2}s\nDouble jump: charge={} used={}\nRecorder: {}",
        velocity.length(),
        ground_speed(velocity),
        state.mode(),
        state.wall_run_elapsed,
        state.has_double_jump_charge,
        state.has_double_jumped,
        recorder
    )
}

/// Update the debug info overlay with current player state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    recorder: Res<Recorder>,
    player_query: Query<(&LinearVelocity, &MovementState), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    let Ok(mut text) = overlay_query.single_mut() else {
        spawn_debug_info_overlay(&mut commands);
        return;
    };

    if let Some((velocity, state)) = player_query.iter().next() {
        let mut info = format_movement_info(velocity.0, state, &recorder.mode);
        if let Some((message, _)) = &debug_state.status_message {
            info.push('\n');
            info.push_str(message);
        }
        **text = info;
    }
}
