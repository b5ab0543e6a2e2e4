//! Debug domain: hotkeys, input recording and replay systems.

use avian3d::prelude::*;
use bevy::prelude::*;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::debug::recording::{
    RECORDINGS_DIR, RecordedTick, Recorder, RecorderMode, RecordingStart, load_recording,
    save_recording,
};
use crate::debug::state::DebugState;
use crate::look::LookState;
use crate::movement::{
    ContactQueue, ContactTracker, MovementInput, MovementState, MovementTuning, Player,
};

/// Toggle the info overlay with F1 or backtick key
pub(crate) fn toggle_debug_info(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_info = !debug_state.show_info;
    }
}

/// F6 toggles recording, F7 saves it, F8 replays the last saved one
pub(crate) fn handle_recording_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<MovementTuning>,
    mut fixed_time: ResMut<Time<Fixed>>,
    mut debug_state: ResMut<DebugState>,
    mut recorder: ResMut<Recorder>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut LinearVelocity,
            &mut MovementState,
            &mut LookState,
            &mut ContactTracker,
            &mut ContactQueue,
        ),
        With<Player>,
    >,
) {
    // F6: Start/stop recording
    if keyboard.just_pressed(KeyCode::F6) {
        let mode = recorder.mode;
        match mode {
            RecorderMode::Recording => {
                recorder.stop_recording();
                let msg = format!(
                    "Recorded {} ticks ({:.1}s)",
                    recorder.recording.ticks.len(),
                    recorder.recording.duration()
                );
                info!("[DEBUG] {}", msg);
                debug_state.set_message(msg, 3.0);
            }
            RecorderMode::Idle => {
                let Some((transform, velocity, state, look, mut tracker, mut queue)) =
                    player_query.iter_mut().next()
                else {
                    debug_state.set_message("No player to record", 2.0);
                    return;
                };

                // Replays start from an empty contact history, so recordings do too
                tracker.touching.clear();
                queue.clear();
                recorder.start_recording(RecordingStart::capture(
                    transform.translation,
                    velocity.0,
                    &state,
                    &look,
                ));
                info!("[DEBUG] Recording input");
                debug_state.set_message("Recording input", 2.0);
            }
            RecorderMode::Replaying { .. } => {
                debug_state.set_message("Can't record during a replay", 2.0);
            }
        }
    }

    // F7: Save the current recording
    if keyboard.just_pressed(KeyCode::F7) {
        recorder.stop_recording();
        if recorder.recording.ticks.is_empty() {
            debug_state.set_message("Nothing recorded", 2.0);
        } else {
            let name = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| format!("run-{}", d.as_secs()))
                .unwrap_or_else(|_| "run".to_string());

            match save_recording(Path::new(RECORDINGS_DIR), &name, &recorder.recording) {
                Ok(path) => {
                    let msg = format!("Saved {}", path.display());
                    info!("[DEBUG] {}", msg);
                    debug_state.set_message(msg, 3.0);
                    recorder.last_saved = Some(path);
                }
                Err(e) => {
                    error!("{}", e);
                    debug_state.set_message("Save failed", 3.0);
                }
            }
        }
    }

    // F8: Replay from where the recording started
    if keyboard.just_pressed(KeyCode::F8) {
        recorder.stop_recording();

        let recording = match recorder.last_saved.as_deref() {
            Some(path) => match load_recording(path) {
                Ok(recording) => recording,
                Err(e) => {
                    error!("{}", e);
                    debug_state.set_message("Replay failed", 3.0);
                    return;
                }
            },
            None => recorder.recording.clone(),
        };

        let start = recording.start;
        let first_tick = recording.ticks.first().copied();
        if !recorder.start_replay(recording) {
            debug_state.set_message("Nothing to replay", 2.0);
            return;
        }

        // Step with the recorded tick length
        if let Some(tick) = first_tick {
            let recorded = f64::from(tick.dt);
            if tick.dt > 0.0 && (fixed_time.timestep().as_secs_f64() - recorded).abs() > 1e-6 {
                info!("[DEBUG] Fixed timestep set to {:.4}s for replay", recorded);
                fixed_time.set_timestep_seconds(recorded);
            }
        }

        for (mut transform, mut velocity, mut state, mut look, mut tracker, mut queue) in
            &mut player_query
        {
            match start {
                Some(start) => {
                    transform.translation = start.position.into();
                    velocity.0 = start.velocity.into();
                    *state = start.movement_state();
                    *look = start.look_state();
                }
                None => {
                    transform.translation = tuning.respawn_point.into();
                    velocity.0 = Vec3::ZERO;
                    *state = MovementState::default();
                    *look = LookState {
                        yaw: first_tick.map_or(look.yaw, |tick| tick.yaw),
                        ..default()
                    };
                }
            }
            tracker.touching.clear();
            queue.clear();
        }

        info!("[DEBUG] Replaying {} ticks", recorder.recording.ticks.len());
        debug_state.set_message("Replaying", 2.0);
    }
}

pub(crate) fn update_status_message(time: Res<Time>, mut debug_state: ResMut<DebugState>) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }
}

/// Feeds the recorded input in place of the keyboard while replaying.
pub(crate) fn replay_input(
    mut recorder: ResMut<Recorder>,
    mut debug_state: ResMut<DebugState>,
    mut input: ResMut<MovementInput>,
    mut look_query: Query<&mut LookState, With<Player>>,
) {
    if !matches!(recorder.mode, RecorderMode::Replaying { .. }) {
        return;
    }

    match recorder.next_replay_tick() {
        Some(tick) => {
            input.snapshot = tick.input;
            for mut look in &mut look_query {
                look.yaw = tick.yaw;
            }
        }
        None => {
            input.snapshot = default();
            info!("[DEBUG] Replay finished");
            debug_state.set_message("Replay finished", 2.0);
        }
    }
}

pub(crate) fn record_input(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut recorder: ResMut<Recorder>,
    look_query: Query<&LookState, With<Player>>,
) {
    if recorder.mode != RecorderMode::Recording {
        return;
    }

    let yaw = look_query.iter().next().map_or(0.0, |look| look.yaw);
    recorder.record(RecordedTick {
        dt: time.delta_secs(),
        input: input.snapshot,
        yaw,
    });
}
