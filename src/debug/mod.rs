//! Dev tools for tuning movement.
//!
//! Features:
//! - Movement info overlay (F1)
//! - Input recording (F6 start/stop, F7 save)
//! - Deterministic replay from the respawn point (F8)

mod hud;
mod recording;
mod state;
mod systems;

pub use recording::{InputRecording, RecordedTick, Recorder, RecorderMode, RecordingStart};

use bevy::prelude::*;

use crate::debug::hud::update_debug_info_overlay;
use crate::debug::state::DebugState;
use crate::debug::systems::{
    handle_recording_hotkeys, record_input, replay_input, toggle_debug_info,
    update_status_message,
};
use crate::movement::MovementSystems;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .init_resource::<Recorder>()
            .add_systems(
                Update,
                (
                    toggle_debug_info,
                    handle_recording_hotkeys,
                    update_status_message,
                    update_debug_info_overlay,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (replay_input, record_input)
                    .chain()
                    .after(MovementSystems::Input)
                    .before(MovementSystems::Contacts),
            );
    }
}
