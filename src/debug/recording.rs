//! Debug domain: input recordings that can be saved and replayed.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::look::LookState;
use crate::movement::{InputSnapshot, MovementState, Vec3Def};

pub const RECORDINGS_DIR: &str = "recordings";

/// One fixed tick of player input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedTick {
    pub dt: f32,
    pub input: InputSnapshot,
    /// Look yaw in degrees, so movement directions replay the same way.
    #[serde(default)]
    pub yaw: f32,
}

/// Player pose and locomotion state at the first recorded tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordingStart {
    pub position: Vec3Def,
    pub velocity: Vec3Def,
    pub grounded: bool,
    pub wall_running: bool,
    pub just_jumped: bool,
    pub has_double_jump_charge: bool,
    pub has_double_jumped: bool,
    pub wall_run_elapsed: f32,
    pub wall_normal: Vec3Def,
    pub wall_run_exhausted: bool,
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    pub target_roll: f32,
}

impl RecordingStart {
    pub fn capture(
        position: Vec3,
        velocity: Vec3,
        state: &MovementState,
        look: &LookState,
    ) -> Self {
        Self {
            position: position.into(),
            velocity: velocity.into(),
            grounded: state.grounded,
            wall_running: state.wall_running,
            just_jumped: state.just_jumped,
            has_double_jump_charge: state.has_double_jump_charge,
            has_double_jumped: state.has_double_jumped,
            wall_run_elapsed: state.wall_run_elapsed,
            wall_normal: state.wall_normal.into(),
            wall_run_exhausted: state.wall_run_exhausted,
            pitch: look.pitch,
            yaw: look.yaw,
            roll: look.roll,
            target_roll: look.target_roll,
        }
    }

    /// Input direction is derived again on the first tick.
    pub fn movement_state(&self) -> MovementState {
        MovementState {
            grounded: self.grounded,
            wall_running: self.wall_running,
            just_jumped: self.just_jumped,
            has_double_jump_charge: self.has_double_jump_charge,
            has_double_jumped: self.has_double_jumped,
            wall_run_elapsed: self.wall_run_elapsed,
            wall_normal: self.wall_normal.into(),
            wall_run_exhausted: self.wall_run_exhausted,
            input_direction: Vec3::ZERO,
        }
    }

    pub fn look_state(&self) -> LookState {
        LookState {
            pitch: self.pitch,
            yaw: self.yaw,
            roll: self.roll,
            target_roll: self.target_roll,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputRecording {
    /// Missing in recordings that start from the respawn point at rest.
    #[serde(default)]
    pub start: Option<RecordingStart>,
    pub ticks: Vec<RecordedTick>,
}

impl InputRecording {
    pub fn duration(&self) -> f32 {
        self.ticks.iter().map(|tick| tick.dt).sum()
    }
}

/// Error type for recording save/load failures.
#[derive(Debug)]
pub struct RecordingError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for RecordingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recording {}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderMode {
    #[default]
    Idle,
    Recording,
    Replaying {
        cursor: usize,
    },
}

/// Current recording plus what the recorder is doing with it.
#[derive(Resource, Debug, Default)]
pub struct Recorder {
    pub mode: RecorderMode,
    pub recording: InputRecording,
    pub last_saved: Option<PathBuf>,
}

impl Recorder {
    /// Starts a fresh recording from `start`, discarding the unsaved one.
    pub fn start_recording(&mut self, start: RecordingStart) {
        self.recording = InputRecording {
            start: Some(start),
            ticks: Vec::new(),
        };
        self.mode = RecorderMode::Recording;
    }

    pub fn stop_recording(&mut self) {
        if self.mode == RecorderMode::Recording {
            self.mode = RecorderMode::Idle;
        }
    }

    pub fn record(&mut self, tick: RecordedTick) {
        if self.mode == RecorderMode::Recording {
            self.recording.ticks.push(tick);
        }
    }

    /// Replays `recording` from its first tick. Returns false when there is
    /// nothing to replay.
    pub fn start_replay(&mut self, recording: InputRecording) -> bool {
        if recording.ticks.is_empty() {
            return false;
        }
        self.recording = recording;
        self.mode = RecorderMode::Replaying { cursor: 0 };
        true
    }

    /// The tick to feed next, or `None` once the replay has run out.
    pub fn next_replay_tick(&mut self) -> Option<RecordedTick> {
        let RecorderMode::Replaying { cursor } = self.mode else {
            return None;
        };

        match self.recording.ticks.get(cursor) {
            Some(tick) => {
                self.mode = RecorderMode::Replaying { cursor: cursor + 1 };
                Some(*tick)
            }
            None => {
                self.mode = RecorderMode::Idle;
                None
            }
        }
    }
}

pub fn parse_recording(source: &str, contents: &str) -> Result<InputRecording, RecordingError> {
    serde_json::from_str(contents).map_err(|e| RecordingError {
        path: source.to_string(),
        message: format!("Parse error: {}", e),
    })
}

pub fn load_recording(path: &Path) -> Result<InputRecording, RecordingError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| RecordingError {
        path: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_recording(&file_name, &contents)
}

/// Writes `recording` as `<dir>/<name>.json`, creating `dir` if needed.
pub fn save_recording(
    dir: &Path,
    name: &str,
    recording: &InputRecording,
) -> Result<PathBuf, RecordingError> {
    let path = dir.join(format!("{}.json", name));
    let io_error = |e: std::io::Error| RecordingError {
        path: path.display().to_string(),
        message: format!("IO error: {}", e),
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let contents = serde_json::to_string_pretty(recording).map_err(|e| RecordingError {
        path: path.display().to_string(),
        message: format!("Serialize error: {}", e),
    })?;
    fs::write(&path, contents).map_err(io_error)?;

    Ok(path)
}
