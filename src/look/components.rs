//! Look domain: camera angles, look settings and the camera rig marker.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::locomotion::{CameraTiltSink, MovementBasis};

/// Number of updates over which roll closes the gap to its target.
/// The lag is per update, not per second, so it depends on frame rate.
pub const ROLL_LAG_TICKS: f32 = 20.0;

/// Camera angles in degrees.
///
/// Positive yaw turns right, positive pitch looks down and positive roll
/// leans the top of the view to the left. Yaw and pitch are unbounded.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct LookState {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
    /// Roll the camera is easing towards, set by locomotion.
    pub target_roll: f32,
}

impl LookState {
    /// Applies a mouse delta (x right, y up) and eases roll one step.
    pub fn update(&mut self, mouse_delta: Vec2, settings: &LookSettings) {
        let multiplier_x = settings.sensitivity * if settings.invert_x { -1.0 } else { 1.0 };
        let multiplier_y = settings.sensitivity * if settings.invert_y { -1.0 } else { 1.0 };

        self.pitch -= mouse_delta.y * multiplier_y;
        self.yaw += mouse_delta.x * multiplier_x;
        self.roll += (self.target_roll - self.roll) / ROLL_LAG_TICKS;
    }

    /// Rotation about the vertical axis only.
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.yaw.to_radians())
    }

    pub fn movement_basis(&self) -> MovementBasis {
        let rotation = self.yaw_rotation();
        MovementBasis {
            forward: rotation * Vec3::NEG_Z,
            right: rotation * Vec3::X,
        }
    }

    /// Full camera orientation: yaw, then pitch, then roll.
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            -self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

impl CameraTiltSink for LookState {
    fn set_target_roll(&mut self, degrees: f32) {
        self.target_roll = degrees;
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookSettings {
    /// Degrees of rotation per pixel of mouse movement.
    pub sensitivity: f32,
    pub invert_x: bool,
    pub invert_y: bool,
    /// Camera height above the body centre.
    pub eye_height: f32,
}

impl Default for LookSettings {
    fn default() -> Self {
        Self {
            sensitivity: 0.1,
            invert_x: false,
            invert_y: false,
            eye_height: 0.6,
        }
    }
}

/// Camera that follows a player's head and looks where they look
#[derive(Component, Debug)]
pub struct PlayerCamera {
    pub target: Entity,
}
