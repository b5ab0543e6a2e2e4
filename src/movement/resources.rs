//! Movement domain: tuning and input resources.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::GameLayer;
use crate::movement::surface::SurfaceMasks;

/// Serializable Vec3 for RON and JSON files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3Def {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3Def> for Vec3 {
    fn from(v: Vec3Def) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vec3Def {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

/// Movement tunables. Speeds and accelerations are velocity changes, so they
/// behave the same regardless of the body's mass.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub maximum_ground_speed: f32,
    /// Velocity added along the input direction each tick on the ground.
    pub ground_acceleration: f32,
    pub jump_height: f32,
    pub maximum_air_speed: f32,
    pub air_acceleration: f32,
    pub wall_run_speed_boost: f32,
    pub wall_run_max_speed: f32,
    /// Camera roll in degrees while wall-running.
    pub wall_run_tilt: f32,
    pub max_wall_run_time: f32,
    pub wall_run_min_speed: f32,
    /// End the wall run once `max_wall_run_time` is exceeded. When false the
    /// timeout is only reported.
    pub wall_run_timeout_ends_run: bool,
    /// Treat wall-run surfaces as valid ground when landing on top of them.
    pub wall_run_counts_as_ground: bool,
    pub ground_layers: Vec<GameLayer>,
    pub wall_run_layers: Vec<GameLayer>,
    /// Falling below this height teleports the player to `respawn_point`.
    pub kill_plane_height: f32,
    pub respawn_point: Vec3Def,
    pub mass: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            maximum_ground_speed: 8.0,
            ground_acceleration: 1.0,
            jump_height: 1.5,
            maximum_air_speed: 6.0,
            air_acceleration: 0.3,
            wall_run_speed_boost: 2.0,
            wall_run_max_speed: 12.0,
            wall_run_tilt: 20.0,
            max_wall_run_time: 5.0,
            wall_run_min_speed: 1.0,
            wall_run_timeout_ends_run: true,
            wall_run_counts_as_ground: true,
            ground_layers: vec![GameLayer::Ground],
            wall_run_layers: vec![GameLayer::WallRun],
            kill_plane_height: -200.0,
            respawn_point: Vec3Def {
                x: 7.0,
                y: 0.0,
                z: -5.0,
            },
            mass: 1.0,
        }
    }
}

impl MovementTuning {
    /// Launch speed needed to reach `jump_height` under the given gravity.
    /// Uses physics formula: v = sqrt(2gh)
    pub fn jump_speed(&self, gravity: Vec3) -> f32 {
        (2.0 * gravity.y.abs() * self.jump_height).sqrt()
    }

    /// Checks values the state machine divides by or scales with.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("maximum_ground_speed", self.maximum_ground_speed),
            ("mass", self.mass),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(format!("{} must be positive, got {}", field, value));
            }
        }
        Ok(())
    }

    pub fn surface_masks(&self) -> SurfaceMasks {
        SurfaceMasks {
            ground: layer_mask(&self.ground_layers),
            wall_run: layer_mask(&self.wall_run_layers),
            wall_run_counts_as_ground: self.wall_run_counts_as_ground,
        }
    }
}

fn layer_mask(layers: &[GameLayer]) -> LayerMask {
    LayerMask(layers.iter().fold(0, |bits, layer| bits | layer.to_bits()))
}

/// Input sampled once per tick. Axes are raw values in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub horizontal: f32,
    pub vertical: f32,
    pub jump_held: bool,
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub snapshot: InputSnapshot,
}
