//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering and surface classification
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors and platforms the player can stand on
    Ground,
    /// Vertical surfaces that support wall-running
    WallRun,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Coarse locomotion state derived from the [`MovementState`] flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementMode {
    Grounded,
    #[default]
    Airborne,
    WallRunning,
}

/// Per-player locomotion state, mutated by the tick step and by contact events.
///
/// `grounded` and `wall_running` are never both set, and a used double jump
/// always clears the charge.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct MovementState {
    pub grounded: bool,
    pub wall_running: bool,
    /// Set on any jump, cleared once the jump key is released or contact ends.
    pub just_jumped: bool,
    pub has_double_jump_charge: bool,
    pub has_double_jumped: bool,
    /// Seconds since the current wall run started.
    pub wall_run_elapsed: f32,
    /// Normal of the wall currently being run on.
    pub wall_normal: Vec3,
    /// Latched when a wall run times out; cleared on contact exit or landing.
    pub wall_run_exhausted: bool,
    /// Desired horizontal direction, unit length or zero.
    pub input_direction: Vec3,
}

impl MovementState {
    pub fn mode(&self) -> MovementMode {
        if self.wall_running {
            MovementMode::WallRunning
        } else if self.grounded {
            MovementMode::Grounded
        } else {
            MovementMode::Airborne
        }
    }
}
