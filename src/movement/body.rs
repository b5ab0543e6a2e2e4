//! Movement domain: avian rigid body adapter for the locomotion core.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::movement::locomotion::RigidBodyHandle;

/// Applies impulses and forces straight to the body's velocity, so the
/// physics step that follows integrates them.
pub struct PlayerBody<'a> {
    pub velocity: &'a mut LinearVelocity,
    pub transform: &'a mut Transform,
    pub mass: f32,
    /// Length of the current tick, used to integrate continuous forces.
    pub dt: f32,
}

impl RigidBodyHandle for PlayerBody<'_> {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity.0
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        if self.mass > 0.0 {
            self.velocity.0 += impulse / self.mass;
        }
    }

    fn apply_force(&mut self, force: Vec3) {
        if self.mass > 0.0 {
            self.velocity.0 += force / self.mass * self.dt;
        }
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn teleport(&mut self, position: Vec3) {
        self.transform.translation = position;
        self.velocity.0 = Vec3::ZERO;
    }
}
