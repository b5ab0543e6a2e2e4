//! Movement domain: the locomotion state machine.
//!
//! Everything here is engine-agnostic. The body is reached through
//! [`RigidBodyHandle`], the camera roll through [`CameraTiltSink`], and input,
//! gravity and the tick length are passed in explicitly, so a sequence of
//! ticks can be replayed deterministically.

use bevy::prelude::*;

use crate::movement::contacts::{ContactEvent, ContactPhase};
use crate::movement::surface::{ClassifiedSurface, SurfaceKind};
use crate::movement::{InputSnapshot, MovementState, MovementTuning};

/// Physics body operations the state machine needs.
pub trait RigidBodyHandle {
    fn linear_velocity(&self) -> Vec3;
    fn position(&self) -> Vec3;
    fn mass(&self) -> f32;
    /// Instantaneous change of momentum.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Force integrated over the current tick.
    fn apply_force(&mut self, force: Vec3);
    fn set_linear_velocity(&mut self, velocity: Vec3);
    /// Moves the body and zeroes its velocity.
    fn teleport(&mut self, position: Vec3);
}

/// Receives the camera roll the locomotion wants to show.
pub trait CameraTiltSink {
    fn set_target_roll(&mut self, degrees: f32);
}

/// Yaw-only orientation used to turn raw input into a world direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for MovementBasis {
    fn default() -> Self {
        Self {
            forward: Vec3::NEG_Z,
            right: Vec3::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRunEndReason {
    LeftWall,
    TooSlow,
    TimedOut,
    Jumped,
    Landed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEventKind {
    Jumped,
    DoubleJumped,
    Landed,
    WallRunStarted { tangent: Vec3 },
    /// A wall was touched but the player was too slow to run on it.
    WallRunFailed { speed: f32 },
    WallJumped,
    WallRunEnded { reason: WallRunEndReason },
    WallRunTimeExceeded { elapsed: f32 },
    Respawned,
}

/// Borrowed collaborators for one state machine call.
pub struct Locomotion<'a, B: RigidBodyHandle, T: CameraTiltSink> {
    pub state: &'a mut MovementState,
    pub tuning: &'a MovementTuning,
    pub body: &'a mut B,
    pub tilt: &'a mut T,
    pub gravity: Vec3,
    pub basis: MovementBasis,
    pub events: Vec<LocomotionEventKind>,
}

impl<'a, B: RigidBodyHandle, T: CameraTiltSink> Locomotion<'a, B, T> {
    pub fn new(
        state: &'a mut MovementState,
        tuning: &'a MovementTuning,
        body: &'a mut B,
        tilt: &'a mut T,
    ) -> Self {
        Self {
            state,
            tuning,
            body,
            tilt,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            basis: MovementBasis::default(),
            events: Vec::new(),
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_basis(mut self, basis: MovementBasis) -> Self {
        self.basis = basis;
        self
    }

    fn jump_speed(&self) -> f32 {
        self.tuning.jump_speed(self.gravity)
    }

    /// Impulse producing the given velocity change.
    fn push(&mut self, delta_v: Vec3) {
        let mass = self.body.mass();
        self.body.apply_impulse(delta_v * mass);
    }

    /// Continuous force producing the given acceleration.
    fn accelerate(&mut self, acceleration: Vec3) {
        let mass = self.body.mass();
        self.body.apply_force(acceleration * mass);
    }

    // -------------------------------------------------------------------------
    // Contact events
    // -------------------------------------------------------------------------

    pub fn handle_contact(&mut self, event: &ContactEvent) {
        match event.phase {
            ContactPhase::Enter => self.on_contact_enter(&event.surface),
            ContactPhase::Stay => self.on_contact_stay(&event.surface),
            ContactPhase::Exit => self.on_contact_exit(),
        }
    }

    pub fn on_contact_enter(&mut self, surface: &ClassifiedSurface) {
        if surface.kind == SurfaceKind::WallRunnable && !self.state.grounded {
            self.start_wall_run(surface.normal);
        }
    }

    pub fn on_contact_stay(&mut self, surface: &ClassifiedSurface) {
        match surface.kind {
            SurfaceKind::Ground => {
                if self.state.wall_running {
                    self.end_wall_run(WallRunEndReason::Landed);
                }
                let grounded = !self.state.just_jumped;
                if grounded && !self.state.grounded {
                    self.state.wall_run_exhausted = false;
                    self.events.push(LocomotionEventKind::Landed);
                }
                self.state.grounded = grounded;
            }
            SurfaceKind::WallRunnable => {
                self.state.grounded = false;
                if self.state.wall_running {
                    self.state.wall_normal = surface.normal;
                } else {
                    self.start_wall_run(surface.normal);
                }
            }
            SurfaceKind::None => {
                self.state.grounded = false;
                if self.state.wall_running {
                    self.end_wall_run(WallRunEndReason::LeftWall);
                }
            }
        }
    }

    pub fn on_contact_exit(&mut self) {
        if self.state.wall_running {
            self.events.push(LocomotionEventKind::WallRunEnded {
                reason: WallRunEndReason::LeftWall,
            });
        }

        self.state.grounded = false;
        self.state.wall_running = false;
        self.state.just_jumped = false;
        self.state.wall_run_elapsed = 0.0;
        self.state.wall_run_exhausted = false;
        self.tilt.set_target_roll(0.0);
    }

    // -------------------------------------------------------------------------
    // Per-tick step
    // -------------------------------------------------------------------------

    pub fn tick(&mut self, input: &InputSnapshot, dt: f32) {
        self.state.input_direction = input_direction(input, self.basis);

        if self.body.position().y < self.tuning.kill_plane_height {
            self.respawn();
            return;
        }

        if self.state.grounded {
            self.move_on_ground(input);
        } else {
            // Wall runs are airborne: steering and the double jump charge
            // still apply on top of the wall hold.
            if self.state.wall_running {
                self.wall_run(input, dt);
            }
            self.move_in_air(input);
        }

        if !input.jump_held {
            self.state.just_jumped = false;
        }
    }

    /// Back to the respawn point at rest, airborne and level.
    fn respawn(&mut self) {
        self.body.teleport(self.tuning.respawn_point.into());
        *self.state = MovementState {
            input_direction: self.state.input_direction,
            ..default()
        };
        self.tilt.set_target_roll(0.0);
        self.events.push(LocomotionEventKind::Respawned);
    }

    fn move_on_ground(&mut self, input: &InputSnapshot) {
        self.state.has_double_jumped = false;
        self.state.has_double_jump_charge = false;

        if input.jump_held && !self.state.just_jumped {
            self.jump();
            return;
        }

        // Drag uses the velocity from before this tick's push so the approach
        // to the speed cap is exponential.
        let velocity = self.body.linear_velocity();
        let drag = self.tuning.ground_acceleration / self.tuning.maximum_ground_speed;

        self.push(self.state.input_direction * self.tuning.ground_acceleration);
        self.push(-velocity * drag);
    }

    /// Ground jump. Raises vertical speed to the jump speed, never lowers it.
    fn jump(&mut self) {
        let jump_speed = self.jump_speed();
        let vertical = self.body.linear_velocity().y;

        if vertical >= jump_speed {
            return;
        }

        self.push(Vec3::Y * (jump_speed - vertical));
        self.state.grounded = false;
        self.state.has_double_jump_charge = false;
        self.state.just_jumped = true;
        self.events.push(LocomotionEventKind::Jumped);
    }

    fn double_jump(&mut self) {
        let vertical = self.body.linear_velocity().y;
        if vertical < 0.0 {
            self.push(Vec3::NEG_Y * vertical);
        }

        let jump_speed = self.jump_speed();
        let vertical = vertical.max(0.0);
        if vertical < jump_speed {
            self.push(Vec3::Y * (jump_speed - vertical));
        }

        self.state.has_double_jump_charge = false;
        self.state.has_double_jumped = true;
        self.events.push(LocomotionEventKind::DoubleJumped);
    }

    fn move_in_air(&mut self, input: &InputSnapshot) {
        if self.state.has_double_jump_charge && !self.state.has_double_jumped && input.jump_held {
            self.double_jump();
        }

        let push = air_control(
            self.body.linear_velocity(),
            self.state.input_direction,
            self.tuning.air_acceleration,
            self.tuning.maximum_air_speed,
        );
        if push != Vec3::ZERO {
            self.push(push);
        }

        if !self.state.has_double_jumped && !input.jump_held {
            self.state.has_double_jump_charge = true;
        }
    }

    // -------------------------------------------------------------------------
    // Wall running
    // -------------------------------------------------------------------------

    fn start_wall_run(&mut self, wall_normal: Vec3) {
        if self.state.wall_run_exhausted {
            return;
        }

        let velocity = self.body.linear_velocity();
        let speed = velocity.length();
        if speed < self.tuning.wall_run_min_speed {
            self.events.push(LocomotionEventKind::WallRunFailed { speed });
            return;
        }

        self.state.wall_running = true;
        self.state.grounded = false;
        self.state.wall_run_elapsed = 0.0;
        self.state.wall_normal = wall_normal;

        let tangent = wall_tangent(wall_normal, velocity);
        let side = sign(wall_normal.dot(self.basis.right));
        self.tilt.set_target_roll(-self.tuning.wall_run_tilt * side);

        let ground_speed = ground_speed(velocity);
        self.body.set_linear_velocity(Vec3::new(
            ground_speed * tangent.x,
            velocity.y,
            ground_speed * tangent.z,
        ));

        if ground_speed < self.tuning.wall_run_max_speed {
            let boost =
                (self.tuning.wall_run_max_speed - ground_speed).min(self.tuning.wall_run_speed_boost);
            self.push(tangent * boost);
        }

        self.events.push(LocomotionEventKind::WallRunStarted { tangent });
    }

    fn wall_run(&mut self, input: &InputSnapshot, dt: f32) {
        let wall_normal = self.state.wall_normal;
        let velocity = self.body.linear_velocity();

        if velocity.length() < self.tuning.wall_run_min_speed {
            self.push(wall_normal);
            self.end_wall_run(WallRunEndReason::TooSlow);
            return;
        }

        self.state.has_double_jump_charge = false;
        self.state.has_double_jumped = false;

        if input.jump_held && !self.state.just_jumped {
            let jump = self.jump_speed() * Vec3::Y + wall_normal;
            if velocity.y < jump.y {
                self.push(jump);
            }
            self.state.just_jumped = true;
            self.events.push(LocomotionEventKind::WallJumped);
            self.end_wall_run(WallRunEndReason::Jumped);
            return;
        }

        if !self.state.just_jumped {
            self.push(Vec3::NEG_Y * velocity.y);
        }
        self.accelerate(-self.gravity);
        self.accelerate(-wall_normal);

        let previous = self.state.wall_run_elapsed;
        self.state.wall_run_elapsed += dt;
        if previous < self.tuning.max_wall_run_time
            && self.state.wall_run_elapsed >= self.tuning.max_wall_run_time
        {
            self.events.push(LocomotionEventKind::WallRunTimeExceeded {
                elapsed: self.state.wall_run_elapsed,
            });
            if self.tuning.wall_run_timeout_ends_run {
                self.state.wall_run_exhausted = true;
                self.end_wall_run(WallRunEndReason::TimedOut);
            }
        }
    }

    fn end_wall_run(&mut self, reason: WallRunEndReason) {
        self.state.wall_running = false;
        self.state.wall_run_elapsed = 0.0;
        self.tilt.set_target_roll(0.0);
        self.events.push(LocomotionEventKind::WallRunEnded { reason });
    }
}

// -----------------------------------------------------------------------------
// Pure helpers
// -----------------------------------------------------------------------------

/// Sign with zero treated as positive.
fn sign(value: f32) -> f32 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

pub fn ground_speed(velocity: Vec3) -> f32 {
    Vec2::new(velocity.x, velocity.z).length()
}

pub fn input_direction(input: &InputSnapshot, basis: MovementBasis) -> Vec3 {
    (basis.forward * input.vertical + basis.right * input.horizontal).normalize_or_zero()
}

/// Horizontal direction along the wall, pointing the way the player moves.
pub fn wall_tangent(wall_normal: Vec3, velocity: Vec3) -> Vec3 {
    let tangent = wall_normal.cross(Vec3::Y);
    tangent * sign(velocity.dot(tangent))
}

/// Velocity change for one tick of air steering. Accelerates along the input
/// direction without pushing the projected speed past `max_speed`, while
/// always allowing the player to brake against their current motion.
pub fn air_control(velocity: Vec3, direction: Vec3, acceleration: f32, max_speed: f32) -> Vec3 {
    if direction == Vec3::ZERO {
        return Vec3::ZERO;
    }

    let projected = velocity.project_onto_normalized(direction);
    let moving_away = direction.dot(projected) <= 0.0;

    if projected.length_squared() >= max_speed * max_speed && !moving_away {
        return Vec3::ZERO;
    }

    let limit = if moving_away {
        max_speed + projected.length()
    } else {
        max_speed - projected.length()
    };

    (direction * acceleration).clamp_length_max(limit.max(0.0))
}
