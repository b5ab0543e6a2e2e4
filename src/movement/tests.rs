//! Movement domain: unit tests for surfaces, contacts and the locomotion state machine.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::contacts::{ContactEvent, ContactPhase, ContactQueue};
use super::locomotion::{
    CameraTiltSink, Locomotion, LocomotionEventKind, MovementBasis, RigidBodyHandle,
    WallRunEndReason, air_control, ground_speed, input_direction, wall_tangent,
};
use super::surface::{ClassifiedSurface, SurfaceKind, best_normal, classify};
use super::systems::input::sample_keyboard;
use super::{GameLayer, InputSnapshot, MovementMode, MovementState, MovementTuning};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
const DT: f32 = 0.25;
const EPSILON: f32 = 1e-4;

struct TestBody {
    velocity: Vec3,
    position: Vec3,
    mass: f32,
    dt: f32,
}

impl Default for TestBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            mass: 1.0,
            dt: DT,
        }
    }
}

impl RigidBodyHandle for TestBody {
    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    fn apply_force(&mut self, force: Vec3) {
        self.velocity += force / self.mass * self.dt;
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }
}

#[derive(Default)]
struct TestTilt {
    target: f32,
}

impl CameraTiltSink for TestTilt {
    fn set_target_roll(&mut self, degrees: f32) {
        self.target = degrees;
    }
}

#[derive(Default)]
struct Rig {
    state: MovementState,
    tuning: MovementTuning,
    body: TestBody,
    tilt: TestTilt,
}

impl Rig {
    fn airborne(velocity: Vec3) -> Self {
        let mut rig = Self::default();
        rig.body.velocity = velocity;
        rig
    }

    fn grounded() -> Self {
        let mut rig = Self::default();
        rig.state.grounded = true;
        rig
    }

    fn locomotion(&mut self) -> Locomotion<'_, TestBody, TestTilt> {
        Locomotion::new(
            &mut self.state,
            &self.tuning,
            &mut self.body,
            &mut self.tilt,
        )
        .with_gravity(GRAVITY)
    }

    fn tick(&mut self, input: InputSnapshot) -> Vec<LocomotionEventKind> {
        let mut locomotion = self.locomotion();
        locomotion.tick(&input, DT);
        locomotion.events
    }

    fn contact(
        &mut self,
        phase: ContactPhase,
        surface: ClassifiedSurface,
    ) -> Vec<LocomotionEventKind> {
        let other = World::new().spawn_empty().id();
        let mut locomotion = self.locomotion();
        locomotion.handle_contact(&ContactEvent {
            phase,
            other,
            surface,
        });
        locomotion.events
    }

    fn jump_speed(&self) -> f32 {
        self.tuning.jump_speed(GRAVITY)
    }
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn jump() -> InputSnapshot {
    InputSnapshot {
        jump_held: true,
        ..default()
    }
}

fn ground(normal: Vec3) -> ClassifiedSurface {
    ClassifiedSurface {
        kind: SurfaceKind::Ground,
        normal,
    }
}

fn wall(normal: Vec3) -> ClassifiedSurface {
    ClassifiedSurface {
        kind: SurfaceKind::WallRunnable,
        normal,
    }
}

fn count(events: &[LocomotionEventKind], kind: LocomotionEventKind) -> usize {
    events.iter().filter(|e| **e == kind).count()
}

fn assert_vec_eq(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, EPSILON),
        "expected {expected:?}, got {actual:?}"
    );
}

// -----------------------------------------------------------------------------
// Surface classification
// -----------------------------------------------------------------------------

#[test]
fn test_classify_ground_needs_steep_up_normal() {
    let masks = MovementTuning::default().surface_masks();
    let layers = LayerMask::from(GameLayer::Ground);

    let floor = classify([Vec3::new(0.0, 0.95, 0.3)], layers, &masks);
    assert_eq!(floor.kind, SurfaceKind::Ground);

    // Threshold is strict
    let slope = classify([Vec3::new(0.0, 0.9, 0.43)], layers, &masks);
    assert_eq!(slope.kind, SurfaceKind::None);
}

#[test]
fn test_classify_wall_needs_near_horizontal_normal() {
    let masks = MovementTuning::default().surface_masks();
    let layers = LayerMask::from(GameLayer::WallRun);

    let flat = classify([Vec3::X], layers, &masks);
    assert_eq!(flat.kind, SurfaceKind::WallRunnable);
    assert_eq!(flat.normal, Vec3::X);

    let leaning = classify([Vec3::new(1.0, 0.02, 0.0)], layers, &masks);
    assert_eq!(leaning.kind, SurfaceKind::None);
}

#[test]
fn test_classify_ignores_unlisted_layers() {
    let masks = MovementTuning::default().surface_masks();
    let layers = LayerMask::from(GameLayer::Default);

    assert_eq!(classify([Vec3::Y], layers, &masks).kind, SurfaceKind::None);
    assert_eq!(classify([Vec3::X], layers, &masks).kind, SurfaceKind::None);
}

#[test]
fn test_classify_wall_top_as_ground() {
    let mut tuning = MovementTuning::default();
    let layers = LayerMask::from(GameLayer::WallRun);

    let masks = tuning.surface_masks();
    assert_eq!(classify([Vec3::Y], layers, &masks).kind, SurfaceKind::Ground);

    tuning.wall_run_counts_as_ground = false;
    let masks = tuning.surface_masks();
    assert_eq!(classify([Vec3::Y], layers, &masks).kind, SurfaceKind::None);
}

#[test]
fn test_classify_picks_most_upward_normal() {
    let masks = MovementTuning::default().surface_masks();
    let layers = LayerMask::from(GameLayer::Ground);

    let surface = classify([Vec3::X, Vec3::Y, Vec3::NEG_Z], layers, &masks);
    assert_eq!(surface.kind, SurfaceKind::Ground);
    assert_eq!(surface.normal, Vec3::Y);
}

#[test]
fn test_best_normal_defaults_to_straight_down() {
    assert_eq!(best_normal(std::iter::empty()), Vec3::NEG_Y);

    let masks = MovementTuning::default().surface_masks();
    let surface = classify(std::iter::empty(), LayerMask::from(GameLayer::Ground), &masks);
    assert_eq!(surface, ClassifiedSurface::NONE);
}

// -----------------------------------------------------------------------------
// Contact queue
// -----------------------------------------------------------------------------

#[test]
fn test_contact_queue_orders_phases() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut queue = ContactQueue::default();
    queue.push(ContactEvent {
        phase: ContactPhase::Stay,
        other: a,
        surface: ground(Vec3::Y),
    });
    queue.push(ContactEvent {
        phase: ContactPhase::Enter,
        other: b,
        surface: wall(Vec3::X),
    });
    queue.push(ContactEvent {
        phase: ContactPhase::Exit,
        other: b,
        surface: ClassifiedSurface::NONE,
    });
    assert_eq!(queue.len(), 3);

    let phases: Vec<ContactPhase> = queue.drain_resolved().iter().map(|e| e.phase).collect();
    assert_eq!(
        phases,
        vec![ContactPhase::Exit, ContactPhase::Enter, ContactPhase::Stay]
    );
    assert!(queue.is_empty());
}

#[test]
fn test_contact_queue_prefers_ground_over_walls() {
    let mut world = World::new();
    let floor = world.spawn_empty().id();
    let side = world.spawn_empty().id();
    let other = world.spawn_empty().id();

    let mut queue = ContactQueue::default();
    for (entity, surface) in [
        (other, ClassifiedSurface::NONE),
        (side, wall(Vec3::X)),
        (floor, ground(Vec3::Y)),
    ] {
        queue.push(ContactEvent {
            phase: ContactPhase::Stay,
            other: entity,
            surface,
        });
    }

    let resolved = queue.drain_resolved();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].other, floor);
    assert_eq!(resolved[0].surface.kind, SurfaceKind::Ground);
}

#[test]
fn test_contact_queue_tie_breaks_deterministically() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut queue = ContactQueue::default();
    queue.push(ContactEvent {
        phase: ContactPhase::Stay,
        other: a,
        surface: ground(Vec3::new(0.0, 0.95, 0.3)),
    });
    queue.push(ContactEvent {
        phase: ContactPhase::Stay,
        other: b,
        surface: ground(Vec3::Y),
    });
    assert_eq!(queue.drain_resolved()[0].other, b);

    // Same kind and normal in either order: lower entity wins
    for order in [[a, b], [b, a]] {
        for entity in order {
            queue.push(ContactEvent {
                phase: ContactPhase::Enter,
                other: entity,
                surface: wall(Vec3::X),
            });
        }
        assert_eq!(queue.drain_resolved()[0].other, a.min(b));
    }
}

// -----------------------------------------------------------------------------
// Pure helpers
// -----------------------------------------------------------------------------

#[test]
fn test_input_direction_identity_orientation() {
    let basis = MovementBasis::default();

    let right = InputSnapshot {
        horizontal: 1.0,
        ..default()
    };
    assert_vec_eq(input_direction(&right, basis), Vec3::new(1.0, 0.0, 0.0));

    let forward = InputSnapshot {
        vertical: 1.0,
        ..default()
    };
    assert_vec_eq(input_direction(&forward, basis), Vec3::NEG_Z);

    let diagonal = InputSnapshot {
        horizontal: 1.0,
        vertical: 1.0,
        ..default()
    };
    assert!((input_direction(&diagonal, basis).length() - 1.0).abs() < EPSILON);

    assert_eq!(input_direction(&idle(), basis), Vec3::ZERO);
}

#[test]
fn test_keyboard_axes() {
    let mut keyboard = ButtonInput::<KeyCode>::default();
    assert_eq!(sample_keyboard(&keyboard), InputSnapshot::default());

    keyboard.press(KeyCode::KeyW);
    keyboard.press(KeyCode::KeyD);
    keyboard.press(KeyCode::Space);
    assert_eq!(
        sample_keyboard(&keyboard),
        InputSnapshot {
            horizontal: 1.0,
            vertical: 1.0,
            jump_held: true,
        }
    );

    // Opposing keys cancel
    keyboard.press(KeyCode::ArrowLeft);
    assert_eq!(sample_keyboard(&keyboard).horizontal, 0.0);
}

#[test]
fn test_ground_speed_ignores_vertical() {
    assert!((ground_speed(Vec3::new(3.0, 100.0, -4.0)) - 5.0).abs() < EPSILON);
}

#[test]
fn test_wall_tangent_follows_velocity() {
    let normal = Vec3::X;
    for velocity in [
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(-1.0, 2.0, -4.0),
        Vec3::new(0.5, -3.0, 0.1),
    ] {
        let tangent = wall_tangent(normal, velocity);
        assert!(velocity.dot(tangent) >= 0.0);
        assert_eq!(tangent.y, 0.0);
        assert!(tangent.dot(normal).abs() < EPSILON);
    }
}

#[test]
fn test_air_control_respects_cap() {
    // At the cap, steering further along the motion does nothing
    let at_cap = air_control(Vec3::new(6.0, 0.0, 0.0), Vec3::X, 0.3, 6.0);
    assert_eq!(at_cap, Vec3::ZERO);

    // Near the cap the push is clamped to the remaining headroom
    let near_cap = air_control(Vec3::new(5.9, 0.0, 0.0), Vec3::X, 0.3, 6.0);
    assert_vec_eq(near_cap, Vec3::new(0.1, 0.0, 0.0));

    // Braking is always allowed
    let braking = air_control(Vec3::new(6.0, 0.0, 0.0), Vec3::NEG_X, 0.3, 6.0);
    assert_vec_eq(braking, Vec3::new(-0.3, 0.0, 0.0));

    assert_eq!(air_control(Vec3::X, Vec3::ZERO, 0.3, 6.0), Vec3::ZERO);
}

#[test]
fn test_jump_speed_reaches_jump_height() {
    let tuning = MovementTuning::default();
    let speed = tuning.jump_speed(GRAVITY);
    // v^2 / 2g == h
    assert!((speed * speed / (2.0 * 9.81) - tuning.jump_height).abs() < EPSILON);
}

#[test]
fn test_movement_mode() {
    let mut state = MovementState::default();
    assert_eq!(state.mode(), MovementMode::Airborne);

    state.grounded = true;
    assert_eq!(state.mode(), MovementMode::Grounded);

    state.grounded = false;
    state.wall_running = true;
    assert_eq!(state.mode(), MovementMode::WallRunning);
}

// -----------------------------------------------------------------------------
// Ground movement and jumps
// -----------------------------------------------------------------------------

#[test]
fn test_ground_jump_sets_exact_jump_speed() {
    for mass in [1.0, 2.5] {
        let mut rig = Rig::grounded();
        rig.body.mass = mass;
        rig.body.velocity = Vec3::new(3.0, -1.0, 0.0);

        let events = rig.tick(jump());

        assert!((rig.body.velocity.y - rig.jump_speed()).abs() < EPSILON);
        assert_eq!(rig.body.velocity.x, 3.0);
        assert!(!rig.state.grounded);
        assert!(rig.state.just_jumped);
        assert_eq!(events, vec![LocomotionEventKind::Jumped]);
    }
}

#[test]
fn test_ground_jump_never_slows_a_rising_body() {
    let mut rig = Rig::grounded();
    rig.body.velocity = Vec3::new(0.0, 10.0, 0.0);

    let events = rig.tick(jump());

    assert_eq!(rig.body.velocity, Vec3::new(0.0, 10.0, 0.0));
    assert!(rig.state.grounded);
    assert!(!rig.state.just_jumped);
    assert!(events.is_empty());
}

#[test]
fn test_held_jump_does_not_repeat_on_landing() {
    let mut rig = Rig::grounded();
    rig.state.just_jumped = true;

    let events = rig.tick(jump());
    assert!(events.is_empty());
    assert!(rig.state.grounded);

    // Releasing re-arms the jump
    rig.tick(idle());
    assert!(!rig.state.just_jumped);
    assert_eq!(rig.tick(jump()), vec![LocomotionEventKind::Jumped]);
}

#[test]
fn test_ground_speed_approaches_cap() {
    let mut rig = Rig::grounded();
    let forward = InputSnapshot {
        vertical: 1.0,
        ..default()
    };

    for _ in 0..500 {
        rig.tick(forward);
    }

    assert_vec_eq(
        rig.body.velocity,
        Vec3::new(0.0, 0.0, -rig.tuning.maximum_ground_speed),
    );
}

#[test]
fn test_ground_clears_double_jump_flags() {
    let mut rig = Rig::grounded();
    rig.state.has_double_jump_charge = true;
    rig.state.has_double_jumped = true;

    rig.tick(idle());

    assert!(!rig.state.has_double_jump_charge);
    assert!(!rig.state.has_double_jumped);
}

#[test]
fn test_double_jump_once_per_airborne_phase() {
    let mut rig = Rig::grounded();
    let mut events = rig.tick(jump());
    assert!(!rig.state.grounded);

    rig.body.velocity.y = -3.0;
    for input in [idle(), jump(), idle(), jump(), idle(), jump()] {
        events.extend(rig.tick(input));
    }

    assert_eq!(count(&events, LocomotionEventKind::DoubleJumped), 1);
    assert!(rig.state.has_double_jumped);
    assert!(!rig.state.has_double_jump_charge);
}

#[test]
fn test_double_jump_cancels_fall() {
    let mut rig = Rig::airborne(Vec3::new(2.0, -7.0, 0.0));

    rig.tick(idle());
    assert!(rig.state.has_double_jump_charge);

    let events = rig.tick(jump());
    assert_eq!(events, vec![LocomotionEventKind::DoubleJumped]);
    assert!((rig.body.velocity.y - rig.jump_speed()).abs() < EPSILON);
    assert_eq!(rig.body.velocity.x, 2.0);
}

#[test]
fn test_holding_jump_grants_no_double_jump() {
    let mut rig = Rig::grounded();
    let mut events = Vec::new();

    for _ in 0..10 {
        events.extend(rig.tick(jump()));
    }

    assert_eq!(count(&events, LocomotionEventKind::Jumped), 1);
    assert_eq!(count(&events, LocomotionEventKind::DoubleJumped), 0);
    assert!(!rig.state.has_double_jump_charge);
}

#[test]
fn test_air_step_idempotent_at_cap() {
    let mut rig = Rig::airborne(Vec3::new(6.0, 0.0, 0.0));
    assert_eq!(rig.tuning.maximum_air_speed, 6.0);

    rig.tick(idle());
    rig.tick(idle());

    assert_eq!(rig.body.velocity, Vec3::new(6.0, 0.0, 0.0));
}

#[test]
fn test_kill_plane_respawns() {
    let mut rig = Rig::airborne(Vec3::new(0.0, -40.0, 0.0));
    rig.body.position = Vec3::new(0.0, rig.tuning.kill_plane_height - 1.0, 0.0);

    let events = rig.tick(idle());

    assert_eq!(rig.body.position, Vec3::from(rig.tuning.respawn_point));
    assert_eq!(rig.body.velocity, Vec3::ZERO);
    assert!(events.contains(&LocomotionEventKind::Respawned));
}

#[test]
fn test_respawn_mid_wall_run_comes_back_at_rest() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    rig.state.just_jumped = true;
    rig.body.position = Vec3::new(0.0, rig.tuning.kill_plane_height - 1.0, 0.0);

    let events = rig.tick(idle());

    assert_eq!(events, vec![LocomotionEventKind::Respawned]);
    assert_eq!(rig.body.velocity, Vec3::ZERO);
    assert_eq!(rig.state.mode(), MovementMode::Airborne);
    assert!(!rig.state.just_jumped);
    assert_eq!(rig.state.wall_run_elapsed, 0.0);
    assert_eq!(rig.tilt.target, 0.0);
}

// -----------------------------------------------------------------------------
// Contact handling
// -----------------------------------------------------------------------------

#[test]
fn test_ground_stay_grounds_the_player() {
    let mut rig = Rig::airborne(Vec3::ZERO);

    let events = rig.contact(ContactPhase::Stay, ground(Vec3::Y));

    assert!(rig.state.grounded);
    assert_eq!(events, vec![LocomotionEventKind::Landed]);

    // Already grounded: no second landing
    assert!(rig.contact(ContactPhase::Stay, ground(Vec3::Y)).is_empty());
}

#[test]
fn test_ground_stay_right_after_jump_stays_airborne() {
    let mut rig = Rig::airborne(Vec3::ZERO);
    rig.state.just_jumped = true;

    let events = rig.contact(ContactPhase::Stay, ground(Vec3::Y));

    assert!(!rig.state.grounded);
    assert!(events.is_empty());
}

#[test]
fn test_contact_exit_resets_state() {
    let mut rig = Rig::default();
    rig.state.wall_running = true;
    rig.state.just_jumped = true;
    rig.state.wall_run_elapsed = 2.0;
    rig.state.wall_run_exhausted = true;
    rig.tilt.target = 20.0;

    let events = rig.contact(ContactPhase::Exit, ClassifiedSurface::NONE);

    assert!(!rig.state.grounded);
    assert!(!rig.state.wall_running);
    assert!(!rig.state.just_jumped);
    assert!(!rig.state.wall_run_exhausted);
    assert_eq!(rig.state.wall_run_elapsed, 0.0);
    assert_eq!(rig.tilt.target, 0.0);
    assert_eq!(
        events,
        vec![LocomotionEventKind::WallRunEnded {
            reason: WallRunEndReason::LeftWall
        }]
    );
}

#[test]
fn test_none_stay_leaves_ground() {
    let mut rig = Rig::grounded();
    rig.contact(ContactPhase::Stay, ClassifiedSurface::NONE);
    assert!(!rig.state.grounded);
}

// -----------------------------------------------------------------------------
// Wall running
// -----------------------------------------------------------------------------

#[test]
fn test_wall_run_entry_redirects_along_wall() {
    let before = Vec3::new(3.0, 1.0, -4.0);
    let mut rig = Rig::airborne(before);

    let events = rig.contact(ContactPhase::Enter, wall(Vec3::X));

    assert!(rig.state.wall_running);
    assert!(!rig.state.grounded);
    assert_eq!(rig.state.wall_normal, Vec3::X);

    // Ground speed 5 kept, then boosted by 2 along -Z
    assert_vec_eq(rig.body.velocity, Vec3::new(0.0, 1.0, -7.0));
    assert!(before.dot(rig.body.velocity.with_y(0.0)) >= 0.0);

    // Wall on the left leans the view away from it
    assert_eq!(rig.tilt.target, -rig.tuning.wall_run_tilt);
    assert_eq!(
        events,
        vec![LocomotionEventKind::WallRunStarted {
            tangent: Vec3::NEG_Z
        }]
    );
}

#[test]
fn test_wall_run_entry_on_right_wall_tilts_other_way() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::NEG_X));
    assert!(rig.state.wall_running);
    assert_eq!(rig.tilt.target, rig.tuning.wall_run_tilt);
}

#[test]
fn test_wall_run_boost_respects_max_speed() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -11.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    assert_vec_eq(rig.body.velocity, Vec3::new(0.0, 0.0, -12.0));

    let mut fast = Rig::airborne(Vec3::new(0.0, 0.0, -15.0));
    fast.contact(ContactPhase::Enter, wall(Vec3::X));
    assert_vec_eq(fast.body.velocity, Vec3::new(0.0, 0.0, -15.0));
}

#[test]
fn test_wall_run_entry_below_min_speed_fails() {
    let before = Vec3::new(0.0, 0.0, -0.5);
    let mut rig = Rig::airborne(before);

    let events = rig.contact(ContactPhase::Enter, wall(Vec3::X));

    assert!(!rig.state.wall_running);
    assert_eq!(rig.body.velocity, before);
    assert_eq!(rig.tilt.target, 0.0);
    assert_eq!(events, vec![LocomotionEventKind::WallRunFailed { speed: 0.5 }]);
}

#[test]
fn test_wall_run_needs_to_be_airborne() {
    let mut rig = Rig::grounded();
    rig.body.velocity = Vec3::new(0.0, 0.0, -5.0);

    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    assert!(!rig.state.wall_running);
    assert!(rig.state.grounded);
}

#[test]
fn test_wall_stay_starts_run_and_tracks_normal() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));

    rig.contact(ContactPhase::Stay, wall(Vec3::X));
    assert!(rig.state.wall_running);

    let curved = Vec3::new(0.8, 0.0, 0.6);
    let events = rig.contact(ContactPhase::Stay, wall(curved));
    assert!(events.is_empty());
    assert_eq!(rig.state.wall_normal, curved);
}

#[test]
fn test_wall_run_holds_height() {
    let mut rig = Rig::airborne(Vec3::new(0.0, -2.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    rig.tick(idle());

    // Vertical speed cancelled, gravity compensation added for the tick
    assert!((rig.body.velocity.y - 9.81 * DT).abs() < EPSILON);
    // Pulled towards the wall
    assert!((rig.body.velocity.x + DT).abs() < EPSILON);
    assert_eq!(rig.state.wall_run_elapsed, DT);
    // Released jump while airborne, so the charge is waiting for later
    assert!(rig.state.has_double_jump_charge);
}

#[test]
fn test_air_steering_applies_during_wall_run() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    assert_vec_eq(rig.body.velocity, Vec3::new(0.0, 0.0, -7.0));

    // Pulling back brakes along the wall by the air acceleration
    let back = InputSnapshot {
        vertical: -1.0,
        ..default()
    };
    rig.tick(back);

    assert!(rig.state.wall_running);
    assert!((rig.body.velocity.z - (-7.0 + rig.tuning.air_acceleration)).abs() < EPSILON);
}

#[test]
fn test_no_double_jump_off_a_wall_run() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    let mut events = rig.tick(idle());
    events.extend(rig.tick(jump()));

    assert!(events.contains(&LocomotionEventKind::WallJumped));
    assert_eq!(count(&events, LocomotionEventKind::DoubleJumped), 0);

    // Releasing after the wall jump charges the double jump again
    rig.tick(idle());
    assert_eq!(rig.tick(jump()), vec![LocomotionEventKind::DoubleJumped]);
}

#[test]
fn test_wall_run_too_slow_pushes_off() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    rig.body.velocity = Vec3::new(0.0, 0.0, -0.2);
    rig.tilt.target = -20.0;
    let events = rig.tick(idle());

    assert!(!rig.state.wall_running);
    assert_eq!(rig.tilt.target, 0.0);
    assert_vec_eq(rig.body.velocity, Vec3::new(1.0, 0.0, -0.2));
    assert_eq!(
        events,
        vec![LocomotionEventKind::WallRunEnded {
            reason: WallRunEndReason::TooSlow
        }]
    );
}

#[test]
fn test_wall_jump_leaps_away_from_wall() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    let along = rig.body.velocity.z;

    let events = rig.tick(jump());

    assert!(!rig.state.wall_running);
    assert!(rig.state.just_jumped);
    assert_eq!(rig.tilt.target, 0.0);
    assert_vec_eq(rig.body.velocity, Vec3::new(1.0, rig.jump_speed(), along));
    assert_eq!(
        events,
        vec![
            LocomotionEventKind::WallJumped,
            LocomotionEventKind::WallRunEnded {
                reason: WallRunEndReason::Jumped
            },
        ]
    );
}

#[test]
fn test_wall_run_times_out() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.tuning.max_wall_run_time = 1.0;
    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    let mut events = Vec::new();
    for _ in 0..4 {
        events.extend(rig.tick(idle()));
    }

    assert!(!rig.state.wall_running);
    assert!(rig.state.wall_run_exhausted);
    assert_eq!(
        events,
        vec![
            LocomotionEventKind::WallRunTimeExceeded { elapsed: 1.0 },
            LocomotionEventKind::WallRunEnded {
                reason: WallRunEndReason::TimedOut
            },
        ]
    );

    // Same wall can't be run again until the player lets go or lands
    rig.contact(ContactPhase::Stay, wall(Vec3::X));
    assert!(!rig.state.wall_running);

    rig.contact(ContactPhase::Exit, ClassifiedSurface::NONE);
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    assert!(rig.state.wall_running);
}

#[test]
fn test_wall_run_timeout_can_only_report() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.tuning.max_wall_run_time = 1.0;
    rig.tuning.wall_run_timeout_ends_run = false;
    rig.contact(ContactPhase::Enter, wall(Vec3::X));

    let mut events = Vec::new();
    for _ in 0..8 {
        events.extend(rig.tick(idle()));
    }

    assert!(rig.state.wall_running);
    assert!(!rig.state.wall_run_exhausted);
    assert_eq!(
        events,
        vec![LocomotionEventKind::WallRunTimeExceeded { elapsed: 1.0 }]
    );
}

#[test]
fn test_landing_ends_wall_run() {
    let mut rig = Rig::airborne(Vec3::new(0.0, 0.0, -5.0));
    rig.contact(ContactPhase::Enter, wall(Vec3::X));
    rig.state.wall_run_exhausted = true;

    let events = rig.contact(ContactPhase::Stay, ground(Vec3::Y));

    assert!(rig.state.grounded);
    assert!(!rig.state.wall_running);
    assert!(!rig.state.wall_run_exhausted);
    assert_eq!(rig.tilt.target, 0.0);
    assert_eq!(
        events,
        vec![
            LocomotionEventKind::WallRunEnded {
                reason: WallRunEndReason::Landed
            },
            LocomotionEventKind::Landed,
        ]
    );
}
