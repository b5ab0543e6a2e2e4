//! Arena domain: a static practice course and the player rig.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::look::{LookState, PlayerCamera};
use crate::movement::{
    ContactQueue, ContactTracker, GameLayer, MovementState, MovementTuning, Player,
};

pub(crate) const PLAYER_RADIUS: f32 = 0.5;
pub(crate) const PLAYER_LENGTH: f32 = 1.0;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_course, spawn_player).chain());
    }
}

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    let spawn_point: Vec3 = tuning.respawn_point.into();

    let player = commands
        .spawn((
            // Identity & Movement
            (
                Player,
                MovementState::default(),
                LookState::default(),
                ContactQueue::default(),
                ContactTracker::default(),
            ),
            Transform::from_translation(spawn_point),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::capsule(PLAYER_RADIUS, PLAYER_LENGTH),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Mass(tuning.mass),
                Friction::new(0.0).with_combine_rule(CoefficientCombine::Min),
                Restitution::new(0.0),
                SweptCcd::default(),
                CollisionLayers::new(
                    GameLayer::Player,
                    [GameLayer::Default, GameLayer::Ground, GameLayer::WallRun],
                ),
            ),
            Name::new("Player"),
        ))
        .id();

    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 90.0_f32.to_radians(),
            ..default()
        }),
        Transform::from_translation(spawn_point),
        PlayerCamera { target: player },
        Name::new("PlayerCamera"),
    ));

    info!(
        "Spawned player at {:?}: radius={}, length={}, mass={}",
        spawn_point, PLAYER_RADIUS, PLAYER_LENGTH, tuning.mass
    );
}

pub(crate) fn spawn_course(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_material = materials.add(Color::srgb(0.4, 0.5, 0.4));
    let platform_material = materials.add(Color::srgb(0.5, 0.4, 0.3));
    let wall_material = materials.add(Color::srgb(0.3, 0.3, 0.45));

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::WallRun, [GameLayer::Player]);

    let mut block = |size: Vec3,
                     position: Vec3,
                     material: &Handle<StandardMaterial>,
                     layers: CollisionLayers| {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            layers,
        ));
    };

    // Starting floor, top face at y = -1
    block(
        Vec3::new(40.0, 1.0, 40.0),
        Vec3::new(0.0, -1.5, 0.0),
        &ground_material,
        ground_layers,
    );

    // Landing island across the pit
    block(
        Vec3::new(20.0, 1.0, 20.0),
        Vec3::new(7.0, -1.5, -60.0),
        &ground_material,
        ground_layers,
    );

    // Parallel walls spanning the pit
    for x in [2.0, 12.0] {
        block(
            Vec3::new(1.0, 8.0, 30.0),
            Vec3::new(x, 3.0, -35.0),
            &wall_material,
            wall_layers,
        );
    }

    // Single wall beside the floor, for wall jumps back onto it
    block(
        Vec3::new(1.0, 10.0, 16.0),
        Vec3::new(-19.5, 4.0, -4.0),
        &wall_material,
        wall_layers,
    );

    // Step platforms for double jump practice
    for (size, position) in [
        (Vec3::new(4.0, 1.0, 4.0), Vec3::new(-6.0, 0.0, 4.0)),
        (Vec3::new(4.0, 1.0, 4.0), Vec3::new(-12.0, 2.0, 8.0)),
        (Vec3::new(3.0, 1.0, 3.0), Vec3::new(-12.0, 5.0, 14.0)),
    ] {
        block(size, position, &platform_material, ground_layers);
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 10_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
