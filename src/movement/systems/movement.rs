//! Movement domain: runs the locomotion state machine for each player.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::look::LookState;
use crate::movement::body::PlayerBody;
use crate::movement::contacts::ContactQueue;
use crate::movement::locomotion::{Locomotion, LocomotionEventKind};
use crate::movement::{LocomotionEvent, MovementInput, MovementState, MovementTuning, Player};

/// Applies the contacts buffered since the last tick, then steps the state
/// machine once with this tick's input.
pub(crate) fn drive_locomotion(
    time: Res<Time>,
    gravity: Res<Gravity>,
    tuning: Res<MovementTuning>,
    input: Res<MovementInput>,
    mut events: MessageWriter<LocomotionEvent>,
    mut query: Query<
        (
            Entity,
            &mut MovementState,
            &mut ContactQueue,
            &mut LookState,
            &mut LinearVelocity,
            &mut Transform,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (player, mut state, mut queue, mut look, mut velocity, mut transform) in &mut query {
        let contacts = queue.drain_resolved();
        let basis = look.movement_basis();

        let mut body = PlayerBody {
            velocity: &mut velocity,
            transform: &mut transform,
            mass: tuning.mass,
            dt,
        };
        let mut locomotion = Locomotion::new(&mut state, &tuning, &mut body, &mut *look)
            .with_gravity(gravity.0)
            .with_basis(basis);

        for contact in &contacts {
            locomotion.handle_contact(contact);
        }
        locomotion.tick(&input.snapshot, dt);

        for kind in std::mem::take(&mut locomotion.events) {
            events.write(LocomotionEvent { player, kind });
        }
    }
}

pub(crate) fn log_locomotion_events(mut events: MessageReader<LocomotionEvent>) {
    for event in events.read() {
        match event.kind {
            LocomotionEventKind::Respawned => {
                info!("Player {:?} fell out of bounds, respawned", event.player);
            }
            LocomotionEventKind::WallRunTimeExceeded { elapsed } => {
                info!(
                    "Player {:?}: maximum wall-run time reached ({:.2}s)",
                    event.player, elapsed
                );
            }
            kind => debug!("Player {:?}: {:?}", event.player, kind),
        }
    }
}
