//! Movement domain: first-person locomotion, wall-running and double jumps.

mod body;
mod components;
pub mod contacts;
mod events;
pub mod locomotion;
mod resources;
pub mod surface;
mod systems;
#[cfg(test)]
mod tests;

pub use components::{GameLayer, MovementMode, MovementState, Player};
pub use contacts::{ContactQueue, ContactTracker};
pub use events::LocomotionEvent;
pub use resources::{InputSnapshot, MovementInput, MovementTuning, Vec3Def};

use bevy::prelude::*;

use crate::movement::systems::{
    drive_locomotion, log_locomotion_events, read_input, track_contacts,
};

/// Ordering of the fixed-tick movement pipeline
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSystems {
    Input,
    Contacts,
    Locomotion,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<LocomotionEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    MovementSystems::Input,
                    MovementSystems::Contacts,
                    MovementSystems::Locomotion,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, read_input.in_set(MovementSystems::Input))
            .add_systems(FixedUpdate, track_contacts.in_set(MovementSystems::Contacts))
            .add_systems(
                FixedUpdate,
                drive_locomotion.in_set(MovementSystems::Locomotion),
            )
            .add_systems(Update, log_locomotion_events);
    }
}
