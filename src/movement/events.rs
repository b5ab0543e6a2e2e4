//! Movement domain: locomotion telemetry events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::locomotion::LocomotionEventKind;

/// Emitted for every notable locomotion transition of a player
#[derive(Debug)]
pub struct LocomotionEvent {
    pub player: Entity,
    pub kind: LocomotionEventKind,
}

impl Message for LocomotionEvent {}
