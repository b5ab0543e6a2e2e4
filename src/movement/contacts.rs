//! Movement domain: buffered contact events between two ticks.

use std::cmp::Ordering;

use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::movement::surface::ClassifiedSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContactPhase {
    Exit,
    Enter,
    Stay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    /// The collider the player touched or stopped touching.
    pub other: Entity,
    pub surface: ClassifiedSurface,
}

/// Contact events collected since the last tick.
#[derive(Component, Debug, Default)]
pub struct ContactQueue {
    events: Vec<ContactEvent>,
}

impl ContactQueue {
    pub fn push(&mut self, event: ContactEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Empties the queue into at most one event per phase, ordered exit,
    /// enter, stay. Within a phase the best surface wins.
    pub fn drain_resolved(&mut self) -> Vec<ContactEvent> {
        let mut resolved: Vec<ContactEvent> = Vec::with_capacity(3);

        for event in self.events.drain(..) {
            match resolved.iter_mut().find(|e| e.phase == event.phase) {
                Some(current) => {
                    if outranks(&event, current) {
                        *current = event;
                    }
                }
                None => resolved.push(event),
            }
        }

        resolved.sort_by_key(|e| e.phase);
        resolved
    }
}

/// Ground beats walls beats anything else, then the flatter normal, then the
/// lower entity so the result never depends on arrival order.
fn outranks(candidate: &ContactEvent, current: &ContactEvent) -> bool {
    let by_kind = candidate
        .surface
        .kind
        .priority()
        .cmp(&current.surface.kind.priority());
    let by_normal = candidate
        .surface
        .normal
        .y
        .partial_cmp(&current.surface.normal.y)
        .unwrap_or(Ordering::Equal);
    let by_entity = current.other.cmp(&candidate.other);

    by_kind.then(by_normal).then(by_entity) == Ordering::Greater
}

/// Colliders the player was touching at the end of the previous tick.
#[derive(Component, Debug, Default)]
pub struct ContactTracker {
    pub touching: EntityHashSet,
}
