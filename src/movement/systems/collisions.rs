//! Movement domain: turning avian contact pairs into queued contact events.

use avian3d::prelude::*;
use bevy::ecs::entity::EntityHashSet;
use bevy::prelude::*;

use crate::movement::contacts::{ContactEvent, ContactPhase, ContactQueue, ContactTracker};
use crate::movement::surface::{ClassifiedSurface, classify};
use crate::movement::{MovementTuning, Player};

/// Diffs the colliders touching each player against the previous tick:
/// new pairs become enter events, persisting pairs stay events and vanished
/// pairs exit events.
pub(crate) fn track_contacts(
    collisions: Collisions,
    tuning: Res<MovementTuning>,
    layers_query: Query<&CollisionLayers>,
    mut query: Query<(Entity, &mut ContactTracker, &mut ContactQueue), With<Player>>,
) {
    let masks = tuning.surface_masks();

    for (player, mut tracker, mut queue) in &mut query {
        let mut touching = EntityHashSet::default();

        for pair in collisions.collisions_with(player) {
            if !pair.is_touching() {
                continue;
            }

            // Manifold normals point from collider1 to collider2, flip them
            // so they always face the player.
            let (other, flip) = if pair.collider1 == player {
                (pair.collider2, true)
            } else {
                (pair.collider1, false)
            };
            let normals = pair
                .manifolds
                .iter()
                .map(|manifold| if flip { -manifold.normal } else { manifold.normal });

            let other_layers = layers_query
                .get(other)
                .map(|layers| layers.memberships)
                .unwrap_or(CollisionLayers::default().memberships);

            let phase = if tracker.touching.contains(&other) {
                ContactPhase::Stay
            } else {
                ContactPhase::Enter
            };

            queue.push(ContactEvent {
                phase,
                other,
                surface: classify(normals, other_layers, &masks),
            });
            touching.insert(other);
        }

        for &other in tracker.touching.iter() {
            if !touching.contains(&other) {
                queue.push(ContactEvent {
                    phase: ContactPhase::Exit,
                    other,
                    surface: ClassifiedSurface::NONE,
                });
            }
        }

        tracker.touching = touching;
    }
}
